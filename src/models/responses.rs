use serde_json::Value;

/// Body of `/profile/get`, returned unchanged
pub type ProfileResponse = Value;

/// Body of `/run`, returned unchanged
pub type RunResponse = Value;

/// Body of `/internal/stat/collect`, returned unchanged
pub type StatsResponse = Value;
