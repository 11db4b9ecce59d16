use serde_json::Value;

/// Profile payload posted to `/profile/put`, sent verbatim
pub type ProfileData = Value;

/// Executor statistics posted to `/internal/stat/submit`, sent verbatim
pub type StatsSubmission = Value;
