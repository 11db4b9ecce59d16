use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Database driver a run is executed against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverKind {
    #[default]
    SqliteInMem,
    LimboInMem,
}

impl DriverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverKind::SqliteInMem => "SQLITE_IN_MEM",
            DriverKind::LimboInMem => "LIMBO_IN_MEM",
        }
    }
}

/// Typed view of the run profile stored by the server
///
/// Every field is optional on the wire. Fields this type does not know are
/// kept in `extra` so converting back with [`Profile::to_value`] loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<DriverKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_per_exec: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stmt_prob: Option<StmtProb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Relative weight of each generated statement kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StmtProb {
    #[serde(default)]
    pub delete: u64,
    #[serde(default)]
    pub select: u64,
    #[serde(default)]
    pub insert: u64,
    #[serde(default)]
    pub update: u64,
    #[serde(default)]
    pub vacuum: u64,
    #[serde(default)]
    pub pragma: u64,
    #[serde(default)]
    pub create_trigger: u64,
    #[serde(default)]
    pub drop_trigger: u64,
    #[serde(default)]
    pub date_func: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOptions {
    #[serde(default)]
    pub show_success_sql: bool,
    #[serde(default)]
    pub show_failed_sql: bool,
}

impl Profile {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Profile::deserialize(value)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// One-line `key=value` description, filling gaps with the server defaults
    pub fn summary(&self) -> String {
        let mut items = vec![
            format!("driver={}", self.driver.unwrap_or_default().as_str()),
            format!("count={}", self.count.unwrap_or(8)),
            format!("executor_count={}", self.executor_count.unwrap_or(5)),
            format!("thread_per_exec={}", self.thread_per_exec.unwrap_or(5)),
        ];
        if let Some(seed) = self.seed {
            items.push(format!("seed={}", seed));
        }
        if let Some(prob) = &self.stmt_prob {
            items.push(format!("SELECT={}", prob.select));
            items.push(format!("INSERT={}", prob.insert));
            items.push(format!("UPDATE={}", prob.update));
            items.push(format!("VACUUM={}", prob.vacuum));
            items.push(format!("DELETE={}", prob.delete));
            items.push(format!("PRAGMA={}", prob.pragma));
            items.push(format!("CREATE_TRIGGER={}", prob.create_trigger));
            items.push(format!("DROP_TRIGGER={}", prob.drop_trigger));
            items.push(format!("DATE_FUNC={}", prob.date_func));
        }
        if let Some(debug) = &self.debug {
            items.push(format!("show_success_sql={}", debug.show_success_sql));
            items.push(format!("show_failed_sql={}", debug.show_failed_sql));
        }
        items.join(", ")
    }
}

/// Typed view of the statistics document served by `/internal/stat/collect`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub executor_stats: ExecutorStats,
    #[serde(default)]
    pub execution_results: ExecutionResults,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub system: SystemUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorStats {
    #[serde(default)]
    pub total_executors: u32,
    #[serde(default)]
    pub active_executors: u32,
    #[serde(default)]
    pub completed_executors: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResults {
    #[serde(default)]
    pub total_queries: u64,
    #[serde(default)]
    pub successful_queries: u64,
    #[serde(default)]
    pub failed_queries: u64,
    /// Percentage of failed queries, 0-100
    #[serde(default)]
    pub error_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub avg_execution_time_ms: f64,
    #[serde(default)]
    pub queries_per_second: f64,
    #[serde(default)]
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemUsage {
    #[serde(default)]
    pub memory_usage_mb: f64,
    #[serde(default)]
    pub cpu_usage_percent: f64,
}

impl StatsSnapshot {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        StatsSnapshot::deserialize(value)
    }
}
