// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, DriverKind, StmtProb, DebugOptions, StatsSnapshot, ExecutorStats, ExecutionResults, Performance, SystemUsage};
pub use requests::{ProfileData, StatsSubmission};
pub use responses::{ProfileResponse, RunResponse, StatsResponse};
