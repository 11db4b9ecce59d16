//! sqlsmith-client - HTTP client for the sqlsmith control server
//!
//! Wraps the server's profile, run and statistics endpoints. Response bodies
//! are passed through as JSON without interpretation; typed views of the
//! profile and statistics documents are available in [`models`].

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{Settings, SettingsError, DEFAULT_BASE_URL};
pub use models::{Profile, ProfileData, ProfileResponse, RunResponse, StatsResponse, StatsSnapshot};
pub use services::{RequestClient, RequestError};
