use crate::config::{Settings, DEFAULT_BASE_URL};
use crate::models::{ProfileData, ProfileResponse, RunResponse, StatsResponse, StatsSubmission};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const PROFILE_GET_PATH: &str = "/profile/get";
pub const PROFILE_PUT_PATH: &str = "/profile/put";
pub const RUN_PATH: &str = "/run";
pub const STATS_COLLECT_PATH: &str = "/internal/stat/collect";
pub const STATS_SUBMIT_PATH: &str = "/internal/stat/submit";

/// Errors that can occur when talking to the sqlsmith server
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network failure, non-success status or unreadable body
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RequestError {
    /// HTTP status returned by the server, if the failure carried one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Whether an operation produced this error, meaning it has already been logged.
    /// Construction errors are not logged by the client.
    pub fn is_operation_failure(&self) -> bool {
        matches!(self, RequestError::Http(_))
    }
}

/// Client for the sqlsmith control server
///
/// Each operation performs exactly one request. Failures are logged once,
/// naming the operation, and handed back to the caller as they came from the
/// HTTP layer. Nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct RequestClient {
    base_url: String,
    client: Client,
}

impl RequestClient {
    /// Create a client for the given base URL with no request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RequestError> {
        let base_url = normalize_base_url(base_url.into())?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RequestError::Client)?;

        Ok(Self { base_url, client })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RequestError> {
        Self::with_timeout(
            settings.server.base_url.clone(),
            settings.server.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Client for a server running on the local default address
    pub fn default_local() -> Result<Self, RequestError> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current run profile
    ///
    /// GET /profile/get
    pub async fn fetch_profile(&self) -> Result<ProfileResponse, RequestError> {
        self.get_body(PROFILE_GET_PATH)
            .await
            .inspect_err(|e| tracing::error!(operation = "fetch_profile", "Failed to fetch profile: {}", e))
    }

    /// Replace the run profile
    ///
    /// POST /profile/put. The server's reply body is discarded.
    pub async fn update_profile(&self, profile: &ProfileData) -> Result<(), RequestError> {
        tracing::debug!("Updating profile: {}", profile);

        self.post_json(PROFILE_PUT_PATH, profile)
            .await
            .inspect_err(|e| tracing::error!(operation = "update_profile", "Failed to update profile: {}", e))
    }

    /// Trigger a run on the server
    ///
    /// GET /run
    pub async fn run_request(&self) -> Result<RunResponse, RequestError> {
        self.get_body(RUN_PATH)
            .await
            .inspect_err(|e| tracing::error!(operation = "run_request", "Failed to execute run request: {}", e))
    }

    /// Fetch server statistics
    ///
    /// GET /internal/stat/collect
    pub async fn fetch_stats(&self) -> Result<StatsResponse, RequestError> {
        self.get_body(STATS_COLLECT_PATH)
            .await
            .inspect_err(|e| tracing::error!(operation = "fetch_stats", "Failed to fetch stats: {}", e))
    }

    /// Submit executor statistics
    ///
    /// POST /internal/stat/submit. The server's reply body is discarded.
    pub async fn submit_stats(&self, stats: &StatsSubmission) -> Result<(), RequestError> {
        self.post_json(STATS_SUBMIT_PATH, stats)
            .await
            .inspect_err(|e| tracing::error!(operation = "submit_stats", "Failed to submit stats: {}", e))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_body(&self, path: &str) -> Result<Value, RequestError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;

        decode_body(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), RequestError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("POST {} -> {}", url, response.status());

        Ok(())
    }
}

fn normalize_base_url(base_url: String) -> Result<String, RequestError> {
    let parsed = Url::parse(&base_url)
        .map_err(|e| RequestError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RequestError::InvalidBaseUrl(format!(
            "{}: unsupported scheme {}",
            base_url,
            parsed.scheme()
        )));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

async fn decode_body(response: Response) -> Result<Value, RequestError> {
    let bytes = response.bytes().await?;
    Ok(decode_bytes(&bytes))
}

/// JSON when the body parses, the raw text otherwise, null when empty
fn decode_bytes(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_client_creation() {
        let client = RequestClient::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        assert_eq!(client.url(RUN_PATH), "http://127.0.0.1:8080/run");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = RequestClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.url(PROFILE_GET_PATH), "http://localhost:9000/profile/get");
    }

    #[test]
    fn test_default_local() {
        let client = RequestClient::default_local().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = RequestClient::new("127.0.0.1 8080").unwrap_err();
        assert!(matches!(err, RequestError::InvalidBaseUrl(_)));
        assert!(err.status().is_none());

        let err = RequestClient::new("ftp://127.0.0.1").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ftp"));
        assert!(!err.is_operation_failure());
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.server.base_url = "https://stats.internal:8443".to_string();
        settings.server.timeout_secs = Some(5);

        let client = RequestClient::from_settings(&settings).unwrap();
        assert_eq!(client.base_url(), "https://stats.internal:8443");
    }

    #[test]
    fn test_decode_json_body() {
        assert_eq!(decode_bytes(br#"{"name":"alice"}"#), json!({"name": "alice"}));
        assert_eq!(decode_bytes(b"[1,2,3]"), json!([1, 2, 3]));
    }

    #[test]
    fn test_decode_text_body() {
        assert_eq!(decode_bytes(b"Done!"), json!("Done!"));
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode_bytes(b""), Value::Null);
        assert_eq!(decode_bytes(b" \n"), Value::Null);
    }
}
