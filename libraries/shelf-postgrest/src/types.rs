//! Configuration for the store client.

use std::time::Duration;

/// Path under the project URL where `PostgREST` is mounted on Supabase.
pub const DEFAULT_REST_PATH: &str = "/rest/v1";

/// Configuration for connecting to a `PostgREST` store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the project (e.g., "https://project.supabase.co")
    pub url: String,
    /// Service key, sent as `apikey` and as a bearer token
    pub service_key: String,
    /// Path of the REST endpoint below `url`
    pub rest_path: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a config with default path and timeouts.
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service_key: service_key.into(),
            rest_path: DEFAULT_REST_PATH.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Use a different REST path; an empty path means the URL itself.
    pub fn with_rest_path(mut self, rest_path: impl Into<String>) -> Self {
        self.rest_path = rest_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
