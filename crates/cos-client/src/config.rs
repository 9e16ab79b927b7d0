//! Client configuration

use std::time::Duration;

/// Default REST endpoint, without a trailing slash
pub const DEFAULT_ENDPOINT: &str = "http://web.file.myqcloud.com/files/v1";

/// Default slice size for resumable uploads (512 KiB)
pub const DEFAULT_SLICE_SIZE: u64 = 512 * 1024;

/// Default lifetime of multi-use tokens, in seconds
pub const DEFAULT_SIGN_SECONDS: i64 = 60;

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// REST endpoint URL
    pub endpoint: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Lifetime of multi-use tokens (seconds)
    pub sign_seconds: i64,
    /// Slice size used when the caller does not pick one (bytes)
    pub slice_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!(
                "cos-client/{} ({}-{})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH,
            ),
            timeout: Duration::from_secs(30),
            sign_seconds: DEFAULT_SIGN_SECONDS,
            slice_size: DEFAULT_SLICE_SIZE,
        }
    }
}

impl Config {
    /// Create a new config with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::default().with_endpoint(endpoint)
    }

    /// Set the endpoint; trailing slashes are dropped
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the multi-use token lifetime
    pub fn with_sign_seconds(mut self, seconds: i64) -> Self {
        self.sign_seconds = seconds;
        self
    }

    /// Set the default slice size
    pub fn with_slice_size(mut self, slice_size: u64) -> Self {
        self.slice_size = slice_size;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.endpoint
    }
}
