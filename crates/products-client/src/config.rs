//! Products service client configuration.

use std::time::Duration;

/// Connection settings for the products service.
///
/// Timeouts are external configuration, not client logic: whoever builds
/// the client decides how long a single attempt may take.
#[derive(Debug, Clone)]
pub struct ProductsClientConfig {
    /// Base URL of the products service, e.g. `http://localhost:8081`.
    pub base_url: String,
    /// Shared secret sent as `X-API-KEY` on every request.
    pub api_key: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl ProductsClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            connect_timeout: Duration::from_millis(2000),
            read_timeout: Duration::from_millis(2000),
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }
}
