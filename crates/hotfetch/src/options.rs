// ABOUTME: Configuration options for the HotFetch engine and the HotFetchBuilder.
// ABOUTME: Options only affect URL loading; extraction has no tunables beyond each descriptor.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::HotFetch;
use crate::resource::MAX_CONTENT_LENGTH;

/// Configuration options for the HotFetch engine.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub max_content_length: usize,
    /// Replaces the engine's own HTTP client. `timeout` and `user_agent` are
    /// then up to the supplied client.
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "HotFetch/1.0".to_string(),
            headers: HashMap::new(),
            max_content_length: MAX_CONTENT_LENGTH,
            http_client: None,
        }
    }
}

/// Builder for constructing HotFetch instances with custom configuration.
#[derive(Debug, Clone)]
pub struct HotFetchBuilder {
    opts: Options,
}

impl HotFetchBuilder {
    /// Create a new HotFetchBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Cap the size of fetched documents.
    pub fn max_content_length(mut self, bytes: usize) -> Self {
        self.opts.max_content_length = bytes;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the engine with the configured options.
    pub fn build(self) -> HotFetch {
        HotFetch::with_options(self.opts)
    }
}

impl Default for HotFetchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
