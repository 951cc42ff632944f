// Client construction settings shared by every ApiClient instance.
//
// The base URL is environment-dependent (dev proxy vs. production) and
// resolved by devctl-config before it reaches this crate; here it only
// has to be absolute and end with `/` so relative joins work.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::error::Error;

/// Default request timeout. Enforced by the HTTP client only; there is
/// no application-level deadline on top of it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for building an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute backend root, e.g. `http://127.0.0.1:5173/api/`.
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config from a base URL string, normalizing the path to
    /// end with `/`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: url, timeout: DEFAULT_TIMEOUT })
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Every request carries a JSON content type and the devctl user
    /// agent by default.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("devctl/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(client)
    }
}
