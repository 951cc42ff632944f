// Console backend HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token
// injection, busy-signal bookkeeping, and `{Code, Data, Message}`
// envelope unwrapping. Endpoint modules (devices) are implemented as
// inherent methods in separate files to keep this module focused on
// request mechanics.

use arc_swap::ArcSwapOption;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::busy::BusySignal;
use crate::error::Error;
use crate::models::Envelope;
use crate::transport::ClientConfig;

/// HTTP client for the console backend.
///
/// Every request reads the current bearer token from the shared slot
/// (so a login elsewhere takes effect immediately), holds a
/// [`BusyGuard`](crate::BusyGuard) for its lifetime, and returns the
/// unwrapped envelope `Data`; callers never see the envelope itself.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ArcSwapOption<SecretString>,
    busy: BusySignal,
}

impl ApiClient {
    /// Create a new client from a `ClientConfig`.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: ArcSwapOption::empty(),
            busy: BusySignal::new(),
        })
    }

    /// Wrap a pre-built `reqwest::Client`.
    ///
    /// The base URL is normalized to end with `/` so relative joins
    /// work. Useful in tests where the client needs custom settings.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let config = ClientConfig::new(base_url)?;
        Ok(Self {
            http,
            base_url: config.base_url,
            token: ArcSwapOption::empty(),
            busy: BusySignal::new(),
        })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The busy signal spanning all in-flight requests.
    pub fn busy(&self) -> &BusySignal {
        &self.busy
    }

    // ── Token slot ───────────────────────────────────────────────────

    /// Install the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(token.into()));
    }

    /// Drop the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_token(&self) {
        self.token.store(None);
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Join a relative path (e.g. `"device/fetch"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Start a request, attaching the bearer token if one is set.
    fn prepare(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(token) = self.token.load_full() {
            req = req.bearer_auth(token.expose_secret());
        }
        req
    }

    /// Send a GET request and unwrap the envelope, requiring `Data`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let _guard = self.busy.acquire();
        let resp = self.prepare(Method::GET, url).query(params).send().await?;

        match self.parse_envelope(resp).await? {
            (Some(data), _) => Ok(data),
            (None, body) => Err(Error::Deserialization {
                message: "envelope missing Data field".into(),
                body,
            }),
        }
    }

    /// Send a POST request with JSON body, discarding any `Data`.
    pub(crate) async fn post_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let _guard = self.busy.acquire();
        let resp = self.prepare(Method::POST, url).json(body).send().await?;

        self.parse_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }

    /// Send a DELETE request, discarding any `Data`.
    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let _guard = self.busy.acquire();
        let resp = self.prepare(Method::DELETE, url).send().await?;

        self.parse_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }

    /// Classify the HTTP status, then decode the `{Code, Data, Message}`
    /// envelope into a discriminated result. The raw body is returned
    /// alongside the payload so callers can report it on decode gaps.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<(Option<T>, String), Error> {
        let status = resp.status();

        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = resp.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        Ok((envelope.into_result()?, body))
    }
}
