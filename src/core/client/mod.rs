//! Public client surface + builder.
//! Internals are split into `auth` (bearer token) and `constants` (UA + defaults).

mod auth;
pub(crate) mod constants;

use crate::core::AlError;
use crate::tabular::{LegacyCodepage, TextDecoding};
use constants::{DEFAULT_BASE_DATASETS, DEFAULT_BASE_DGII, DEFAULT_BASE_DIGITAL, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Holds a configured HTTP client, the optional API key and every base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AlClient {
    http: Client,
    api_key: Option<String>,
    base_datasets: Url,
    base_dgii: Url,
    base_digital: Url,
    text_decoding: Arc<dyn TextDecoding>,
}

impl Default for AlClient {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl AlClient {
    /// Create a new builder.
    pub fn builder() -> AlClientBuilder {
        AlClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_datasets(&self) -> &Url {
        &self.base_datasets
    }
    pub(crate) fn base_dgii(&self) -> &Url {
        &self.base_dgii
    }
    pub(crate) fn base_digital(&self) -> &Url {
        &self.base_digital
    }
    pub(crate) fn text_decoding(&self) -> &dyn TextDecoding {
        self.text_decoding.as_ref()
    }

    /// Whether an API key will be sent with REST calls.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct AlClientBuilder {
    user_agent: Option<String>,
    api_key: Option<String>,
    base_datasets: Option<Url>,
    base_dgii: Option<Url>,
    base_digital: Option<Url>,
    text_decoding: Option<Arc<dyn TextDecoding>>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl AlClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Bearer token sent as `Authorization: Bearer <key>` on REST calls.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the dataset listing base (e.g., `https://datos.gob.do/dataset/`).
    pub fn base_datasets(mut self, url: Url) -> Self {
        self.base_datasets = Some(url);
        self
    }

    /// Override the DGII SOAP endpoint (e.g., `https://dgii.gov.do/wsMovilDGII/WSMovilDGII.asmx`).
    pub fn base_dgii(mut self, url: Url) -> Self {
        self.base_dgii = Some(url);
        self
    }

    /// Override the REST gateway base (e.g., `https://api.digital.gob.do/`).
    pub fn base_digital(mut self, url: Url) -> Self {
        self.base_digital = Some(url);
        self
    }

    /// Replace the text decoding applied to downloaded tabular resources.
    /// Default: ISO-8859-2.
    pub fn text_decoding(mut self, decoding: impl TextDecoding + 'static) -> Self {
        self.text_decoding = Some(Arc::new(decoding));
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<AlClient, AlError> {
        let base_datasets = match self.base_datasets {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_DATASETS)?,
        };
        let base_dgii = match self.base_dgii {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_DGII)?,
        };
        let base_digital = match self.base_digital {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_DIGITAL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(AlClient {
            http,
            api_key: self.api_key.filter(|k| !k.is_empty()),
            base_datasets,
            base_dgii,
            base_digital,
            text_decoding: self
                .text_decoding
                .unwrap_or_else(|| Arc::new(LegacyCodepage::default())),
        })
    }
}
