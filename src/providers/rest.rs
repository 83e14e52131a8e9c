use async_trait::async_trait;
use url::Url;

use super::Provider;
use crate::core::{AlClient, AlError, ResultEnvelope};
use crate::transport;

/// A JSON REST API below one base URL, called with the client's bearer token.
#[derive(Debug, Clone)]
pub struct RestProvider {
    client: AlClient,
    name: String,
    base: Url,
}

impl RestProvider {
    /// `base` should end with `/` so that endpoints are joined below it.
    pub fn new(client: &AlClient, name: impl Into<String>, base: Url) -> Self {
        Self {
            client: client.clone(),
            name: name.into(),
            base,
        }
    }

    /// Full URL of `endpoint` with `params` encoded as the query string.
    ///
    /// # Errors
    ///
    /// `AlError::Url` if `endpoint` cannot be joined to the base.
    pub fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, AlError> {
        let mut url = self.base.join(endpoint.trim_start_matches('/'))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        Ok(url)
    }

    /// Like [`url`](Self::url), but every element of `segments` becomes exactly
    /// one path segment, so caller values cannot climb out of the base.
    ///
    /// # Errors
    ///
    /// See [`transport::join_segments`].
    pub fn segments_url(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url, AlError> {
        let mut url = transport::join_segments(&self.base, segments)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        Ok(url)
    }

    /// GET the URL built by [`segments_url`](Self::segments_url).
    ///
    /// # Errors
    ///
    /// `AlError::InvalidParams` for an unusable segment, otherwise see
    /// [`AlClient::fetch_data`].
    pub async fn fetch_segments(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError> {
        let url = self.segments_url(segments, params)?;
        self.client.fetch_data(url.as_str()).await
    }
}

#[async_trait]
impl Provider for RestProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ResultEnvelope, AlError> {
        let url = self.url(endpoint, params)?;
        self.client.fetch_data(url.as_str()).await
    }
}
