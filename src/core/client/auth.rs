//! Bearer-token attachment for REST endpoints.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

impl super::AlClient {
    /// Header map carrying `Authorization: Bearer <key>` when a key is configured.
    /// A key that is not a valid header value is left out rather than sent mangled.
    pub(crate) fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {key}"))
        {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}
