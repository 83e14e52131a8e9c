//! One HTTP call in, one [`ResultEnvelope`] out.
//!
//! Bodies are decoded as JSON unless the request's `Content-Type` names an
//! XML flavour (`application/soap+xml`, `text/xml`, ...), in which case the
//! text is returned untouched for the caller to parse. There are no retries
//! and no timeout beyond what the client was built with.

use crate::core::{AlClient, AlError, Payload, ResultEnvelope, net};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use url::Url;

/// Hostname of `url`, used as the provider attribution of a result.
///
/// # Errors
///
/// Fails if `url` does not parse or has no host (e.g. `mailto:` or `file:///`).
pub fn provider_host(url: &str) -> Result<String, AlError> {
    let parsed = Url::parse(url)?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| AlError::MissingHost {
            url: url.to_string(),
        })
}

/// Append `segments` below `base`, each as exactly one path segment.
///
/// A trailing empty segment of `base` (`.../dataset/`) is replaced, so the
/// result never contains `//`.
///
/// # Errors
///
/// `AlError::InvalidParams` for an empty, `.` or `..` segment, one containing
/// `/`, `\`, `?` or `#`, or a base that cannot take a path.
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, AlError> {
    if let Some(bad) = segments.iter().find(|s| {
        s.is_empty() || **s == "." || **s == ".." || s.contains(['/', '\\', '?', '#'])
    }) {
        return Err(AlError::InvalidParams(format!(
            "`{bad}` is not a usable path segment"
        )));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| AlError::InvalidParams(format!("`{base}` cannot take path segments")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Whether a request with these headers expects a text (XML/SOAP) body back.
pub fn expects_text(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("xml"))
}

/// Performs one HTTP call and wraps the decoded body.
///
/// # Errors
///
/// Returns a transport-family [`AlError`] when the URL is malformed, the
/// request fails, the status is not 2xx, or a JSON body does not parse.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, method, headers, body), err, fields(method = %method))
)]
pub async fn call(
    client: &AlClient,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Option<String>,
) -> Result<ResultEnvelope, AlError> {
    let (status, envelope) = exchange(client, method, url, headers, body).await?;
    if !status.is_success() {
        return Err(AlError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(envelope)
}

/// Like [`call`], but a non-2xx response whose body is expected as text is
/// handed back together with its status instead of failing. The SOAP
/// adapter needs this: SOAP 1.2 delivers Faults with 4xx/5xx statuses.
pub(crate) async fn exchange(
    client: &AlClient,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Option<String>,
) -> Result<(StatusCode, ResultEnvelope), AlError> {
    let provider_host = provider_host(url)?;
    let as_text = expects_text(&headers);

    let mut req = client.http().request(method, url).headers(headers);
    if let Some(b) = body {
        req = req.body(b);
    }
    let resp = req.send().await?;
    let status = resp.status();

    let resp = if as_text {
        resp
    } else {
        net::ensure_success(resp, url)?
    };

    let ext = if as_text { "xml" } else { "json" };
    let text = net::get_text(resp, "transport", url, ext).await?;

    let payload = if as_text {
        Payload::Text(text)
    } else if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        Payload::Json(serde_json::Value::Null)
    } else {
        let value = serde_json::from_str(&text).map_err(|e| AlError::Body {
            url: url.to_string(),
            reason: format!("json parse: {e}"),
        })?;
        Payload::Json(value)
    };

    Ok((
        status,
        ResultEnvelope {
            payload,
            provider_host,
            endpoint: url.to_string(),
        },
    ))
}

impl AlClient {
    /// GET `url` with the configured bearer token. The single entry point of
    /// the REST providers.
    ///
    /// # Errors
    ///
    /// See [`call`].
    pub async fn fetch_data(&self, url: &str) -> Result<ResultEnvelope, AlError> {
        call(self, Method::GET, url, self.auth_headers(), None).await
    }

    /// GET `url` with exactly the given headers.
    ///
    /// # Errors
    ///
    /// See [`call`].
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<ResultEnvelope, AlError> {
        call(self, Method::GET, url, headers, None).await
    }

    /// POST `body` to `url`.
    ///
    /// # Errors
    ///
    /// See [`call`].
    pub async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: impl Into<String>,
    ) -> Result<ResultEnvelope, AlError> {
        call(self, Method::POST, url, headers, Some(body.into())).await
    }

    /// PUT `value` to `url` as a JSON document.
    ///
    /// # Errors
    ///
    /// See [`call`]; also fails if `value` cannot be serialized.
    pub async fn put_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        mut headers: HeaderMap,
        value: &T,
    ) -> Result<ResultEnvelope, AlError> {
        let body = serde_json::to_string(value)
            .map_err(|e| AlError::InvalidParams(format!("request body: {e}")))?;
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));
        call(self, Method::PUT, url, headers, Some(body)).await
    }

    /// DELETE `url`.
    ///
    /// # Errors
    ///
    /// See [`call`].
    pub async fn delete(&self, url: &str, headers: HeaderMap) -> Result<ResultEnvelope, AlError> {
        call(self, Method::DELETE, url, headers, None).await
    }
}
