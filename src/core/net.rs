use crate::core::AlError;

/// Fail with `AlError::Status` unless the response is 2xx.
pub(crate) fn ensure_success(
    resp: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, AlError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(AlError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        })
    }
}

/// Read the response body as text.
/// In `test-mode`, if `AL_RECORD=1`, the body is saved as a fixture.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _caller: &str,
    _key: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    record(_caller, _key, _ext, text.as_bytes());

    Ok(text)
}

/// Read the response body as raw bytes, with the same recording hook as [`get_text`].
pub(crate) async fn get_bytes(
    resp: reqwest::Response,
    _caller: &str,
    _key: &str,
    _ext: &str,
) -> Result<Vec<u8>, reqwest::Error> {
    let bytes = resp.bytes().await?.to_vec();

    #[cfg(feature = "test-mode")]
    record(_caller, _key, _ext, &bytes);

    Ok(bytes)
}

#[cfg(feature = "test-mode")]
fn record(caller: &str, key: &str, ext: &str, body: &[u8]) {
    use crate::core::fixtures;

    if fixtures::recording_enabled()
        && let Err(_e) = fixtures::record_fixture(caller, key, ext, body)
    {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %_e, caller, "AL_RECORD: failed to write fixture");
    }
}
