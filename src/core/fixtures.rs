//! Test/recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("AL_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

pub(crate) fn recording_enabled() -> bool {
    env::var("AL_RECORD").ok().as_deref() == Some("1")
}

/// Writes `body` to `<fixture dir>/<caller>_<key>.<ext>`.
/// `key` is sanitized so that a URL can be used directly.
pub(crate) fn record_fixture(
    caller: &str,
    key: &str,
    ext: &str,
    body: &[u8],
) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let key: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{caller}_{key}.{ext}"));
    fs::write(&path, body)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), "AL_RECORD: wrote fixture");

    Ok(())
}
