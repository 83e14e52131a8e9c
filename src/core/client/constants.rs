//! Centralized constants for default endpoints and UA.

/// Identifies the crate to upstream portals.
pub(crate) const USER_AGENT: &str = concat!("aletheia-rs/", env!("CARGO_PKG_VERSION"));

/// datos.gob.do CKAN dataset listing base (dataset id is appended).
pub(crate) const DEFAULT_BASE_DATASETS: &str = "https://datos.gob.do/dataset/";

/// DGII mobile web service (SOAP 1.2).
pub(crate) const DEFAULT_BASE_DGII: &str = "https://dgii.gov.do/wsMovilDGII/WSMovilDGII.asmx";

/// XML namespace of the DGII service operations.
pub(crate) const DGII_NAMESPACE: &str = "http://dgii.gov.do/";

/// digital.gob.do REST gateway (fuel prices, territories, ID validation).
pub(crate) const DEFAULT_BASE_DIGITAL: &str = "https://api.digital.gob.do/";

/// CSS class carried by the download anchors on a CKAN dataset page.
pub(crate) const DEFAULT_ANCHOR_MARKER: &str = "resource-url-analytics";

/// Resource format the dataset portal resolves by default.
pub(crate) const DEFAULT_RESOURCE_FORMAT: &str = "csv";
