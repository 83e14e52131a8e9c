use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Variants fall into four families: transport failures, SOAP protocol
/// failures, dataset resolution finding nothing, and tabular decode
/// failures. Use the `is_*` helpers to branch on the family.
#[derive(Debug, Error)]
pub enum AlError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The URL parsed but carries no hostname to attribute the result to.
    #[error("URL has no host: {url}")]
    MissingHost {
        /// The offending URL.
        url: String,
    },

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The response body could not be decoded as the expected representation.
    #[error("Unparseable response body from {url}: {reason}")]
    Body {
        /// The URL whose body failed to decode.
        url: String,
        /// Decoder message.
        reason: String,
    },

    /// The SOAP service answered, but not in the expected
    /// `Envelope/Body/{Op}Response/{Op}Result` shape.
    #[error("SOAP protocol error: {0}")]
    Protocol(String),

    /// The SOAP service answered with a Fault.
    #[error("SOAP fault ({code}): {reason}")]
    SoapFault {
        /// `Code/Value` of the fault, e.g. `soap:Receiver`.
        code: String,
        /// `Reason/Text` of the fault.
        reason: String,
    },

    /// The dataset page listed no resource of the requested format.
    #[error("no downloadable resource found for dataset `{dataset}`")]
    NoResource {
        /// The dataset identifier that was resolved.
        dataset: String,
    },

    /// A downloaded resource could not be parsed as delimited text.
    #[error("tabular decode error: {0}")]
    Decode(String),

    /// The caller supplied an unusable argument.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

impl AlError {
    /// Network, status, URL or body failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Url(_)
                | Self::MissingHost { .. }
                | Self::Status { .. }
                | Self::Body { .. }
        )
    }

    /// The SOAP response was present but malformed, or was a Fault.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::SoapFault { .. })
    }

    #[must_use]
    pub const fn is_no_resource(&self) -> bool {
        matches!(self, Self::NoResource { .. })
    }

    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
