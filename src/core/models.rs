use serde::Serialize;

/// A decoded response body.
///
/// JSON bodies are parsed; XML/SOAP and other text bodies are kept verbatim
/// for the caller to interpret. Serializes untagged, so a `Json` payload
/// passes upward as the original document and `Text` as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// The parsed document, if this payload was JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    /// The raw text, if this payload was not decoded as JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(s) => Some(s),
        }
    }

    /// Collapse into a `serde_json::Value`; text becomes a JSON string.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Payload::Json(v) => v,
            Payload::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// The uniform, provenance-tagged result of any external call.
///
/// `provider_host` and `endpoint` are attribution only; nothing in this
/// crate branches on them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope<P = Payload> {
    /// The decoded response body.
    pub payload: P,
    /// Hostname of `endpoint`.
    #[serde(rename = "provider")]
    pub provider_host: String,
    /// The exact URL invoked.
    pub endpoint: String,
}

impl<P> ResultEnvelope<P> {
    /// Replace the payload, keeping provenance.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> ResultEnvelope<Q> {
        ResultEnvelope {
            payload: f(self.payload),
            provider_host: self.provider_host,
            endpoint: self.endpoint,
        }
    }
}
