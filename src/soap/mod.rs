//! Generic SOAP 1.2 operation adapter.
//!
//! One adapter drives every operation of a service: the caller supplies the
//! operation name and its request fragment, the adapter wraps it in the
//! fixed envelope, posts it, and unwraps
//! `Envelope/Body/{Op}Response/{Op}Result`. The result node conventionally
//! carries a JSON document as text, which is decoded a second time; when
//! that fails the raw text is returned instead.

mod xml;

pub use xml::escape_xml;

use crate::core::{AlClient, AlError, Payload, ResultEnvelope};
use crate::transport;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use roxmltree::Document;
use url::Url;

/// Content type of every SOAP 1.2 request.
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

const ENVELOPE_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="utf-8"?>"#,
    r#"<soap12:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
    r#"xmlns:soap12="http://www.w3.org/2003/05/soap-envelope">"#,
    "<soap12:Body>"
);
const ENVELOPE_CLOSE: &str = "</soap12:Body></soap12:Envelope>";

/// Where a SOAP service lives and which namespace its operations use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapService {
    pub endpoint: Url,
    pub namespace: String,
}

impl SoapService {
    pub fn new(endpoint: Url, namespace: impl Into<String>) -> Self {
        Self {
            endpoint,
            namespace: namespace.into(),
        }
    }

    /// `SOAPAction` value for `operation`: namespace and name joined by one `/`.
    pub fn action_for(&self, operation: &str) -> String {
        format!("{}/{operation}", self.namespace.trim_end_matches('/'))
    }
}

/// One remote procedure call: its name and the request fragment placed in `Body`.
///
/// `name` must match the service's tag exactly; the response is looked up
/// as `{name}Response/{name}Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapOperation {
    name: String,
    body_xml: String,
}

impl SoapOperation {
    /// An operation with a caller-supplied request fragment.
    pub fn new(name: impl Into<String>, body_xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body_xml: body_xml.into(),
        }
    }

    /// An operation whose fragment is `<name xmlns="namespace"><k>v</k>...</name>`,
    /// with every value escaped.
    ///
    /// # Errors
    ///
    /// `AlError::InvalidParams` if `name` or a parameter key is not an XML
    /// element name.
    pub fn with_params<'a, I>(
        name: impl Into<String>,
        namespace: &str,
        params: I,
    ) -> Result<Self, AlError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let name = name.into();
        if !xml::is_xml_name(&name) {
            return Err(AlError::InvalidParams(format!(
                "`{name}` is not a valid operation name"
            )));
        }

        let mut body = format!(r#"<{name} xmlns="{}">"#, escape_xml(namespace));
        for (key, value) in params {
            if !xml::is_xml_name(key) {
                return Err(AlError::InvalidParams(format!(
                    "`{key}` is not a valid parameter name for {name}"
                )));
            }
            body.push_str(&format!("<{key}>{}</{key}>", escape_xml(value)));
        }
        body.push_str(&format!("</{name}>"));
        Ok(Self {
            name,
            body_xml: body,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body_xml(&self) -> &str {
        &self.body_xml
    }
}

/// Wrap `body` in the fixed SOAP 1.2 envelope.
pub fn compose_envelope(body: &str) -> String {
    let mut out = String::with_capacity(ENVELOPE_OPEN.len() + body.len() + ENVELOPE_CLOSE.len());
    out.push_str(ENVELOPE_OPEN);
    out.push_str(body);
    out.push_str(ENVELOPE_CLOSE);
    out
}

/// Post `operation` to `service` and return the unwrapped, doubly-decoded result.
///
/// The payload is `Payload::Json` when the result text is a JSON document,
/// otherwise `Payload::Text` with the raw result text.
///
/// # Errors
///
/// Transport errors for the POST (including a body that is not XML),
/// `AlError::SoapFault` for a Fault response, `AlError::Protocol` when the
/// expected nesting is absent, `AlError::InvalidParams` for an unusable
/// operation name.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, service, operation), err, fields(operation = %operation.name()))
)]
pub async fn invoke(
    client: &AlClient,
    service: &SoapService,
    operation: &SoapOperation,
) -> Result<ResultEnvelope, AlError> {
    if !xml::is_xml_name(operation.name()) {
        return Err(AlError::InvalidParams(format!(
            "`{}` is not a valid operation name",
            operation.name()
        )));
    }

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE));
    let action = HeaderValue::from_str(&service.action_for(operation.name()))
        .map_err(|e| AlError::InvalidParams(format!("SOAPAction header: {e}")))?;
    headers.insert(HeaderName::from_static("soapaction"), action);

    let url = service.endpoint.as_str();
    let (status, envelope) = transport::exchange(
        client,
        Method::POST,
        url,
        headers,
        Some(compose_envelope(operation.body_xml())),
    )
    .await?;

    let ResultEnvelope {
        payload,
        provider_host,
        endpoint,
    } = envelope;
    let text = payload
        .as_text()
        .ok_or_else(|| AlError::Protocol("SOAP response was not read as text".into()))?;

    let doc = match Document::parse(text) {
        Ok(doc) => doc,
        Err(_) if !status.is_success() => {
            return Err(AlError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Err(e) => {
            return Err(AlError::Body {
                url: url.to_string(),
                reason: format!("xml parse: {e}"),
            });
        }
    };

    let payload = match unwrap_result(&doc, operation.name()) {
        Err(AlError::Protocol(_)) if !status.is_success() => {
            return Err(AlError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        other => other?,
    };

    Ok(ResultEnvelope {
        payload,
        provider_host,
        endpoint,
    })
}

/// Navigate `Envelope/Body/{operation}Response/{operation}Result` and decode
/// the result text. Element names are matched without their prefixes.
///
/// # Errors
///
/// `AlError::SoapFault` if `Body` holds a Fault, `AlError::Protocol` if any
/// segment is missing.
pub fn unwrap_result(doc: &Document<'_>, operation: &str) -> Result<Payload, AlError> {
    let root = doc.root_element();
    if xml::local_name(root) != "Envelope" {
        return Err(AlError::Protocol(format!(
            "root element is `{}`, expected Envelope",
            xml::local_name(root)
        )));
    }

    let body = xml::find_child(root, "Body")
        .ok_or_else(|| AlError::Protocol("Envelope has no Body".into()))?;

    if let Some(fault) = xml::find_child(body, "Fault") {
        return Err(fault_error(fault));
    }

    let response_tag = format!("{operation}Response");
    let response = xml::find_child(body, &response_tag)
        .ok_or_else(|| AlError::Protocol(format!("Body has no {response_tag}")))?;

    let result_tag = format!("{operation}Result");
    let result = xml::find_child(response, &result_tag)
        .ok_or_else(|| AlError::Protocol(format!("{response_tag} has no {result_tag}")))?;

    Ok(decode_result_text(xml::text_content(result)))
}

fn decode_result_text(text: String) -> Payload {
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => Payload::Json(value),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_e, "SOAP result is not JSON; returning raw text");
            Payload::Text(text)
        }
    }
}

/// SOAP 1.2 (`Code/Value`, `Reason/Text`) with a SOAP 1.1 fallback
/// (`faultcode`, `faultstring`).
fn fault_error(fault: roxmltree::Node<'_, '_>) -> AlError {
    let code = xml::text_at(fault, &["Code", "Value"])
        .or_else(|| xml::text_at(fault, &["faultcode"]))
        .unwrap_or_default();
    let reason = xml::text_at(fault, &["Reason", "Text"])
        .or_else(|| xml::text_at(fault, &["faultstring"]))
        .unwrap_or_default();
    AlError::SoapFault { code, reason }
}
