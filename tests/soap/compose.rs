use aletheia_rs::soap::{SOAP_CONTENT_TYPE, compose_envelope, escape_xml};
use aletheia_rs::{AlError, SoapOperation, SoapService};
use url::Url;

#[test]
fn envelope_wraps_body_in_soap12_header() {
    let xml = compose_envelope("<Ping xmlns=\"http://dgii.gov.do/\" />");

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(xml.contains(r#"xmlns:soap12="http://www.w3.org/2003/05/soap-envelope""#));
    assert!(xml.contains("<soap12:Body><Ping xmlns=\"http://dgii.gov.do/\" /></soap12:Body>"));
    assert!(xml.ends_with("</soap12:Envelope>"));

    roxmltree::Document::parse(&xml).unwrap();
}

#[test]
fn with_params_escapes_values() {
    let op = SoapOperation::with_params(
        "GetContribuyentes",
        "http://dgii.gov.do/",
        [("value", "PEREZ & HIJOS <SRL>"), ("patronBusqueda", "1")],
    )
    .unwrap();

    assert_eq!(op.name(), "GetContribuyentes");
    assert_eq!(
        op.body_xml(),
        concat!(
            r#"<GetContribuyentes xmlns="http://dgii.gov.do/">"#,
            "<value>PEREZ &amp; HIJOS &lt;SRL&gt;</value>",
            "<patronBusqueda>1</patronBusqueda>",
            "</GetContribuyentes>"
        )
    );

    let doc_text = compose_envelope(op.body_xml());
    let doc = roxmltree::Document::parse(&doc_text).unwrap();
    let value = doc
        .descendants()
        .find(|n| n.tag_name().name() == "value")
        .and_then(|n| n.text())
        .unwrap();
    assert_eq!(value, "PEREZ & HIJOS <SRL>");
}

#[test]
fn with_params_rejects_unusable_names() {
    for key in ["a b", "x<y", "", "1st"] {
        let err = SoapOperation::with_params("GetNCF", "http://dgii.gov.do/", [(key, "v")])
            .unwrap_err();
        assert!(matches!(err, AlError::InvalidParams(_)), "{key:?} gave {err:?}");
    }

    let err = SoapOperation::with_params("Get NCF", "http://dgii.gov.do/", std::iter::empty())
        .unwrap_err();
    assert!(matches!(err, AlError::InvalidParams(_)), "got {err:?}");
}

#[test]
fn escape_covers_attribute_quotes() {
    assert_eq!(escape_xml(r#"a"b'c"#), "a&quot;b&apos;c");
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn soap_action_joins_namespace_and_operation() {
    let endpoint = Url::parse("https://dgii.gov.do/wsMovilDGII/WSMovilDGII.asmx").unwrap();

    let svc = SoapService::new(endpoint.clone(), "http://dgii.gov.do/");
    assert_eq!(svc.action_for("GetNCF"), "http://dgii.gov.do/GetNCF");

    let svc = SoapService::new(endpoint, "urn:example");
    assert_eq!(svc.action_for("Echo"), "urn:example/Echo");

    assert_eq!(SOAP_CONTENT_TYPE, "application/soap+xml; charset=utf-8");
}
