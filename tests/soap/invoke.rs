use aletheia_rs::soap::invoke;
use aletheia_rs::{AlError, Payload, SoapOperation, SoapService};
use serde_json::json;
use url::Url;

fn service(server: &httpmock::MockServer) -> SoapService {
    SoapService::new(
        Url::parse(&server.url(crate::common::DGII_PATH)).unwrap(),
        "http://dgii.gov.do/",
    )
}

#[tokio::test]
async fn json_result_is_decoded_twice() {
    let server = crate::common::setup_server();
    let mock = crate::common::mock_soap(
        &server,
        "Ping",
        200,
        crate::common::soap_result("Ping", r#"{"a":1}"#),
    );

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("Ping", r#"<Ping xmlns="http://dgii.gov.do/" />"#);
    let res = invoke(&client, &service(&server), &op).await.unwrap();
    mock.assert();

    assert_eq!(res.payload, Payload::Json(json!({"a": 1})));
    assert_eq!(res.provider_host, "127.0.0.1");
    assert_eq!(res.endpoint, server.url(crate::common::DGII_PATH));
}

#[tokio::test]
async fn non_json_result_is_returned_as_text() {
    let server = crate::common::setup_server();
    let mock = crate::common::mock_soap(
        &server,
        "Ping",
        200,
        crate::common::soap_result("Ping", "not-json"),
    );

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("Ping", "<Ping />");
    let res = invoke(&client, &service(&server), &op).await.unwrap();
    mock.assert();

    assert_eq!(res.payload, Payload::Text("not-json".into()));
}

#[tokio::test]
async fn fault_with_error_status_maps_to_soap_fault() {
    let server = crate::common::setup_server();
    let mock = crate::common::mock_soap(
        &server,
        "GetDocumento",
        500,
        crate::common::fixture("soap_fault.xml"),
    );

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("GetDocumento", "<GetDocumento />");
    let err = invoke(&client, &service(&server), &op).await.unwrap_err();
    mock.assert();

    assert!(err.is_protocol());
    match err {
        AlError::SoapFault { code, reason } => {
            assert_eq!(code, "soap:Receiver");
            assert!(reason.starts_with("Server was unable to process request."));
        }
        other => panic!("expected SoapFault, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_result_node_is_a_protocol_error() {
    let server = crate::common::setup_server();
    let mock = crate::common::mock_soap(
        &server,
        "GetDocumento",
        200,
        crate::common::fixture("soap_missing_result.xml"),
    );

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("GetDocumento", "<GetDocumento />");
    let err = invoke(&client, &service(&server), &op).await.unwrap_err();
    mock.assert();

    assert!(matches!(err, AlError::Protocol(_)), "got {err:?}");
}

#[tokio::test]
async fn non_xml_body_is_a_transport_error() {
    let server = crate::common::setup_server();
    let ok_html = crate::common::mock_soap(
        &server,
        "Ping",
        200,
        "<html><body>maintenance".to_string(),
    );

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("Ping", "<Ping />");
    let err = invoke(&client, &service(&server), &op).await.unwrap_err();
    ok_html.assert();
    assert!(matches!(err, AlError::Body { .. }), "got {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn gateway_error_without_envelope_is_a_status_error() {
    let server = crate::common::setup_server();
    let mock = crate::common::mock_soap(&server, "Ping", 502, "Bad Gateway".to_string());

    let client = crate::common::client_for(&server);
    let op = SoapOperation::new("Ping", "<Ping />");
    let err = invoke(&client, &service(&server), &op).await.unwrap_err();
    mock.assert();

    assert!(matches!(err, AlError::Status { status: 502, .. }), "got {err:?}");
}

#[tokio::test]
async fn invalid_operation_name_is_rejected_locally() {
    let client = aletheia_rs::AlClient::default();
    let svc = SoapService::new(
        Url::parse("http://127.0.0.1:9/unused").unwrap(),
        "http://dgii.gov.do/",
    );

    let op = SoapOperation::new("Get NCF", "<x />");
    let err = invoke(&client, &svc, &op).await.unwrap_err();
    assert!(matches!(err, AlError::InvalidParams(_)), "got {err:?}");
}
