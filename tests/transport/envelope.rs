use aletheia_rs::{AlClient, AlError, Payload};
use httpmock::Method::GET;
use reqwest::header::HeaderMap;
use serde_json::json;

#[tokio::test]
async fn envelope_carries_host_and_exact_endpoint() {
    let server = crate::common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/fuels")
            .query_param("date", "2021-12-12");
        then.status(200)
            .header("content-type", "application/json")
            .body(crate::common::fixture("fuels_2021-12-12.json"));
    });

    let client = crate::common::client_for(&server);
    let url = server.url("/api/v1/fuels?date=2021-12-12");
    let res = client.fetch_data(&url).await.unwrap();
    mock.assert();

    assert_eq!(res.endpoint, url);
    assert_eq!(res.provider_host, "127.0.0.1");

    let data = res.payload.as_json().unwrap();
    assert_eq!(data["valid"], json!(true));
    assert_eq!(data["data"][0]["name"], "Gasolina Premium");
}

#[tokio::test]
async fn xml_request_keeps_body_as_text() {
    let server = crate::common::setup_server();
    let body = "<ping>pong</ping>";
    let mock = server.mock(|when, then| {
        when.method(GET).path("/xml");
        then.status(200).header("content-type", "text/xml").body(body);
    });

    let mut headers = HeaderMap::new();
    headers.insert("content-type", "text/xml".parse().unwrap());

    let client = AlClient::default();
    let res = client.get(&server.url("/xml"), headers).await.unwrap();
    mock.assert();

    assert_eq!(res.payload, Payload::Text(body.to_string()));
}

#[tokio::test]
async fn empty_json_body_is_null() {
    let server = crate::common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/nothing");
        then.status(204);
    });

    let client = AlClient::default();
    let res = client
        .get(&server.url("/nothing"), HeaderMap::new())
        .await
        .unwrap();
    mock.assert();

    assert_eq!(res.payload, Payload::Json(serde_json::Value::Null));
}

#[tokio::test]
async fn malformed_json_is_a_body_error() {
    let server = crate::common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"valid\": tr");
    });

    let client = AlClient::default();
    let err = client.fetch_data(&server.url("/broken")).await.unwrap_err();
    mock.assert();

    assert!(err.is_transport());
    match err {
        AlError::Body { url, .. } => assert!(url.ends_with("/broken")),
        other => panic!("expected Body error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_url_fails_before_any_request() {
    let client = AlClient::default();

    let err = client.fetch_data("not a url").await.unwrap_err();
    assert!(matches!(err, AlError::Url(_)), "got {err:?}");
    assert!(err.is_transport());

    let err = client.fetch_data("mailto:someone@example.com").await.unwrap_err();
    assert!(matches!(err, AlError::MissingHost { .. }), "got {err:?}");
}

#[test]
fn provider_host_is_the_hostname_only() {
    use aletheia_rs::transport::provider_host;

    assert_eq!(
        provider_host("https://api.digital.gob.do/v1/fuels?date=2021-12-12").unwrap(),
        "api.digital.gob.do"
    );
    assert_eq!(
        provider_host("http://localhost:8080/x").unwrap(),
        "localhost"
    );
    assert!(provider_host("file:///tmp/a.csv").is_err());
}

#[test]
fn segments_are_appended_one_each() {
    use aletheia_rs::transport::join_segments;
    use url::Url;

    let base = Url::parse("https://api.digital.gob.do/").unwrap();
    assert_eq!(
        join_segments(&base, &["v1", "territories", "provinces"]).unwrap().as_str(),
        "https://api.digital.gob.do/v1/territories/provinces"
    );

    let base = Url::parse("https://datos.gob.do/dataset/").unwrap();
    assert_eq!(
        join_segments(&base, &["San José"]).unwrap().as_str(),
        "https://datos.gob.do/dataset/San%20Jos%C3%A9"
    );

    for bad in ["", ".", "..", "../x", "a/b", "a?b", "a#b"] {
        assert!(
            matches!(join_segments(&base, &[bad]), Err(AlError::InvalidParams(_))),
            "{bad:?} was accepted"
        );
    }

    let opaque = Url::parse("mailto:someone@example.com").unwrap();
    assert!(join_segments(&opaque, &["x"]).is_err());
}
