//! Integration tests for level3-client against a local mock server.

use std::sync::Once;

use chrono::NaiveDateTime;
use level3_auth::{Credentials, DATE_FORMAT, SigningContext};
use level3_client::{ApiCall, ApiClient, ClientConfig, Error, Response, invalidation_body};
use level3_xml::Value;
use reqwest::Method;
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const KEY_ID: &str = "test-key";
const SECRET: &str = "test-secret";

const RTM_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<accessGroup name="group1">
  <missPerSecond>50.67</missPerSecond>
  <metros>
    <metro name="Atlanta, GA" region="North America">
      <requestsPerSecond>600.45</requestsPerSecond>
    </metro>
  </metros>
</accessGroup>"#;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

fn client_for(server: &MockServer, wrap: bool) -> ApiClient {
    init_tracing();
    let config = ClientConfig::builder()
        .service_url(server.uri())
        .wrap(wrap)
        .timeout_secs(5)
        .build();
    ApiClient::new(Credentials::new(KEY_ID, SECRET), config).unwrap()
}

fn rtm_call() -> ApiCall {
    ApiCall::builder()
        .method("rtm")
        .access_group("group1")
        .options(vec![
            ("serviceType".to_owned(), "caching".to_owned()),
            ("accessGroupChildren".to_owned(), "false".to_owned()),
            ("geo".to_owned(), "none".to_owned()),
        ])
        .build()
}

fn header_str<'a>(request: &'a Request, name: &str) -> &'a str {
    request.headers.get(name).unwrap().to_str().unwrap()
}

/// Recompute the signature from the `Date` header that was actually sent.
fn expected_authorization(request: &Request, resource_path: &str, http_method: &str) -> String {
    let date = header_str(request, "date");
    let timestamp = NaiveDateTime::parse_from_str(date, DATE_FORMAT)
        .unwrap()
        .and_utc();
    SigningContext::new(resource_path, http_method, "text/xml", timestamp)
        .sign(&Credentials::new(KEY_ID, SECRET))
        .unwrap()
        .authorization
}

#[tokio::test]
async fn test_should_send_signed_get_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rtm/v1.0/group1"))
        .and(query_param("serviceType", "caching"))
        .and(query_param("accessGroupChildren", "false"))
        .and(query_param("geo", "none"))
        .and(header("content-type", "text/xml"))
        .and(header_exists("date"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RTM_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    client.call(&rtm_call()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let authorization = header_str(request, "authorization");
    assert!(authorization.starts_with("MPA test-key:"));
    assert_eq!(
        authorization,
        expected_authorization(request, "rtm/v1.0/group1", "GET")
    );
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_should_wrap_response_in_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rtm/v1.0/group1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RTM_BODY))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let response = client.call(&rtm_call()).await.unwrap();

    let doc = response.document().unwrap();
    let group = doc.get("accessGroup").unwrap();
    assert_eq!(
        group.get("missPerSecond").unwrap().value(),
        Some(Value::Float(50.67))
    );
    let metro = group.get("metros").unwrap().get(0_usize).unwrap();
    assert_eq!(metro.get("name").unwrap().attribute(), Some("Atlanta, GA"));
    assert_eq!(metro.get("region").unwrap().attribute(), Some("North America"));
    assert_eq!(
        metro.get("requestsPerSecond").unwrap().value(),
        Some(Value::Float(600.45))
    );
    assert_eq!(response.as_raw(), RTM_BODY);
}

#[tokio::test]
async fn test_should_return_raw_body_when_not_wrapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rtm/v1.0/group1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not xml at all"))
        .mount(&server)
        .await;

    let client = client_for(&server, false);
    let response = client.call(&rtm_call()).await.unwrap();

    assert!(matches!(&response, Response::Raw(body) if body == "not xml at all"));
}

#[tokio::test]
async fn test_should_report_unparseable_body_when_wrapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<open>"))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let result = client.call(&rtm_call()).await;

    assert!(matches!(result, Err(Error::Xml(_))));
}

#[tokio::test]
async fn test_should_map_403_to_forbidden() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<error>bad signature</error>"))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let err = client.call(&rtm_call()).await.unwrap_err();

    assert!(err.is_forbidden());
    assert!(!err.is_transport());
    match err {
        Error::Forbidden { body } => assert_eq!(body, "<error>bad signature</error>"),
        e => panic!("Expected Forbidden error, got: {e:?}"),
    }
}

#[tokio::test]
async fn test_should_map_other_statuses_to_transport_errors() {
    for status in [400_u16, 404, 500, 503] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("detail"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true);
        let err = client.call(&rtm_call()).await.unwrap_err();

        assert!(err.is_transport(), "status {status} should be a transport error");
        assert!(!err.is_forbidden());
        match err {
            Error::Status { status: got, body } => {
                assert_eq!(got, status);
                assert_eq!(body, "detail");
            }
            e => panic!("Expected Status error, got: {e:?}"),
        }
    }
}

#[tokio::test]
async fn test_should_report_connection_failure_as_transport_error() {
    init_tracing();
    let config = ClientConfig::builder()
        .service_url("http://127.0.0.1:1".to_owned())
        .timeout_secs(5)
        .build();
    let client = ApiClient::new(Credentials::new(KEY_ID, SECRET), config).unwrap();

    let err = client.call(&rtm_call()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_should_post_invalidation_body() {
    let server = MockServer::start().await;
    let urls = ["/images/logo.png", "/css/site.css"];

    Mock::given(method("POST"))
        .and(path("/invalidations/v1.0/group1"))
        .and(body_string(invalidation_body("www.example.com", urls)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<invalidations><invalidation id="42"/></invalidations>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let response = client
        .invalidate("group1", "www.example.com", urls)
        .await
        .unwrap();

    let doc = response.into_document().unwrap();
    let invalidation = doc.root().get(0_usize).unwrap();
    assert_eq!(invalidation.get("id").unwrap().value(), Some(Value::Integer(42)));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(
        header_str(request, "authorization"),
        expected_authorization(request, "invalidations/v1.0/group1", "POST")
    );
}

#[tokio::test]
async fn test_should_not_send_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/rtm/v1.0/group1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let call = ApiCall::builder()
        .method("rtm")
        .access_group("group1")
        .body(String::new())
        .http_method(Method::PUT)
        .build();
    client.call(&call).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_should_sign_each_call_with_its_own_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let (call_a, call_b) = (rtm_call(), rtm_call());
    let (first, second) = tokio::join!(client.call(&call_a), client.call(&call_b));
    first.unwrap();
    second.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(
            header_str(request, "authorization"),
            expected_authorization(request, "rtm/v1.0/group1", "GET")
        );
    }
}
