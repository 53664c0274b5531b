//! Integration tests for `Transport` and `HyperClient` using wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use axos::{
    AxosConfig, Error, HttpClient, HyperClient, Method, Query, Request, Response, Result,
    Transport,
};
use bytes::Bytes;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn config(server: &MockServer) -> AxosConfig {
    AxosConfig::builder()
        .url(format!("{}/rest/v1/", server.uri()))
        .username("user")
        .password("pass")
        .build()
        .expect("config")
}

fn transport(server: &MockServer) -> Transport {
    Transport::new(&config(server)).expect("transport")
}

async fn single_request(server: &MockServer) -> wiremock::Request {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    requests.into_iter().next().expect("one request")
}

#[tokio::test]
async fn placeholders_become_path_segments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ems/subscriber/org/Calix/account/777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "t"})))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new()
        .param("org-id", "Calix")
        .param("account-name", 777);
    let response = transport(&server)
        .get("/ems/subscriber/org/{org-id}/account/{account-name}", query)
        .await
        .expect("response");

    assert_eq!(response.status(), 200);
    let request = single_request(&server).await;
    assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn every_occurrence_is_substituted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ems/node/N1/copy/N1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new().param("id", "N1").param("limit", 5);
    transport(&server)
        .get("/ems/node/{id}/copy/{id}", query)
        .await
        .expect("response");

    let request = single_request(&server).await;
    assert_eq!(request.url.query(), Some("limit=5"));
}

#[tokio::test]
async fn non_scalar_values_stay_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ems/subscriber/%7Bflag%7D"))
        .and(query_param("flag", "1"))
        .and(query_param("ids[0]", "3"))
        .and(query_param("ids[1]", "4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new()
        .param("flag", true)
        .param("ids", json!([3, 4]))
        .param("nothing", json!(null));
    transport(&server)
        .get("/ems/subscriber/{flag}", query)
        .await
        .expect("response");
}

#[tokio::test]
async fn no_double_slash_between_base_and_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ems/subscriber"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server)
        .get("//ems/subscriber/", Query::new())
        .await
        .expect("response");

    let request = single_request(&server).await;
    check!(!request.url.path().contains("//"));
}

#[tokio::test]
async fn every_request_carries_auth_and_json_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ems/subscriber"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(header("User-Agent", axos::DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = transport(&server)
        .get("/ems/subscriber", Query::new())
        .await
        .expect("response");

    assert!(response.is_success());
}

#[tokio::test]
async fn custom_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("User-Agent", "provisioning/2.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = AxosConfig {
        user_agent: "provisioning/2.0".to_string(),
        ..config(&server)
    };
    Transport::new(&config)
        .expect("transport")
        .get("/ems/subscriber", Query::new())
        .await
        .expect("response");
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    let body = json!({"name": "t", "customId": 777});

    Mock::given(method("POST"))
        .and(path("/rest/v1/ems/subscriber"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    transport(&server)
        .post("/ems/subscriber", Query::new(), Some(&body))
        .await
        .expect("response");
}

#[tokio::test]
async fn delete_never_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/ems/subscriber/org/Calix/account/777"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::from([("org-id", json!("Calix")), ("account-name", json!(777))]);
    transport(&server)
        .send(
            Method::Delete,
            "/ems/subscriber/org/{org-id}/account/{account-name}",
            query,
            Some(&json!({"ignored": true})),
        )
        .await
        .expect("response");

    let request = single_request(&server).await;
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn http_error_status_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let response = transport(&server)
        .get("/ems/subscriber", Query::new())
        .await
        .expect("response");

    assert!(response.is_server_error());
    assert_eq!(response.text().expect("utf-8"), "boom");
}

#[tokio::test]
async fn repeated_response_headers_are_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("X-Trace", "a")
                .append_header("X-Trace", "b"),
        )
        .mount(&server)
        .await;

    let response = transport(&server)
        .get("/ems/subscriber", Query::new())
        .await
        .expect("response");

    assert_eq!(
        response.headers().get("x-trace"),
        Some(&vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(response.header("X-Trace"), Some("a"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = AxosConfig {
        timeout: Duration::from_millis(200),
        ..config(&server)
    };
    let err = Transport::new(&config)
        .expect("transport")
        .get("/ems/subscriber", Query::new())
        .await
        .expect_err("timeout");

    let_assert!(Error::Timeout = err);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let config = AxosConfig::builder()
        .url("http://127.0.0.1:1/rest/v1/")
        .build()
        .expect("config");

    let err = Transport::new(&config)
        .expect("transport")
        .get("/ems/subscriber", Query::new())
        .await
        .expect_err("nothing listens on port 1");

    check!(err.is_connection());
    check!(err.is_transport());
}

#[tokio::test]
async fn https_against_plain_http_is_a_tls_error() {
    let server = MockServer::start().await;
    let https = server.uri().replacen("http://", "https://", 1);

    for verify in [true, false] {
        let config = AxosConfig::builder()
            .url(format!("{https}/rest/v1/"))
            .verify(verify)
            .build()
            .expect("config");

        let err = Transport::new(&config)
            .expect("transport")
            .get("/ems/subscriber", Query::new())
            .await
            .expect_err("no TLS on the other side");

        let_assert!(Error::Tls(message) = err);
        check!(!message.contains("Custom {"));
    }
}

#[test]
fn invalid_base_url_is_rejected() {
    let config = AxosConfig::builder().url("smx without scheme").build().expect("config");
    let err = Transport::new(&config).expect_err("invalid URL");
    let_assert!(Error::InvalidUrl(_) = err);
}

// ============================================================================
// Custom HttpClient
// ============================================================================

/// Client that records requests and answers with an empty JSON array.
#[derive(Clone, Default)]
struct RecordingClient {
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
}

impl HttpClient for RecordingClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests.lock().expect("lock").push(request);
        Ok(Response::new(200, axos::Headers::new(), Bytes::from_static(b"[]")))
    }
}

#[tokio::test]
async fn transport_accepts_any_http_client() {
    let client = RecordingClient::default();
    let transport =
        Transport::with_client(client.clone(), "https://smx.example.net:18443/rest/v1/")
            .expect("transport");

    transport
        .put(
            "/ems/subscriber/org/{org-id}",
            Query::new().param("org-id", "Calix"),
            Some(&json!({"name": "t"})),
        )
        .await
        .expect("response");

    let requests = client.requests.lock().expect("lock");
    let request = requests.first().expect("recorded");
    assert_eq!(request.method(), Method::Put);
    assert_eq!(
        request.url().as_str(),
        "https://smx.example.net:18443/rest/v1/ems/subscriber/org/Calix"
    );
    assert!(request.body().is_some());
}

#[tokio::test]
async fn hyper_client_executes_plain_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HyperClient::new().expect("client");
    let url = url::Url::parse(&format!("{}/ping", server.uri())).expect("url");
    let response = client
        .execute(Request::builder(Method::Get, url).build())
        .await
        .expect("response");

    assert_eq!(response.status(), 204);
    assert!(response.body().is_empty());
}
