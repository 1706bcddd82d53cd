//! Contract tests for `HttpForumApi`.
//!
//! These verify the exact request shape sent to the forum (method, path,
//! query, headers) and that non-2xx statuses are surfaced as responses.

use forum_api::sites::{DEEPFLOOD, NODESEEK};
use forum_api::{ApiError, ClientConfig, ForumApi, HttpForumApi};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpForumApi {
    let config = ClientConfig::default().with_base_url(server.uri());
    HttpForumApi::new(&config).expect("client")
}

#[tokio::test]
async fn attendance_request_shape() {
    let server = MockServer::start().await;
    let origin = server.uri();

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .and(query_param("random", "true"))
        .and(header("cookie", "session=abc"))
        .and(header("origin", origin.as_str()))
        .and(header("referer", format!("{origin}/board").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success":true,"message":"5"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .attend(&NODESEEK, "session=abc", true)
        .await
        .expect("response");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("success"));
}

#[tokio::test]
async fn attendance_fixed_mode_sends_random_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .and(query_param("random", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_for(&server).attend(&DEEPFLOOD, "c", false).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn forbidden_status_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"success":false}"#))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .attend(&NODESEEK, "c", false)
        .await
        .expect("403 is still a response");
    assert!(response.is_blocked());
}

#[tokio::test]
async fn credit_page_path_is_one_based() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/account/credit/page-2"))
        .and(header("cookie", "c=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"data":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .credit_page(&NODESEEK, "c=1", 2)
        .await
        .expect("response");
    assert_eq!(response.body, r#"{"success":true,"data":[]}"#);
}

#[tokio::test]
async fn prime_session_returns_status_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/board"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>busy</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let status = api_for(&server)
        .prime_session(&DEEPFLOOD, "c")
        .await
        .expect("status");
    assert_eq!(status, 503);
}

#[tokio::test]
async fn connection_refused_is_http_error() {
    // Port 9 (discard) is not listening on test hosts.
    let config = ClientConfig {
        connect_timeout_ms: 500,
        total_timeout_ms: 1_000,
        ..ClientConfig::default().with_base_url("http://127.0.0.1:9")
    };
    let api = HttpForumApi::new(&config).expect("client");

    let err = api.attend(&NODESEEK, "c", false).await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert!(err.to_string().contains("NodeSeek attendance request failed"));
}
