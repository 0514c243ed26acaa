use axum::http::StatusCode;
use bridge::{check_reqwest, Detail, Error, HttpResponse, StatusCodeMapping};
use axum::extract::Json;
use serde_json::json;
use speculoos::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a mock upstream answering `GET /resource` with `template`, and returns the
/// response of a real request against it.
async fn upstream_reply(template: ResponseTemplate) -> (MockServer, reqwest::Response) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(template)
        .expect(1)
        .mount(&mock_server)
        .await;
    let response = reqwest::get(format!("{}/resource", mock_server.uri()))
        .await
        .expect("upstream response");
    (mock_server, response)
}

#[tokio::test]
async fn successful_upstream_response_should_be_returned_with_its_body() {
    let (_server, response) =
        upstream_reply(ResponseTemplate::new(200).set_body_string("hello")).await;

    let completed = check_reqwest(response, None).await.expect("checked response");

    assert_that(&completed.status()).is_equal_to(StatusCode::OK);
    assert_that(&completed.text().into_owned()).is_equal_to("hello".to_string());
}

#[tokio::test]
async fn json_upstream_error_should_carry_the_parsed_body() {
    // wiremock's set_body_json sets the content type to exactly application/json.
    let (_server, response) = upstream_reply(
        ResponseTemplate::new(404).set_body_json(json!({"error": "x"})),
    )
    .await;

    let res = check_reqwest(response, None).await;

    match res {
        Err(Error::Upstream { status, detail }) => {
            assert_that(&status).is_equal_to(StatusCode::NOT_FOUND);
            assert_that(&detail).is_equal_to(Some(Detail::Json(json!({"error": "x"}))));
        }
        other => panic!("expected an upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn text_upstream_error_should_be_mapped_and_carry_the_text() {
    let (_server, response) =
        upstream_reply(ResponseTemplate::new(500).set_body_string("boom")).await;
    let mapping = StatusCodeMapping::new().with(
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
    );

    let res = check_reqwest(response, Some(&mapping)).await;

    match res {
        Err(Error::Upstream { status, detail }) => {
            assert_that(&status).is_equal_to(StatusCode::BAD_GATEWAY);
            assert_that(&detail).is_equal_to(Some(Detail::from("boom")));
        }
        other => panic!("expected an upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_upstream_error_should_have_no_detail() {
    let (_server, response) = upstream_reply(ResponseTemplate::new(503)).await;

    let err = check_reqwest(response, None).await.unwrap_err();

    assert_that(&err.status()).is_equal_to(StatusCode::SERVICE_UNAVAILABLE);
    assert_that(&err.detail()).is_none();
}

#[tokio::test]
async fn upstream_lying_about_json_should_be_a_malformed_body() {
    let (_server, response) = upstream_reply(
        ResponseTemplate::new(400).set_body_raw("not json at all", "application/json"),
    )
    .await;

    let err = check_reqwest(response, None).await.unwrap_err();

    assert_that(&err.kind()).is_equal_to("malformed_body");
    assert_that(&err.status()).is_equal_to(StatusCode::BAD_REQUEST);
}

/// Starts an upstream announcing a 100 bytes body, and hanging up after 5 of them.
async fn truncating_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nhello")
            .await
            .expect("write response");
        socket.flush().await.expect("flush");
    });
    format!("http://{addr}/resource")
}

#[tokio::test]
async fn truncated_upstream_body_should_be_a_transport_error() {
    let url = truncating_upstream().await;
    let response = reqwest::get(&url).await.expect("upstream headers");

    let err = check_reqwest(response, None).await.unwrap_err();

    assert_that(&err.kind()).is_equal_to("transport");
    assert_that(&err.status()).is_equal_to(StatusCode::BAD_GATEWAY);
    let (status, Json(body)) = err.standardize();
    assert_that(&status).is_equal_to(StatusCode::BAD_GATEWAY);
    assert_that(&body).is_equal_to(json!({
        "detail": format!("Could not read the body of the response from {url}")
    }));
}
