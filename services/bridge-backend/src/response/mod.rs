//! Checks completed upstream responses, and turns the unsuccessful ones into an [`Error`].

mod completed;

pub use completed::CompletedResponse;

use axum::http::header::{HeaderMap, CONTENT_TYPE};
use axum::http::{Response, StatusCode};
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

use crate::detail::Detail;
use crate::error::Error;
use crate::mapping::StatusCodeMapping;

/// The only content type for which an error body is parsed as JSON. The comparison is exact:
/// a content type carrying parameters (eg `; charset=utf-8`) is treated as text.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Read access to a response whose body has already been received.
pub trait HttpResponse {
    fn status(&self) -> StatusCode;

    fn headers(&self) -> &HeaderMap;

    fn body(&self) -> &[u8];

    fn content_type(&self) -> Option<&str> {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// The body as text, invalid UTF-8 sequences are replaced.
    fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(self.body())
    }
}

impl<B: AsRef<[u8]>> HttpResponse for Response<B> {
    fn status(&self) -> StatusCode {
        Response::status(self)
    }

    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }

    fn body(&self) -> &[u8] {
        Response::body(self).as_ref()
    }
}

/// Returns the response untouched if its status is a success (2xx).
///
/// Otherwise the response is turned into an `Error::Upstream`, reported with the status
/// found in `mapping` (or the observed status if it is not mapped). The detail is the parsed
/// body when the response is JSON (unless it is `null`), the body text when there is one, and
/// nothing otherwise.
///
/// A JSON response whose body does not parse gives an `Error::MalformedBody`.
pub fn check_response<R: HttpResponse>(
    response: R,
    mapping: Option<&StatusCodeMapping>,
) -> Result<R, Error> {
    let observed = response.status();
    if observed.is_success() {
        return Ok(response);
    }

    let status = mapping.map_or(observed, |mapping| mapping.get(observed));

    let detail = if response.content_type() == Some(JSON_CONTENT_TYPE) {
        let value = response.json().map_err(|err| Error::MalformedBody {
            status,
            context: format!("Upstream replied {observed} with an invalid JSON body"),
            source: err,
        })?;
        // A JSON `null` carries nothing.
        (!value.is_null()).then_some(Detail::Json(value))
    } else {
        let text = response.text();
        (!text.is_empty()).then(|| Detail::Text(text.into_owned()))
    };

    debug!(
        observed = observed.as_u16(),
        reported = status.as_u16(),
        "upstream replied with an error status"
    );

    Err(Error::Upstream { status, detail })
}

/// Reads the body of a reqwest response, and checks it with `check_response`.
pub async fn check_reqwest(
    response: reqwest::Response,
    mapping: Option<&StatusCodeMapping>,
) -> Result<CompletedResponse, Error> {
    let response = CompletedResponse::from_reqwest(response).await?;
    check_response(response, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use serde_json::json;
    use speculoos::prelude::*;
    use tracing_test::traced_test;

    /// Builds a response with the given status, content type and body.
    fn response(status: u16, content_type: Option<&str>, body: &str) -> Response<Bytes> {
        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder
            .body(Bytes::copy_from_slice(body.as_bytes()))
            .expect("response")
    }

    #[quickcheck]
    fn successful_responses_should_be_returned_unchanged(offset: u8) -> bool {
        let code = 200 + u16::from(offset) % 100;
        match check_response(response(code, Some("text/plain"), "ok"), None) {
            Ok(resp) => resp.status().as_u16() == code && resp.body() == &Bytes::from_static(b"ok"),
            Err(_) => false,
        }
    }

    #[quickcheck]
    fn unsuccessful_responses_should_fail_with_the_observed_status(raw: u16) -> TestResult {
        // Any code StatusCode accepts, ie 100..=999.
        let code = 100 + raw % 900;
        if (200..300).contains(&code) {
            return TestResult::discard();
        }
        match check_response(response(code, None, ""), None) {
            Err(Error::Upstream { status, .. }) => TestResult::from_bool(status.as_u16() == code),
            _ => TestResult::failed(),
        }
    }

    #[test]
    fn unsuccessful_responses_should_fail_with_the_mapped_status() {
        let mapping = StatusCodeMapping::new().with(StatusCode::NOT_FOUND, StatusCode::BAD_GATEWAY);

        let err = check_response(response(404, None, ""), Some(&mapping)).unwrap_err();
        assert_that(&err.status()).is_equal_to(StatusCode::BAD_GATEWAY);

        // Unmapped codes are kept.
        let err = check_response(response(503, None, ""), Some(&mapping)).unwrap_err();
        assert_that(&err.status()).is_equal_to(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn json_error_body_should_become_a_structured_detail() {
        let res = check_response(
            response(404, Some("application/json"), r#"{"error":"x"}"#),
            None,
        );
        match res {
            Err(Error::Upstream { status, detail }) => {
                assert_that(&status).is_equal_to(StatusCode::NOT_FOUND);
                assert_that(&detail).is_equal_to(Some(Detail::Json(json!({"error": "x"}))));
            }
            other => panic!("expected an upstream error, got {other:?}"),
        }
    }

    #[test]
    fn json_null_error_body_should_have_no_detail() {
        let err = check_response(response(409, Some("application/json"), "null"), None)
            .unwrap_err();
        assert_that(&err.kind()).is_equal_to("upstream");
        assert_that(&err.detail()).is_none();
    }

    #[test]
    fn text_error_body_should_become_a_text_detail() {
        let res = check_response(response(500, Some("text/plain"), "boom"), None);
        match res {
            Err(Error::Upstream { status, detail }) => {
                assert_that(&status).is_equal_to(StatusCode::INTERNAL_SERVER_ERROR);
                assert_that(&detail).is_equal_to(Some(Detail::from("boom")));
            }
            other => panic!("expected an upstream error, got {other:?}"),
        }
    }

    #[test]
    fn empty_error_body_should_have_no_detail() {
        let res = check_response(response(500, None, ""), None);
        match res {
            Err(Error::Upstream { detail, .. }) => assert_that(&detail).is_none(),
            other => panic!("expected an upstream error, got {other:?}"),
        }
    }

    #[test]
    fn json_content_type_with_parameters_should_be_read_as_text() {
        let body = r#"{"error":"x"}"#;
        let res = check_response(
            response(400, Some("application/json; charset=utf-8"), body),
            None,
        );
        match res {
            Err(Error::Upstream { detail, .. }) => {
                assert_that(&detail).is_equal_to(Some(Detail::from(body)))
            }
            other => panic!("expected an upstream error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_body_should_be_a_malformed_body_error() {
        let mapping = StatusCodeMapping::new().with(StatusCode::NOT_FOUND, StatusCode::GONE);
        let sentence: String = Sentence(3..6).fake();
        let res = check_response(
            response(404, Some("application/json"), &sentence),
            Some(&mapping),
        );
        match res {
            Err(Error::MalformedBody { status, .. }) => {
                assert_that(&status).is_equal_to(StatusCode::GONE)
            }
            other => panic!("expected a malformed body error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_text_should_be_read_lossily() {
        let resp = Response::builder()
            .status(502)
            .body(vec![b'o', b'k', 0xff])
            .expect("response");
        match check_response(resp, None) {
            Err(Error::Upstream { detail, .. }) => {
                assert_that(&detail).is_equal_to(Some(Detail::from("ok\u{fffd}")))
            }
            other => panic!("expected an upstream error, got {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn unsuccessful_responses_should_be_logged() {
        let _ = check_response(response(418, None, ""), None);
        assert!(logs_contain("upstream replied with an error status"));
    }
}
