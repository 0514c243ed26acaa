use axum::http::header::HeaderMap;
use axum::http::StatusCode;
use bytes::Bytes;

use super::HttpResponse;
use crate::error::Error;
use common::err_context::ErrorContextExt;

/// An owned snapshot of a response: status, headers, and the whole body.
#[derive(Debug, Clone)]
pub struct CompletedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl CompletedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        CompletedResponse {
            status,
            headers,
            body,
        }
    }

    /// Waits for the whole body of a reqwest response.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<CompletedResponse, Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Could not read the body of the response from {url}"))?;
        Ok(CompletedResponse {
            status,
            headers,
            body,
        })
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

impl HttpResponse for CompletedResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

impl From<CompletedResponse> for axum::http::Response<Bytes> {
    fn from(completed: CompletedResponse) -> Self {
        let mut response = axum::http::Response::new(completed.body);
        *response.status_mut() = completed.status;
        *response.headers_mut() = completed.headers;
        response
    }
}
