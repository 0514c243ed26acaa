use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;
use std::sync::Arc;

use crate::detail::Detail;
use common::err_context::ErrorContext;

/// The failure signal shared by the helpers of this crate.
///
/// `Upstream` and `Missing` are the two signals callers are expected to raise. The other
/// variants cover what can go wrong around them: an upstream claiming JSON and sending
/// something else, a response body that cannot be read, fields that cannot be assigned,
/// and status code tables built from invalid codes.
///
/// Returned from an axum handler, it turns into a response with the error's status code and
/// a `{"detail": ...}` JSON body.
#[serde_as]
#[derive(Debug, Serialize)]
pub enum Error {
    Upstream {
        #[serde_as(as = "DisplayFromStr")]
        status: StatusCode,
        detail: Option<Detail>,
    },
    Missing {
        #[serde_as(as = "DisplayFromStr")]
        status: StatusCode,
        detail: Option<Detail>,
    },
    MalformedBody {
        #[serde_as(as = "DisplayFromStr")]
        status: StatusCode,
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: serde_json::Error,
    },
    Transport {
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: reqwest::Error,
    },
    Assign {
        context: String,
        source: String,
    },
    InvalidStatusCode {
        context: String,
        value: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Upstream { status, detail } => match detail {
                Some(detail) => write!(fmt, "Upstream: {status} | {detail}"),
                None => write!(fmt, "Upstream: {status}"),
            },
            Error::Missing { status, detail } => match detail {
                Some(detail) => write!(fmt, "Missing value: {status} | {detail}"),
                None => write!(fmt, "Missing value: {status}"),
            },
            Error::MalformedBody {
                status,
                context,
                source,
            } => {
                write!(fmt, "Malformed upstream body: {status} {context} | {source}")
            }
            Error::Transport { context, source } => {
                write!(fmt, "Upstream transport: {context} | {source}")
            }
            Error::Assign { context, source } => {
                write!(fmt, "Assign: {context} | {source}")
            }
            Error::InvalidStatusCode { context, value } => {
                write!(fmt, "Invalid status code: {context} | {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<reqwest::Error>> for Error {
    fn from(err: ErrorContext<reqwest::Error>) -> Self {
        Error::Transport {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<serde_json::Error>> for Error {
    fn from(err: ErrorContext<serde_json::Error>) -> Self {
        Error::Assign {
            context: err.0,
            source: err.1.to_string(),
        }
    }
}

impl Error {
    /// The status code the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Upstream { status, .. } => *status,
            Error::Missing { status, .. } => *status,
            Error::MalformedBody { status, .. } => *status,
            Error::Transport { .. } => StatusCode::BAD_GATEWAY,
            Error::Assign { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidStatusCode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The detail reported to the client, if any.
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            Error::Upstream { detail, .. } | Error::Missing { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// A short name for the kind of error, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Upstream { .. } => "upstream",
            Error::Missing { .. } => "missing",
            Error::MalformedBody { .. } => "malformed_body",
            Error::Transport { .. } => "transport",
            Error::Assign { .. } => "assign",
            Error::InvalidStatusCode { .. } => "invalid_status_code",
        }
    }

    pub fn standardize(&self) -> (StatusCode, Json<Value>) {
        let detail = match self {
            Error::Upstream { detail, .. } | Error::Missing { detail, .. } => {
                serde_json::to_value(detail).unwrap_or(Value::Null)
            }
            Error::MalformedBody { context, .. } | Error::Transport { context, .. } => {
                Value::String(context.clone())
            }
            Error::Assign { .. } | Error::InvalidStatusCode { .. } => Value::Null,
        };
        (self.status(), Json(serde_json::json!({ "detail": detail })))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let mut resp = self.standardize().into_response();
        // Keep the error around so that middlewares can log it.
        resp.extensions_mut().insert(Arc::new(self));
        resp
    }
}
