use axum::http::StatusCode;
use tracing::debug;

use crate::detail::Detail;
use crate::error::Error;

/// Status reported when a value is missing and the caller did not choose one.
pub const DEFAULT_MISSING_STATUS: StatusCode = StatusCode::NOT_FOUND;

/// Returns the value if there is one, or an `Error::Missing` with the given status and detail.
///
/// This is a guard, not a validator: nothing is checked beyond the presence of the value.
pub fn assert_present<T>(
    value: Option<T>,
    status: StatusCode,
    detail: Option<Detail>,
) -> Result<T, Error> {
    match value {
        Some(value) => Ok(value),
        None => {
            debug!(status = status.as_u16(), "expected value is missing");
            Err(Error::Missing { status, detail })
        }
    }
}

/// `assert_present` with a 404 Not Found and no detail.
pub fn assert_found<T>(value: Option<T>) -> Result<T, Error> {
    assert_present(value, DEFAULT_MISSING_STATUS, None)
}

/// Presence guards as methods on `Option`, so that handlers can write
/// `storage.find(id).await?.or_not_found()?`.
pub trait Presence<T> {
    fn or_not_found(self) -> Result<T, Error>;

    fn or_status(self, status: StatusCode, detail: Option<Detail>) -> Result<T, Error>;
}

impl<T> Presence<T> for Option<T> {
    fn or_not_found(self) -> Result<T, Error> {
        assert_found(self)
    }

    fn or_status(self, status: StatusCode, detail: Option<Detail>) -> Result<T, Error> {
        assert_present(self, status, detail)
    }
}
