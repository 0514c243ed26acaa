use axum::http::StatusCode;
use std::collections::HashMap;

use crate::error::Error;

/// Translates the status code observed on an upstream response into the status code reported
/// to our own client. Codes without an entry are reported unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCodeMapping(HashMap<StatusCode, StatusCode>);

impl StatusCodeMapping {
    pub fn new() -> Self {
        StatusCodeMapping::default()
    }

    /// Builder style `insert`.
    pub fn with(mut self, observed: StatusCode, reported: StatusCode) -> Self {
        self.0.insert(observed, reported);
        self
    }

    pub fn insert(&mut self, observed: StatusCode, reported: StatusCode) -> Option<StatusCode> {
        self.0.insert(observed, reported)
    }

    /// Returns the reported code for `observed`, which is `observed` itself when unmapped.
    pub fn get(&self, observed: StatusCode) -> StatusCode {
        self.0.get(&observed).copied().unwrap_or(observed)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a mapping from raw numeric codes, rejecting any code outside 100..=999.
    pub fn try_from_codes<I>(codes: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (u16, u16)>,
    {
        codes
            .into_iter()
            .map(|(observed, reported)| -> Result<(StatusCode, StatusCode), Error> {
                Ok((status_code(observed)?, status_code(reported)?))
            })
            .collect()
    }
}

fn status_code(code: u16) -> Result<StatusCode, Error> {
    StatusCode::from_u16(code).map_err(|_| Error::InvalidStatusCode {
        context: "Status codes must lie between 100 and 999".to_string(),
        value: code.to_string(),
    })
}

impl FromIterator<(StatusCode, StatusCode)> for StatusCodeMapping {
    fn from_iter<I: IntoIterator<Item = (StatusCode, StatusCode)>>(iter: I) -> Self {
        StatusCodeMapping(iter.into_iter().collect())
    }
}

impl From<HashMap<StatusCode, StatusCode>> for StatusCodeMapping {
    fn from(map: HashMap<StatusCode, StatusCode>) -> Self {
        StatusCodeMapping(map)
    }
}

/// Configuration files can only carry string keys, so the observed codes are parsed here.
impl TryFrom<&HashMap<String, u16>> for StatusCodeMapping {
    type Error = Error;

    fn try_from(map: &HashMap<String, u16>) -> Result<Self, Self::Error> {
        let codes = map
            .iter()
            .map(|(observed, reported)| -> Result<(u16, u16), Error> {
                let observed = observed
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidStatusCode {
                        context: "Observed status codes must be numbers".to_string(),
                        value: observed.clone(),
                    })?;
                Ok((observed, *reported))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        StatusCodeMapping::try_from_codes(codes)
    }
}
