use config::ConfigError;
use std::fmt;

use crate::err_context::ErrorContext;

#[derive(Debug)]
pub enum Error {
    /// The layered sources could not be merged.
    Configuration {
        context: String,
        source: ConfigError,
    },
    /// The merged configuration does not fit the requested settings type.
    Deserialization {
        context: String,
        source: ConfigError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { context, source } => {
                write!(
                    fmt,
                    "Could not create configuration: {context} | source: {source}"
                )
            }
            Error::Deserialization { context, source } => {
                write!(
                    fmt,
                    "Could not deserialize configuration: {context} | source: {source}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ConfigError>> for Error {
    fn from(ctx: ErrorContext<ConfigError>) -> Error {
        Error::Configuration {
            context: ctx.0,
            source: ctx.1,
        }
    }
}
