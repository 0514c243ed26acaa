use std::fmt;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::log::SetLoggerError;
use tracing_log::LogTracer;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use common::settings::TracingSettings;

#[derive(Debug)]
pub enum Error {
    Logger {
        context: String,
        source: SetLoggerError,
    },
    Subscriber {
        context: String,
        source: SetGlobalDefaultError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Logger { context, source } => {
                write!(fmt, "Telemetry logger: {context} | {source}")
            }
            Error::Subscriber { context, source } => {
                write!(fmt, "Telemetry subscriber: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Sets up a tracing subscriber, writing bunyan formatted JSON lines to `sink`.
///
/// `RUST_LOG` wins over the level found in the settings.
pub fn get_subscriber<Sink>(settings: TracingSettings, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let TracingSettings {
        service_name,
        level,
    } = settings;

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let bunyan_format = BunyanFormattingLayer::new(service_name, sink);

    Registry::default()
        .with(filter_layer)
        .with(JsonStorageLayer)
        .with(bunyan_format)
}

/// Registers a subscriber as global default, and redirects `log` records to it.
///
/// This can only succeed once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), Error> {
    LogTracer::init().map_err(|err| Error::Logger {
        context: "Could not redirect log records to tracing".to_string(),
        source: err,
    })?;
    tracing::subscriber::set_global_default(subscriber).map_err(|err| Error::Subscriber {
        context: "Could not set the global tracing subscriber".to_string(),
        source: err,
    })
}
