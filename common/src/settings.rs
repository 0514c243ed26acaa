use serde::{Deserialize, Serialize};

/// Settings for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingSettings {
    /// Name reported in every log line.
    pub service_name: String,
    /// Default filter, used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for TracingSettings {
    fn default() -> Self {
        TracingSettings {
            service_name: "bridge".to_string(),
            level: "info".to_string(),
        }
    }
}
