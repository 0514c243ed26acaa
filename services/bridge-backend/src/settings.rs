use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;
use crate::mapping::StatusCodeMapping;
use common::config::{self, Error as ConfigError};
use common::settings::TracingSettings;

/// Prefix of the environment variables overriding the configuration files,
/// eg `BRIDGE__TRACING__LEVEL=debug`.
pub static ENV_PREFIX: &str = "BRIDGE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Upstream status code (as a string, configuration keys are strings) to the status code
    /// reported to our clients.
    #[serde(default)]
    pub status_code_mapping: HashMap<String, u16>,
    #[serde(default)]
    pub tracing: TracingSettings,
}

impl Settings {
    /// Reads the settings found in the `service` sub directory of `config_dir`.
    pub fn load(
        config_dir: &Path,
        profile: Option<&str>,
        overrides: Vec<String>,
    ) -> Result<Settings, ConfigError> {
        config::load_settings(config_dir, &["service"], profile, ENV_PREFIX, overrides)
    }

    pub fn status_code_mapping(&self) -> Result<StatusCodeMapping, Error> {
        StatusCodeMapping::try_from(&self.status_code_mapping)
    }
}
