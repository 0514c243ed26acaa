mod error;
pub use self::error::Error;

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::{env, path::Path};
use tracing::trace;

use crate::err_context::ErrorContextExt;

/// Environment variable selecting the profile, it wins over the profile given as argument.
pub static PROFILE_ENV_VAR: &str = "BRIDGE_PROFILE";

static DEFAULT_ENV_NAME: &str = "default";
static LOCAL_ENV_NAME: &str = "local";

/// Merges, for each sub directory of `root_dir`, the `default`, profile and `local`
/// configuration files, then the environment variables starting with `prefix`, and
/// finally the `key=value` overrides.
pub fn merge_configuration<
    'a,
    R: Into<Option<&'a str>> + Clone,
    P: Into<Option<&'a str>>,
    D: AsRef<str>,
>(
    root_dir: &Path,
    sub_dirs: &[D],
    profile: R,
    prefix: P,
    overrides: Vec<String>,
) -> Result<Config, Error> {
    let mut builder = sub_dirs
        .iter()
        .try_fold(Config::builder(), |mut builder, sub_dir| {
            let dir_path = root_dir.join(sub_dir.as_ref());

            let default_path = dir_path.join(DEFAULT_ENV_NAME);

            trace!(
                "Reading default configuration from: {}",
                default_path.display()
            );

            builder = builder.add_source(File::from(default_path));

            // The profile from the environment wins over the one given as argument.
            if let Some(profile) = env::var(PROFILE_ENV_VAR)
                .ok()
                .or_else(|| profile.clone().into().map(String::from))
            {
                let profile_path = dir_path.join(profile);

                trace!(
                    "Reading profile configuration from: {}",
                    profile_path.display()
                );

                builder = builder.add_source(File::from(profile_path).required(false));
            }

            // Not checked in.
            let local_path = dir_path.join(LOCAL_ENV_NAME);

            trace!("Reading local configuration from: {}", local_path.display());

            builder = builder.add_source(File::from(local_path).required(false));

            Ok::<_, Error>(builder)
        })?;

    if let Some(prefix) = prefix.into() {
        let prefix = Environment::with_prefix(prefix)
            .prefix_separator("__")
            .separator("__");
        builder = builder.add_source(prefix)
    }

    if !overrides.is_empty() {
        builder = builder.add_source(config_from_args(overrides)?)
    }

    builder
        .build()
        .context("Could not merge configuration")
        .map_err(|err| err.into())
}

/// Merges the configuration like `merge_configuration` does, and deserializes the result.
pub fn load_settings<
    'a,
    T: DeserializeOwned,
    R: Into<Option<&'a str>> + Clone,
    P: Into<Option<&'a str>>,
    D: AsRef<str>,
>(
    root_dir: &Path,
    sub_dirs: &[D],
    profile: R,
    prefix: P,
    overrides: Vec<String>,
) -> Result<T, Error> {
    merge_configuration(root_dir, sub_dirs, profile, prefix, overrides)?
        .try_deserialize()
        .map_err(|err| Error::Deserialization {
            context: format!(
                "Could not deserialize settings merged from {}",
                root_dir.display()
            ),
            source: err,
        })
}

// Create a new configuration source from a list of assignments key=value
fn config_from_args(args: impl IntoIterator<Item = String>) -> Result<Config, Error> {
    let builder = args.into_iter().fold(Config::builder(), |builder, arg| {
        builder.add_source(File::from_str(&arg, config::FileFormat::Toml))
    });
    builder
        .build()
        .context("Could not build configuration from args")
        .map_err(|err| err.into())
}
