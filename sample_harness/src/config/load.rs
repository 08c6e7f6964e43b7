//! Loading [`HarnessConfig`] from a TOML file and the environment.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde_json::Value;
use tracing::debug;

use super::{HarnessConfig, merge_value};
use crate::error::{HarnessError, HarnessResult};

/// Prefix of environment variables read by [`load_config`].
///
/// Nested keys are separated by `__`, so `SAMPLE_HARNESS_DOC__OUTPUT_DIR`
/// sets `doc.output_dir`.
pub const ENV_PREFIX: &str = "SAMPLE_HARNESS_";

const PROFILES_KEY: &str = "profiles";

/// Loads configuration from `path` and the environment.
///
/// Layers, lowest precedence first: the file's top-level tables, the
/// `[profiles.<profile>]` table when `profile` is given, then environment
/// variables prefixed with [`ENV_PREFIX`]. The `profiles` table itself never
/// reaches the resulting configuration.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] when `path` does not exist,
/// [`HarnessError::Gathering`] when a provider fails,
/// [`HarnessError::UnknownProfile`] when `profile` is not declared and
/// [`HarnessError::Json`] when the profile table is not an object.
pub fn load_config(path: Option<&Utf8Path>, profile: Option<&str>) -> HarnessResult<HarnessConfig> {
    let mut file = Figment::new();
    if let Some(file_path) = path {
        if !file_path.is_file() {
            return Err(HarnessError::io(
                file_path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        file = file.merge(Toml::file(file_path.as_std_path()));
    }
    let mut value: Value = file.extract().map_err(HarnessError::from)?;
    let profiles = value
        .as_object_mut()
        .and_then(|table| table.remove(PROFILES_KEY));

    if let Some(name) = profile {
        let layer = profiles
            .as_ref()
            .and_then(|table| table.get(name))
            .cloned()
            .ok_or_else(|| HarnessError::UnknownProfile(name.to_owned()))?;
        if !layer.is_object() {
            return Err(HarnessError::invalid_config(
                format!("{PROFILES_KEY}.{name}"),
                "profile must be a table",
            ));
        }
        debug!(profile = name, "applying configuration profile");
        merge_value(&mut value, layer);
    }

    Figment::from(Serialized::defaults(value))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(HarnessError::from)
}
