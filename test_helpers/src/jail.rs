//! Configuration files loaded from an isolated working directory.
//!
//! Each call runs inside its own `figment::Jail`, so the configuration file
//! and any `SAMPLE_HARNESS_*` variables set by a test never leak into
//! another.

use anyhow::{Result, anyhow};
use camino::Utf8Path;
use figment::Jail;

/// File name the configuration is written to, relative to the jail root.
pub const CONFIG_FILE: &str = "guide.toml";

/// Writes `contents` to [`CONFIG_FILE`] in a fresh jail and runs `f` there.
///
/// `f` receives the jail, for setting environment variables, and the
/// relative path of the configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or `f` fails; the error
/// text of `f` is preserved.
pub fn with_config_file<F, T>(contents: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut Jail, &Utf8Path) -> Result<T>,
{
    let mut loaded = None;
    Jail::try_with(|jail| {
        jail.create_file(CONFIG_FILE, contents)?;
        let value = f(jail, Utf8Path::new(CONFIG_FILE))
            .map_err(|err| figment::Error::from(format!("{err:#}")))?;
        loaded = Some(value);
        Ok(())
    })
    .map_err(|err| anyhow!("configuration jail failed: {err}"))?;
    loaded.ok_or_else(|| anyhow!("configuration closure produced no value"))
}
