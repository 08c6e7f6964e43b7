//! Flavour configuration loading under an isolated working directory.

use anyhow::{Result, ensure};
use camino::Utf8Path;
use rstest::rstest;
use sample_guide::Flavour;
use sample_guide::guide::{flavour_config, guide_config};
use sample_harness::LogLevel;
use test_helpers::jail::with_config_file;

const CONFIG: &str = r#"
log_level = "info"

[doc]
output_dir = "guide"

[profiles.prod]
log_level = "error"

[profiles.prod.doc]
preamble_script = "import Button from './Button';"
"#;

#[rstest]
#[case(Flavour::Dev, LogLevel::Info, None)]
#[case(Flavour::Prod, LogLevel::Error, Some("import Button from './Button';"))]
fn declared_profiles_layer_over_the_base(
    #[case] flavour: Flavour,
    #[case] level: LogLevel,
    #[case] preamble: Option<&str>,
) -> Result<()> {
    let config = with_config_file(CONFIG, |_, path| Ok(flavour_config(Some(path), flavour)?))?;
    ensure!(config.log_level == level);
    let doc = config
        .doc
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("doc namespace missing"))?;
    ensure!(doc.output_dir == "guide");
    ensure!(doc.preamble_script.as_deref() == preamble);
    Ok(())
}

#[rstest]
fn environment_overrides_the_profile() -> Result<()> {
    let config = with_config_file(CONFIG, |jail, path| {
        jail.set_env("SAMPLE_HARNESS_DOC__OUTPUT_DIR", "from-env");
        Ok(flavour_config(Some(path), Flavour::Prod)?)
    })?;
    let guide = guide_config(config, Flavour::Prod, None);
    let doc = guide
        .doc
        .ok_or_else(|| anyhow::anyhow!("doc namespace missing"))?;
    ensure!(doc.output_dir == Utf8Path::new("from-env").join("prod"));
    Ok(())
}

#[rstest]
fn missing_file_without_profiles_uses_defaults() -> Result<()> {
    let config = with_config_file("", |_, _| Ok(flavour_config(None, Flavour::Dev)?))?;
    ensure!(config.log_level == LogLevel::Warn);
    ensure!(config.doc.is_none());
    Ok(())
}
