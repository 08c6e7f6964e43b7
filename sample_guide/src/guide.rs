//! Building guide flavours from a sample file.

use camino::{Utf8Path, Utf8PathBuf};
use sample_harness::{
    CatalogBackend, DocOptions, Harness, HarnessConfig, HarnessError, RecordingRegistry, Sections,
    load_config,
};
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Flavour};
use crate::error::GuideError;
use crate::samples::SampleFile;

/// Output root used when neither the command line nor the configuration
/// names one.
pub const DEFAULT_OUT_DIR: &str = "styleguide";

/// Builds every flavour requested by `args`.
///
/// Nothing is read or written when no flavour is requested.
///
/// # Errors
///
/// Returns the first sample, configuration or traversal error, or
/// [`GuideError::SectionsFailed`] / [`GuideError::CasesFailed`] when a
/// flavour completed with failures.
pub fn run(args: &Args) -> Result<(), GuideError> {
    let flavours = args.requested();
    if flavours.is_empty() {
        return Ok(());
    }
    let SampleFile {
        components,
        sections,
    } = SampleFile::load(&args.samples)?;
    let backend = CatalogBackend::new(components);
    for flavour in flavours {
        let config = guide_config(
            flavour_config(args.config.as_deref(), flavour)?,
            flavour,
            args.out_dir.as_deref(),
        );
        build_flavour(flavour, &backend, &sections, &config)?;
    }
    Ok(())
}

/// Loads configuration for `flavour`.
///
/// The flavour's profile is applied when the file declares it; otherwise
/// the base configuration is used.
///
/// # Errors
///
/// Returns [`GuideError::Harness`] when the configuration cannot be loaded.
pub fn flavour_config(
    path: Option<&Utf8Path>,
    flavour: Flavour,
) -> Result<HarnessConfig, GuideError> {
    match load_config(path, Some(flavour.as_str())) {
        Err(HarnessError::UnknownProfile(profile)) => {
            debug!(%profile, "profile not declared; using base configuration");
            Ok(load_config(path, None)?)
        }
        loaded => Ok(loaded?),
    }
}

/// Narrows `config` to a documentation-only run writing under
/// `<root>/<flavour>`.
///
/// `root` is `out_dir` when given, then the configured `doc.output_dir`,
/// then [`DEFAULT_OUT_DIR`].
#[must_use]
pub fn guide_config(
    mut config: HarnessConfig,
    flavour: Flavour,
    out_dir: Option<&Utf8Path>,
) -> HarnessConfig {
    let mut doc = config
        .doc
        .take()
        .unwrap_or_else(|| DocOptions::new(DEFAULT_OUT_DIR));
    let root = out_dir.map_or_else(
        || {
            if doc.output_dir.as_str().is_empty() {
                Utf8PathBuf::from(DEFAULT_OUT_DIR)
            } else {
                doc.output_dir.clone()
            }
        },
        Utf8Path::to_path_buf,
    );
    doc.enabled = true;
    doc.output_dir = root.join(flavour.as_str());
    config.test = None;
    config.with_doc(doc)
}

fn build_flavour(
    flavour: Flavour,
    backend: &CatalogBackend,
    sections: &Sections,
    config: &HarnessConfig,
) -> Result<(), GuideError> {
    let mut registry = RecordingRegistry::new();
    let report = Harness::new(backend)
        .with_logger(log_dispatch)
        .build_guide(sections, config, &mut registry)?;
    let summary = registry.summary();
    let dispatch = log_dispatch(config.log_level.as_filter());
    tracing::dispatcher::with_default(&dispatch, || {
        info!(
            %flavour,
            passed = summary.passed,
            failed = summary.failed,
            section_failures = report.failures.len(),
            "guide built"
        );
    });

    if !report.is_success() {
        return Err(GuideError::SectionsFailed {
            flavour: flavour.to_string(),
            count: report.failures.len(),
        });
    }
    if summary.failed > 0 {
        return Err(GuideError::CasesFailed {
            flavour: flavour.to_string(),
            count: summary.failed,
        });
    }
    Ok(())
}

/// Subscriber writing to stderr at `level`, overridable through `RUST_LOG`.
fn log_dispatch(level: LevelFilter) -> Dispatch {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}
