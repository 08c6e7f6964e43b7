//! Configuration schema, narrowing and per-level overlays.
//!
//! A [`HarnessConfig`] is validated once when a run starts. Each pass then
//! receives a narrowed clone ([`HarnessConfig::for_doc_pass`],
//! [`HarnessConfig::for_test_pass`]), and components or attributes that carry
//! an `options` object get a further clone with that object deep-merged on
//! top ([`HarnessConfig::overlay`]). No level ever mutates the configuration
//! it was handed.

mod load;
mod merge;

use std::fmt;
use std::rc::Rc;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::level_filters::LevelFilter;

use crate::error::{HarnessError, HarnessResult};
use crate::hook::Hook;
use crate::model::{DescriptorBuilder, SnippetProducer};
use crate::render::{MockContext, RenderDescriptor, RenderError, Wrapper};
use crate::strategy::Leaf;

pub use load::{ENV_PREFIX, load_config};
pub use merge::{merge, merge_value};

/// Custom wrapper factory receiving the depth name, descriptor and context.
///
/// Returning `Ok(None)` hands the assertion an absent wrapper.
pub type WrapperFactory = Hook<
    dyn Fn(&str, &RenderDescriptor, Option<&MockContext>) -> Result<Option<Wrapper>, RenderError>,
>;

/// Hook run once before each test pass.
pub type MockSetup = Hook<dyn Fn()>;

/// Serializer producing a documentation example body.
#[derive(Debug, Clone)]
pub enum DocSerializer {
    /// Serializes a built render descriptor.
    Descriptor(Hook<dyn Fn(&RenderDescriptor) -> String>),
    /// Produces the body straight from the attribute, skipping descriptor
    /// construction.
    Attribute(SnippetProducer),
}

impl DocSerializer {
    /// Wraps a descriptor serializer.
    #[must_use]
    pub fn descriptor<F>(serialize: F) -> Self
    where
        F: Fn(&RenderDescriptor) -> String + 'static,
    {
        let serialize: Rc<dyn Fn(&RenderDescriptor) -> String> = Rc::new(serialize);
        Self::Descriptor(Hook::from_rc(serialize))
    }

    /// Wraps a direct snippet producer.
    #[must_use]
    pub fn attribute<F>(produce: F) -> Self
    where
        F: Fn(&Leaf<'_>) -> String + 'static,
    {
        let produce: Rc<dyn Fn(&Leaf<'_>) -> String> = Rc::new(produce);
        Self::Attribute(Hook::from_rc(produce))
    }
}

/// Verbosity of the harness's own log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-wrapper dumps.
    Trace,
    /// Wrapper dumps and per-attribute progress.
    Debug,
    /// Per-file progress.
    Info,
    /// Recovered failures only.
    #[default]
    Warn,
    /// Unrecovered failures only.
    Error,
    /// Nothing.
    Off,
}

impl LogLevel {
    /// Filter equivalent to this level.
    #[must_use]
    pub const fn as_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_filter(), f)
    }
}

/// Options of the test pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestOptions {
    /// Whether the test pass runs.
    pub enabled: bool,
    /// Report unknown depth names as failed cases instead of passing `None`.
    pub strict_depths: bool,
    /// Replaces the default depth dispatch.
    #[serde(skip)]
    pub create_wrapper: Option<WrapperFactory>,
    /// Runs before each test pass.
    #[serde(skip)]
    pub mock_setup: Option<MockSetup>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            strict_depths: false,
            create_wrapper: None,
            mock_setup: None,
        }
    }
}

impl TestOptions {
    /// Sets a custom wrapper factory.
    #[must_use]
    pub fn with_wrapper_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str, &RenderDescriptor, Option<&MockContext>) -> Result<Option<Wrapper>, RenderError>
            + 'static,
    {
        let factory: Rc<
            dyn Fn(
                &str,
                &RenderDescriptor,
                Option<&MockContext>,
            ) -> Result<Option<Wrapper>, RenderError>,
        > = Rc::new(factory);
        self.create_wrapper = Some(Hook::from_rc(factory));
        self
    }

    /// Sets the mock-setup hook.
    #[must_use]
    pub fn with_mock_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn() + 'static,
    {
        let setup: Rc<dyn Fn()> = Rc::new(setup);
        self.mock_setup = Some(Hook::from_rc(setup));
        self
    }

    fn carry_hooks(&mut self, from: &Self) {
        self.create_wrapper.clone_from(&from.create_wrapper);
        self.mock_setup.clone_from(&from.mock_setup);
    }
}

/// Options of the documentation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocOptions {
    /// Whether the documentation pass runs.
    pub enabled: bool,
    /// Directory receiving one `<component>.md` file per component.
    pub output_dir: Utf8PathBuf,
    /// Line emitted at the top of every example block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble_script: Option<String>,
    /// Replaces the default descriptor construction.
    #[serde(skip)]
    pub build_render_tree: Option<DescriptorBuilder>,
    /// Replaces the default serializer.
    #[serde(skip)]
    pub serialize: Option<DocSerializer>,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: Utf8PathBuf::from("styleguide"),
            preamble_script: None,
            build_render_tree: None,
            serialize: None,
        }
    }
}

impl DocOptions {
    /// Creates enabled options writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the preamble script.
    #[must_use]
    pub fn with_preamble(mut self, script: impl Into<String>) -> Self {
        self.preamble_script = Some(script.into());
        self
    }

    /// Sets a custom descriptor builder.
    #[must_use]
    pub fn with_render_tree_builder<F>(mut self, build: F) -> Self
    where
        F: Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError> + 'static,
    {
        let build: Rc<dyn Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError>> =
            Rc::new(build);
        self.build_render_tree = Some(Hook::from_rc(build));
        self
    }

    /// Sets a custom serializer.
    #[must_use]
    pub fn with_serializer(mut self, serializer: DocSerializer) -> Self {
        self.serialize = Some(serializer);
        self
    }

    fn carry_hooks(&mut self, from: &Self) {
        self.build_render_tree.clone_from(&from.build_render_tree);
        self.serialize.clone_from(&from.serialize);
    }
}

/// Complete harness configuration.
///
/// A missing namespace disables its mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Verbosity of harness logging, handed to the logger installed with
    /// [`Harness::with_logger`](crate::Harness::with_logger).
    pub log_level: LogLevel,
    /// Test pass options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestOptions>,
    /// Documentation pass options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocOptions>,
}

impl HarnessConfig {
    /// Creates a configuration with both modes disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Sets the test namespace.
    #[must_use]
    pub fn with_test(mut self, test: TestOptions) -> Self {
        self.test = Some(test);
        self
    }

    /// Sets the documentation namespace.
    #[must_use]
    pub fn with_doc(mut self, doc: DocOptions) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Whether the test pass runs.
    #[must_use]
    pub fn test_enabled(&self) -> bool {
        self.test.as_ref().is_some_and(|test| test.enabled)
    }

    /// Whether the documentation pass runs.
    #[must_use]
    pub fn doc_enabled(&self) -> bool {
        self.doc.as_ref().is_some_and(|doc| doc.enabled)
    }

    /// Clone without the test namespace.
    #[must_use]
    pub fn for_doc_pass(&self) -> Self {
        Self {
            test: None,
            ..self.clone()
        }
    }

    /// Clone without the documentation namespace.
    #[must_use]
    pub fn for_test_pass(&self) -> Self {
        Self {
            doc: None,
            ..self.clone()
        }
    }

    /// Returns a clone with `options` deep-merged on top.
    ///
    /// Overlays adjust the namespaces already present and never bring back
    /// one that was stripped for the current pass. Hooks are carried over
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] when the merged object no longer fits
    /// the schema.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sample_harness::config::{DocOptions, HarnessConfig};
    /// use serde_json::json;
    ///
    /// # fn main() -> sample_harness::HarnessResult<()> {
    /// let base = HarnessConfig::new().with_doc(DocOptions::new("docs"));
    /// let merged = base.overlay(&json!({"doc": {"preamble_script": "// hi"}}))?;
    /// assert_eq!(
    ///     merged.doc.as_ref().and_then(|doc| doc.preamble_script.as_deref()),
    ///     Some("// hi")
    /// );
    /// assert!(base.doc.as_ref().is_some_and(|doc| doc.preamble_script.is_none()));
    /// # Ok(())
    /// # }
    /// ```
    pub fn overlay(&self, options: &Value) -> HarnessResult<Self> {
        let merged = merge(&serde_json::to_value(self)?, options);
        let mut config: Self = serde_json::from_value(merged)?;
        config.test = match (config.test.take(), &self.test) {
            (Some(mut test), Some(base)) => {
                test.carry_hooks(base);
                Some(test)
            }
            _ => None,
        };
        config.doc = match (config.doc.take(), &self.doc) {
            (Some(mut doc), Some(base)) => {
                doc.carry_hooks(base);
                Some(doc)
            }
            _ => None,
        };
        Ok(config)
    }

    /// Checks the configuration once before a run.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidConfig`] when documentation mode is
    /// enabled without an output directory.
    pub fn validate(&self) -> HarnessResult<()> {
        let lacks_output_dir = self
            .doc
            .as_ref()
            .is_some_and(|doc| doc.enabled && doc.output_dir.as_str().trim().is_empty());
        if lacks_output_dir {
            return Err(HarnessError::invalid_config(
                "doc.output_dir",
                "documentation mode needs an output directory",
            ));
        }
        Ok(())
    }
}
