//! Traversal driver and the visitors it is built from.
//!
//! [`Harness::run`] walks every section twice at most: first the
//! documentation pass with the `test` namespace stripped, then the test pass
//! with the `doc` namespace stripped. A section whose documentation pass
//! fails is recorded in the [`RunReport`] and the run moves on.

mod attribute;
mod component;
mod section;

pub use attribute::{AttributeSite, AttributeVisitor};
pub use component::ComponentVisitor;
pub use section::SectionVisitor;

use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, debug, error};

use crate::assertions::AssertionRegistry;
use crate::clock::{Clock, SystemClock};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::model::Sections;
use crate::render::RenderBackend;
use crate::strategy::{DocStrategy, LeafStrategy, TestStrategy};

/// Pass a section failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Documentation pass.
    Doc,
    /// Test pass.
    Test,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Doc => "documentation",
            Self::Test => "test",
        })
    }
}

/// A section pass that stopped early.
#[derive(Debug)]
pub struct SectionFailure {
    /// Key of the failing section.
    pub section: String,
    /// Pass that failed.
    pub pass: Pass,
    /// Cause of the failure.
    pub error: HarnessError,
}

/// Outcome of a [`Harness::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Section passes that stopped early, in traversal order.
    pub failures: Vec<SectionFailure>,
}

impl RunReport {
    /// Whether every section pass completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

type LoggerFactory<'h> = Box<dyn Fn(LevelFilter) -> Dispatch + 'h>;

/// Traversal engine over a sample tree.
pub struct Harness<'h> {
    doc: Box<dyn LeafStrategy + 'h>,
    test: Box<dyn LeafStrategy + 'h>,
    clock: Box<dyn Clock + 'h>,
    logger: Option<LoggerFactory<'h>>,
}

impl<'h> Harness<'h> {
    /// Creates a harness using the default strategies over `backend`.
    #[must_use]
    pub fn new(backend: &'h dyn RenderBackend) -> Self {
        Self {
            doc: Box::new(DocStrategy::new(backend)),
            test: Box::new(TestStrategy::new(backend)),
            clock: Box::new(SystemClock),
            logger: None,
        }
    }

    /// Replaces the time source used for file headers.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'h) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Routes log output of each run through a dispatch built by `logger`.
    ///
    /// `logger` receives the run configuration's `log_level`. Without a
    /// logger, events go to whatever subscriber the caller has installed and
    /// `log_level` is not consulted.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Fn(LevelFilter) -> Dispatch + 'h) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Replaces the documentation strategy.
    #[must_use]
    pub fn with_doc_strategy(mut self, strategy: impl LeafStrategy + 'h) -> Self {
        self.doc = Box::new(strategy);
        self
    }

    /// Replaces the test strategy.
    #[must_use]
    pub fn with_test_strategy(mut self, strategy: impl LeafStrategy + 'h) -> Self {
        self.test = Box::new(strategy);
        self
    }

    /// Runs the enabled passes over every section in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidConfig`] when `config` fails
    /// validation. Failures inside a section are reported through the
    /// returned [`RunReport`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sample_harness::{
    ///     CatalogBackend, ComponentCatalog, Harness, HarnessConfig, RecordingRegistry, Sections,
    ///     TestOptions,
    /// };
    ///
    /// # fn main() -> sample_harness::HarnessResult<()> {
    /// let backend = CatalogBackend::new(ComponentCatalog::new());
    /// let config = HarnessConfig::new().with_test(TestOptions::default());
    /// let mut registry = RecordingRegistry::new();
    /// let report = Harness::new(&backend).run(&Sections::new(), &config, &mut registry)?;
    /// assert!(report.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(
        &self,
        sections: &Sections,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> HarnessResult<RunReport> {
        config.validate()?;
        let report = match &self.logger {
            Some(logger) => {
                let dispatch = logger(config.log_level.as_filter());
                tracing::dispatcher::with_default(&dispatch, || {
                    self.run_sections(sections, config, registry)
                })
            }
            None => self.run_sections(sections, config, registry),
        };
        Ok(report)
    }

    /// Runs the documentation pass only.
    ///
    /// # Errors
    ///
    /// See [`Harness::run`].
    pub fn build_guide(
        &self,
        sections: &Sections,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> HarnessResult<RunReport> {
        self.run(sections, &config.for_doc_pass(), registry)
    }

    /// Runs the test pass only.
    ///
    /// # Errors
    ///
    /// See [`Harness::run`].
    pub fn run_tests(
        &self,
        sections: &Sections,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> HarnessResult<RunReport> {
        self.run(sections, &config.for_test_pass(), registry)
    }

    fn run_sections(
        &self,
        sections: &Sections,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> RunReport {
        let visitor = SectionVisitor::new(ComponentVisitor::new(
            AttributeVisitor::new(self.doc.as_ref(), self.test.as_ref()),
            self.clock.as_ref(),
        ));
        let mut report = RunReport::default();
        for (title, section) in sections {
            if config.doc_enabled() {
                let doc_config = config.for_doc_pass();
                if let Err(err) = visitor.visit(title, section, &doc_config, registry) {
                    error!(section = %title, pass = %Pass::Doc, error = %err, "section pass failed");
                    report.failures.push(SectionFailure {
                        section: title.clone(),
                        pass: Pass::Doc,
                        error: err,
                    });
                }
            }
            if config.test_enabled() {
                let test_config = config.for_test_pass();
                if let Some(setup) = test_config
                    .test
                    .as_ref()
                    .and_then(|test| test.mock_setup.as_ref())
                {
                    debug!(section = %title, "running mock setup");
                    setup();
                }
                if let Err(err) = visitor.visit(title, section, &test_config, registry) {
                    error!(section = %title, pass = %Pass::Test, error = %err, "section pass failed");
                    report.failures.push(SectionFailure {
                        section: title.clone(),
                        pass: Pass::Test,
                        error: err,
                    });
                }
            }
        }
        report
    }
}
