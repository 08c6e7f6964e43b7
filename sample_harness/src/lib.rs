//! Metadata-driven component sample harness.
//!
//! A tree of [`Sections`] describes, per component, a set of prop and method
//! samples. [`Harness::run`] walks that tree and, for every sample, either
//! renders it at the requested fidelity depth and hands the wrapper to an
//! assertion callback, or serializes it into a per-component markdown
//! example file. Rendering and assertion bookkeeping are collaborators
//! ([`RenderBackend`], [`AssertionRegistry`]) with default implementations
//! ([`CatalogBackend`], [`RecordingRegistry`]).
//!
//! # Examples
//!
//! ```rust
//! use sample_harness::{
//!     Attribute, CatalogBackend, Component, ComponentCatalog, ComponentSpec, Harness,
//!     HarnessConfig, RecordingRegistry, Section, Sections, TestOptions,
//! };
//!
//! # fn main() -> sample_harness::HarnessResult<()> {
//! let backend = CatalogBackend::new(
//!     ComponentCatalog::new().with("Button", ComponentSpec::default().with_required("label")),
//! );
//! let button = Component::new().with_prop(
//!     "label",
//!     Attribute::new()
//!         .with_prop("label", "Hi")
//!         .with_test("mount", "rendersLabel", |wrapper, _title, _name| {
//!             match wrapper.map(|w| w.html().to_owned()) {
//!                 Some(html) if html.contains("Hi") => Ok(()),
//!                 _ => Err(sample_harness::AssertionFailure::new("label missing")),
//!             }
//!         }),
//! );
//! let mut sections = Sections::new();
//! sections.insert("Buttons".to_owned(), Section::new().with_component("Button", button));
//!
//! let mut registry = RecordingRegistry::new();
//! let config = HarnessConfig::new().with_test(TestOptions::default());
//! Harness::new(&backend).run(&sections, &config, &mut registry)?;
//! assert_eq!(
//!     registry.case_titles(),
//!     ["Buttons: Button: [ prop: label ] enzyme-mount: rendersLabel"]
//! );
//! assert_eq!(registry.summary().failed, 0);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod clock;
pub mod config;
mod error;
mod hook;
pub mod model;
pub mod output;
pub mod refs;
pub mod render;
pub mod strategy;
pub mod traverse;

pub use assertions::{AssertionFailure, AssertionRegistry, CaseResult, RecordingRegistry};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DocOptions, DocSerializer, HarnessConfig, LogLevel, TestOptions, load_config};
pub use error::{HarnessError, HarnessResult};
pub use hook::Hook;
pub use model::{Attribute, Component, GroupTag, Section, Sections};
pub use render::{
    CatalogBackend, Child, ComponentCatalog, ComponentRef, ComponentSpec, Depth, PropValue,
    RenderBackend, RenderDescriptor, RenderError, Wrapper,
};
pub use traverse::{Harness, RunReport};
