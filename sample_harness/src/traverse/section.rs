//! Per-section visit: component options, example files and flushing.

use std::borrow::Cow;

use tracing::{error, info};

use crate::assertions::{AssertionFailure, AssertionRegistry};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::model::{Section, component_title};
use crate::output::ExampleFile;

use super::component::ComponentVisitor;

/// Visits the components of a section in declaration order.
#[derive(Clone, Copy)]
pub struct SectionVisitor<'v> {
    components: ComponentVisitor<'v>,
}

impl<'v> SectionVisitor<'v> {
    /// Creates a visitor delegating to `components`.
    #[must_use]
    pub const fn new(components: ComponentVisitor<'v>) -> Self {
        Self { components }
    }

    /// Visits `section`, titled by its key `title`.
    ///
    /// In documentation mode each component's file is truncated before the
    /// component is visited and written once afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HarnessError::Io`] when an example file cannot be
    /// reset or flushed; components after the failing one are not visited.
    pub fn visit(
        &self,
        title: &str,
        section: &Section,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> HarnessResult<()> {
        info!(section = title, "visiting section");
        for (name, component) in &section.components {
            let label = component_title(title, name);
            let component_config = match &component.options {
                None => Cow::Borrowed(config),
                Some(options) => match config.overlay(options) {
                    Ok(merged) => Cow::Owned(merged),
                    Err(err) => {
                        error!(component = %label, error = %err, "component options rejected");
                        registry.register_case(
                            &format!("{label} options applied"),
                            name,
                            Err(AssertionFailure::new(err.to_string())),
                        );
                        continue;
                    }
                },
            };

            let file = component_config
                .doc
                .as_ref()
                .filter(|doc| doc.enabled)
                .map(|doc| ExampleFile::new(&doc.output_dir, name));
            if let Some(target) = &file {
                target.reset()?;
            }
            let buffer = self
                .components
                .visit(component, title, name, &component_config, registry);
            if let (Some(target), Some(text)) = (file, buffer) {
                target.flush(&text)?;
                info!(path = %target.path(), "wrote example file");
                registry.register_case(
                    &format!("{label} example file written"),
                    name,
                    Ok(()),
                );
            }
        }
        Ok(())
    }
}
