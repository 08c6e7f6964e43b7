//! Per-component visit: group titles, example buffer and attribute order.

use crate::assertions::AssertionRegistry;
use crate::clock::{Clock, header_line};
use crate::config::HarnessConfig;
use crate::model::{Component, GroupTag, component_title};
use crate::output::ExampleBuffer;
use crate::render::ComponentRef;

use super::attribute::{AttributeSite, AttributeVisitor};

/// Visits every attribute of a component, `props` before `methods`.
#[derive(Clone, Copy)]
pub struct ComponentVisitor<'v> {
    attributes: AttributeVisitor<'v>,
    clock: &'v dyn Clock,
}

impl<'v> ComponentVisitor<'v> {
    /// Creates a visitor stamping headers with `clock`.
    #[must_use]
    pub const fn new(attributes: AttributeVisitor<'v>, clock: &'v dyn Clock) -> Self {
        Self { attributes, clock }
    }

    /// Visits `component`, declared as `name` in the section `section_title`.
    ///
    /// Returns the filled example buffer when documentation mode is active.
    /// Empty groups open neither a heading nor a test group.
    pub fn visit(
        &self,
        component: &Component,
        section_title: &str,
        name: &str,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
    ) -> Option<ExampleBuffer> {
        let title = component_title(section_title, name);
        let mut buffer = config
            .doc_enabled()
            .then(|| ExampleBuffer::with_header(&header_line(self.clock)));
        let fallback_target = component
            .component
            .clone()
            .unwrap_or_else(|| ComponentRef::new(name));

        for group in GroupTag::ORDER {
            let attributes = component.samples.group(group);
            if attributes.is_empty() {
                continue;
            }
            let mut group_title = format!("{title} {}", group.heading());
            if let Some(doc) = buffer.as_mut() {
                group_title.push_str(" Styleguide Examples");
                doc.push_group(group);
            }
            let site = AttributeSite {
                group,
                component_title: &title,
                fallback_target: &fallback_target,
            };
            registry.register_group(&group_title, &mut |inner| {
                for (attribute_name, attribute) in attributes {
                    self.attributes.visit(
                        attribute,
                        attribute_name,
                        site,
                        config,
                        inner,
                        buffer.as_mut(),
                    );
                }
            });
        }
        buffer
    }
}
