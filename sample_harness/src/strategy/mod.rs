//! Leaf strategies run once per attribute.
//!
//! The [`TestStrategy`] and [`DocStrategy`] never see each other. Each one
//! checks whether its namespace is enabled in the configuration it receives
//! and returns straight away when it is not.

mod doc;

pub use doc::DocStrategy;
pub use test::TestStrategy;

use crate::assertions::AssertionRegistry;
use crate::config::HarnessConfig;
use crate::model::{Attribute, GroupTag, attribute_title};
use crate::output::ExampleBuffer;
use crate::render::{ComponentRef, RenderBackend, RenderDescriptor, RenderError};

/// One attribute together with the names derived for it during a visit.
#[derive(Debug, Clone)]
pub struct Leaf<'a> {
    /// Attribute definition.
    pub attribute: &'a Attribute,
    /// Key of the attribute within its group.
    pub name: &'a str,
    /// Group the attribute belongs to.
    pub group: GroupTag,
    /// `name` for props, `name()` for methods.
    pub display_name: String,
    /// Hierarchical title, unique within the component.
    pub title: String,
    /// Component rendered for this attribute.
    pub target: ComponentRef,
}

impl<'a> Leaf<'a> {
    /// Derives display name, title and render target for `attribute`.
    ///
    /// The attribute's own target wins over `fallback_target`.
    #[must_use]
    pub fn new(
        attribute: &'a Attribute,
        name: &'a str,
        group: GroupTag,
        component_title: &str,
        fallback_target: &ComponentRef,
    ) -> Self {
        let display_name = group.display_name(name);
        let title = attribute_title(component_title, group, &display_name);
        let target = attribute
            .component
            .clone()
            .unwrap_or_else(|| fallback_target.clone());
        Self {
            attribute,
            name,
            group,
            display_name,
            title,
            target,
        }
    }

    /// Builds the default render descriptor through `backend`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`RenderError`].
    pub fn build_default(&self, backend: &dyn RenderBackend) -> Result<RenderDescriptor, RenderError> {
        backend.build(&self.target, &self.attribute.props, &self.attribute.children)
    }
}

/// Mutable collaborators a strategy may touch for one attribute.
pub struct LeafEnv<'e> {
    /// Receiver of test cases and liveness probes.
    pub registry: &'e mut dyn AssertionRegistry,
    /// Example document of the enclosing component, in documentation mode.
    pub buffer: Option<&'e mut ExampleBuffer>,
}

/// Side effect performed for every attribute.
pub trait LeafStrategy {
    /// Runs the strategy for `leaf` under `config`.
    fn run(&self, leaf: &Leaf<'_>, config: &HarnessConfig, env: &mut LeafEnv<'_>);
}

#[cfg(test)]
mod tests {
    use super::Leaf;
    use crate::model::{Attribute, GroupTag};
    use crate::render::ComponentRef;
    use rstest::rstest;

    #[rstest]
    #[case::fallback(None, "Button")]
    #[case::own_target(Some("IconButton"), "IconButton")]
    fn target_prefers_attribute_over_fallback(
        #[case] own: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut attribute = Attribute::new();
        attribute.component = own.map(ComponentRef::new);
        let leaf = Leaf::new(
            &attribute,
            "focus",
            GroupTag::Methods,
            "Buttons: Button:",
            &ComponentRef::new("Button"),
        );
        assert_eq!(leaf.target.as_str(), expected);
        assert_eq!(leaf.display_name, "focus()");
        assert_eq!(leaf.title, "Buttons: Button: [ method: focus() ]");
    }
}
