//! Per-attribute visit: derive names, apply options, dispatch strategies.

use std::borrow::Cow;

use tracing::error;

use crate::assertions::{AssertionFailure, AssertionRegistry};
use crate::config::HarnessConfig;
use crate::model::{Attribute, GroupTag};
use crate::output::ExampleBuffer;
use crate::render::ComponentRef;
use crate::strategy::{Leaf, LeafEnv, LeafStrategy};

/// Visits one attribute, running the documentation strategy before the test
/// strategy.
#[derive(Clone, Copy)]
pub struct AttributeVisitor<'v> {
    doc: &'v dyn LeafStrategy,
    test: &'v dyn LeafStrategy,
}

/// Where an attribute sits inside its component.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSite<'a> {
    /// Group the attribute was declared in.
    pub group: GroupTag,
    /// Title of the enclosing component.
    pub component_title: &'a str,
    /// Target used when the attribute names none.
    pub fallback_target: &'a ComponentRef,
}

impl<'v> AttributeVisitor<'v> {
    /// Creates a visitor dispatching to `doc` and `test`.
    #[must_use]
    pub const fn new(doc: &'v dyn LeafStrategy, test: &'v dyn LeafStrategy) -> Self {
        Self { doc, test }
    }

    /// Visits `attribute`, declared as `name` at `site`.
    ///
    /// An `options` object that does not fit the configuration schema is
    /// reported as a failed case and the attribute is skipped.
    pub fn visit(
        &self,
        attribute: &Attribute,
        name: &str,
        site: AttributeSite<'_>,
        config: &HarnessConfig,
        registry: &mut dyn AssertionRegistry,
        buffer: Option<&mut ExampleBuffer>,
    ) {
        let leaf = Leaf::new(
            attribute,
            name,
            site.group,
            site.component_title,
            site.fallback_target,
        );
        let attribute_config = match &attribute.options {
            None => Cow::Borrowed(config),
            Some(options) => match config.overlay(options) {
                Ok(merged) => Cow::Owned(merged),
                Err(err) => {
                    error!(title = %leaf.title, error = %err, "attribute options rejected");
                    registry.register_case(
                        &format!("{} options applied", leaf.title),
                        name,
                        Err(AssertionFailure::new(err.to_string())),
                    );
                    return;
                }
            },
        };
        let mut env = LeafEnv { registry, buffer };
        self.doc.run(&leaf, &attribute_config, &mut env);
        self.test.run(&leaf, &attribute_config, &mut env);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{AttributeSite, AttributeVisitor};
    use crate::assertions::RecordingRegistry;
    use crate::config::{DocOptions, HarnessConfig};
    use crate::model::{Attribute, GroupTag};
    use crate::render::ComponentRef;
    use crate::strategy::{Leaf, LeafEnv, LeafStrategy};
    use rstest::rstest;
    use serde_json::json;

    struct Probe<'a> {
        label: &'static str,
        seen: &'a RefCell<Vec<String>>,
    }

    impl LeafStrategy for Probe<'_> {
        fn run(&self, leaf: &Leaf<'_>, config: &HarnessConfig, _env: &mut LeafEnv<'_>) {
            let preamble = config
                .doc
                .as_ref()
                .and_then(|doc| doc.preamble_script.clone())
                .unwrap_or_default();
            self.seen
                .borrow_mut()
                .push(format!("{} {} {preamble}", self.label, leaf.title));
        }
    }

    fn visit(attribute: &Attribute, config: &HarnessConfig) -> (Vec<String>, RecordingRegistry) {
        let seen = RefCell::new(Vec::new());
        let doc = Probe { label: "doc", seen: &seen };
        let test = Probe { label: "test", seen: &seen };
        let mut registry = RecordingRegistry::new();
        let target = ComponentRef::new("Button");
        AttributeVisitor::new(&doc, &test).visit(
            attribute,
            "size",
            AttributeSite {
                group: GroupTag::Props,
                component_title: "Buttons: Button:",
                fallback_target: &target,
            },
            config,
            &mut registry,
            None,
        );
        (seen.into_inner(), registry)
    }

    #[rstest]
    fn runs_doc_before_test_with_overlaid_options() {
        let config = HarnessConfig::new().with_doc(DocOptions::new("out"));
        let attribute = Attribute::new().with_options(json!({"doc": {"preamble_script": "//x"}}));
        let (seen, _) = visit(&attribute, &config);
        assert_eq!(
            seen,
            [
                "doc Buttons: Button: [ prop: size ] //x",
                "test Buttons: Button: [ prop: size ] //x",
            ]
        );
    }

    #[rstest]
    fn rejected_options_fail_one_case_and_skip_strategies() {
        let config = HarnessConfig::new().with_doc(DocOptions::new("out"));
        let attribute = Attribute::new().with_options(json!({"doc": {"enabled": 3}}));
        let (seen, registry) = visit(&attribute, &config);
        assert!(seen.is_empty());
        assert_eq!(
            registry.case_titles(),
            ["Buttons: Button: [ prop: size ] options applied"]
        );
        assert_eq!(registry.summary().failed, 1);
    }
}
