//! Sample tree: sections own components, components own attribute groups.
//!
//! The tree is read-only during a traversal. Titles, display names and
//! output buffers are derived per run and never written back.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::assertions::CaseResult;
use crate::hook::Hook;
use crate::render::{
    Child, ComponentRef, ContextEntry, PropValue, Props, RenderDescriptor, RenderError, Wrapper,
};
use crate::strategy::Leaf;

/// Assertion callback receiving the wrapper, case title and attribute name.
pub type SampleTest = Hook<dyn Fn(Option<&Wrapper>, &str, &str) -> CaseResult>;

/// Custom render-descriptor builder for one attribute.
pub type DescriptorBuilder = Hook<dyn Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError>>;

/// Producer of a finished example snippet for one attribute.
pub type SnippetProducer = Hook<dyn Fn(&Leaf<'_>) -> String>;

/// Sections keyed by name, in declaration order.
pub type Sections = IndexMap<String, Section>;

/// Attribute group of a component sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupTag {
    /// Prop examples.
    Props,
    /// Method examples.
    Methods,
}

impl GroupTag {
    /// Groups in traversal order.
    pub const ORDER: [Self; 2] = [Self::Props, Self::Methods];

    /// Group key as written in sample definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Props => "props",
            Self::Methods => "methods",
        }
    }

    /// Singular form used inside attribute titles.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Props => "prop",
            Self::Methods => "method",
        }
    }

    /// Capitalized form used in group titles.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Props => "Props",
            Self::Methods => "Methods",
        }
    }

    /// Display name of an attribute called `name` in this group.
    #[must_use]
    pub fn display_name(self, name: &str) -> String {
        match self {
            Self::Props => name.to_owned(),
            Self::Methods => format!("{name}()"),
        }
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title of component `name` inside section `section_title`.
#[must_use]
pub fn component_title(section_title: &str, name: &str) -> String {
    format!("{section_title}: {name}:")
}

/// Title of an attribute inside a component.
#[must_use]
pub fn attribute_title(component_title: &str, group: GroupTag, display_name: &str) -> String {
    format!("{component_title} [ {}: {display_name} ]", group.singular())
}

/// Top-level grouping of components.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    /// Components keyed by name.
    #[serde(default, rename = "sectionComponents", alias = "components")]
    pub components: IndexMap<String, Component>,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component under `name`.
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>, component: Component) -> Self {
        self.components.insert(name.into(), component);
        self
    }
}

/// One component's full sample set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component {
    /// Render target for attributes that do not name their own.
    #[serde(default)]
    pub component: Option<ComponentRef>,
    /// Prop and method samples.
    #[serde(default)]
    pub samples: Samples,
    /// Configuration overlay applied while visiting this component.
    #[serde(default)]
    pub options: Option<Value>,
}

impl Component {
    /// Creates a component with no samples.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default render target.
    #[must_use]
    pub fn with_target(mut self, target: ComponentRef) -> Self {
        self.component = Some(target);
        self
    }

    /// Adds a prop sample.
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.samples.props.insert(name.into(), attribute);
        self
    }

    /// Adds a method sample.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.samples.methods.insert(name.into(), attribute);
        self
    }

    /// Sets the configuration overlay.
    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Attribute samples grouped by [`GroupTag`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Samples {
    /// Prop samples keyed by prop name.
    #[serde(default)]
    pub props: IndexMap<String, Attribute>,
    /// Method samples keyed by method name.
    #[serde(default)]
    pub methods: IndexMap<String, Attribute>,
}

impl Samples {
    /// Attributes of `group`, in declaration order.
    #[must_use]
    pub const fn group(&self, group: GroupTag) -> &IndexMap<String, Attribute> {
        match group {
            GroupTag::Props => &self.props,
            GroupTag::Methods => &self.methods,
        }
    }
}

/// Test cases and mocked context of one attribute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestSamples {
    /// Context entries mocked for mounted and shallow wrappers.
    #[serde(default)]
    pub context: Vec<ContextEntry>,
    /// Builder replacing the default descriptor construction.
    #[serde(skip)]
    pub build: Option<DescriptorBuilder>,
    /// Assertions keyed by depth name, then test name.
    #[serde(skip)]
    pub cases: IndexMap<String, IndexMap<String, SampleTest>>,
}

/// Documentation descriptor of one attribute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocSample {
    /// Preamble emitted before the example, replacing the configured one.
    #[serde(default)]
    pub script: Option<String>,
    /// Builder replacing the default descriptor construction.
    #[serde(skip)]
    pub build: Option<DescriptorBuilder>,
    /// Producer bypassing descriptor construction altogether.
    #[serde(skip)]
    pub snippet: Option<SnippetProducer>,
}

/// One prop or method example.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    /// Render target, overriding the component's.
    #[serde(default)]
    pub component: Option<ComponentRef>,
    /// Props passed to the target.
    #[serde(default)]
    pub props: Props,
    /// Children passed to the target.
    #[serde(default)]
    pub children: Vec<Child>,
    /// Test cases.
    #[serde(default, alias = "enzyme")]
    pub tests: TestSamples,
    /// Documentation descriptor.
    #[serde(default, alias = "styleguidist")]
    pub doc: DocSample,
    /// Configuration overlay applied while visiting this attribute.
    #[serde(default)]
    pub options: Option<Value>,
}

impl Attribute {
    /// Creates an attribute with no props, tests or documentation overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the render target.
    #[must_use]
    pub fn with_target(mut self, target: ComponentRef) -> Self {
        self.component = Some(target);
        self
    }

    /// Adds a prop passed to the target.
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Adds a child passed to the target.
    #[must_use]
    pub fn with_child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    /// Adds an assertion run against a wrapper of depth `depth`.
    #[must_use]
    pub fn with_test<F>(mut self, depth: impl Into<String>, name: impl Into<String>, test: F) -> Self
    where
        F: Fn(Option<&Wrapper>, &str, &str) -> CaseResult + 'static,
    {
        let test: Rc<dyn Fn(Option<&Wrapper>, &str, &str) -> CaseResult> = Rc::new(test);
        self.tests
            .cases
            .entry(depth.into())
            .or_default()
            .insert(name.into(), Hook::from_rc(test));
        self
    }

    /// Declares a mocked context entry.
    #[must_use]
    pub fn with_context(mut self, entry: ContextEntry) -> Self {
        self.tests.context.push(entry);
        self
    }

    /// Replaces descriptor construction for tests.
    #[must_use]
    pub fn with_test_builder<F>(mut self, build: F) -> Self
    where
        F: Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError> + 'static,
    {
        self.tests.build = Some(descriptor_builder(build));
        self
    }

    /// Sets the documentation preamble.
    #[must_use]
    pub fn with_doc_script(mut self, script: impl Into<String>) -> Self {
        self.doc.script = Some(script.into());
        self
    }

    /// Replaces descriptor construction for documentation.
    #[must_use]
    pub fn with_doc_builder<F>(mut self, build: F) -> Self
    where
        F: Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError> + 'static,
    {
        self.doc.build = Some(descriptor_builder(build));
        self
    }

    /// Produces the documentation snippet directly.
    #[must_use]
    pub fn with_doc_snippet<F>(mut self, snippet: F) -> Self
    where
        F: Fn(&Leaf<'_>) -> String + 'static,
    {
        let snippet: Rc<dyn Fn(&Leaf<'_>) -> String> = Rc::new(snippet);
        self.doc.snippet = Some(Hook::from_rc(snippet));
        self
    }

    /// Sets the configuration overlay.
    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

fn descriptor_builder<F>(build: F) -> DescriptorBuilder
where
    F: Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError> + 'static,
{
    let build: Rc<dyn Fn(&Leaf<'_>) -> Result<RenderDescriptor, RenderError>> = Rc::new(build);
    Hook::from_rc(build)
}
