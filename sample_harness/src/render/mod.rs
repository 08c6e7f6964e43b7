//! Render collaborators: descriptors, fidelity depths and backends.
//!
//! The traversal never renders anything itself. It asks a [`RenderBackend`]
//! to turn a component reference plus props into a [`RenderDescriptor`], and
//! later to wrap that descriptor at one of the [`Depth`] fidelity levels. The
//! default [`CatalogBackend`] resolves components against a declared
//! [`ComponentCatalog`].

mod catalog;
mod context;
pub mod jsx;
mod wrapper;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use catalog::{CatalogBackend, ComponentCatalog, ComponentSpec};
pub use context::{ContextEntry, ContextKind, MockContext, Stub};
pub use wrapper::{RenderChild, RenderNode, Wrapper};

/// Props keyed by name, in declaration order.
pub type Props = IndexMap<String, PropValue>;

/// Name of a renderable component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    /// Creates a reference to the component called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the component name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Function-valued prop, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionProp {
    /// Source text of the function.
    #[serde(rename = "$fn")]
    pub source: String,
}

/// Prop asking the backend to record the rendered node under a ref id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefProp {
    /// Identifier of the slot receiving the node.
    #[serde(rename = "$ref")]
    pub id: String,
}

/// Value of a single prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// A function, rendered literally by the serializer.
    Function(FunctionProp),
    /// A ref slot assignment.
    Ref(RefProp),
    /// Any plain data value.
    Value(Value),
}

impl PropValue {
    /// Builds a function-valued prop from its source text.
    #[must_use]
    pub fn function(source: impl Into<String>) -> Self {
        Self::Function(FunctionProp {
            source: source.into(),
        })
    }

    /// Builds a ref prop for the slot `id`.
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Ref(RefProp { id: id.into() })
    }

    /// Returns the plain data value, if this prop carries one.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Function(_) | Self::Ref(_) => None,
        }
    }
}

impl<T: Into<Value>> From<T> for PropValue {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}

/// Child of a render descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    /// Plain text.
    Text(String),
    /// A nested component.
    Element(RenderDescriptor),
}

/// Opaque "this component with these props" description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDescriptor {
    /// Component being rendered.
    pub component: ComponentRef,
    /// Props in declaration order.
    #[serde(default)]
    pub props: Props,
    /// Children in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

impl RenderDescriptor {
    /// Creates a descriptor with no props or children.
    #[must_use]
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            props: Props::new(),
            children: Vec::new(),
        }
    }
}

/// Rendering fidelity used to produce a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Full tree including context.
    Mount,
    /// One level; the context's type slots are dropped.
    Shallow,
    /// Static markup without context.
    Render,
}

impl Depth {
    /// Every depth in dispatch order.
    pub const ALL: [Self; 3] = [Self::Mount, Self::Shallow, Self::Render];

    /// Returns the depth name used in sample definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Shallow => "shallow",
            Self::Render => "render",
        }
    }

    /// Resolves a depth name, returning `None` for unrecognized names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|depth| depth.as_str() == name)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RenderError::UnknownDepth(s.to_owned()))
    }
}

/// Render-construction and wrapping failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The component is not known to the backend.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// A required prop was not supplied.
    #[error("component '{component}' requires prop '{prop}'")]
    MissingProp {
        /// Component being built.
        component: String,
        /// Name of the missing prop.
        prop: String,
    },

    /// The depth name does not match any [`Depth`].
    #[error("unknown fidelity depth '{0}'")]
    UnknownDepth(String),

    /// Failure reported by a custom backend or hook.
    #[error("{0}")]
    Backend(String),
}

/// Source of declared default props, consulted by serializers.
pub trait DefaultPropsLookup {
    /// Returns the declared default props of `component`, if any.
    fn default_props(&self, component: &ComponentRef) -> Option<&IndexMap<String, Value>>;
}

/// Rendering capability used by both leaf strategies.
pub trait RenderBackend: DefaultPropsLookup {
    /// Builds a descriptor for `component` with `props` and `children`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the component cannot be instantiated.
    fn build(
        &self,
        component: &ComponentRef,
        props: &Props,
        children: &[Child],
    ) -> Result<RenderDescriptor, RenderError>;

    /// Produces a full-tree wrapper, optionally with a mocked context.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the tree cannot be rendered.
    fn mount(
        &self,
        descriptor: &RenderDescriptor,
        context: Option<&MockContext>,
    ) -> Result<Wrapper, RenderError>;

    /// Produces a one-level wrapper, optionally with a mocked context.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the root cannot be rendered.
    fn shallow(
        &self,
        descriptor: &RenderDescriptor,
        context: Option<&MockContext>,
    ) -> Result<Wrapper, RenderError>;

    /// Produces a static-markup wrapper.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the markup cannot be produced.
    fn render(&self, descriptor: &RenderDescriptor) -> Result<Wrapper, RenderError>;
}
