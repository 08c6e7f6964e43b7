//! Declared components and the default backend built on them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Child, ComponentRef, DefaultPropsLookup, Depth, MockContext, Props, RenderBackend,
    RenderDescriptor, RenderError, Wrapper,
};

/// Declaration of one renderable component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Props applied when the caller omits them.
    pub default_props: IndexMap<String, Value>,
    /// Props that must be supplied for the component to render.
    pub required_props: Vec<String>,
}

impl ComponentSpec {
    /// Adds a declared default prop.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(name.into(), value.into());
        self
    }

    /// Marks `name` as required.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required_props.push(name.into());
        self
    }
}

/// Components known to the default backend, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentCatalog {
    components: IndexMap<String, ComponentSpec>,
}

impl ComponentCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with `spec`, replacing any earlier declaration.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, spec: ComponentSpec) -> Self {
        self.components.insert(name.into(), spec);
        self
    }

    /// Looks up the declaration for `component`.
    #[must_use]
    pub fn get(&self, component: &ComponentRef) -> Option<&ComponentSpec> {
        self.components.get(component.as_str())
    }
}

impl DefaultPropsLookup for ComponentCatalog {
    fn default_props(&self, component: &ComponentRef) -> Option<&IndexMap<String, Value>> {
        self.get(component).map(|spec| &spec.default_props)
    }
}

/// Backend resolving components against a [`ComponentCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBackend {
    catalog: ComponentCatalog,
}

impl CatalogBackend {
    /// Creates a backend over `catalog`.
    #[must_use]
    pub const fn new(catalog: ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog backing this renderer.
    #[must_use]
    pub const fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    fn check(&self, descriptor: &RenderDescriptor) -> Result<(), RenderError> {
        let spec = self
            .catalog
            .get(&descriptor.component)
            .ok_or_else(|| RenderError::UnknownComponent(descriptor.component.to_string()))?;
        if let Some(missing) = spec
            .required_props
            .iter()
            .find(|prop| !descriptor.props.contains_key(prop.as_str()))
        {
            return Err(RenderError::MissingProp {
                component: descriptor.component.to_string(),
                prop: missing.clone(),
            });
        }
        descriptor.children.iter().try_for_each(|child| match child {
            Child::Element(nested) => self.check(nested),
            Child::Text(_) => Ok(()),
        })
    }
}

impl DefaultPropsLookup for CatalogBackend {
    fn default_props(&self, component: &ComponentRef) -> Option<&IndexMap<String, Value>> {
        self.catalog.default_props(component)
    }
}

impl RenderBackend for CatalogBackend {
    fn build(
        &self,
        component: &ComponentRef,
        props: &Props,
        children: &[Child],
    ) -> Result<RenderDescriptor, RenderError> {
        let descriptor = RenderDescriptor {
            component: component.clone(),
            props: props.clone(),
            children: children.to_vec(),
        };
        self.check(&descriptor)?;
        Ok(descriptor)
    }

    fn mount(
        &self,
        descriptor: &RenderDescriptor,
        context: Option<&MockContext>,
    ) -> Result<Wrapper, RenderError> {
        self.check(descriptor)?;
        Ok(Wrapper::new(
            Depth::Mount,
            descriptor,
            &self.catalog,
            context.cloned(),
        ))
    }

    fn shallow(
        &self,
        descriptor: &RenderDescriptor,
        context: Option<&MockContext>,
    ) -> Result<Wrapper, RenderError> {
        self.check(descriptor)?;
        Ok(Wrapper::new(
            Depth::Shallow,
            descriptor,
            &self.catalog,
            context.cloned(),
        ))
    }

    fn render(&self, descriptor: &RenderDescriptor) -> Result<Wrapper, RenderError> {
        self.check(descriptor)?;
        Ok(Wrapper::new(
            Depth::Render,
            descriptor,
            &self.catalog,
            None,
        ))
    }
}
