//! Rendered wrappers handed to sample assertions.

use super::jsx::{JsxOptions, to_jsx_string};
use super::{
    Child, ComponentRef, DefaultPropsLookup, Depth, MockContext, PropValue, Props,
    RenderDescriptor,
};
use crate::refs::RefSlots;

/// Node of a rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    /// Component rendered at this node.
    pub component: ComponentRef,
    /// Declared props followed by any defaults the caller left out.
    pub props: Props,
    /// Rendered children.
    pub children: Vec<RenderChild>,
}

/// Child of a [`RenderNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderChild {
    /// Plain text.
    Text(String),
    /// A fully rendered nested component.
    Node(RenderNode),
    /// A nested component left unrendered by a shallow wrapper.
    Unexpanded(ComponentRef),
}

impl RenderNode {
    fn expand<L>(
        descriptor: &RenderDescriptor,
        lookup: &L,
        is_full: bool,
        refs: &mut RefSlots<Self>,
    ) -> Self
    where
        L: DefaultPropsLookup + ?Sized,
    {
        let mut props = descriptor.props.clone();
        if let Some(defaults) = lookup.default_props(&descriptor.component) {
            for (name, value) in defaults {
                props
                    .entry(name.clone())
                    .or_insert_with(|| PropValue::Value(value.clone()));
            }
        }
        let children = descriptor
            .children
            .iter()
            .map(|child| match child {
                Child::Text(text) => RenderChild::Text(text.clone()),
                Child::Element(nested) if is_full => {
                    RenderChild::Node(Self::expand(nested, lookup, is_full, refs))
                }
                Child::Element(nested) => RenderChild::Unexpanded(nested.component.clone()),
            })
            .collect();
        let node = Self {
            component: descriptor.component.clone(),
            props,
            children,
        };
        for value in node.props.values() {
            if let PropValue::Ref(slot) = value {
                refs.assign(&slot.id, node.clone());
            }
        }
        node
    }

    fn collect<'a>(&'a self, component: &str, found: &mut Vec<&'a Self>) {
        if self.component.as_str() == component {
            found.push(self);
        }
        for child in &self.children {
            if let RenderChild::Node(node) = child {
                node.collect(component, found);
            }
        }
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                RenderChild::Text(text) => out.push_str(text),
                RenderChild::Node(node) => node.push_text(out),
                RenderChild::Unexpanded(_) => {}
            }
        }
    }
}

/// Rendered sample at one [`Depth`].
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    depth: Depth,
    root: Option<RenderNode>,
    markup: String,
    debug: String,
    context: Option<MockContext>,
    refs: RefSlots<RenderNode>,
}

impl Wrapper {
    /// Renders `descriptor` at `depth`.
    ///
    /// `Mount` expands the whole tree, `Shallow` only the root, and `Render`
    /// keeps static markup without a tree or context.
    #[must_use]
    pub fn new<L>(
        depth: Depth,
        descriptor: &RenderDescriptor,
        lookup: &L,
        context: Option<MockContext>,
    ) -> Self
    where
        L: DefaultPropsLookup + ?Sized,
    {
        let mut refs = RefSlots::new();
        let root = match depth {
            Depth::Mount => Some(RenderNode::expand(descriptor, lookup, true, &mut refs)),
            Depth::Shallow => Some(RenderNode::expand(descriptor, lookup, false, &mut refs)),
            Depth::Render => None,
        };
        let markup = markup(descriptor);
        let debug = match depth {
            Depth::Render => markup.clone(),
            Depth::Mount | Depth::Shallow => to_jsx_string(
                descriptor,
                lookup,
                JsxOptions {
                    show_default_props: true,
                    ..JsxOptions::default()
                },
            ),
        };
        Self {
            depth,
            root,
            markup,
            debug,
            context: context.filter(|_| depth != Depth::Render),
            refs,
        }
    }

    /// Depth this wrapper was rendered at.
    #[must_use]
    pub const fn depth(&self) -> Depth {
        self.depth
    }

    /// Root node, absent for static markup.
    #[must_use]
    pub const fn root(&self) -> Option<&RenderNode> {
        self.root.as_ref()
    }

    /// Looks up a prop on the root node.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.root.as_ref().and_then(|root| root.props.get(name))
    }

    /// Every rendered node of `component`, depth first.
    #[must_use]
    pub fn find(&self, component: &str) -> Vec<&RenderNode> {
        let mut found = Vec::new();
        if let Some(root) = &self.root {
            root.collect(component, &mut found);
        }
        found
    }

    /// Concatenated text content.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        match &self.root {
            Some(root) => root.push_text(&mut out),
            None => strip_tags(&self.markup, &mut out),
        }
        out
    }

    /// Static markup of the sample.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.markup
    }

    /// Human-readable dump of the rendered sample.
    #[must_use]
    pub fn debug(&self) -> &str {
        &self.debug
    }

    /// Mocked context, absent for static markup.
    #[must_use]
    pub const fn context(&self) -> Option<&MockContext> {
        self.context.as_ref()
    }

    /// Node recorded under the ref id `id`.
    #[must_use]
    pub fn ref_node(&self, id: &str) -> Option<&RenderNode> {
        self.refs.get(id)
    }
}

fn markup(descriptor: &RenderDescriptor) -> String {
    let mut out = String::new();
    push_markup(descriptor, &mut out);
    out
}

fn push_markup(descriptor: &RenderDescriptor, out: &mut String) {
    let name = descriptor.component.as_str();
    out.push('<');
    out.push_str(name);
    for (prop, value) in &descriptor.props {
        let Some(data) = value.as_value() else {
            continue;
        };
        out.push(' ');
        out.push_str(prop);
        out.push_str("=\"");
        match data {
            serde_json::Value::String(text) => escape_into(text, out),
            other => escape_into(&other.to_string(), out),
        }
        out.push('"');
    }
    out.push('>');
    for child in &descriptor.children {
        match child {
            Child::Text(text) => escape_into(text, out),
            Child::Element(nested) => push_markup(nested, out),
        }
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

fn strip_tags(markup: &str, out: &mut String) {
    let mut in_tag = false;
    let mut entity = String::new();
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            '&' => entity.push(c),
            ';' if !entity.is_empty() => {
                entity.push(c);
                out.push_str(match entity.as_str() {
                    "&amp;" => "&",
                    "&lt;" => "<",
                    "&gt;" => ">",
                    "&quot;" => "\"",
                    other => other,
                });
                entity.clear();
            }
            _ if !entity.is_empty() => entity.push(c),
            other => out.push(other),
        }
    }
    out.push_str(&entity);
}

#[cfg(test)]
mod tests {
    use super::{RenderChild, Wrapper};
    use crate::render::{
        Child, ComponentCatalog, ComponentRef, ComponentSpec, ContextEntry, Depth, MockContext,
        PropValue, RenderDescriptor,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> ComponentCatalog {
        ComponentCatalog::new()
            .with("Card", ComponentSpec::default().with_default("elevated", false))
            .with("Title", ComponentSpec::default())
    }

    #[fixture]
    fn card() -> RenderDescriptor {
        let mut title = RenderDescriptor::new(ComponentRef::new("Title"));
        title.children.push(Child::Text("Tom & Jerry".to_owned()));
        title
            .props
            .insert("ref".to_owned(), PropValue::reference("refTitle"));
        let mut card = RenderDescriptor::new(ComponentRef::new("Card"));
        card.props.insert("id".to_owned(), "main".into());
        card.children.push(Child::Element(title));
        card
    }

    #[rstest]
    fn mount_expands_tree_and_defaults(catalog: ComponentCatalog, card: RenderDescriptor) {
        let context = MockContext::from_entries(&[ContextEntry::func("now", 1)]);
        let wrapper = Wrapper::new(Depth::Mount, &card, &catalog, Some(context));
        assert_eq!(wrapper.prop("elevated"), Some(&PropValue::from(false)));
        assert_eq!(wrapper.find("Title").len(), 1);
        assert_eq!(wrapper.text(), "Tom & Jerry");
        assert!(wrapper.ref_node("refTitle").is_some());
        assert!(wrapper.context().is_some());
    }

    #[rstest]
    fn shallow_leaves_children_unexpanded(catalog: ComponentCatalog, card: RenderDescriptor) {
        let wrapper = Wrapper::new(Depth::Shallow, &card, &catalog, None);
        let root = wrapper.root().expect("shallow has a root");
        assert_eq!(
            root.children,
            vec![RenderChild::Unexpanded(ComponentRef::new("Title"))]
        );
        assert!(wrapper.find("Title").is_empty());
        assert!(wrapper.ref_node("refTitle").is_none());
    }

    #[rstest]
    fn render_keeps_markup_only(catalog: ComponentCatalog, card: RenderDescriptor) {
        let context = MockContext::from_entries(&[ContextEntry::func("now", 1)]);
        let wrapper = Wrapper::new(Depth::Render, &card, &catalog, Some(context));
        assert!(wrapper.root().is_none());
        assert!(wrapper.context().is_none());
        assert_eq!(
            wrapper.html(),
            "<Card id=\"main\"><Title>Tom &amp; Jerry</Title></Card>"
        );
        assert_eq!(wrapper.text(), "Tom & Jerry");
    }
}
