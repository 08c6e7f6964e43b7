//! Default serializer turning render descriptors into JSX-like snippets.
//!
//! Props are sorted by name. Props whose value equals the component's
//! declared default are omitted unless [`JsxOptions::show_default_props`] is
//! set, and function-valued props are printed literally when
//! [`JsxOptions::show_functions`] is set.

use serde_json::Value;

use super::{Child, DefaultPropsLookup, PropValue, RenderDescriptor};

const INDENT: &str = "  ";

/// Serializer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsxOptions {
    /// Print function props with their source instead of a placeholder.
    pub show_functions: bool,
    /// Keep props that equal the declared default.
    pub show_default_props: bool,
    /// Longest opening tag kept on one line.
    pub max_inline_length: usize,
}

impl Default for JsxOptions {
    fn default() -> Self {
        Self {
            show_functions: true,
            show_default_props: false,
            max_inline_length: 80,
        }
    }
}

/// Serializes `descriptor`, consulting `lookup` for declared defaults.
///
/// # Examples
///
/// ```rust
/// use sample_harness::render::jsx::{JsxOptions, to_jsx_string};
/// use sample_harness::render::{ComponentCatalog, ComponentRef, ComponentSpec, RenderDescriptor};
///
/// let catalog = ComponentCatalog::new()
///     .with("Button", ComponentSpec::default().with_default("primary", false));
/// let mut descriptor = RenderDescriptor::new(ComponentRef::new("Button"));
/// descriptor.props.insert("label".to_owned(), "Hi".into());
/// descriptor.props.insert("primary".to_owned(), false.into());
///
/// assert_eq!(
///     to_jsx_string(&descriptor, &catalog, JsxOptions::default()),
///     r#"<Button label="Hi" />"#
/// );
/// ```
#[must_use]
pub fn to_jsx_string<L>(descriptor: &RenderDescriptor, lookup: &L, options: JsxOptions) -> String
where
    L: DefaultPropsLookup + ?Sized,
{
    let mut out = String::new();
    write_element(&mut out, descriptor, lookup, options, 0);
    out
}

fn write_element<L>(
    out: &mut String,
    descriptor: &RenderDescriptor,
    lookup: &L,
    options: JsxOptions,
    depth: usize,
) where
    L: DefaultPropsLookup + ?Sized,
{
    let pad = INDENT.repeat(depth);
    let name = descriptor.component.as_str();
    let attributes = attributes(descriptor, lookup, options);
    let inline: String = attributes.iter().map(|attr| format!(" {attr}")).collect();
    let is_multiline = attributes.iter().any(|attr| attr.contains('\n'))
        || pad.len() + name.len() + inline.len() + 4 > options.max_inline_length;
    let has_children = !descriptor.children.is_empty();

    out.push_str(&pad);
    out.push('<');
    out.push_str(name);
    if is_multiline {
        for attr in &attributes {
            out.push('\n');
            out.push_str(&pad);
            out.push_str(INDENT);
            out.push_str(attr);
        }
        out.push('\n');
        out.push_str(&pad);
        out.push_str(if has_children { ">" } else { "/>" });
    } else {
        out.push_str(&inline);
        out.push_str(if has_children { ">" } else { " />" });
    }
    if !has_children {
        return;
    }

    for child in &descriptor.children {
        out.push('\n');
        match child {
            Child::Text(text) => {
                out.push_str(&pad);
                out.push_str(INDENT);
                push_text(out, text);
            }
            Child::Element(nested) => write_element(out, nested, lookup, options, depth + 1),
        }
    }
    out.push('\n');
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Text that JSX would parse as markup or an expression goes out as a string
/// expression instead.
fn push_text(out: &mut String, text: &str) {
    if text.contains(['{', '}', '<', '>', '\n']) {
        out.push('{');
        out.push_str(&js_string(text));
        out.push('}');
    } else {
        out.push_str(text);
    }
}

fn attributes<L>(descriptor: &RenderDescriptor, lookup: &L, options: JsxOptions) -> Vec<String>
where
    L: DefaultPropsLookup + ?Sized,
{
    let defaults = if options.show_default_props {
        None
    } else {
        lookup.default_props(&descriptor.component)
    };
    let mut props: Vec<_> = descriptor.props.iter().collect();
    props.sort_by(|(left, _), (right, _)| left.cmp(right));
    props
        .into_iter()
        .filter(|(name, value)| {
            let declared = defaults.and_then(|map| map.get(name.as_str()));
            !matches!((declared, value.as_value()), (Some(d), Some(v)) if d == v)
        })
        .map(|(name, value)| attribute(name, value, options))
        .collect()
}

fn attribute(name: &str, value: &PropValue, options: JsxOptions) -> String {
    match value {
        PropValue::Value(Value::Bool(true)) => name.to_owned(),
        PropValue::Value(Value::String(text)) if !text.contains(['"', '\n']) => {
            format!("{name}=\"{text}\"")
        }
        PropValue::Value(other) => format!("{name}={{{}}}", js_literal(other)),
        PropValue::Function(function) if options.show_functions => {
            format!("{name}={{{}}}", function.source)
        }
        PropValue::Function(_) => format!("{name}={{function noRefCheck() {{}}}}"),
        PropValue::Ref(slot) => format!("{name}={{node => ({} = node)}}", slot.id),
    }
}

fn js_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => js_string(text),
        Value::Array(items) => {
            let parts: Vec<_> = items.iter().map(js_literal).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_owned(),
        Value::Object(map) => {
            let parts: Vec<_> = map
                .iter()
                .map(|(key, item)| format!("{}: {}", js_key(key), js_literal(item)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_owned()
    } else {
        js_string(key)
    }
}

fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
