//! Mocked context providers handed to mounted and shallow wrappers.

use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a context entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// A function returning a fixed value.
    Func,
    /// Any other declared type; ignored when mocking.
    #[serde(other)]
    Other,
}

/// One entry of an attribute's declared context list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Context key.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub kind: ContextKind,
    /// Value returned by the stub for `func` entries.
    #[serde(default)]
    pub value: Value,
}

impl ContextEntry {
    /// Declares a `func` entry whose stub returns `value`.
    #[must_use]
    pub fn func(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: ContextKind::Func,
            value: value.into(),
        }
    }
}

/// Stub function returning a fixed value and counting its calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Stub {
    returns: Value,
    calls: Rc<Cell<usize>>,
}

impl Stub {
    /// Creates a stub returning `returns`.
    #[must_use]
    pub fn returning(returns: Value) -> Self {
        Self {
            returns,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Invokes the stub.
    #[must_use]
    pub fn call(&self) -> Value {
        self.calls.set(self.calls.get() + 1);
        self.returns.clone()
    }

    /// Number of invocations so far, shared across clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

/// Context values plus their declared-type slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockContext {
    /// Stubs keyed by context name.
    pub context: IndexMap<String, Stub>,
    /// Declared types keyed by context name.
    pub child_context_types: IndexMap<String, ContextKind>,
}

impl MockContext {
    /// Builds a context from declared entries; only `func` entries are mocked.
    #[must_use]
    pub fn from_entries(entries: &[ContextEntry]) -> Self {
        entries
            .iter()
            .filter(|entry| entry.kind == ContextKind::Func)
            .fold(Self::default(), |mut ctx, entry| {
                ctx.context
                    .insert(entry.name.clone(), Stub::returning(entry.value.clone()));
                ctx.child_context_types
                    .insert(entry.name.clone(), entry.kind);
                ctx
            })
    }

    /// Returns a copy without the declared-type slots.
    #[must_use]
    pub fn without_type_slots(&self) -> Self {
        Self {
            context: self.context.clone(),
            child_context_types: IndexMap::new(),
        }
    }

    /// Looks up the stub registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Stub> {
        self.context.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextEntry, ContextKind, MockContext};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn only_func_entries_are_mocked() {
        let entries: Vec<ContextEntry> = serde_json::from_value(json!([
            {"name": "now", "type": "func", "value": 42},
            {"name": "theme", "type": "object", "value": {"dark": true}},
        ]))
        .expect("entries decode");
        let ctx = MockContext::from_entries(&entries);
        assert_eq!(ctx.context.len(), 1);
        assert_eq!(ctx.child_context_types.get("now"), Some(&ContextKind::Func));
        assert!(ctx.get("theme").is_none());
    }

    #[rstest]
    fn stub_returns_value_and_counts_calls() {
        let ctx = MockContext::from_entries(&[ContextEntry::func("now", 7)]);
        let stub = ctx.get("now").expect("stub registered");
        assert_eq!(stub.call(), json!(7));
        assert_eq!(stub.call(), json!(7));
        let copy = ctx.without_type_slots();
        assert_eq!(copy.get("now").map(super::Stub::calls), Some(2));
        assert!(copy.child_context_types.is_empty());
    }
}
