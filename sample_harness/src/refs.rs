//! Explicit ref-id to slot mapping.
//!
//! Samples that need a handle on a rendered node declare a `{"$ref": id}`
//! prop. Ids come from [`gen_ref_id`], and the
//! backend fills the matching slot when it renders the node; callers read
//! the slot back instead of relying on a dynamically named variable.

use indexmap::IndexMap;
use uuid::Uuid;

/// Generates a fresh ref id of the form `ref<32 hex digits>`.
#[must_use]
pub fn gen_ref_id() -> String {
    format!("ref{}", Uuid::new_v4().simple())
}

/// Rendered nodes keyed by ref id, in assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct RefSlots<T> {
    slots: IndexMap<String, T>,
}

impl<T> Default for RefSlots<T> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
        }
    }
}

impl<T> RefSlots<T> {
    /// Creates an empty slot map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `id`, returning the previous occupant.
    pub fn assign(&mut self, id: &str, value: T) -> Option<T> {
        self.slots.insert(id.to_owned(), value)
    }

    /// Returns the value stored under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.slots.get(id)
    }
}
