//! Attribute storage behind a structured model
//!
//! `AttributeStore` is the seam to the underlying observable model. It owns
//! attribute values and whatever change tracking the host provides; the
//! guarded accessor only decides which names may pass through.

use serde_json::{Map, Value};

/// Native attribute storage of a data model.
pub trait AttributeStore {
    /// Reads an attribute. `None` means the attribute holds no value.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Writes every attribute in `attrs` as one request.
    fn set(&mut self, attrs: Map<String, Value>);

    /// All attributes currently holding a value
    fn attributes(&self) -> &Map<String, Value>;
}

/// In-memory attribute store with last-write change tracking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    attributes: Map<String, Value>,
    changed: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names whose value changed during the most recent `set`
    pub fn changed(&self) -> &[String] {
        &self.changed
    }

    pub fn has_changed(&self, name: &str) -> bool {
        self.changed.iter().any(|c| c == name)
    }
}

impl AttributeStore for MemoryStore {
    fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn set(&mut self, attrs: Map<String, Value>) {
        self.changed.clear();
        for (name, value) in attrs {
            if self.attributes.get(&name) != Some(&value) {
                self.changed.push(name.clone());
            }
            self.attributes.insert(name, value);
        }
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
