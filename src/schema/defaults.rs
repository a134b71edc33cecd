//! Per-instance default value store
//!
//! An instance starts out sharing the class-level defaults of its model type.
//! The first field default written into the store detaches it, so the shared
//! class defaults are never modified.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::types::ModelType;

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultStore {
    values: Arc<Map<String, Value>>,
}

impl DefaultStore {
    /// Empty, instance-owned store
    pub fn new() -> Self {
        Self {
            values: Arc::new(Map::new()),
        }
    }

    /// Store sharing the class defaults visible to `model_type`.
    pub fn inherit(model_type: &ModelType) -> Self {
        match model_type.inherited_defaults() {
            Some(shared) => Self {
                values: Arc::clone(shared),
            },
            None => Self::new(),
        }
    }

    /// Writes a default, copying the shared store first if needed.
    pub fn set_default(&mut self, name: impl Into<String>, value: Value) {
        Arc::make_mut(&mut self.values).insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true while this store still aliases `shared`.
    pub fn is_shared_with(&self, shared: &Arc<Map<String, Value>>) -> bool {
        Arc::ptr_eq(&self.values, shared)
    }
}

impl Default for DefaultStore {
    fn default() -> Self {
        Self::new()
    }
}
