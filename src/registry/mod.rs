//! Model type registry
//!
//! Model types are registered parent-first. Each registered type is
//! immutable, and its effective schema is composed once at registration and
//! shared by every instance created through the registry.

mod errors;
mod loader;

pub use errors::{LoadError, LoadResult, RegistryError, RegistryResult};
pub use loader::ModelLoader;

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{MemoryStore, StructuredModel};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{EffectiveSchema, ModelDefinition, ModelType, SchemaComposer};

#[derive(Debug, Clone)]
struct Entry {
    model_type: Arc<ModelType>,
    schema: Arc<EffectiveSchema>,
}

/// In-memory registry of model types, keyed by name
///
/// Cloning is cheap: types and schemas are shared.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: BTreeMap<String, Entry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model type.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if the definition has no name
    /// - `DuplicateModel` if the name is taken; registered types are immutable
    /// - `UnknownParent` if the parent has not been registered yet
    /// - `Schema` if composition fails; nothing is registered in that case
    pub fn register(&mut self, definition: ModelDefinition) -> RegistryResult<Arc<ModelType>> {
        if definition.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.entries.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateModel(definition.name));
        }

        let parent = match definition.parent.as_deref() {
            Some(parent) => Some(self.get(parent).cloned().ok_or_else(|| {
                RegistryError::UnknownParent {
                    model: definition.name.clone(),
                    parent: parent.to_string(),
                }
            })?),
            None => None,
        };

        let model_type = Arc::new(ModelType::from_definition(definition, parent));
        self.insert(model_type)
    }

    /// Registers a model type built in code.
    ///
    /// Its ancestors must be registered first, and must be the same
    /// instances the registry holds.
    pub fn register_type(&mut self, model_type: Arc<ModelType>) -> RegistryResult<Arc<ModelType>> {
        if model_type.name().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(model_type.name()) {
            return Err(RegistryError::DuplicateModel(model_type.name().to_string()));
        }
        if let Some(parent) = model_type.parent() {
            let known = self
                .get(parent.name())
                .map_or(false, |registered| Arc::ptr_eq(registered, parent));
            if !known {
                return Err(RegistryError::UnknownParent {
                    model: model_type.name().to_string(),
                    parent: parent.name().to_string(),
                });
            }
        }
        self.insert(model_type)
    }

    fn insert(&mut self, model_type: Arc<ModelType>) -> RegistryResult<Arc<ModelType>> {
        let schema = Arc::new(SchemaComposer::compose(&model_type)?);

        let count = schema.len().to_string();
        log_event_with_fields(
            Event::ModelRegistered,
            &[
                ("field_count", count.as_str()),
                ("model", model_type.name()),
                ("parent", model_type.parent().map_or("", |p| p.name())),
            ],
        );

        self.entries.insert(
            model_type.name().to_string(),
            Entry {
                model_type: Arc::clone(&model_type),
                schema,
            },
        );
        Ok(model_type)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ModelType>> {
        self.entries.get(name).map(|e| &e.model_type)
    }

    /// Cached effective schema of a registered type
    pub fn schema(&self, name: &str) -> Option<&Arc<EffectiveSchema>> {
        self.entries.get(name).map(|e| &e.schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered model types, sorted by name
    pub fn model_types(&self) -> impl Iterator<Item = &Arc<ModelType>> {
        self.entries.values().map(|e| &e.model_type)
    }

    /// Creates an instance of a registered type over an in-memory store.
    pub fn instantiate(
        &self,
        name: &str,
        attrs: Map<String, Value>,
    ) -> RegistryResult<StructuredModel<MemoryStore>> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownModel(name.to_string()))?;

        let model = StructuredModel::build(
            Arc::clone(&entry.model_type),
            Arc::clone(&entry.schema),
            MemoryStore::new(),
            attrs,
        )?;
        Ok(model)
    }
}
