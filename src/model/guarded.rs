//! Structured model: schema-gated access to an attribute store
//!
//! Every read and write is checked against the effective schema before it
//! reaches the store. A write request naming any undeclared field is
//! rejected as a whole, before anything is written.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{
    Accessor, DefaultStore, EffectiveSchema, ModelType, SchemaComposer, SchemaError, SchemaResult,
};

use super::store::{AttributeStore, MemoryStore};

/// A model instance whose attributes are restricted to declared fields.
#[derive(Debug, Clone)]
pub struct StructuredModel<S = MemoryStore> {
    model_type: Arc<ModelType>,
    schema: Arc<EffectiveSchema>,
    defaults: DefaultStore,
    store: S,
}

impl StructuredModel<MemoryStore> {
    /// Composes the schema of `model_type` and creates an empty instance
    /// with its defaults applied.
    pub fn new(model_type: Arc<ModelType>) -> SchemaResult<Self> {
        Self::with_attributes(model_type, Map::new())
    }

    /// Like [`StructuredModel::new`], then writes `attrs` over the defaults.
    pub fn with_attributes(
        model_type: Arc<ModelType>,
        attrs: Map<String, Value>,
    ) -> SchemaResult<Self> {
        let schema = Arc::new(SchemaComposer::compose(&model_type)?);
        Self::build(model_type, schema, MemoryStore::new(), attrs)
    }
}

impl<S: AttributeStore> StructuredModel<S> {
    /// Creates an instance over `store` from an already composed schema.
    ///
    /// The schema must have been composed for `model_type`; the registry
    /// uses this to share one cached schema between instances. Defaults are
    /// materialized per instance, overlaid with `attrs`, and written through
    /// the guarded `set_many`.
    pub fn build(
        model_type: Arc<ModelType>,
        schema: Arc<EffectiveSchema>,
        store: S,
        attrs: Map<String, Value>,
    ) -> SchemaResult<Self> {
        let defaults = SchemaComposer::materialize_defaults(&model_type, &schema);

        let mut initial = defaults.values().clone();
        initial.extend(attrs);

        let mut model = Self {
            model_type,
            schema,
            defaults,
            store,
        };
        if !initial.is_empty() {
            model.set_many(initial)?;
        }
        Ok(model)
    }

    /// Reads a declared field.
    ///
    /// Returns `Ok(None)` for a declared field that holds no value.
    ///
    /// # Errors
    ///
    /// Returns SM_UNKNOWN_FIELD if `name` is not a declared field.
    pub fn get(&self, name: &str) -> SchemaResult<Option<&Value>> {
        if !self.schema.contains(name) {
            return Err(self.reject(Accessor::Get, name));
        }
        Ok(self.store.get(name))
    }

    /// Writes a single declared field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> SchemaResult<()> {
        let mut attrs = Map::new();
        attrs.insert(name.into(), value.into());
        self.set_many(attrs)
    }

    /// Writes several fields as one request.
    ///
    /// # Errors
    ///
    /// Returns SM_UNKNOWN_FIELD naming the first undeclared field. No
    /// attribute from the request is written in that case.
    pub fn set_many(&mut self, attrs: Map<String, Value>) -> SchemaResult<()> {
        if let Some(unknown) = self.schema.first_unknown(attrs.keys().map(String::as_str)) {
            return Err(self.reject(Accessor::Set, unknown));
        }
        self.store.set(attrs);
        Ok(())
    }

    /// Returns true if `name` is a declared field, whether or not it holds a value.
    pub fn has(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    pub fn model_type(&self) -> &Arc<ModelType> {
        &self.model_type
    }

    pub fn schema(&self) -> &EffectiveSchema {
        &self.schema
    }

    /// Default values materialized for this instance
    pub fn defaults(&self) -> &DefaultStore {
        &self.defaults
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current attribute values as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.store.attributes().clone())
    }

    fn reject(&self, accessor: Accessor, name: &str) -> SchemaError {
        log_event_with_fields(
            Event::UnknownFieldRejected,
            &[
                ("accessor", accessor.as_str()),
                ("field", name),
                ("model", self.model_type.name()),
            ],
        );
        SchemaError::unknown_field(accessor, name).in_model(self.model_type.name())
    }
}
