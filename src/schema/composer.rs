//! Schema composition across a model hierarchy
//!
//! Declaration lists are collected from the most-derived type up to the
//! root, then resolved root first so a subclass field replaces any ancestor
//! field with the same name.

use std::collections::BTreeMap;

use crate::observability::{log_event_with_fields, Event};

use super::defaults::DefaultStore;
use super::errors::SchemaResult;
use super::field::{Field, FieldDeclaration};
use super::types::{EffectiveSchema, ModelType};

/// Composes effective schemas for model types.
///
/// Composition is deterministic and never mutates the model type.
pub struct SchemaComposer;

impl SchemaComposer {
    /// Composes the effective schema of `model_type`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (SM_FIELD_CONFIGURATION) if any level
    /// declares a field without a name. Nothing is returned in that case.
    pub fn compose(model_type: &ModelType) -> SchemaResult<EffectiveSchema> {
        // Derived -> base; levels without a list contribute nothing
        let declarations: Vec<&FieldDeclaration> = model_type
            .ancestors()
            .filter_map(ModelType::own_fields)
            .flatten()
            .collect();

        let mut fields = BTreeMap::new();
        for declaration in declarations.into_iter().rev() {
            let field = Field::new(declaration.clone()).map_err(|e| {
                log_event_with_fields(
                    Event::ConfigurationRejected,
                    &[("model", model_type.name()), ("reason", e.message())],
                );
                e.in_model(model_type.name())
            })?;
            fields.insert(field.name().to_string(), field);
        }

        let count = fields.len().to_string();
        log_event_with_fields(
            Event::SchemaComposed,
            &[("model", model_type.name()), ("field_count", count.as_str())],
        );

        Ok(EffectiveSchema::new(model_type.name(), fields))
    }

    /// Builds the default store for one new instance.
    ///
    /// The store starts out sharing the inherited class defaults. Each field
    /// that declares a default is written through copy-on-write, so the
    /// class defaults stay untouched.
    pub fn materialize_defaults(model_type: &ModelType, schema: &EffectiveSchema) -> DefaultStore {
        let mut store = DefaultStore::inherit(model_type);
        for field in schema.fields() {
            if let Some(value) = field.default_value() {
                store.set_default(field.name(), value.clone());
            }
        }
        store
    }
}

/// Composes the effective schema of `model_type`.
pub fn compose_schema(model_type: &ModelType) -> SchemaResult<EffectiveSchema> {
    SchemaComposer::compose(model_type)
}
