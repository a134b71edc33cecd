//! Guarded Access Tests
//!
//! - get/set of declared fields reach the store
//! - get/set of undeclared fields are rejected
//! - rejected writes leave the model untouched
//! - instances from the registry behave like directly built ones

use serde_json::{json, Map, Value};
use structured_model::{
    AttributeStore, FieldRecord, MemoryStore, ModelDefinition, ModelRegistry, ModelType,
    StructuredModel,
};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn model() -> StructuredModel {
    let ty = ModelType::builder("Model").fields(["field1", "field2"]).build();
    StructuredModel::new(ty).unwrap()
}

#[test]
fn test_set_existing_field() {
    let mut model = model();
    model.set_many(object(json!({ "field1": "value1" }))).unwrap();
    assert_eq!(model.get("field1").unwrap(), Some(&json!("value1")));
}

#[test]
fn test_set_multiple_existing_fields() {
    let mut model = model();
    model
        .set_many(object(json!({ "field1": "value1", "field2": "value2" })))
        .unwrap();

    assert_eq!(model.get("field1").unwrap(), Some(&json!("value1")));
    assert_eq!(model.get("field2").unwrap(), Some(&json!("value2")));
}

#[test]
fn test_set_nonexistent_field() {
    let mut model = model();
    let err = model
        .set_many(object(json!({ "field3": "value3" })))
        .unwrap_err();

    assert_eq!(
        err.message(),
        "set(): A field (attribute) with the name 'field3' was not found."
    );
}

#[test]
fn test_set_nonexistent_with_existing_fields_writes_nothing() {
    let mut model = model();
    model.set("field1", "before").unwrap();

    let err = model
        .set_many(object(json!({
            "field1": "value1",
            "field2": "value2",
            "field3": "value3"
        })))
        .unwrap_err();

    assert_eq!(err.field(), Some("field3"));
    assert_eq!(model.get("field1").unwrap(), Some(&json!("before")));
    assert_eq!(model.get("field2").unwrap(), None);
}

#[test]
fn test_get_existing_unset_then_set() {
    let mut model = model();
    assert_eq!(model.get("field1").unwrap(), None);

    model.set("field1", "value1").unwrap();
    assert_eq!(model.get("field1").unwrap(), Some(&json!("value1")));
}

#[test]
fn test_get_nonexistent_field() {
    let model = model();
    let err = model.get("field3").unwrap_err();
    assert_eq!(
        err.message(),
        "get(): A field (attribute) with the name 'field3' was not found."
    );
}

#[test]
fn test_store_change_tracking_untouched() {
    let mut model = model();
    model.set_many(object(json!({ "field1": 1, "field2": 2 }))).unwrap();
    model.set_many(object(json!({ "field1": 1, "field2": 3 }))).unwrap();

    assert_eq!(model.store().changed(), ["field2".to_string()]);
}

/// A store that records every write request it receives
#[derive(Default)]
struct RecordingStore {
    attributes: Map<String, Value>,
    requests: Vec<Map<String, Value>>,
}

impl AttributeStore for RecordingStore {
    fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn set(&mut self, attrs: Map<String, Value>) {
        self.requests.push(attrs.clone());
        self.attributes.extend(attrs);
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[test]
fn test_custom_store_receives_whole_requests() {
    let mut registry = ModelRegistry::new();
    let ty = registry
        .register(
            ModelDefinition::new("Model")
                .fields([FieldRecord::named("a").with_default(1), FieldRecord::named("b")]),
        )
        .unwrap();
    let schema = registry.schema("Model").unwrap().clone();

    let mut model =
        StructuredModel::build(ty, schema, RecordingStore::default(), Map::new()).unwrap();
    model.set_many(object(json!({ "a": 2, "b": 3 }))).unwrap();
    assert!(model.set("c", 4).is_err());

    let store = model.into_store();
    assert_eq!(store.requests.len(), 2);
    assert_eq!(store.requests[0], object(json!({ "a": 1 })));
    assert_eq!(store.requests[1], object(json!({ "a": 2, "b": 3 })));
}

#[test]
fn test_registry_instance_matches_direct_instance() {
    let mut registry = ModelRegistry::new();
    registry
        .register(ModelDefinition::new("Model").fields(["field1", "field2"]))
        .unwrap();

    let from_registry = registry.instantiate("Model", Map::new()).unwrap();
    let direct = model();

    assert_eq!(from_registry.schema(), direct.schema());
    assert_eq!(from_registry.store(), &MemoryStore::new());
}
