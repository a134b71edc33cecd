//! Model Definition File Tests
//!
//! Hand-written definition files load into a registry and produce working
//! instances.

use std::fs;

use serde_json::{json, Map};
use structured_model::ModelLoader;
use tempfile::TempDir;

fn write(temp_dir: &TempDir, file: &str, content: serde_json::Value) {
    fs::write(temp_dir.path().join(file), content.to_string()).unwrap();
}

#[test]
fn test_end_to_end_from_files() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "model_Model.json",
        json!({
            "name": "Model",
            "fields": [
                { "name": "field1", "defaultValue": "value1" },
                "field2",
                { "name": "field3", "defaultValue": "value3" }
            ]
        }),
    );
    write(
        &tmp,
        "model_SubModel.json",
        json!({ "name": "SubModel", "parent": "Model" }),
    );
    write(
        &tmp,
        "model_SubSubModel.json",
        json!({
            "name": "SubSubModel",
            "parent": "SubModel",
            "fields": [{ "name": "field3", "defaultValue": "override", "label": "Third" }],
            "defaults": { "field2": "from class" }
        }),
    );

    let registry = ModelLoader::new(tmp.path()).load_registry().unwrap();
    assert_eq!(registry.len(), 3);

    let model = registry.instantiate("Model", Map::new()).unwrap();
    assert_eq!(model.get("field1").unwrap(), Some(&json!("value1")));
    assert_eq!(model.get("field2").unwrap(), None);
    assert_eq!(model.get("field3").unwrap(), Some(&json!("value3")));

    let leaf = registry.instantiate("SubSubModel", Map::new()).unwrap();
    assert_eq!(leaf.get("field1").unwrap(), Some(&json!("value1")));
    assert_eq!(leaf.get("field2").unwrap(), Some(&json!("from class")));
    assert_eq!(leaf.get("field3").unwrap(), Some(&json!("override")));
    assert_eq!(
        leaf.schema().get("field3").unwrap().meta("label"),
        Some(&json!("Third"))
    );

    let class_defaults = registry.get("SubSubModel").unwrap().own_defaults().unwrap();
    assert_eq!(class_defaults.len(), 1);
}

#[test]
fn test_unnamed_field_in_file_rejected() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        "model_Broken.json",
        json!({ "name": "Broken", "fields": [{ "defaultValue": 1 }] }),
    );

    let err = ModelLoader::new(tmp.path()).load_registry().unwrap_err();
    assert_eq!(err.code(), "SM_FIELD_CONFIGURATION");
}
