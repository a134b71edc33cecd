//! Model type and schema definitions
//!
//! A model type is one level of a model hierarchy. It owns its own field
//! declaration list (if any), its class-level default values (if any) and an
//! explicit link to its parent type. Model types are immutable once built and
//! are shared through `Arc`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::field::{Field, FieldDeclaration};

/// Declaration list attached to one level of a model hierarchy
pub type SchemaLevel = Vec<FieldDeclaration>;

/// Serializable definition of a model type.
///
/// The parent is referenced by name and resolved by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Unique model type name
    pub name: String,
    /// Parent model type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Field declarations owned by this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<SchemaLevel>,
    /// Class-level default attribute values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Map<String, Value>>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: None,
            defaults: None,
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn fields<I, D>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<FieldDeclaration>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = Some(defaults);
        self
    }
}

/// One level of a model hierarchy with its resolved parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelType {
    name: String,
    parent: Option<Arc<ModelType>>,
    fields: Option<SchemaLevel>,
    defaults: Option<Arc<Map<String, Value>>>,
}

impl ModelType {
    /// Starts building a root model type.
    pub fn builder(name: impl Into<String>) -> ModelTypeBuilder {
        ModelTypeBuilder {
            ty: ModelType {
                name: name.into(),
                parent: None,
                fields: None,
                defaults: None,
            },
        }
    }

    /// Builds a model type from a definition whose parent is already resolved.
    pub fn from_definition(definition: ModelDefinition, parent: Option<Arc<ModelType>>) -> Self {
        Self {
            name: definition.name,
            parent,
            fields: definition.fields,
            defaults: definition.defaults.map(Arc::new),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ModelType>> {
        self.parent.as_ref()
    }

    /// This level's own declarations, not including inherited ones
    pub fn own_fields(&self) -> Option<&SchemaLevel> {
        self.fields.as_ref()
    }

    /// This level's own class defaults, not including inherited ones
    pub fn own_defaults(&self) -> Option<&Arc<Map<String, Value>>> {
        self.defaults.as_ref()
    }

    /// Class defaults as seen by an instance: the nearest level that defines any.
    pub fn inherited_defaults(&self) -> Option<&Arc<Map<String, Value>>> {
        self.ancestors().find_map(|ty| ty.own_defaults())
    }

    /// Iterates from this type up to the root, most-derived first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns true if `name` is this type or one of its ancestors.
    pub fn is_a(&self, name: &str) -> bool {
        self.ancestors().any(|ty| ty.name == name)
    }

    /// Converts back into a definition, referencing the parent by name.
    pub fn to_definition(&self) -> ModelDefinition {
        ModelDefinition {
            name: self.name.clone(),
            parent: self.parent.as_ref().map(|p| p.name.clone()),
            fields: self.fields.clone(),
            defaults: self.defaults.as_ref().map(|d| d.as_ref().clone()),
        }
    }
}

/// Iterator over a model type and its ancestors
pub struct Ancestors<'a> {
    next: Option<&'a ModelType>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ModelType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

/// Builder for [`ModelType`]
pub struct ModelTypeBuilder {
    ty: ModelType,
}

impl ModelTypeBuilder {
    pub fn extends(mut self, parent: &Arc<ModelType>) -> Self {
        self.ty.parent = Some(Arc::clone(parent));
        self
    }

    pub fn fields<I, D>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<FieldDeclaration>,
    {
        self.ty.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.ty.defaults = Some(Arc::new(defaults));
        self
    }

    pub fn build(self) -> Arc<ModelType> {
        Arc::new(self.ty)
    }
}

/// Resolved, override-applied field mapping for one concrete model type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSchema {
    model: String,
    #[serde(serialize_with = "serialize_fields")]
    fields: BTreeMap<String, Field>,
}

impl EffectiveSchema {
    pub(crate) fn new(model: impl Into<String>, fields: BTreeMap<String, Field>) -> Self {
        Self {
            model: model.into(),
            fields,
        }
    }

    /// Name of the concrete model type this schema was composed for
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Returns the first name in `names` that is not a declared field.
    pub fn first_unknown<'a, I>(&self, names: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().find(|name| !self.contains(name))
    }
}

fn serialize_fields<S>(fields: &BTreeMap<String, Field>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(fields.values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_ancestors_most_derived_first() {
        let base = ModelType::builder("Base").build();
        let mid = ModelType::builder("Mid").extends(&base).build();
        let leaf = ModelType::builder("Leaf").extends(&mid).build();

        let names: Vec<_> = leaf.ancestors().map(ModelType::name).collect();
        assert_eq!(names, vec!["Leaf", "Mid", "Base"]);
        assert!(leaf.is_a("Base"));
        assert!(!base.is_a("Leaf"));
    }

    #[test]
    fn test_inherited_defaults_nearest_level() {
        let base = ModelType::builder("Base")
            .defaults(defaults(json!({ "a": 1 })))
            .build();
        let mid = ModelType::builder("Mid").extends(&base).build();
        let leaf = ModelType::builder("Leaf")
            .extends(&mid)
            .defaults(defaults(json!({ "b": 2 })))
            .build();

        assert!(Arc::ptr_eq(
            mid.inherited_defaults().unwrap(),
            base.own_defaults().unwrap()
        ));
        assert_eq!(leaf.inherited_defaults().unwrap().get("b"), Some(&json!(2)));
        assert!(leaf.inherited_defaults().unwrap().get("a").is_none());
    }

    #[test]
    fn test_definition_round_trip_keeps_parent_name() {
        let base = ModelType::builder("Base").fields(["a"]).build();
        let def = ModelDefinition::new("Leaf").extends("Base").fields(["b"]);

        let leaf = ModelType::from_definition(def.clone(), Some(base));
        assert_eq!(leaf.to_definition(), def);
    }

    #[test]
    fn test_definition_json_shape() {
        let def: ModelDefinition = serde_json::from_value(json!({
            "name": "User",
            "parent": "Entity",
            "fields": ["email", { "name": "role", "defaultValue": "member" }]
        }))
        .unwrap();

        assert_eq!(def.parent.as_deref(), Some("Entity"));
        assert_eq!(def.fields.as_ref().map(Vec::len), Some(2));
        assert!(def.defaults.is_none());
    }
}
