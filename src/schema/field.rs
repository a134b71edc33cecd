//! Field declarations and resolved fields
//!
//! A declaration is either a bare name (`"title"`) or a record
//! (`{"name": "title", "defaultValue": "", "label": "Title"}`). Keys other
//! than `name` and `defaultValue` are kept as opaque metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};

/// Author-supplied description of a field, before resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDeclaration {
    /// Shorthand: the field name only
    Name(String),
    /// Structured record with optional default and metadata
    Record(FieldRecord),
}

impl FieldDeclaration {
    /// Normalizes the shorthand form into a record.
    pub fn into_record(self) -> FieldRecord {
        match self {
            FieldDeclaration::Name(name) => FieldRecord::named(name),
            FieldDeclaration::Record(record) => record,
        }
    }
}

impl From<&str> for FieldDeclaration {
    fn from(name: &str) -> Self {
        FieldDeclaration::Name(name.to_string())
    }
}

impl From<String> for FieldDeclaration {
    fn from(name: String) -> Self {
        FieldDeclaration::Name(name)
    }
}

impl From<FieldRecord> for FieldDeclaration {
    fn from(record: FieldRecord) -> Self {
        FieldDeclaration::Record(record)
    }
}

/// Structured field declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Field name; checked when the declaration is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Default value applied to new model instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Everything else from the declaration, uninterpreted
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl FieldRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A resolved schema entry. Fields describe attributes, they never hold data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl Field {
    /// Resolves a declaration into a field.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (SM_FIELD_CONFIGURATION) if the
    /// declaration has no name or an empty one.
    pub fn new(declaration: impl Into<FieldDeclaration>) -> SchemaResult<Self> {
        let record = declaration.into().into_record();

        let name = match record.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(SchemaError::missing_field_name()),
        };

        Ok(Self {
            name,
            default_value: record.default_value,
            metadata: record.metadata,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Declaration metadata other than `name` and `defaultValue`
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
