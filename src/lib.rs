//! structured-model - declarative field schemas for data models
//!
//! Model types declare the fields they allow. Instances compose the
//! declarations of their whole type hierarchy and reject reads and writes of
//! anything undeclared.

pub mod cli;
pub mod model;
pub mod observability;
pub mod registry;
pub mod schema;

pub use model::{AttributeStore, MemoryStore, StructuredModel};
pub use registry::{ModelLoader, ModelRegistry};
pub use schema::{
    compose_schema, EffectiveSchema, Field, FieldDeclaration, FieldRecord, ModelDefinition,
    ModelType, SchemaError, SchemaResult,
};
