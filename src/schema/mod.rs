//! Field schema subsystem
//!
//! Model types declare which attributes they have. A model type's effective
//! schema is the union of its own declarations and those of its ancestors,
//! with subclass declarations taking precedence by name.
//!
//! # Design Principles
//!
//! - Only field *names* are checked, never value types
//! - Composition is deterministic for a given model type
//! - A malformed declaration fails composition as a whole
//! - Class-level defaults are never mutated by instances

mod composer;
mod defaults;
mod errors;
mod field;
mod types;

pub use composer::{compose_schema, SchemaComposer};
pub use defaults::DefaultStore;
pub use errors::{Accessor, SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use field::{Field, FieldDeclaration, FieldRecord};
pub use types::{
    Ancestors, EffectiveSchema, ModelDefinition, ModelType, ModelTypeBuilder, SchemaLevel,
};
