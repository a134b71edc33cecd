//! Structured models
//!
//! [`StructuredModel`] wraps an [`AttributeStore`] and only lets declared
//! fields through `get`, `set` and `set_many`. Change tracking, events and
//! serialization stay with the store.

mod guarded;
mod store;

pub use guarded::StructuredModel;
pub use store::{AttributeStore, MemoryStore};
