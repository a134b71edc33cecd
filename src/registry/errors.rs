//! Registry and loader errors

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Model type already registered: {0}")]
    DuplicateModel(String),

    #[error("Model type '{model}' extends unknown parent '{parent}'")]
    UnknownParent { model: String, parent: String },

    #[error("Model type not found: {0}")]
    UnknownModel(String),

    #[error("Model type name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl RegistryError {
    /// Stable error code, used by the CLI
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateModel(_) => "SM_DUPLICATE_MODEL",
            RegistryError::UnknownParent { .. } => "SM_UNKNOWN_PARENT",
            RegistryError::UnknownModel(_) => "SM_UNKNOWN_MODEL",
            RegistryError::EmptyName => "SM_EMPTY_MODEL_NAME",
            RegistryError::Schema(e) => e.code().code(),
        }
    }
}

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors reading or writing model definition files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model definition '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model definition file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "SM_LOAD_IO",
            LoadError::Json { .. } => "SM_LOAD_INVALID_JSON",
            LoadError::AlreadyExists(_) => "SM_MODEL_FILE_EXISTS",
            LoadError::Registry(e) => e.code(),
        }
    }
}
