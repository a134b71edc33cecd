//! Schema error types
//!
//! Error codes:
//! - SM_FIELD_CONFIGURATION (FATAL to the model being constructed)
//! - SM_UNKNOWN_FIELD (REJECT)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request is rejected, model state is untouched
    Reject,
    /// The model instance (or model type) cannot be constructed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A field declaration is malformed (missing or empty name)
    ConfigurationError,
    /// A get/set referenced a name that is not a declared field
    UnknownFieldError,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ConfigurationError => "SM_FIELD_CONFIGURATION",
            SchemaErrorCode::UnknownFieldError => "SM_UNKNOWN_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::ConfigurationError => Severity::Fatal,
            SchemaErrorCode::UnknownFieldError => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Guarded accessor operation that raised an unknown-field error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Get,
    Set,
}

impl Accessor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accessor::Get => "get",
            Accessor::Set => "set",
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Offending field name, if one is known
    field: Option<String>,
    /// Model type being composed, if known
    model: Option<String>,
}

impl SchemaError {
    /// Create a configuration error for a field declaration without a usable name
    pub fn missing_field_name() -> Self {
        Self {
            code: SchemaErrorCode::ConfigurationError,
            message: "no 'name' property provided to Field".into(),
            field: None,
            model: None,
        }
    }

    /// Create an unknown field error for a guarded read or write
    pub fn unknown_field(accessor: Accessor, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::UnknownFieldError,
            message: format!(
                "{}(): A field (attribute) with the name '{}' was not found.",
                accessor, field
            ),
            field: Some(field),
            model: None,
        }
    }

    /// Attaches the model type name the error was raised for
    pub fn in_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the model type name if applicable
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn is_configuration_error(&self) -> bool {
        self.code == SchemaErrorCode::ConfigurationError
    }

    pub fn is_unknown_field(&self) -> bool {
        self.code == SchemaErrorCode::UnknownFieldError
    }

    /// Returns whether this error makes the model unusable
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        if let Some(ref model) = self.model {
            write!(f, " [model {}]", model)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
