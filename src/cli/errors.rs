//! CLI-specific error types

use std::fmt;
use std::io;

use crate::registry::{LoadError, RegistryError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Model definitions could not be loaded
    LoadFailed,
    /// Requested model type is not registered
    UnknownModel,
    /// One or more `check` requests were answered with an error
    RequestsRejected,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SM_CLI_CONFIG_ERROR",
            Self::IoError => "SM_CLI_IO_ERROR",
            Self::LoadFailed => "SM_CLI_LOAD_FAILED",
            Self::UnknownModel => "SM_CLI_UNKNOWN_MODEL",
            Self::RequestsRejected => "SM_CLI_REQUESTS_REJECTED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_model(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownModel,
            format!("Model type '{}' is not defined", name),
        )
    }

    pub fn requests_rejected(count: usize) -> Self {
        Self::new(
            CliErrorCode::RequestsRejected,
            format!("{} request(s) rejected", count),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(CliErrorCode::LoadFailed, format!("[{}] {}", e.code(), e))
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownModel(name) => Self::unknown_model(&name),
            other => Self::new(CliErrorCode::LoadFailed, other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_code() {
        let err = CliError::config_error("bad");
        assert_eq!(err.to_string(), "SM_CLI_CONFIG_ERROR: bad");
    }

    #[test]
    fn test_unknown_model_conversion() {
        let err = CliError::from(RegistryError::UnknownModel("Ghost".into()));
        assert_eq!(err.code(), &CliErrorCode::UnknownModel);
        assert!(err.message().contains("Ghost"));
    }

    #[test]
    fn test_requests_rejected_display() {
        let err = CliError::requests_rejected(2);
        assert_eq!(err.to_string(), "SM_CLI_REQUESTS_REJECTED: 2 request(s) rejected");
    }
}
