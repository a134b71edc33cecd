//! CLI module
//!
//! Provides command-line access to model definitions:
//! - list: registered model types
//! - describe: effective schema of a model type
//! - check: apply JSON attribute objects to a model type

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, check_requests, describe, list, open_registry, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
