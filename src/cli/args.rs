//! CLI argument definitions using clap
//!
//! Commands:
//! - structured-model list --config <path>
//! - structured-model describe --config <path> <model>
//! - structured-model check --config <path> <model>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// structured-model - declarative field schemas for data models
#[derive(Parser, Debug)]
#[command(name = "structured-model")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered model types
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./structured-model.json")]
        config: PathBuf,
    },

    /// Print the effective schema of a model type
    Describe {
        /// Path to configuration file
        #[arg(long, default_value = "./structured-model.json")]
        config: PathBuf,

        /// Model type name
        model: String,
    },

    /// Apply JSON attribute objects from stdin to fresh instances of a model type
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./structured-model.json")]
        config: PathBuf,

        /// Model type name
        model: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
