//! CLI command implementations
//!
//! Every command loads the configuration, sets the log level and loads the
//! model directory into a fresh registry before doing its work.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::registry::{ModelLoader, ModelRegistry};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
///
/// `check` fails with `SM_CLI_REQUESTS_REJECTED` after answering every line
/// if any request was rejected.
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    match cmd {
        Command::List { config } => list(&config, &mut stdout.lock()),
        Command::Describe { config, model } => describe(&config, &model, &mut stdout.lock()),
        Command::Check { config, model } => {
            let stdin = io::stdin();
            let rejected = check(&config, &model, stdin.lock(), &mut stdout.lock())?;
            if rejected > 0 {
                return Err(CliError::requests_rejected(rejected));
            }
            Ok(())
        }
    }
}

/// Loads configuration and the model registry it points at.
pub fn open_registry(config_path: &Path) -> CliResult<ModelRegistry> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    let registry = ModelLoader::new(config.models_path()).load_registry()?;
    Ok(registry)
}

/// Writes the sorted list of registered model types.
pub fn list<W: Write>(config_path: &Path, out: &mut W) -> CliResult<()> {
    let registry = open_registry(config_path)?;

    let models: Vec<Value> = registry
        .model_types()
        .map(|ty| {
            json!({
                "name": ty.name(),
                "parent": ty.parent().map(|p| p.name()),
            })
        })
        .collect();

    write_response(out, Value::Array(models))
}

/// Writes the effective schema of one model type.
pub fn describe<W: Write>(config_path: &Path, model: &str, out: &mut W) -> CliResult<()> {
    let registry = open_registry(config_path)?;

    let schema = registry
        .schema(model)
        .ok_or_else(|| CliError::unknown_model(model))?;

    write_response(out, serde_json::to_value(schema.as_ref())?)
}

/// Applies each input object to a fresh instance of `model`.
///
/// Returns the number of rejected requests. Rejections, including lines that
/// are not JSON objects, are reported per line and do not stop processing.
/// Only a failure to read input or write output ends the run early.
pub fn check<R: BufRead, W: Write>(
    config_path: &Path,
    model: &str,
    input: R,
    out: &mut W,
) -> CliResult<usize> {
    let registry = open_registry(config_path)?;
    check_requests(&registry, model, input, out)
}

/// Like [`check`], against an already loaded registry.
pub fn check_requests<R: BufRead, W: Write>(
    registry: &ModelRegistry,
    model: &str,
    input: R,
    out: &mut W,
) -> CliResult<usize> {
    if !registry.contains(model) {
        return Err(CliError::unknown_model(model));
    }

    let mut rejected = 0;
    for request in read_requests(input) {
        let attrs = match parse_request(request?) {
            Ok(attrs) => attrs,
            Err(message) => {
                rejected += 1;
                write_error(out, "SM_CLI_INVALID_REQUEST", &message)?;
                continue;
            }
        };

        match registry.instantiate(model, attrs) {
            Ok(instance) => write_response(out, instance.to_json())?,
            Err(e) => {
                rejected += 1;
                write_error(out, e.code(), &e.to_string())?;
            }
        }
    }

    Ok(rejected)
}

fn parse_request(request: serde_json::Result<Value>) -> Result<Map<String, Value>, String> {
    match request {
        Ok(Value::Object(attrs)) => Ok(attrs),
        Ok(other) => Err(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        )),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldRecord, ModelDefinition};
    use std::fs;
    use tempfile::TempDir;

    fn setup(temp_dir: &TempDir) -> std::path::PathBuf {
        let models_dir = temp_dir.path().join("models");
        let loader = ModelLoader::new(&models_dir);
        loader
            .save_model(&ModelDefinition::new("Entity").fields(["id"]))
            .unwrap();
        loader
            .save_model(
                &ModelDefinition::new("User")
                    .extends("Entity")
                    .fields([FieldRecord::named("role").with_default("member")]),
            )
            .unwrap();

        let config_path = temp_dir.path().join("structured-model.json");
        let config = json!({ "models_dir": models_dir.to_string_lossy() });
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    fn output_lines(out: Vec<u8>) -> Vec<Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_list() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let mut out = Vec::new();
        list(&config_path, &mut out).unwrap();

        let lines = output_lines(out);
        assert_eq!(lines[0]["data"][0]["name"], "Entity");
        assert_eq!(lines[0]["data"][1]["parent"], "Entity");
    }

    #[test]
    fn test_describe() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let mut out = Vec::new();
        describe(&config_path, "User", &mut out).unwrap();

        let lines = output_lines(out);
        let data = &lines[0]["data"];
        assert_eq!(data["model"], "User");
        assert_eq!(data["fields"][0]["name"], "id");
        assert_eq!(data["fields"][1]["defaultValue"], "member");
    }

    #[test]
    fn test_describe_unknown_model() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let err = describe(&config_path, "Ghost", &mut Vec::new()).unwrap_err();
        assert_eq!(err.code_str(), "SM_CLI_UNKNOWN_MODEL");
    }

    #[test]
    fn test_check_reports_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let input = "{\"id\": 1}\n{\"id\": 2, \"nickname\": \"x\"}\n[1, 2]\n";
        let mut out = Vec::new();
        let rejected = check(&config_path, "User", input.as_bytes(), &mut out).unwrap();
        assert_eq!(rejected, 2);

        let lines = output_lines(out);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"], json!({ "id": 1, "role": "member" }));
        assert_eq!(lines[1]["code"], "SM_UNKNOWN_FIELD");
        assert!(lines[1]["message"].as_str().unwrap().contains("'nickname'"));
        assert_eq!(lines[2]["code"], "SM_CLI_INVALID_REQUEST");
    }

    #[test]
    fn test_check_continues_after_malformed_line() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = setup(&temp_dir);

        let input = "{\"id\": 1}\nnot json\n{\"id\": 2, \"nick\": \"x\"}\n{\"id\": 3}\n";
        let mut out = Vec::new();
        let rejected = check(&config_path, "User", input.as_bytes(), &mut out).unwrap();
        assert_eq!(rejected, 2);

        let lines = output_lines(out);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[1]["code"], "SM_CLI_INVALID_REQUEST");
        assert!(lines[1]["message"].as_str().unwrap().starts_with("invalid JSON"));
        assert_eq!(lines[2]["code"], "SM_UNKNOWN_FIELD");
        assert_eq!(lines[3]["data"]["id"], 3);
    }
}
