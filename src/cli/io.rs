//! JSON line I/O for the CLI
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Iterates JSON requests, one per non-blank line.
///
/// The outer result fails only on read errors. A line that is not valid JSON
/// yields `Ok(Err(_))` so the caller can answer it and keep reading.
pub fn read_requests<R: BufRead>(
    input: R,
) -> impl Iterator<Item = CliResult<serde_json::Result<Value>>> {
    input
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|line| {
            let line = line.map_err(CliError::from)?;
            Ok(serde_json::from_str(&line))
        })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
