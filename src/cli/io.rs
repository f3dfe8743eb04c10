//! JSON output for CLI commands
//!
//! Each command prints exactly one JSON object on stdout.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

fn write_line(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// `{"status": "ok", "data": ...}`
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&json!({ "status": "ok", "data": data }))
}

/// `{"status": "error", "code": ..., "message": ...}`
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&json!({ "status": "error", "code": code, "message": message }))
}
