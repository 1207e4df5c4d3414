//! User-facing output on stdout.
//!
//! - **stdout**: reports and failure messages, one per line
//! - **stderr**: `tracing` logs only

use std::io::Write;

use crate::client::Report;
use crate::error::{DevModeError, Result};
use crate::transport::connection_hint;

/// Write a line to stdout and flush.
pub fn write_stdout_line(line: &str) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(line.as_bytes())?;
    handle.write_all(b"\n")?;
    handle.flush()?;
    Ok(())
}

/// Write a JSON value to stdout as a single line.
pub fn write_stdout_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    write_stdout_line(&json)?;
    Ok(())
}

/// Print a report as text or JSON.
pub fn write_report(report: &Report, json: bool) -> Result<()> {
    if json {
        write_stdout_json(report)
    } else {
        write_stdout_line(&report.message)?;
        Ok(())
    }
}

/// Lines explaining why a command could not complete.
pub fn failure_lines(err: &DevModeError) -> Vec<String> {
    match err {
        DevModeError::ConnectionRefused { port } => vec![
            "failed to connect to port".to_string(),
            connection_hint(*port).to_string(),
        ],
        DevModeError::Connect(_) => vec!["unknown error occurred while connecting".to_string()],
        other => vec![format!("error: {other}")],
    }
}

/// Print the lines from [`failure_lines`].
pub fn write_failure(err: &DevModeError) -> std::io::Result<()> {
    for line in failure_lines(err) {
        write_stdout_line(&line)?;
    }
    Ok(())
}
