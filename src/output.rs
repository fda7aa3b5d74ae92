//! Publishes step outputs and failures using the workflow runner's file and
//! stdout command conventions.
use log::*;
use std::{
    env,
    fs::OpenOptions,
    io::{self, Write},
};

use crate::{Result, StewardError, reconcile::ReconcileResult};

/// Environment variable naming the file step outputs are appended to.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

const DELIMITER: &str = "ghadelimiter_release_steward";

/// Render one output in the runner's multi-line file syntax.
pub fn format_file_output(name: &str, value: &str) -> Result<String> {
    if value.contains(DELIMITER) {
        return Err(StewardError::IoError(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("value of output '{name}' contains the output delimiter"),
        )));
    }

    Ok(format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n"))
}

/// Output name/value pairs for a result. Absent URLs are skipped rather than
/// defaulted.
pub fn output_pairs(result: &ReconcileResult) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("id", result.id.to_string())];

    match &result.html_url {
        Some(url) => pairs.push(("html_url", url.clone())),
        None => warn!("release {} has no html_url: output not set", result.id),
    }

    match &result.upload_url {
        Some(url) => pairs.push(("upload_url", url.clone())),
        None => {
            warn!("release {} has no upload_url: output not set", result.id)
        }
    }

    pairs
}

/// Write outputs in the output-file syntax.
pub fn write_file_outputs<W: Write>(
    writer: &mut W,
    result: &ReconcileResult,
) -> Result<()> {
    for (name, value) in output_pairs(result) {
        writer.write_all(format_file_output(name, &value)?.as_bytes())?;
    }

    writer.flush()?;

    Ok(())
}

/// Write outputs as plain `name=value` lines.
pub fn write_plain_outputs<W: Write>(
    writer: &mut W,
    result: &ReconcileResult,
) -> Result<()> {
    for (name, value) in output_pairs(result) {
        writeln!(writer, "{name}={value}")?;
    }

    writer.flush()?;

    Ok(())
}

/// Publish outputs to the runner's output file when one is configured,
/// otherwise to stdout.
pub fn publish(result: &ReconcileResult) -> Result<()> {
    match env::var(OUTPUT_FILE_ENV) {
        Ok(path) if !path.is_empty() => {
            debug!("appending outputs to {path}");
            let mut file = OpenOptions::new().append(true).create(true).open(path)?;
            write_file_outputs(&mut file, result)
        }
        _ => write_plain_outputs(&mut io::stdout().lock(), result),
    }
}

/// Escape a message for a workflow command.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Mark the step failed. The caller decides the exit status.
pub fn report_failure(err: &StewardError) {
    println!("::error::{}", escape_data(&err.to_string()));
}
