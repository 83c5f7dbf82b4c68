use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::CheckError;

/// Flag asking flow for machine-readable output
const JSON_FLAG: &str = "--json";

/// Captured output of one flow invocation
#[derive(Debug)]
pub struct FlowOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Run `<flow_bin> --json` and capture its output
///
/// A non-zero exit status is not an error: flow exits non-zero whenever it
/// finds type errors. Only a failure to start the process is.
pub async fn run_flow(
    flow_bin: &str,
    working_directory: Option<&Path>,
) -> Result<FlowOutput, CheckError> {
    let parts = shell_words::split(flow_bin).map_err(CheckError::BadCommand)?;
    let Some((program, args)) = parts.split_first() else {
        return Err(CheckError::EmptyCommand);
    };

    let mut command = Command::new(absolutize(program));
    command
        .args(args)
        .arg(JSON_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_directory {
        debug!("Running flow in {}", dir.display());
        command.current_dir(dir);
    }

    debug!("Executing: {} {}", flow_bin, JSON_FLAG);
    let output = command
        .output()
        .await
        .map_err(|e| CheckError::Launch(flow_bin.to_string(), e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    debug!(
        "Flow exited with {} ({} bytes stdout, {} bytes stderr)",
        output.status,
        stdout.len(),
        stderr.len()
    );
    trace!("Flow stderr: {}", stderr);

    Ok(FlowOutput {
        stdout,
        stderr,
        status: output.status,
    })
}

/// Pin a relative program path that exists here to this directory,
/// so a working directory override does not change what gets executed
fn absolutize(program: &str) -> PathBuf {
    let path = Path::new(program);
    let has_separator = path.components().count() > 1;
    if path.is_relative() && has_separator && path.exists() {
        if let Ok(absolute) = std::path::absolute(path) {
            return absolute;
        }
    }
    path.to_path_buf()
}
