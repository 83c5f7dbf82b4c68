use std::path::Path;
use tracing::debug;

use crate::error::CheckError;

/// Where `npm install flow-bin` puts the executable
pub const DEFAULT_FLOW_BIN: &str = "node_modules/.bin/flow";

/// Resolve the flow executable relative to the current directory
///
/// - Override set: returned verbatim, the filesystem is not consulted
/// - Otherwise: `node_modules/.bin/flow` if it exists
pub fn resolve_flow_bin(flow_bin: Option<&str>) -> Result<String, CheckError> {
    resolve_flow_bin_in(flow_bin, Path::new(""))
}

/// Same as [`resolve_flow_bin`], probing the conventional path under `root`
pub fn resolve_flow_bin_in(flow_bin: Option<&str>, root: &Path) -> Result<String, CheckError> {
    if let Some(bin) = flow_bin.filter(|s| !s.is_empty()) {
        debug!("Using flow executable override: {}", bin);
        return Ok(bin.to_string());
    }

    let guess = root.join(DEFAULT_FLOW_BIN);
    let guess = guess.to_string_lossy().into_owned();
    debug!("No override, probing {}", guess);
    if Path::new(&guess).exists() {
        Ok(guess)
    } else {
        Err(CheckError::MissingExecutable(guess))
    }
}
