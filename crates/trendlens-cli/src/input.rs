//! Raw input files named on the command line.

use std::path::{Path, PathBuf};

use trendlens_core::Platform;

/// One `--input <platform>=<path>` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub platform: Platform,
    pub path: PathBuf,
}

/// Parses `<platform>=<path>`, e.g. `tiktok=./dumps/fyp.json`.
pub(crate) fn parse_input_spec(raw: &str) -> Result<InputSpec, String> {
    let (platform, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <platform>=<file>, got '{raw}'"))?;
    let platform: Platform = platform.trim().parse().map_err(|e| format!("{e}"))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("missing file path in '{raw}'"));
    }
    Ok(InputSpec {
        platform,
        path: PathBuf::from(path),
    })
}

/// Reads a JSON array of raw platform items.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array.
pub(crate) fn read_items(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let items: Vec<serde_json::Value> = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("{} is not a JSON array of items: {e}", path.display()))?;
    Ok(items)
}
