//! JSON configuration for the command-line tools in `src/bin`.
//!
//! Each tool takes a single config file path. Sections marked
//! `#[serde(default)]` may be omitted entirely.

pub mod blur_bench;
pub mod locate;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and parse a JSON config file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
