use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LocateConfig {
    /// Image searched in.
    pub haystack: PathBuf,
    /// Image searched for.
    pub needle: PathBuf,
    #[serde(default)]
    pub output: LocateOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocateOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<LocateConfig, String> {
    super::load_json(path)
}
