use crate::ops::BlurMethod;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct BlurBenchConfig {
    /// PGM files to blur, in order.
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub blur: BlurConfig,
    pub output: BlurOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Horizontal half-width of the window.
    pub dx: usize,
    /// Vertical half-height of the window.
    pub dy: usize,
    /// Methods to time on every input. When more than one is listed the
    /// outputs are compared against the first.
    pub methods: Vec<BlurMethod>,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            dx: 7,
            dy: 7,
            methods: BlurMethod::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BlurOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// Directory for blurred copies of the inputs; nothing is written when
    /// absent.
    #[serde(default)]
    pub blurred_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<BlurBenchConfig, String> {
    let config: BlurBenchConfig = super::load_json(path)?;
    if config.blur.methods.is_empty() {
        return Err(format!("Config {} lists no blur methods", path.display()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_section_defaults() {
        let config: BlurBenchConfig = serde_json::from_str(
            r#"{ "inputs": ["a.pgm"], "output": { "report_json": "out/report.json" } }"#,
        )
        .unwrap();
        assert_eq!(config.inputs, vec![PathBuf::from("a.pgm")]);
        assert_eq!(config.blur.dx, 7);
        assert_eq!(config.blur.dy, 7);
        assert_eq!(config.blur.methods, BlurMethod::ALL.to_vec());
        assert!(config.output.blurred_dir.is_none());
    }

    #[test]
    fn explicit_methods() {
        let config: BlurBenchConfig = serde_json::from_str(
            r#"{
                "inputs": [],
                "blur": { "dx": 2, "methods": ["summed_area"] },
                "output": { "report_json": "r.json", "blurred_dir": "blurred" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.blur.dx, 2);
        assert_eq!(config.blur.dy, 7);
        assert_eq!(config.blur.methods, vec![BlurMethod::SummedArea]);
        assert_eq!(config.output.blurred_dir, Some(PathBuf::from("blurred")));
    }
}
