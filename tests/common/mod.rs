#![allow(dead_code)]

pub mod synthetic_image;

use std::path::PathBuf;

/// Unique scratch path under the system temp dir for one test.
pub fn temp_path(test: &str, name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("graymap-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(format!("{test}-{name}"))
}
