//! File-level helpers for PGM images and JSON reports.
//!
//! - `load`: read a raw PGM (P5) file into an owned [`GrayImage`].
//! - `save`: write a [`GrayImage`] as raw PGM. A failed save may leave a
//!   truncated file behind.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::pgm;
use super::GrayImage;
use crate::diagnostics::counters::{self, Counter};
use crate::error::{ImageError, Result};
use log::debug;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Load a raw PGM file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    counters::bump(Counter::FileIo);
    let file = File::open(path).map_err(|source| ImageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let img = pgm::decode(&mut BufReader::new(file))?;
    debug!(
        "loaded {} ({}x{}, maxval {})",
        path.display(),
        img.width(),
        img.height(),
        img.maxval()
    );
    Ok(img)
}

/// Save `img` as a raw PGM file, replacing any existing file.
pub fn save<P: AsRef<Path>>(img: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    counters::bump(Counter::FileIo);
    let file = File::create(path).map_err(|source| ImageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    pgm::encode(img, &mut BufWriter::new(file))?;
    debug!(
        "saved {} ({}x{}, maxval {})",
        path.display(),
        img.width(),
        img.height(),
        img.maxval()
    );
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> std::result::Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> std::result::Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
