//! Error type shared by the image constructors, transforms and the PGM codec.
//!
//! Only allocation and I/O can fail at runtime. Contract violations (bad
//! coordinates, out-of-range parameters) panic instead and never show up here.
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    /// The pixel buffer could not be reserved.
    #[error("memory allocation failed for {bytes} bytes of pixel data")]
    Alloc {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    /// `width * height` does not fit in `usize`.
    #[error("image dimensions overflow: {width}x{height}")]
    DimensionsOverflow { width: usize, height: usize },

    /// A raw buffer handed to `from_raw` has the wrong length.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("open failed for {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file format: expected P5 magic")]
    InvalidMagic,

    #[error("invalid width")]
    InvalidWidth,

    #[error("invalid height")]
    InvalidHeight,

    #[error("invalid maxval")]
    InvalidMaxval,

    #[error("whitespace expected after maxval")]
    WhitespaceExpected,

    #[error("reading pixels: expected {expected} bytes, got {got}")]
    TruncatedPixels { expected: usize, got: usize },

    #[error("writing header failed: {0}")]
    WriteHeader(#[source] io::Error),

    #[error("writing pixels failed: {0}")]
    WritePixels(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
