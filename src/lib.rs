#![doc = include_str!("../README.md")]

// Public modules
pub mod error;
pub mod image;
pub mod ops;

// Support for the command-line tools; not needed by library users.
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ImageError, Result};
pub use crate::image::{load, save, GrayImage, GrayView};
pub use crate::ops::{BlurMethod, SubimageSearch};

// --- Prelude ---------------------------------------------------------------

/// Everything needed for typical scripts.
///
/// ```no_run
/// use graymap::prelude::*;
///
/// # fn main() -> graymap::Result<()> {
/// let mut img = load("input.pgm")?;
/// blur(&mut img, 2, 2);
/// let rotated = rotate_ccw90(&img)?;
/// save(&rotated, "output.pgm")?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{load, save, GrayImage, ImageView, ImageViewMut};
    pub use crate::ops::{
        blend, blur, blur_with, brighten, crop, locate_subimage, match_subimage,
        mirror_horizontal, negative, paste, rotate_ccw90, threshold, BlurMethod,
        SubimageSearch,
    };
    pub use crate::{ImageError, Result};
}
