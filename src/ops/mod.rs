//! Operations over [`GrayImage`](crate::image::GrayImage).
//!
//! The four groups are independent of each other and only share the image
//! type:
//!
//! - [`pixel`]: in-place level transforms (negative, threshold, brighten).
//! - [`geometry`]: rotate, mirror and crop into new images; paste and blend
//!   in place.
//! - [`search`]: exact subimage matching and location search.
//! - [`filter`]: edge-clipped box blur.

pub mod filter;
pub mod geometry;
pub mod pixel;
pub mod search;

pub use filter::{blur, blur_with, BlurMethod};
pub use geometry::{blend, crop, mirror_horizontal, paste, rotate_ccw90};
pub use pixel::{brighten, negative, threshold};
pub use search::{locate_subimage, match_subimage, SubimageSearch};
