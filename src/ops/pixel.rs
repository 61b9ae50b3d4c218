//! In-place per-pixel level transforms.
//!
//! These never change geometry, never allocate and never fail.
use crate::image::GrayImage;

/// Photographic negative: `v -> 255 - v`.
pub fn negative(img: &mut GrayImage) {
    for p in img.pixels_mut() {
        *p = 255 - *p;
    }
}

/// Binarize: levels below `thr` become 0, all others 255.
///
/// The white level is 255 regardless of the image's `maxval`.
pub fn threshold(img: &mut GrayImage, thr: u8) {
    for p in img.pixels_mut() {
        *p = if *p < thr { 0 } else { 255 };
    }
}

/// Multiply every level by `factor`, rounding half up and saturating at
/// `maxval`. Factors above 1 brighten, below 1 darken.
///
/// # Panics
/// If `factor` is negative or NaN.
pub fn brighten(img: &mut GrayImage, factor: f64) {
    assert!(factor >= 0.0, "brighten factor must be >= 0, got {factor}");
    let ceiling = f64::from(img.maxval());
    for p in img.pixels_mut() {
        let level = (f64::from(*p) * factor + 0.5).min(ceiling);
        *p = level as u8;
    }
}
