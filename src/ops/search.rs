//! Exact subimage matching and brute-force location search.
//!
//! Candidates are visited in raster order (rows outer, columns inner), so the
//! reported position is the first match in that order. Each candidate costs
//! one comparison; pixel-level equality checks are tallied separately since
//! mismatches short-circuit.
use log::debug;
use serde::Serialize;

use crate::image::{GrayImage, ImageView};

/// Outcome of [`locate_subimage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubimageSearch {
    /// Top-left `(x, y)` of the first match, if any.
    pub position: Option<(usize, usize)>,
    /// Candidate positions tested.
    pub comparisons: usize,
    /// Individual pixel equality checks performed across all candidates.
    pub pixel_comparisons: usize,
}

impl SubimageSearch {
    pub fn found(&self) -> bool {
        self.position.is_some()
    }
}

/// Compare `img2` against the window of `img1` at `(x, y)`; `false` if it
/// does not fit. Adds the number of pixel checks made to `pixel_checks`.
fn matches_at(
    img1: &GrayImage,
    x: usize,
    y: usize,
    img2: &GrayImage,
    pixel_checks: &mut usize,
) -> bool {
    if !img1.valid_rect(x, y, img2.width(), img2.height()) {
        return false;
    }
    let window = img1.view(x, y, img2.width(), img2.height());
    for (hay, needle) in window.rows().zip(img2.rows()) {
        for (a, b) in hay.iter().zip(needle) {
            *pixel_checks += 1;
            if a != b {
                return false;
            }
        }
    }
    true
}

/// Whether `img2` equals the subimage of `img1` whose top-left is `(x, y)`.
///
/// Returns `false` when `img2` would extend past the right or bottom edge.
///
/// # Panics
/// If `(x, y)` is not a valid position in `img1`.
pub fn match_subimage(img1: &GrayImage, x: usize, y: usize, img2: &GrayImage) -> bool {
    assert!(
        img1.valid_pos(x, y),
        "position ({x}, {y}) outside {}x{} image",
        img1.width(),
        img1.height()
    );
    let mut checks = 0;
    matches_at(img1, x, y, img2, &mut checks)
}

/// Find the first position (raster order) where `img2` occurs in `img1`.
///
/// An `img2` larger than `img1` in either dimension yields an empty scan.
pub fn locate_subimage(img1: &GrayImage, img2: &GrayImage) -> SubimageSearch {
    let mut result = SubimageSearch::default();
    let (Some(max_x), Some(max_y)) = (
        img1.width().checked_sub(img2.width()),
        img1.height().checked_sub(img2.height()),
    ) else {
        return result;
    };

    for y in 0..=max_y {
        for x in 0..=max_x {
            result.comparisons += 1;
            if matches_at(img1, x, y, img2, &mut result.pixel_comparisons) {
                result.position = Some((x, y));
                debug!(
                    "locate_subimage found at ({x}, {y}) after {} candidates",
                    result.comparisons
                );
                return result;
            }
        }
    }
    debug!("locate_subimage: no match in {} candidates", result.comparisons);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::geometry::{crop, paste};

    fn noise(w: usize, h: usize, seed: u32) -> GrayImage {
        let mut state = seed;
        let data = (0..w * h)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect();
        GrayImage::from_raw(w, h, 255, data).unwrap()
    }

    #[test]
    fn crop_matches_at_its_origin() {
        let img = noise(8, 6, 1);
        let piece = crop(&img, 3, 2, 4, 3).unwrap();
        assert!(match_subimage(&img, 3, 2, &piece));
        assert!(!match_subimage(&img, 2, 2, &piece));
    }

    #[test]
    fn overhanging_subimage_does_not_match() {
        let img = noise(8, 6, 2);
        let piece = crop(&img, 0, 0, 4, 4).unwrap();
        assert!(!match_subimage(&img, 5, 0, &piece));
        assert!(!match_subimage(&img, 0, 3, &piece));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn match_at_invalid_position_panics() {
        let img = noise(4, 4, 3);
        let piece = noise(1, 1, 4);
        match_subimage(&img, 4, 0, &piece);
    }

    #[test]
    fn locate_finds_planted_pattern() {
        let mut img = GrayImage::new(20, 15, 255).unwrap();
        let pattern = noise(4, 3, 9);
        paste(&mut img, 11, 7, &pattern);
        let res = locate_subimage(&img, &pattern);
        assert_eq!(res.position, Some((11, 7)));
        // Row-major: 7 full rows of 17 candidates, then 12 more.
        assert_eq!(res.comparisons, 7 * 17 + 12);
        assert!(res.pixel_comparisons >= 12);
    }

    #[test]
    fn locate_returns_first_in_raster_order() {
        let img = GrayImage::new(5, 5, 255).unwrap();
        let zeros = GrayImage::new(2, 2, 255).unwrap();
        let res = locate_subimage(&img, &zeros);
        assert_eq!(res.position, Some((0, 0)));
        assert_eq!(res.comparisons, 1);
        assert_eq!(res.pixel_comparisons, 4);
    }

    #[test]
    fn locate_missing_scans_every_candidate() {
        let img = GrayImage::new(6, 4, 255).unwrap();
        let mut needle = GrayImage::new(2, 2, 255).unwrap();
        needle.set_pixel(1, 1, 1);
        let res = locate_subimage(&img, &needle);
        assert!(!res.found());
        assert_eq!(res.comparisons, 5 * 3);
    }

    #[test]
    fn locate_larger_needle_is_empty_scan() {
        let img = GrayImage::new(3, 3, 255).unwrap();
        let tall = GrayImage::new(1, 4, 255).unwrap();
        let wide = GrayImage::new(4, 1, 255).unwrap();
        assert_eq!(locate_subimage(&img, &tall), SubimageSearch::default());
        assert_eq!(locate_subimage(&img, &wide), SubimageSearch::default());
    }
}
