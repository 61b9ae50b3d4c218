//! Geometric transforms and two-image composition.
//!
//! `rotate_ccw90`, `mirror_horizontal` and `crop` leave the source untouched
//! and return a new image; allocation is their only failure mode. `paste` and
//! `blend` write into the destination in place.
use crate::diagnostics::counters::{self, Counter};
use crate::error::Result;
use crate::image::{GrayImage, ImageView, ImageViewMut};

/// Rotate 90° anticlockwise.
///
/// The result is `height × width`; source `(x, y)` lands at
/// `(y, width - 1 - x)`.
pub fn rotate_ccw90(img: &GrayImage) -> Result<GrayImage> {
    counters::bump(Counter::TransformOps);
    let (w, h) = img.dimensions();
    let mut out = GrayImage::new(h, w, img.maxval())?;
    for (y, src_row) in img.rows().enumerate() {
        for (x, &v) in src_row.iter().enumerate() {
            out[(y, w - 1 - x)] = v;
        }
    }
    Ok(out)
}

/// Flip left-right: `(x, y) -> (width - 1 - x, y)`.
pub fn mirror_horizontal(img: &GrayImage) -> Result<GrayImage> {
    let mut out = GrayImage::new(img.width(), img.height(), img.maxval())?;
    for y in 0..img.height() {
        let dst = out.row_mut(y);
        dst.copy_from_slice(img.row(y));
        dst.reverse();
    }
    Ok(out)
}

/// Copy the `w × h` rectangle with top-left `(x, y)` into a new image.
///
/// # Panics
/// If the rectangle is not inside `img`.
pub fn crop(img: &GrayImage, x: usize, y: usize, w: usize, h: usize) -> Result<GrayImage> {
    img.view(x, y, w, h).to_image()
}

fn assert_fits(dst: &GrayImage, x: usize, y: usize, src: &GrayImage) {
    assert!(
        dst.valid_rect(x, y, src.width(), src.height()),
        "{}x{} image does not fit at ({x}, {y}) in {}x{} image",
        src.width(),
        src.height(),
        dst.width(),
        dst.height()
    );
}

/// Overwrite the rectangle of `dst` at `(x, y)` with `src`, row by row.
///
/// # Panics
/// If `src` does not fit inside `dst` at `(x, y)`.
pub fn paste(dst: &mut GrayImage, x: usize, y: usize, src: &GrayImage) {
    assert_fits(dst, x, y, src);
    let w = src.width();
    for (i, src_row) in src.rows().enumerate() {
        dst.row_mut(y + i)[x..x + w].copy_from_slice(src_row);
    }
}

/// Alpha-blend `src` over the rectangle of `dst` at `(x, y)`:
/// `alpha * src + (1 - alpha) * dst`, rounded half up and clamped to 255.
///
/// # Panics
/// If `src` does not fit inside `dst` at `(x, y)`, or `alpha` is outside
/// `[0, 1]`.
pub fn blend(dst: &mut GrayImage, x: usize, y: usize, src: &GrayImage, alpha: f64) {
    assert_fits(dst, x, y, src);
    assert!(
        (0.0..=1.0).contains(&alpha),
        "blend alpha must be in [0, 1], got {alpha}"
    );
    let w = src.width();
    for (i, src_row) in src.rows().enumerate() {
        let dst_row = &mut dst.row_mut(y + i)[x..x + w];
        for (d, &s) in dst_row.iter_mut().zip(src_row) {
            let mixed = alpha * f64::from(s) + (1.0 - alpha) * f64::from(*d);
            *d = if mixed > 255.0 { 255 } else { (mixed + 0.5) as u8 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> GrayImage {
        let data = (0..w * h).map(|i| (i * 7 % 256) as u8).collect();
        GrayImage::from_raw(w, h, 255, data).unwrap()
    }

    #[test]
    fn rotate_moves_top_right_to_top_left() {
        // 3x2:
        // 0 1 2
        // 3 4 5
        let img = GrayImage::from_raw(3, 2, 255, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let rot = rotate_ccw90(&img).unwrap();
        assert_eq!(rot.dimensions(), (2, 3));
        // 2 5
        // 1 4
        // 0 3
        assert_eq!(rot.pixels(), &[2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn rotate_keeps_maxval_and_source() {
        let img = GrayImage::from_raw(2, 1, 90, vec![10, 20]).unwrap();
        let rot = rotate_ccw90(&img).unwrap();
        assert_eq!(rot.maxval(), 90);
        assert_eq!(img.pixels(), &[10, 20]);
    }

    #[test]
    fn rotate_four_times_is_identity() {
        let img = ramp(5, 3);
        let mut r = img.clone();
        for _ in 0..4 {
            r = rotate_ccw90(&r).unwrap();
        }
        assert_eq!(r, img);
    }

    #[test]
    fn rotate_empty_image() {
        let img = GrayImage::new(0, 4, 255).unwrap();
        let rot = rotate_ccw90(&img).unwrap();
        assert_eq!(rot.dimensions(), (4, 0));
    }

    #[test]
    fn mirror_reverses_rows() {
        let img = GrayImage::from_raw(3, 2, 255, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let m = mirror_horizontal(&img).unwrap();
        assert_eq!(m.pixels(), &[2, 1, 0, 5, 4, 3]);
        assert_eq!(mirror_horizontal(&m).unwrap(), img);
    }

    #[test]
    fn crop_copies_rectangle() {
        let img = GrayImage::from_raw(4, 3, 120, (0..12).collect()).unwrap();
        let c = crop(&img, 1, 1, 2, 2).unwrap();
        assert_eq!(c.dimensions(), (2, 2));
        assert_eq!(c.maxval(), 120);
        assert_eq!(c.pixels(), &[5, 6, 9, 10]);
    }

    #[test]
    fn crop_whole_and_empty() {
        let img = ramp(4, 3);
        assert_eq!(crop(&img, 0, 0, 4, 3).unwrap(), img);
        let empty = crop(&img, 4, 3, 0, 0).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn crop_outside_panics() {
        let img = ramp(4, 3);
        let _ = crop(&img, 3, 0, 2, 1);
    }

    #[test]
    fn paste_overwrites_rectangle_only() {
        let mut dst = GrayImage::new(4, 3, 255).unwrap();
        let src = GrayImage::from_raw(2, 2, 255, vec![1, 2, 3, 4]).unwrap();
        paste(&mut dst, 2, 1, &src);
        assert_eq!(dst.pixels(), &[0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4]);
    }

    #[test]
    fn crop_then_paste_restores() {
        let img = ramp(6, 5);
        let piece = crop(&img, 2, 1, 3, 4).unwrap();
        let mut copy = img.clone();
        paste(&mut copy, 2, 1, &GrayImage::new(3, 4, 255).unwrap());
        assert_ne!(copy, img);
        paste(&mut copy, 2, 1, &piece);
        assert_eq!(copy, img);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn paste_outside_panics() {
        let mut dst = GrayImage::new(4, 3, 255).unwrap();
        let src = GrayImage::new(2, 2, 255).unwrap();
        paste(&mut dst, 3, 0, &src);
    }

    #[test]
    fn blend_mixes_and_rounds() {
        let mut dst = GrayImage::from_raw(2, 1, 255, vec![100, 255]).unwrap();
        let src = GrayImage::from_raw(1, 1, 255, vec![201]).unwrap();
        blend(&mut dst, 0, 0, &src, 0.5);
        // 0.5 * 201 + 0.5 * 100 = 150.5 -> 151
        assert_eq!(dst.pixels(), &[151, 255]);
    }

    #[test]
    fn blend_extremes_match_paste_and_noop() {
        let base = ramp(5, 4);
        let src = GrayImage::from_raw(2, 2, 255, vec![9, 200, 33, 255]).unwrap();

        let mut pasted = base.clone();
        paste(&mut pasted, 1, 2, &src);
        let mut full = base.clone();
        blend(&mut full, 1, 2, &src, 1.0);
        assert_eq!(full, pasted);

        let mut none = base.clone();
        blend(&mut none, 1, 2, &src, 0.0);
        assert_eq!(none, base);
    }

    #[test]
    #[should_panic(expected = "alpha")]
    fn blend_rejects_alpha_above_one() {
        let mut dst = GrayImage::new(2, 2, 255).unwrap();
        let src = GrayImage::new(1, 1, 255).unwrap();
        blend(&mut dst, 0, 0, &src, 1.5);
    }
}
