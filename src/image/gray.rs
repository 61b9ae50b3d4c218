//! Owned 8-bit grayscale image in row-major layout (stride == width).
//!
//! `GrayImage` is the only image entity in the crate. It owns its pixel
//! buffer, carries the maximum gray value (`maxval`, the level that renders
//! as white) and routes every `(x, y)` lookup through [`GrayImage::idx`],
//! which enforces bounds in one place.
//!
//! Allocation is fallible: constructors reserve the buffer with
//! `try_reserve_exact` and report failure as [`ImageError::Alloc`] instead of
//! aborting the process.
use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use crate::diagnostics::counters::{self, Counter};
use crate::error::{ImageError, Result};
use crate::image::traits::{ImageView, ImageViewMut};
use crate::image::view::GrayView;

/// Largest gray level a pixel can store.
pub const PIX_MAX: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    maxval: u8,
    pixels: Vec<u8>,
}

/// Reserve and zero-fill a buffer of `len` bytes without aborting on failure.
pub(crate) fn try_alloc_zeroed(len: usize) -> std::result::Result<Vec<u8>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Fallible copy of a byte slice.
pub(crate) fn try_copy(src: &[u8]) -> std::result::Result<Vec<u8>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())?;
    buf.extend_from_slice(src);
    Ok(buf)
}

fn pixel_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(ImageError::DimensionsOverflow { width, height })
}

impl GrayImage {
    /// Create a black (all zero) image.
    ///
    /// # Panics
    /// If `maxval == 0`.
    pub fn new(width: usize, height: usize, maxval: u8) -> Result<Self> {
        assert!(maxval > 0, "maxval must be in 1..=255");
        let len = pixel_count(width, height)?;
        let pixels = try_alloc_zeroed(len).map_err(|source| {
            counters::bump(Counter::MemAllocFailures);
            ImageError::Alloc { bytes: len, source }
        })?;
        counters::bump(Counter::ImageCreateDestroy);
        Ok(Self {
            width,
            height,
            maxval,
            pixels,
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    /// If `maxval == 0`.
    pub fn from_raw(width: usize, height: usize, maxval: u8, pixels: Vec<u8>) -> Result<Self> {
        assert!(maxval > 0, "maxval must be in 1..=255");
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        counters::bump(Counter::ImageCreateDestroy);
        Ok(Self {
            width,
            height,
            maxval,
            pixels,
        })
    }

    /// Release the image. The handle is consumed, so it cannot be used again.
    pub fn destroy(self) {
        counters::bump(Counter::ImageCreateDestroy);
        drop(self);
    }

    /// Give up ownership of the pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn maxval(&self) -> u8 {
        self.maxval
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Minimum and maximum gray level present.
    ///
    /// A zero-pixel image returns the scan's starting values `(255, 0)`, which
    /// is not a meaningful range.
    pub fn stats(&self) -> (u8, u8) {
        self.pixels
            .iter()
            .fold((PIX_MAX, 0), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Whether `(x, y)` addresses a pixel of this image.
    #[inline]
    pub fn valid_pos(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Whether the `w × h` rectangle with top-left `(x, y)` lies inside.
    #[inline]
    pub fn valid_rect(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        x.checked_add(w).is_some_and(|right| right <= self.width)
            && y.checked_add(h).is_some_and(|bottom| bottom <= self.height)
    }

    /// Linear index of `(x, y)` into the pixel buffer.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            self.valid_pos(x, y),
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Gray level at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        let i = self.idx(x, y);
        counters::bump(Counter::PixMem);
        self.pixels[i]
    }

    /// Store `level` at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, level: u8) {
        let i = self.idx(x, y);
        counters::bump(Counter::PixMem);
        counters::bump(Counter::PixelModifications);
        self.pixels[i] = level;
    }

    /// Borrow the `w × h` rectangle at `(x, y)` without copying.
    ///
    /// # Panics
    /// If the rectangle is not inside the image.
    pub fn view(&self, x: usize, y: usize, w: usize, h: usize) -> GrayView<'_> {
        assert!(
            self.valid_rect(x, y, w, h),
            "rectangle ({x}, {y}, {w}, {h}) outside {}x{} image",
            self.width,
            self.height
        );
        if w == 0 || h == 0 {
            return GrayView::new(w, h, 0, self.maxval, &[]);
        }
        let start = y * self.width + x;
        let end = (y + h - 1) * self.width + x + w;
        GrayView::new(w, h, self.width, self.maxval, &self.pixels[start..end])
    }

    /// Borrow the whole image as a view.
    pub fn as_view(&self) -> GrayView<'_> {
        self.view(0, 0, self.width, self.height)
    }

    /// Whole pixel buffer in raster order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel buffer in raster order.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

impl Index<(usize, usize)> for GrayImage {
    type Output = u8;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &u8 {
        &self.pixels[self.idx(x, y)]
    }
}

impl IndexMut<(usize, usize)> for GrayImage {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut u8 {
        let i = self.idx(x, y);
        &mut self.pixels[i]
    }
}

impl ImageView for GrayImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row {y} outside image of height {}", self.height);
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.pixels)
    }
}

impl ImageViewMut for GrayImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row {y} outside image of height {}", self.height);
        let start = y * self.width;
        let end = start + self.width;
        &mut self.pixels[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> GrayImage {
        let data = (0..w * h).map(|i| (i % 256) as u8).collect();
        GrayImage::from_raw(w, h, 255, data).unwrap()
    }

    #[test]
    fn new_image_is_black() {
        let img = GrayImage::new(4, 3, 200).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.maxval(), 200);
        assert_eq!(img.len(), 12);
        assert!(img.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn zero_pixel_image_is_legal() {
        let img = GrayImage::new(0, 7, 255).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.stats(), (255, 0));
        assert!(!img.valid_pos(0, 0));
        assert!(img.valid_rect(0, 7, 0, 0));
    }

    #[test]
    #[should_panic(expected = "maxval")]
    fn zero_maxval_is_rejected() {
        let _ = GrayImage::new(1, 1, 0);
    }

    #[test]
    fn overflowing_dimensions_fail() {
        let err = GrayImage::new(usize::MAX, 2, 255).unwrap_err();
        assert!(matches!(err, ImageError::DimensionsOverflow { .. }));
    }

    #[test]
    fn unreservable_buffer_reports_alloc_failure() {
        counters::reset();
        let err = GrayImage::new(isize::MAX as usize + 1, 1, 255).unwrap_err();
        assert!(matches!(err, ImageError::Alloc { .. }), "got {err:?}");
        assert_eq!(counters::get(Counter::MemAllocFailures), 1);
    }

    #[test]
    fn from_raw_checks_length() {
        let err = GrayImage::from_raw(2, 2, 255, vec![0; 3]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::BufferSize {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn raster_order_indexing() {
        let mut img = GrayImage::new(100, 2, 255).unwrap();
        assert_eq!(img.idx(33, 0), 33);
        assert_eq!(img.idx(22, 1), 122);
        img.set_pixel(22, 1, 9);
        assert_eq!(img.pixels()[122], 9);
        assert_eq!(img.get_pixel(22, 1), 9);
        img[(5, 0)] = 7;
        assert_eq!(img[(5, 0)], 7);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_out_of_bounds_panics() {
        let img = GrayImage::new(3, 3, 255).unwrap();
        img.get_pixel(3, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn set_out_of_bounds_panics() {
        let mut img = GrayImage::new(3, 3, 255).unwrap();
        img.set_pixel(0, 3, 1);
    }

    #[test]
    fn stats_finds_extremes() {
        let mut img = GrayImage::new(3, 2, 255).unwrap();
        img.pixels_mut().copy_from_slice(&[40, 12, 90, 200, 13, 55]);
        assert_eq!(img.stats(), (12, 200));
    }

    #[test]
    fn valid_rect_edges() {
        let img = GrayImage::new(10, 5, 255).unwrap();
        assert!(img.valid_rect(0, 0, 10, 5));
        assert!(img.valid_rect(10, 5, 0, 0));
        assert!(!img.valid_rect(1, 0, 10, 5));
        assert!(!img.valid_rect(0, 1, 10, 5));
        assert!(!img.valid_rect(usize::MAX, 0, 2, 1));
    }

    #[test]
    fn rows_follow_stride() {
        let img = ramp(4, 3);
        let rows: Vec<&[u8]> = img.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &[4, 5, 6, 7]);
    }

    #[test]
    fn view_borrows_sub_rectangle() {
        let img = ramp(5, 4);
        let v = img.view(1, 2, 3, 2);
        assert_eq!(v.width(), 3);
        assert_eq!(v.height(), 2);
        assert_eq!(v.stride(), 5);
        assert_eq!(v.row(0), &[11, 12, 13]);
        assert_eq!(v.row(1), &[16, 17, 18]);
        assert_eq!(v.get(2, 1), 18);
    }

    #[test]
    fn empty_view_at_far_corner() {
        let img = ramp(5, 4);
        let v = img.view(5, 4, 0, 0);
        assert_eq!(v.rows().count(), 0);
        let v = img.view(2, 4, 3, 0);
        assert_eq!(v.height(), 0);
    }

    #[test]
    fn whole_buffer_access() {
        let mut img = ramp(3, 2);
        assert!(img.is_contiguous());
        assert_eq!(img.as_slice(), Some(img.pixels()));
        if let Some(buf) = img.as_mut_slice() {
            buf[4] = 99;
        }
        assert_eq!(img.get_pixel(1, 1), 99);
        assert_eq!(img.as_view().get(1, 1), 99);
        assert_eq!(img.into_raw(), vec![0, 1, 2, 3, 99, 5]);
    }

    #[test]
    fn destroy_counts_release() {
        counters::reset();
        let img = GrayImage::new(2, 2, 255).unwrap();
        img.destroy();
        assert_eq!(counters::get(Counter::ImageCreateDestroy), 2);
    }
}
