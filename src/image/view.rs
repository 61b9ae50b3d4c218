use crate::error::Result;
use crate::image::gray::GrayImage;
use crate::image::traits::{ImageView, ImageViewMut};

/// Borrowed rectangular window into a [`GrayImage`].
///
/// `data` starts at the window's top-left pixel; consecutive rows are
/// `stride` bytes apart, where `stride` is the parent image's width.
#[derive(Clone, Copy, Debug)]
pub struct GrayView<'a> {
    w: usize,
    h: usize,
    stride: usize, // bytes between rows
    maxval: u8,
    data: &'a [u8],
}

impl<'a> GrayView<'a> {
    pub(crate) fn new(w: usize, h: usize, stride: usize, maxval: u8, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride,
            maxval,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.w && y < self.h,
            "pixel ({x}, {y}) outside {}x{} view",
            self.w,
            self.h
        );
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn maxval(&self) -> u8 {
        self.maxval
    }

    /// Copy the window into a freshly allocated image.
    pub fn to_image(&self) -> Result<GrayImage> {
        let mut out = GrayImage::new(self.w, self.h, self.maxval)?;
        if let (Some(src), Some(dst)) = (self.as_slice(), out.as_mut_slice()) {
            dst.copy_from_slice(src);
            return Ok(out);
        }
        for y in 0..self.h {
            out.row_mut(y).copy_from_slice(self.row(y));
        }
        Ok(out)
    }
}

impl<'a> ImageView for GrayView<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.h, "row {y} outside view of height {}", self.h);
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        self.is_contiguous().then(|| &self.data[..self.w * self.h])
    }
}
