//! Box (mean) blur with edge-clipped windows.
//!
//! Every output pixel `(x, y)` becomes the mean of the source pixels in
//! `[x-dx, x+dx] × [y-dy, y+dy]` that lie inside the image, rounded half up.
//! Near borders the divisor is the number of in-bounds samples; there is no
//! padding or reflection. All reads come from the pre-blur state, so earlier
//! outputs never feed later ones.
//!
//! Two interchangeable methods produce identical output:
//! - `Direct` walks each window over a snapshot of the image,
//!   O(W·H·(2dx+1)·(2dy+1)).
//! - `SummedArea` builds a summed-area table once and answers each window in
//!   O(1), O(W·H) overall.
//!
//! If the temporary buffer cannot be allocated the image is left unmodified
//! and a warning is logged; unlike the other operations, no error is returned.
//! Images without pixels are returned untouched before any buffer is built.
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::diagnostics::counters::{self, Counter};
use crate::error::{ImageError, Result};
use crate::image::gray::try_copy;
use crate::image::{GrayImage, ImageView, ImageViewMut};

/// Strategy used to compute window sums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMethod {
    #[default]
    Direct,
    SummedArea,
}

impl BlurMethod {
    pub const ALL: [BlurMethod; 2] = [BlurMethod::Direct, BlurMethod::SummedArea];

    pub fn label(self) -> &'static str {
        match self {
            BlurMethod::Direct => "direct",
            BlurMethod::SummedArea => "summed_area",
        }
    }
}

/// Blur `img` in place with a `(2dx+1) × (2dy+1)` mean filter.
pub fn blur(img: &mut GrayImage, dx: usize, dy: usize) {
    blur_with(img, dx, dy, BlurMethod::Direct);
}

/// Blur `img` in place using the given summation strategy.
pub fn blur_with(img: &mut GrayImage, dx: usize, dy: usize, method: BlurMethod) {
    counters::bump(Counter::FilterOps);
    debug!(
        "blur {}x{} dx={dx} dy={dy} method={}",
        img.width(),
        img.height(),
        method.label()
    );
    if img.is_empty() {
        return;
    }
    let outcome = match method {
        BlurMethod::Direct => blur_direct(img, dx, dy),
        BlurMethod::SummedArea => blur_summed_area(img, dx, dy),
    };
    if let Err(e) = outcome {
        counters::bump(Counter::MemAllocFailures);
        warn!(
            "blur skipped: temporary buffer for {}x{} image unavailable ({e})",
            img.width(),
            img.height()
        );
    }
}

#[inline]
fn rounded_mean(sum: u64, count: u64) -> u8 {
    (sum as f64 / count as f64 + 0.5) as u8
}

/// Inclusive clipped window `[c - d, c + d] ∩ [0, len)`.
#[inline]
fn clip(c: usize, d: usize, len: usize) -> (usize, usize) {
    (c.saturating_sub(d), c.saturating_add(d).min(len - 1))
}

fn blur_direct(img: &mut GrayImage, dx: usize, dy: usize) -> Result<()> {
    let (w, h) = img.dimensions();
    let snapshot = try_copy(img.pixels()).map_err(|source| ImageError::Alloc {
        bytes: img.len(),
        source,
    })?;
    for y in 0..h {
        let (y0, y1) = clip(y, dy, h);
        let out = img.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            let (x0, x1) = clip(x, dx, w);
            let mut sum = 0u64;
            for yy in y0..=y1 {
                let start = yy * w;
                sum += snapshot[start + x0..=start + x1]
                    .iter()
                    .map(|&v| u64::from(v))
                    .sum::<u64>();
            }
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
            *px = rounded_mean(sum, count);
        }
    }
    Ok(())
}

/// Inclusive prefix sums with a zero guard row and column:
/// `table[(y+1)*(w+1) + (x+1)]` is the sum of all pixels in `[0, x] × [0, y]`.
struct SummedAreaTable {
    stride: usize,
    table: Vec<u64>,
}

impl SummedAreaTable {
    fn build(img: &GrayImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        let overflow = || ImageError::DimensionsOverflow {
            width: w,
            height: h,
        };
        let stride = w.checked_add(1).ok_or_else(overflow)?;
        let len = h
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(stride))
            .ok_or_else(overflow)?;
        let mut table = Vec::new();
        table
            .try_reserve_exact(len)
            .map_err(|source| ImageError::Alloc {
                bytes: len.saturating_mul(std::mem::size_of::<u64>()),
                source,
            })?;
        table.resize(len, 0u64);
        for (y, row) in img.rows().enumerate() {
            let mut running = 0u64;
            for (x, &v) in row.iter().enumerate() {
                running += u64::from(v);
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + running;
            }
        }
        Ok(Self { stride, table })
    }

    /// Sum over the inclusive rectangle `[x0, x1] × [y0, y1]`.
    #[inline]
    fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
        let s = self.stride;
        self.table[(y1 + 1) * s + x1 + 1] + self.table[y0 * s + x0]
            - self.table[y0 * s + x1 + 1]
            - self.table[(y1 + 1) * s + x0]
    }
}

fn blur_summed_area(img: &mut GrayImage, dx: usize, dy: usize) -> Result<()> {
    let (w, h) = img.dimensions();
    let sat = SummedAreaTable::build(img)?;
    for y in 0..h {
        let (y0, y1) = clip(y, dy, h);
        let out = img.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            let (x0, x1) = clip(x, dx, w);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
            *px = rounded_mean(sat.rect_sum(x0, y0, x1, y1), count);
        }
    }
    Ok(())
}
