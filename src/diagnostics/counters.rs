//! Per-thread operation counters.
//!
//! Each thread sees its own set of counters, so a caller that parallelizes
//! work across images (or the test harness running tests concurrently) never
//! observes counts from another thread. `reset` before a measured section and
//! `snapshot` after it.
use serde::Serialize;
use std::cell::Cell;

const COUNTER_SLOTS: usize = 7;

thread_local! {
    static COUNTS: Cell<[u64; COUNTER_SLOTS]> = const { Cell::new([0; COUNTER_SLOTS]) };
}

/// Named counter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Pixel buffer accesses (single get/set, plus whole-buffer file I/O).
    PixMem,
    /// Image creations and explicit destructions.
    ImageCreateDestroy,
    /// Load and save calls.
    FileIo,
    /// Single-pixel writes through `set_pixel`.
    PixelModifications,
    /// Rotations.
    TransformOps,
    /// Blur passes.
    FilterOps,
    /// Failed pixel buffer reservations.
    MemAllocFailures,
}

impl Counter {
    pub const ALL: [Counter; COUNTER_SLOTS] = [
        Counter::PixMem,
        Counter::ImageCreateDestroy,
        Counter::FileIo,
        Counter::PixelModifications,
        Counter::TransformOps,
        Counter::FilterOps,
        Counter::MemAllocFailures,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Counter::PixMem => "pixmem",
            Counter::ImageCreateDestroy => "image_create_destroy",
            Counter::FileIo => "file_io",
            Counter::PixelModifications => "pixel_modifications",
            Counter::TransformOps => "transform_ops",
            Counter::FilterOps => "filter_ops",
            Counter::MemAllocFailures => "mem_alloc_failures",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Add `n` to a counter.
#[inline]
pub fn add(counter: Counter, n: u64) {
    COUNTS.with(|c| {
        let mut counts = c.get();
        counts[counter.slot()] = counts[counter.slot()].wrapping_add(n);
        c.set(counts);
    });
}

/// Add one to a counter.
#[inline]
pub fn bump(counter: Counter) {
    add(counter, 1);
}

/// Current value of a single counter on this thread.
pub fn get(counter: Counter) -> u64 {
    COUNTS.with(|c| c.get()[counter.slot()])
}

/// Zero every counter on this thread.
pub fn reset() {
    COUNTS.with(|c| c.set([0; COUNTER_SLOTS]));
}

/// Copy of all counters at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub pixmem: u64,
    pub image_create_destroy: u64,
    pub file_io: u64,
    pub pixel_modifications: u64,
    pub transform_ops: u64,
    pub filter_ops: u64,
    pub mem_alloc_failures: u64,
}

impl CounterSnapshot {
    /// Per-counter difference `self - earlier`.
    pub fn since(&self, earlier: &CounterSnapshot) -> CounterSnapshot {
        CounterSnapshot {
            pixmem: self.pixmem.wrapping_sub(earlier.pixmem),
            image_create_destroy: self
                .image_create_destroy
                .wrapping_sub(earlier.image_create_destroy),
            file_io: self.file_io.wrapping_sub(earlier.file_io),
            pixel_modifications: self
                .pixel_modifications
                .wrapping_sub(earlier.pixel_modifications),
            transform_ops: self.transform_ops.wrapping_sub(earlier.transform_ops),
            filter_ops: self.filter_ops.wrapping_sub(earlier.filter_ops),
            mem_alloc_failures: self
                .mem_alloc_failures
                .wrapping_sub(earlier.mem_alloc_failures),
        }
    }
}

/// Read all counters on this thread.
pub fn snapshot() -> CounterSnapshot {
    let counts = COUNTS.with(|c| c.get());
    CounterSnapshot {
        pixmem: counts[Counter::PixMem.slot()],
        image_create_destroy: counts[Counter::ImageCreateDestroy.slot()],
        file_io: counts[Counter::FileIo.slot()],
        pixel_modifications: counts[Counter::PixelModifications.slot()],
        transform_ops: counts[Counter::TransformOps.slot()],
        filter_ops: counts[Counter::FilterOps.slot()],
        mem_alloc_failures: counts[Counter::MemAllocFailures.slot()],
    }
}
