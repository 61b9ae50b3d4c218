//! Side-effect-only observers: operation counters and timing reports.
//!
//! Nothing in this module feeds back into the image operations. The counters
//! are bumped by the library as it runs; the timing structures are filled in
//! by the command-line tools and serialized into their JSON reports.

pub mod counters;
pub mod timing;

pub use counters::{Counter, CounterSnapshot};
pub use timing::{StageTiming, TimingBreakdown};
