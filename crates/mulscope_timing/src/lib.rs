//! Critical-path and frequency models for the mulscope multiplier variants.
//!
//! Timing is architecture-specific and deliberately not derived from gate
//! counts: each variant is mapped to a closed-form [`TimingModel`] capturing
//! the structural depth of its architecture.
//!
//! # Architecture
//!
//! - [`model`]: the timing model trait and its shift-add, reduction-tree and
//!   fixed implementations
//! - [`registry`]: variant-to-model dispatch with a fixed fallback

#![warn(missing_docs)]

pub mod model;
pub mod registry;

pub use model::{FixedTiming, ReductionTreeTiming, ShiftAddTiming, TimingModel};
pub use registry::TimingModels;

/// Operand width, in bits, assumed by every model.
pub const OPERAND_WIDTH: u32 = 32;

/// Converts a critical-path delay to the maximum clock frequency in MHz.
///
/// Returns `1000 / delay_ns` for positive delays and `0.0` otherwise.
pub fn max_frequency_mhz(delay_ns: f64) -> f64 {
    if delay_ns > 0.0 {
        1000.0 / delay_ns
    } else {
        0.0
    }
}
