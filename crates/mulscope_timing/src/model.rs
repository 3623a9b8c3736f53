//! Closed-form critical-path models.
//!
//! Each model captures a structural property of one multiplier family rather
//! than summing gate delays: a shift-add multiplier needs one stage per
//! operand bit, a reduction tree needs a logarithmic number of compressor
//! levels followed by one carry-propagate addition.

use std::fmt::Debug;

/// A critical-path estimate for one multiplier architecture.
///
/// Implementations are pure: the delay depends only on the operand width,
/// never on gate counts.
pub trait TimingModel: Debug + Send + Sync {
    /// Short description shown in the timing section of the text report.
    fn describe(&self) -> &'static str;

    /// Estimated critical-path delay in nanoseconds for `width`-bit operands.
    fn critical_path_delay_ns(&self, width: u32) -> f64;
}

/// Sequential shift-and-add: one stage per operand bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftAddTiming {
    /// Delay of one add-and-shift stage.
    pub delay_per_stage_ns: f64,
}

impl Default for ShiftAddTiming {
    fn default() -> Self {
        Self {
            delay_per_stage_ns: 0.3,
        }
    }
}

impl TimingModel for ShiftAddTiming {
    fn describe(&self) -> &'static str {
        "sequential shift-add"
    }

    fn critical_path_delay_ns(&self, width: u32) -> f64 {
        f64::from(width) * self.delay_per_stage_ns
    }
}

/// Partial-product reduction tree (Wallace, Dadda) with a final adder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionTreeTiming {
    /// Row reduction achieved per compressor level.
    pub reduction_factor: f64,
    /// Delay of one compressor level.
    pub delay_per_level_ns: f64,
    /// Delay of the terminating carry-propagate addition.
    pub final_adder_ns: f64,
}

impl ReductionTreeTiming {
    /// Number of reduction levels: `ceil(ln(width) / ln(reduction_factor))`.
    pub fn levels(&self, width: u32) -> u32 {
        let levels = (f64::from(width).ln() / self.reduction_factor.ln()).ceil();
        if levels.is_finite() && levels > 0.0 {
            levels as u32
        } else {
            0
        }
    }
}

impl Default for ReductionTreeTiming {
    fn default() -> Self {
        Self {
            reduction_factor: 1.5,
            delay_per_level_ns: 0.25,
            final_adder_ns: 2.0,
        }
    }
}

impl TimingModel for ReductionTreeTiming {
    fn describe(&self) -> &'static str {
        "reduction tree + final adder"
    }

    fn critical_path_delay_ns(&self, width: u32) -> f64 {
        f64::from(self.levels(width)) * self.delay_per_level_ns + self.final_adder_ns
    }
}

/// A constant delay for architectures without a dedicated model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTiming {
    /// The delay reported regardless of width.
    pub delay_ns: f64,
}

impl Default for FixedTiming {
    fn default() -> Self {
        Self { delay_ns: 5.0 }
    }
}

impl TimingModel for FixedTiming {
    fn describe(&self) -> &'static str {
        "unmodeled (fixed placeholder)"
    }

    fn critical_path_delay_ns(&self, _width: u32) -> f64 {
        self.delay_ns
    }
}
