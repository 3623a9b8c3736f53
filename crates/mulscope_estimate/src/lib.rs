//! Metrics estimation for parsed multiplier synthesis reports.
//!
//! Turns the structural counts of a [`ParsedRecord`](mulscope_synth::ParsedRecord)
//! into an [`EstimatedRecord`] carrying:
//!
//! - area in gate equivalents ([`weights`])
//! - critical-path delay and maximum frequency (via `mulscope_timing`)
//! - first-order dynamic power ([`power`])
//!
//! [`theoretical`] provides the placeholder records used when no synthesis
//! tool is installed.

#![warn(missing_docs)]

pub mod estimator;
pub mod power;
pub mod record;
pub mod theoretical;
pub mod weights;

pub use estimator::{estimate, Estimator};
pub use power::{OperatingPoint, CAPACITANCE_PER_UNIT_F};
pub use record::EstimatedRecord;
pub use theoretical::theoretical_estimates;
pub use weights::CellWeights;
