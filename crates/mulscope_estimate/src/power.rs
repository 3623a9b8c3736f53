//! First-order dynamic power model, `P = α · C · V² · f`.

use crate::weights::CellWeights;
use mulscope_common::Frequency;
use mulscope_synth::StructuralCounts;
use serde::{Deserialize, Serialize};

/// Capacitance represented by one unit of [`CellWeights::capacitance`], in farads.
pub const CAPACITANCE_PER_UNIT_F: f64 = 1e-15;

/// The operating point at which dynamic power is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Fraction of the capacitance switched per cycle.
    pub activity_factor: f64,
    /// Supply voltage in volts.
    pub supply_voltage: f64,
    /// Clock frequency.
    pub frequency: Frequency,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            activity_factor: 0.2,
            supply_voltage: 1.0,
            frequency: Frequency::from_mhz(100.0),
        }
    }
}

impl OperatingPoint {
    /// Dynamic power in milliwatts for the given counts and capacitance table.
    pub fn dynamic_power_mw(&self, counts: &StructuralCounts, capacitance: &CellWeights) -> f64 {
        let total_cap = capacitance.weighted_sum(counts, CAPACITANCE_PER_UNIT_F);
        let power_w = self.activity_factor
            * total_cap
            * self.supply_voltage.powi(2)
            * self.frequency.hz();
        power_w * 1000.0
    }

    /// Energy per operation in picojoules, assuming one operation per cycle.
    pub fn energy_per_op_pj(&self, power_mw: f64) -> f64 {
        // mW × ns = pJ
        power_mw * self.frequency.period_ns()
    }
}
