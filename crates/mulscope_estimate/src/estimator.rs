//! Combines the area, timing and power models into one estimation step.

use crate::power::OperatingPoint;
use crate::record::EstimatedRecord;
use crate::weights::CellWeights;
use mulscope_synth::{DerivedMetrics, ParsedRecord};
use mulscope_timing::{max_frequency_mhz, TimingModels};

/// Model parameters for turning structural counts into estimates.
#[derive(Debug)]
pub struct Estimator {
    /// Gate-equivalent area per cell type.
    pub area: CellWeights,
    /// Capacitance units per cell type.
    pub capacitance: CellWeights,
    /// Power-model operating point.
    pub operating_point: OperatingPoint,
    /// Per-architecture timing models.
    pub timing: TimingModels,
}

impl Estimator {
    /// Creates an estimator with the standard models and the given operating point.
    pub fn new(operating_point: OperatingPoint) -> Self {
        Self {
            area: CellWeights::area_ge(),
            capacitance: CellWeights::capacitance(),
            operating_point,
            timing: TimingModels::standard(),
        }
    }

    /// Computes the derived metrics for a parsed record.
    ///
    /// Never fails: an all-zero record yields zero area and power, while the
    /// delay still follows the variant's timing model.
    pub fn estimate(&self, parsed: &ParsedRecord) -> EstimatedRecord {
        let counts = parsed.counts();
        let delay = self.timing.critical_path_delay_ns(parsed.variant());
        let derived = DerivedMetrics {
            critical_path_delay_ns: delay,
            estimated_area_ge: self.area.weighted_sum(counts, 1.0),
            estimated_power_mw: self
                .operating_point
                .dynamic_power_mw(counts, &self.capacitance),
            max_frequency_mhz: max_frequency_mhz(delay),
        };
        EstimatedRecord::from_parts(parsed.clone(), derived)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(OperatingPoint::default())
    }
}

/// Estimates a record with the standard models and operating point.
pub fn estimate(parsed: &ParsedRecord) -> EstimatedRecord {
    Estimator::new(OperatingPoint::default()).estimate(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulscope_common::{Frequency, Variant};
    use mulscope_synth::{parse_report, CellKind, StructuralCounts};

    fn parsed(variant: Variant, total: u64, pairs: &[(CellKind, u64)]) -> ParsedRecord {
        let mut counts = StructuralCounts {
            total_cells: total,
            ..Default::default()
        };
        for &(kind, count) in pairs {
            counts.cells.set(kind, count);
        }
        ParsedRecord::new(variant, counts)
    }

    #[test]
    fn classical_with_no_cells() {
        let record = estimate(&parse_report(Variant::Classical, ""));
        assert_eq!(record.counts().total_cells, 0);
        assert_eq!(record.area_ge(), 0.0);
        assert!((record.delay_ns() - 9.6).abs() < 1e-12);
        assert!((record.max_frequency_mhz() - 104.17).abs() < 0.01);
        assert_eq!(record.power_mw(), 0.0);
        assert!(record.is_degenerate());
    }

    #[test]
    fn structural_fields_are_preserved() {
        let input = parsed(Variant::Dadda, 10, &[(CellKind::And, 4), (CellKind::Mux, 1)]);
        let record = estimate(&input);
        assert_eq!(record.counts(), input.counts());
        assert_eq!(record.variant(), &Variant::Dadda);
    }

    #[test]
    fn area_and_power_of_small_design() {
        let record = estimate(&parsed(
            Variant::Wallace,
            10,
            &[(CellKind::And, 4), (CellKind::Xor, 2), (CellKind::Add, 1)],
        ));
        // 4*1.33 + 2*2.67 + 8 + 3*2
        assert!((record.area_ge() - 24.66).abs() < 1e-9);
        // C = (8 + 8 + 10 + 7.5) fF; P = 0.2 * C * 1 * 1e8 * 1e3
        assert!((record.power_mw() - 0.00067).abs() < 1e-12);
        assert_eq!(record.delay_ns(), 4.25);
    }

    #[test]
    fn frequency_is_inverse_of_delay() {
        for variant in [
            Variant::Classical,
            Variant::Dadda,
            Variant::Wallace,
            Variant::from_name("Booth"),
        ] {
            let record = estimate(&parsed(variant, 5, &[]));
            let expected = 1000.0 / record.delay_ns();
            assert!(((record.max_frequency_mhz() - expected) / expected).abs() < 1e-9);
        }
    }

    #[test]
    fn delay_ignores_gate_counts() {
        let small = estimate(&parsed(Variant::Wallace, 1, &[(CellKind::And, 1)]));
        let large = estimate(&parsed(Variant::Wallace, 90_000, &[(CellKind::Xor, 40_000)]));
        assert_eq!(small.delay_ns().to_bits(), large.delay_ns().to_bits());
    }

    #[test]
    fn unmodeled_variant_gets_fixed_delay() {
        let record = estimate(&parsed(Variant::from_name("Array"), 0, &[]));
        assert_eq!(record.delay_ns(), 5.0);
        assert_eq!(record.max_frequency_mhz(), 200.0);
    }

    #[test]
    fn custom_operating_point() {
        let estimator = Estimator::new(OperatingPoint {
            frequency: Frequency::from_mhz(200.0),
            ..Default::default()
        });
        let base = estimate(&parsed(Variant::Dadda, 100, &[]));
        let fast = estimator.estimate(&parsed(Variant::Dadda, 100, &[]));
        assert!((fast.power_mw() / base.power_mw() - 2.0).abs() < 1e-12);
        assert_eq!(fast.area_ge(), base.area_ge());
    }
}
