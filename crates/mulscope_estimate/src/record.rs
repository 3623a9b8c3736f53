//! The final, immutable stage of a variant's metrics.

use mulscope_common::Variant;
use mulscope_synth::{DerivedMetrics, MetricsRecord, ParsedRecord, StructuralCounts};

/// A record whose derived metrics have been filled in.
///
/// There is no way to change the metrics of an existing value; fresh
/// numbers require running the pipeline again on fresh input.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatedRecord {
    metrics: MetricsRecord,
}

impl EstimatedRecord {
    pub(crate) fn from_parts(parsed: ParsedRecord, derived: DerivedMetrics) -> Self {
        let mut metrics = parsed.into_metrics();
        metrics.derived = derived;
        Self { metrics }
    }

    /// Wraps a record loaded from a persisted result document.
    ///
    /// The derived fields are taken as stored; nothing is recomputed.
    pub fn from_persisted(metrics: MetricsRecord) -> Self {
        Self { metrics }
    }

    /// The variant this record describes.
    pub fn variant(&self) -> &Variant {
        &self.metrics.name
    }

    /// The flat record.
    pub fn metrics(&self) -> &MetricsRecord {
        &self.metrics
    }

    /// Structural counts from the report.
    pub fn counts(&self) -> &StructuralCounts {
        &self.metrics.counts
    }

    /// Derived estimates.
    pub fn derived(&self) -> &DerivedMetrics {
        &self.metrics.derived
    }

    /// Area estimate in gate equivalents.
    pub fn area_ge(&self) -> f64 {
        self.metrics.derived.estimated_area_ge
    }

    /// Critical-path delay estimate in nanoseconds.
    pub fn delay_ns(&self) -> f64 {
        self.metrics.derived.critical_path_delay_ns
    }

    /// Power estimate in milliwatts.
    pub fn power_mw(&self) -> f64 {
        self.metrics.derived.estimated_power_mw
    }

    /// Maximum clock frequency in MHz.
    pub fn max_frequency_mhz(&self) -> f64 {
        self.metrics.derived.max_frequency_mhz
    }

    /// Returns `true` when the record carries no structural data.
    pub fn is_degenerate(&self) -> bool {
        self.metrics.is_degenerate()
    }

    /// Unwraps into the flat record.
    pub fn into_metrics(self) -> MetricsRecord {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use crate::estimate;
    use mulscope_synth::parse_report;

    use super::*;

    const LOG: &str = "=== design hierarchy ===\n   64 cells\n   20   $_AND_\n   12   $_XOR_\n";

    #[test]
    fn persisted_record_is_taken_as_stored() {
        let estimated = estimate(&parse_report(Variant::Wallace, LOG));
        let mut metrics = estimated.metrics().clone();
        metrics.derived.estimated_power_mw = 42.0;
        let restored = EstimatedRecord::from_persisted(metrics);
        assert_eq!(restored.power_mw(), 42.0);
        assert_eq!(restored.area_ge(), estimated.area_ge());
        assert_eq!(restored.variant(), &Variant::Wallace);
    }

    #[test]
    fn accessors_read_the_flat_record() {
        let record = estimate(&parse_report(Variant::Dadda, LOG));
        assert_eq!(record.counts().total_cells, 64);
        assert_eq!(record.delay_ns(), record.derived().critical_path_delay_ns);
        assert!(!record.is_degenerate());
        let metrics = record.clone().into_metrics();
        assert_eq!(&metrics, record.metrics());
    }

    #[test]
    fn empty_report_is_degenerate() {
        assert!(estimate(&parse_report(Variant::Classical, "no stats here")).is_degenerate());
    }
}
