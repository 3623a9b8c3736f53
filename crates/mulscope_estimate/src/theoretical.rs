//! Placeholder metrics used when the synthesis tool is not available.
//!
//! These are fixed, documented figures for a 32-bit implementation of each
//! known architecture. They use the same record type as tool-derived
//! results so every downstream consumer treats them identically.

use crate::record::EstimatedRecord;
use mulscope_common::Variant;
use mulscope_synth::{DerivedMetrics, MetricsRecord, StructuralCounts};

struct Placeholder {
    variant: Variant,
    total_cells: u64,
    area_ge: f64,
    delay_ns: f64,
    power_mw: f64,
    fmax_mhz: f64,
}

fn placeholders() -> [Placeholder; 3] {
    [
        Placeholder {
            variant: Variant::Classical,
            total_cells: 2048,
            area_ge: 5000.0,
            delay_ns: 9.6,
            power_mw: 15.0,
            fmax_mhz: 104.2,
        },
        Placeholder {
            variant: Variant::Dadda,
            total_cells: 1800,
            area_ge: 4200.0,
            delay_ns: 6.75,
            power_mw: 12.5,
            fmax_mhz: 148.1,
        },
        Placeholder {
            variant: Variant::Wallace,
            total_cells: 2200,
            area_ge: 5100.0,
            delay_ns: 6.75,
            power_mw: 14.8,
            fmax_mhz: 148.1,
        },
    ]
}

/// Returns placeholder records for Classical, Dadda and Wallace.
///
/// Only `total_cells` and the derived metrics are populated; gate-type
/// breakdowns are zero.
pub fn theoretical_estimates() -> Vec<EstimatedRecord> {
    placeholders()
        .into_iter()
        .map(|p| {
            EstimatedRecord::from_persisted(MetricsRecord {
                name: p.variant,
                counts: StructuralCounts {
                    total_cells: p.total_cells,
                    ..Default::default()
                },
                derived: DerivedMetrics {
                    critical_path_delay_ns: p.delay_ns,
                    estimated_area_ge: p.area_ge,
                    estimated_power_mw: p.power_mw,
                    max_frequency_mhz: p.fmax_mhz,
                },
            })
        })
        .collect()
}
