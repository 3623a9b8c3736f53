//! Per-variant metric records and their pipeline stages.
//!
//! A record moves through three stages: the raw report text, a
//! [`ParsedRecord`] holding only structural counts, and an estimated record
//! (owned by the estimator crate) that adds the derived metrics. The flat
//! [`MetricsRecord`] is the persisted form shared by all stages.

use crate::cells::CellKind;
use mulscope_common::Variant;
use serde::{Deserialize, Serialize};

/// Counts of each classified cell type. Absent types are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellCounts {
    /// `$_AND_` cells.
    pub and_gates: u64,
    /// `$_OR_` cells.
    pub or_gates: u64,
    /// `$_XOR_` cells.
    pub xor_gates: u64,
    /// `$_NOT_` cells.
    pub not_gates: u64,
    /// `$_NAND_` cells.
    pub nand_gates: u64,
    /// `$_NOR_` cells.
    pub nor_gates: u64,
    /// `$_XNOR_` cells.
    pub xnor_gates: u64,
    /// `$_MUX_` cells.
    pub mux_gates: u64,
    /// `$add` macro cells.
    pub add_cells: u64,
}

impl CellCounts {
    /// Returns the count for one cell kind.
    pub fn get(&self, kind: CellKind) -> u64 {
        match kind {
            CellKind::And => self.and_gates,
            CellKind::Or => self.or_gates,
            CellKind::Xor => self.xor_gates,
            CellKind::Not => self.not_gates,
            CellKind::Nand => self.nand_gates,
            CellKind::Nor => self.nor_gates,
            CellKind::Xnor => self.xnor_gates,
            CellKind::Mux => self.mux_gates,
            CellKind::Add => self.add_cells,
        }
    }

    /// Overwrites the count for one cell kind.
    pub fn set(&mut self, kind: CellKind, count: u64) {
        let slot = match kind {
            CellKind::And => &mut self.and_gates,
            CellKind::Or => &mut self.or_gates,
            CellKind::Xor => &mut self.xor_gates,
            CellKind::Not => &mut self.not_gates,
            CellKind::Nand => &mut self.nand_gates,
            CellKind::Nor => &mut self.nor_gates,
            CellKind::Xnor => &mut self.xnor_gates,
            CellKind::Mux => &mut self.mux_gates,
            CellKind::Add => &mut self.add_cells,
        };
        *slot = count;
    }

    /// Iterates over `(kind, count)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKind, u64)> + '_ {
        CellKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of all classified counts.
    pub fn classified_total(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(count))
    }
}

/// Structural counts extracted from one synthesis report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralCounts {
    /// Total number of cells, the reference for the classified counts.
    pub total_cells: u64,
    /// Total number of wires.
    pub wires: u64,
    /// Externally visible wires.
    pub public_wires: u64,
    /// Memories reported by the tool.
    pub memories: u64,
    /// Unmapped processes reported by the tool.
    pub processes: u64,
    /// Classified cell counts.
    #[serde(flatten)]
    pub cells: CellCounts,
}

impl StructuralCounts {
    /// Cells not covered by any classified kind, clamped at zero.
    pub fn other_cells(&self) -> u64 {
        self.total_cells
            .saturating_sub(self.cells.classified_total())
    }

    /// Returns `true` when the report yielded no counts at all.
    pub fn is_empty(&self) -> bool {
        *self == StructuralCounts::default()
    }
}

/// Metrics computed from structural counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedMetrics {
    /// Worst-case propagation delay estimate in nanoseconds.
    pub critical_path_delay_ns: f64,
    /// Area estimate in gate equivalents.
    pub estimated_area_ge: f64,
    /// Dynamic power estimate in milliwatts.
    pub estimated_power_mw: f64,
    /// `1000 / critical_path_delay_ns`, or `0.0` without a positive delay.
    pub max_frequency_mhz: f64,
}

/// The flat, persisted record for one variant.
///
/// Serializes to a single JSON object whose keys are the field names of
/// [`StructuralCounts`], [`CellCounts`] and [`DerivedMetrics`] plus `name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// The variant this record describes.
    pub name: Variant,
    /// Counts taken from the synthesis report.
    #[serde(flatten)]
    pub counts: StructuralCounts,
    /// Estimates; all zero until the estimator runs.
    #[serde(flatten)]
    pub derived: DerivedMetrics,
}

impl MetricsRecord {
    /// Returns `true` when no structural data was found for the variant.
    pub fn is_degenerate(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A record after parsing: structural counts, no derived metrics yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRecord {
    variant: Variant,
    counts: StructuralCounts,
}

impl ParsedRecord {
    /// Creates a parsed record from already extracted counts.
    pub fn new(variant: Variant, counts: StructuralCounts) -> Self {
        Self { variant, counts }
    }

    /// The variant this record describes.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// The structural counts.
    pub fn counts(&self) -> &StructuralCounts {
        &self.counts
    }

    /// Converts into the flat form with all derived metrics at zero.
    pub fn into_metrics(self) -> MetricsRecord {
        MetricsRecord {
            name: self.variant,
            counts: self.counts,
            derived: DerivedMetrics::default(),
        }
    }
}
