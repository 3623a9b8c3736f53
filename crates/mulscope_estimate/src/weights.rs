//! Per-cell-type weight tables.

use mulscope_synth::{CellKind, StructuralCounts};
use serde::{Deserialize, Serialize};

/// A weight for every classified cell type plus one for unclassified cells.
///
/// The same shape serves the area model (gate equivalents per cell) and the
/// power model (switched capacitance units per cell). The values are
/// first-order calibration constants, not library data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellWeights {
    /// AND gate.
    pub and: f64,
    /// OR gate.
    pub or: f64,
    /// XOR gate.
    pub xor: f64,
    /// Inverter.
    pub not: f64,
    /// NAND gate.
    pub nand: f64,
    /// NOR gate.
    pub nor: f64,
    /// XNOR gate.
    pub xnor: f64,
    /// 2:1 multiplexer.
    pub mux: f64,
    /// Adder macro cell.
    pub add: f64,
    /// Any cell not covered above.
    pub other: f64,
}

impl CellWeights {
    /// Area in gate equivalents, where a 2-input NAND costs 1.
    ///
    /// XOR/XNOR cost about twice a simple gate, adders several gates.
    pub fn area_ge() -> Self {
        Self {
            and: 1.33,
            or: 1.33,
            xor: 2.67,
            not: 0.67,
            nand: 1.0,
            nor: 1.0,
            xnor: 2.67,
            mux: 2.0,
            add: 8.0,
            other: 2.0,
        }
    }

    /// Switched capacitance in units of the per-gate capacitance.
    pub fn capacitance() -> Self {
        Self {
            and: 2.0,
            or: 2.0,
            xor: 4.0,
            not: 1.0,
            nand: 2.0,
            nor: 2.0,
            xnor: 4.0,
            mux: 3.0,
            add: 10.0,
            other: 2.5,
        }
    }

    /// Returns the weight of one classified cell kind.
    pub fn weight(&self, kind: CellKind) -> f64 {
        match kind {
            CellKind::And => self.and,
            CellKind::Or => self.or,
            CellKind::Xor => self.xor,
            CellKind::Not => self.not,
            CellKind::Nand => self.nand,
            CellKind::Nor => self.nor,
            CellKind::Xnor => self.xnor,
            CellKind::Mux => self.mux,
            CellKind::Add => self.add,
        }
    }

    /// Computes `Σ count × weight × scale` over all classified kinds and the
    /// "other cells" remainder, accumulated in field order.
    pub fn weighted_sum(&self, counts: &StructuralCounts, scale: f64) -> f64 {
        let classified = counts
            .cells
            .iter()
            .fold(0.0, |acc, (kind, count)| {
                acc + count as f64 * self.weight(kind) * scale
            });
        classified + counts.other_cells() as f64 * self.other * scale
    }
}
