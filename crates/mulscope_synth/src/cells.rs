//! The cell-type vocabulary recognized in synthesis reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified cell type.
///
/// The eight gate kinds correspond to Yosys internal single-bit primitives
/// (`$_AND_`, `$_OR_`, ...); [`CellKind::Add`] is the `$add` arithmetic
/// macro cell. Everything else in a report is an "other" cell and is only
/// accounted for by count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellKind {
    /// 2-input AND.
    And,
    /// 2-input OR.
    Or,
    /// 2-input XOR.
    Xor,
    /// Inverter.
    Not,
    /// 2-input NAND.
    Nand,
    /// 2-input NOR.
    Nor,
    /// 2-input XNOR.
    Xnor,
    /// 2:1 multiplexer.
    Mux,
    /// Arithmetic adder macro cell.
    Add,
}

impl CellKind {
    /// Every classified kind, in persisted field order.
    pub const ALL: [CellKind; 9] = [
        CellKind::And,
        CellKind::Or,
        CellKind::Xor,
        CellKind::Not,
        CellKind::Nand,
        CellKind::Nor,
        CellKind::Xnor,
        CellKind::Mux,
        CellKind::Add,
    ];

    /// Returns the report token naming this cell type.
    pub fn token(self) -> &'static str {
        match self {
            CellKind::And => "$_AND_",
            CellKind::Or => "$_OR_",
            CellKind::Xor => "$_XOR_",
            CellKind::Not => "$_NOT_",
            CellKind::Nand => "$_NAND_",
            CellKind::Nor => "$_NOR_",
            CellKind::Xnor => "$_XNOR_",
            CellKind::Mux => "$_MUX_",
            CellKind::Add => "$add",
        }
    }

    /// Looks up the kind for an exact report token.
    pub fn from_token(token: &str) -> Option<CellKind> {
        CellKind::ALL.into_iter().find(|kind| kind.token() == token)
    }

    /// Short label used in the gate breakdown table.
    pub fn label(self) -> &'static str {
        match self {
            CellKind::And => "AND gates",
            CellKind::Or => "OR gates",
            CellKind::Xor => "XOR gates",
            CellKind::Not => "NOT gates",
            CellKind::Nand => "NAND gates",
            CellKind::Nor => "NOR gates",
            CellKind::Xnor => "XNOR gates",
            CellKind::Mux => "MUX gates",
            CellKind::Add => "ADD cells",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_roundtrip() {
        for kind in CellKind::ALL {
            assert_eq!(CellKind::from_token(kind.token()), Some(kind));
        }
    }

    #[test]
    fn lookalike_tokens_are_unknown() {
        assert_eq!(CellKind::from_token("$_ANDNOT_"), None);
        assert_eq!(CellKind::from_token("$_DFF_P_"), None);
        assert_eq!(CellKind::from_token("$_AND"), None);
        assert_eq!(CellKind::from_token("$sub"), None);
        assert_eq!(CellKind::from_token("AND"), None);
    }
}
