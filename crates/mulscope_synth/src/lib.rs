//! Synthesis report extraction for the mulscope multiplier comparison.
//!
//! This crate turns the text statistics printed by the external synthesis
//! tool into structured counts for one multiplier variant:
//!
//! - [`cells`]: the recognized cell-type vocabulary
//! - [`record`]: structural counts, derived metrics and the flat persisted record
//! - [`parse`]: the report parser
//!
//! # Usage
//!
//! ```ignore
//! use mulscope_synth::parse_report;
//! let parsed = parse_report(Variant::Dadda, &yosys_stdout);
//! println!("{} cells", parsed.counts().total_cells);
//! ```

#![warn(missing_docs)]

pub mod cells;
pub mod parse;
pub mod record;

pub use cells::CellKind;
pub use parse::{last_hierarchy_section, parse_report, HIERARCHY_HEADER};
pub use record::{CellCounts, DerivedMetrics, MetricsRecord, ParsedRecord, StructuralCounts};
