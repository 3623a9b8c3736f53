//! Aggregation layer of mulscope.
//!
//! Collects the finalized records of a run in a [`ResultStore`], ranks them
//! with [`compare`] and renders the outcome as a text report.
//!
//! # Architecture
//!
//! - [`store`]: canonical-order record collection and its JSON form
//! - [`compare`]: relative ratios, pairings, winners and recommendation
//! - [`render`]: the six-section text report

#![warn(missing_docs)]

pub mod compare;
pub mod render;
pub mod store;

pub use compare::{
    compare, ComparisonReport, Pairing, Recommendation, RecommendationKind, RelativeRow, Winners,
};
pub use render::{render_report, TextReport};
pub use store::{PersistError, ResultStore};

use mulscope_common::Variant;
use mulscope_estimate::{EstimatedRecord, Estimator};
use mulscope_synth::parse_report;
use rayon::prelude::*;

/// Parses and estimates a batch of report texts into a fresh store.
///
/// Reports are processed on the rayon pool; the records are merged into the
/// store on the calling thread afterwards. A later report for the same
/// variant replaces an earlier one.
pub fn store_from_reports<'a>(
    estimator: &Estimator,
    reports: impl IntoIterator<Item = (Variant, &'a str)>,
) -> ResultStore {
    let reports: Vec<_> = reports.into_iter().collect();
    let records: Vec<EstimatedRecord> = reports
        .into_par_iter()
        .map(|(variant, text)| estimator.estimate(&parse_report(variant, text)))
        .collect();
    records.into_iter().collect()
}
