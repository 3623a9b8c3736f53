//! The per-run collection of finalized variant records.

use mulscope_common::Variant;
use mulscope_estimate::EstimatedRecord;
use mulscope_synth::MetricsRecord;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Errors from encoding or decoding a persisted result document.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The store could not be serialized.
    #[error("failed to encode results: {0}")]
    Encode(#[source] serde_json::Error),

    /// The document is not a valid result table.
    #[error("failed to decode results: {0}")]
    Decode(#[source] serde_json::Error),

    /// A record's `name` disagrees with the key it is stored under.
    #[error("record named '{name}' is stored under key '{key}'")]
    KeyMismatch {
        /// The outer object key.
        key: String,
        /// The record's own name.
        name: String,
    },
}

/// Finalized records keyed by variant.
///
/// Iteration always follows canonical variant order, independent of the
/// order in which records were inserted. Any subset of variants may be
/// present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultStore {
    records: BTreeMap<Variant, EstimatedRecord>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing and returning any previous one for the same variant.
    pub fn insert(&mut self, record: EstimatedRecord) -> Option<EstimatedRecord> {
        self.records.insert(record.variant().clone(), record)
    }

    /// Looks up the record of one variant.
    pub fn get(&self, variant: &Variant) -> Option<&EstimatedRecord> {
        self.records.get(variant)
    }

    /// Returns `true` if the variant has a record.
    pub fn contains(&self, variant: &Variant) -> bool {
        self.records.contains_key(variant)
    }

    /// Iterates over the records in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &EstimatedRecord> {
        self.records.values()
    }

    /// Iterates over the present variants in canonical order.
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.records.keys()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exports the flat records keyed by variant name, in canonical order.
    pub fn export(&self) -> Vec<(&str, &MetricsRecord)> {
        self.records
            .iter()
            .map(|(variant, record)| (variant.name(), record.metrics()))
            .collect()
    }

    /// Serializes the store as a pretty-printed JSON object.
    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string_pretty(self).map_err(PersistError::Encode)
    }

    /// Loads a store from a JSON document produced by [`ResultStore::to_json`].
    ///
    /// Derived metrics are taken as stored. Unknown keys inside a record
    /// are ignored.
    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        let table: BTreeMap<String, MetricsRecord> =
            serde_json::from_str(text).map_err(PersistError::Decode)?;
        let mut store = Self::new();
        for (key, metrics) in table {
            if metrics.name.name() != key {
                return Err(PersistError::KeyMismatch {
                    key,
                    name: metrics.name.name().to_string(),
                });
            }
            store.insert(EstimatedRecord::from_persisted(metrics));
        }
        Ok(store)
    }
}

impl Serialize for ResultStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.export())
    }
}

impl FromIterator<EstimatedRecord> for ResultStore {
    fn from_iter<I: IntoIterator<Item = EstimatedRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<EstimatedRecord> for ResultStore {
    fn extend<I: IntoIterator<Item = EstimatedRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
