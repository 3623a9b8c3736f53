//! Multiplier architecture identifiers and their canonical ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A multiplier architecture being compared.
///
/// The three known variants carry fixed canonical positions
/// (Classical, Dadda, Wallace); any other name is representable as
/// [`Variant::Other`] and sorts after the known ones, alphabetically.
/// Names are matched case-sensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    /// Sequential shift-and-add multiplier, one stage per operand bit.
    Classical,
    /// Dadda partial-product reduction tree.
    Dadda,
    /// Wallace partial-product reduction tree.
    Wallace,
    /// An architecture without a dedicated model.
    Other(String),
}

impl Variant {
    /// The known variants in canonical order.
    pub const KNOWN: [Variant; 3] = [Variant::Classical, Variant::Dadda, Variant::Wallace];

    /// Maps a variant name to its identifier.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Classical" => Variant::Classical,
            "Dadda" => Variant::Dadda,
            "Wallace" => Variant::Wallace,
            other => Variant::Other(other.to_string()),
        }
    }

    /// Returns the display name, which is also the persisted key.
    pub fn name(&self) -> &str {
        match self {
            Variant::Classical => "Classical",
            Variant::Dadda => "Dadda",
            Variant::Wallace => "Wallace",
            Variant::Other(name) => name,
        }
    }

    /// Position in canonical order. Unknown variants share the last rank.
    pub fn canonical_rank(&self) -> usize {
        match self {
            Variant::Classical => 0,
            Variant::Dadda => 1,
            Variant::Wallace => 2,
            Variant::Other(_) => 3,
        }
    }

    /// Lower-case name used in log and script file names.
    pub fn file_stem(&self) -> String {
        self.name().to_ascii_lowercase()
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_rank()
            .cmp(&other.canonical_rank())
            .then_with(|| self.name().cmp(other.name()))
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Variant {
    fn from(name: &str) -> Self {
        Variant::from_name(name)
    }
}

impl From<String> for Variant {
    fn from(name: String) -> Self {
        Variant::from_name(&name)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.name().to_string()
    }
}
