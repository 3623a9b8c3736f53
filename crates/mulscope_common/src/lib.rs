//! Shared foundational types used across the mulscope workspace.
//!
//! This crate provides the multiplier [`Variant`] identifier with its canonical
//! ordering and frequency values with unit parsing.

#![warn(missing_docs)]

pub mod frequency;
pub mod variant;

pub use frequency::{Frequency, ParseFrequencyError};
pub use variant::Variant;
