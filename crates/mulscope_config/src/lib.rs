//! Parsing and validation of `mulscope.toml` run configuration files.
//!
//! This crate reads the run configuration and produces a strongly-typed
//! [`MulscopeConfig`]: project metadata, the synthesis tool invocation, the
//! variant-to-script table and the power-model operating point. Without a
//! configuration file, [`MulscopeConfig::default`] reproduces the standard
//! three-variant layout.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, load_or_default, CONFIG_FILE};
pub use types::*;
