//! Structured diagnostics for the analysis pipeline.
//!
//! Problems at the synthesis-tool boundary (missing tool, timeouts, failed
//! runs) and data-quality findings (empty reports) are reported as
//! [`Diagnostic`]s instead of aborting the comparison. The thread-safe
//! [`DiagnosticSink`] accumulates them while variants are evaluated, and a
//! [`DiagnosticRenderer`] formats them for the terminal or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
