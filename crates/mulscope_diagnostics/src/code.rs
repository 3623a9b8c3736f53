//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Generic errors, prefixed with `E`.
    Error,
    /// Generic warnings, prefixed with `W`.
    Warning,
    /// External synthesis tool problems, prefixed with `S`.
    Synthesis,
    /// Model and data-quality findings, prefixed with `M`.
    Model,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Synthesis => 'S',
            Category::Model => 'M',
        }
    }
}

/// A diagnostic code: category prefix plus a zero-padded 3-digit number,
/// e.g. `S002`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// The synthesis tool could not be found on the system.
    pub const TOOL_NOT_FOUND: DiagnosticCode = DiagnosticCode::new(Category::Synthesis, 1);
    /// A synthesis run exceeded its timeout.
    pub const TOOL_TIMEOUT: DiagnosticCode = DiagnosticCode::new(Category::Synthesis, 2);
    /// A synthesis run exited with a non-zero status.
    pub const TOOL_EXIT_STATUS: DiagnosticCode = DiagnosticCode::new(Category::Synthesis, 3);
    /// A synthesis run could not be started or its output not captured.
    pub const TOOL_FAILED: DiagnosticCode = DiagnosticCode::new(Category::Synthesis, 4);
    /// A report contained no usable cell statistics.
    pub const EMPTY_REPORT: DiagnosticCode = DiagnosticCode::new(Category::Model, 1);
    /// No variant could be evaluated at all.
    pub const NO_RESULTS: DiagnosticCode = DiagnosticCode::new(Category::Model, 2);
    /// A variant has no dedicated timing model and gets the fixed delay.
    pub const UNMODELED_VARIANT: DiagnosticCode = DiagnosticCode::new(Category::Model, 3);
    /// The result document could not be written.
    pub const RESULTS_NOT_SAVED: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);
    /// A synthesis log could not be written; the run itself is unaffected.
    pub const LOG_NOT_WRITTEN: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Error.prefix(), 'E');
        assert_eq!(Category::Warning.prefix(), 'W');
        assert_eq!(Category::Synthesis.prefix(), 'S');
        assert_eq!(Category::Model.prefix(), 'M');
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", DiagnosticCode::TOOL_TIMEOUT), "S002");
        assert_eq!(format!("{}", DiagnosticCode::EMPTY_REPORT), "M001");
        assert_eq!(format!("{}", DiagnosticCode::RESULTS_NOT_SAVED), "E001");
        assert_eq!(format!("{}", DiagnosticCode::LOG_NOT_WRITTEN), "W001");
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Error, 42)),
            "E042"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::TOOL_NOT_FOUND;
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
