//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[S002]: synthesis timed out after 180 s
///   --> Wallace
///    = note: the variant is left out of the comparison
///    = help: raise `tool.timeout_secs` in mulscope.toml
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let label = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return label;
        }
        let ansi = match diag.severity {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Note => "\x1b[1;36m",
        };
        format!("{ansi}{label}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// Renders each diagnostic as a single-line JSON object.
pub struct JsonRenderer;

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        // Diagnostic only holds strings and plain enums, so encoding cannot fail.
        serde_json::to_string(diag).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn render_warning_with_subject_and_hints() {
        let diag = Diagnostic::warning(DiagnosticCode::TOOL_TIMEOUT, "synthesis timed out")
            .with_subject("Wallace")
            .with_note("the variant is left out of the comparison")
            .with_help("raise `tool.timeout_secs`");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.starts_with("warning[S002]: synthesis timed out\n"));
        assert!(output.contains("  --> Wallace\n"));
        assert!(output.contains("= note: the variant is left out of the comparison"));
        assert!(output.contains("= help: raise `tool.timeout_secs`"));
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::error(DiagnosticCode::NO_RESULTS, "no variant evaluated");
        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(output, "error[M002]: no variant evaluated\n");
    }

    #[test]
    fn color_wraps_header() {
        let diag = Diagnostic::error(DiagnosticCode::NO_RESULTS, "x");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[M002]\x1b[0m: x"));
    }

    #[test]
    fn json_is_single_line() {
        let diag = Diagnostic::warning(DiagnosticCode::EMPTY_REPORT, "no cells found")
            .with_subject("Dadda");
        let output = JsonRenderer.render(&diag);
        assert!(!output.contains('\n'));
        assert!(output.contains("\"severity\":\"warning\""));
        assert!(output.contains("\"subject\":\"Dadda\""));
    }
}
