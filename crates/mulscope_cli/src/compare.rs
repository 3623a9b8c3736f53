//! `mulscope compare`: re-rank a saved result document.

use std::path::Path;

use mulscope_compare::{compare, render_report, ResultStore};
use mulscope_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};

use crate::pipeline::{render_diagnostics, resolve_project};
use crate::{CompareArgs, GlobalArgs, ReportFormat};

/// Runs the `mulscope compare` command.
///
/// Returns exit code 1 when the document holds no records.
pub fn run(args: &CompareArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;
    let store = load_results(Path::new(&args.results))?;
    let report = compare(&store);
    let sink = DiagnosticSink::new();

    match args.format {
        ReportFormat::Text => {
            print!("{}", render_report(&store, &report, &project.estimator()))
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if store.is_empty() {
        sink.emit(
            Diagnostic::error(DiagnosticCode::NO_RESULTS, "result document is empty")
                .with_subject(args.results.as_str()),
        );
    }
    render_diagnostics(&sink, global, args.format);
    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Reads and decodes a saved `analysis_results.json`.
pub fn load_results(path: &Path) -> Result<ResultStore, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(ResultStore::from_json(&text)?)
}
