//! `mulscope parse`: estimate metrics from one existing synthesis log.

use std::path::Path;

use mulscope_common::Variant;
use mulscope_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use mulscope_estimate::{EstimatedRecord, Estimator};
use mulscope_synth::{parse_report, CellKind};

use crate::analyze::unmodeled_note;
use crate::pipeline::{render_diagnostics, resolve_project};
use crate::tool::STDERR_SEPARATOR;
use crate::{GlobalArgs, ParseArgs, ReportFormat};

/// Runs the `mulscope parse` command.
///
/// Prints the estimated record of the log. An empty report still prints
/// (all counts zero) and returns 0 with a warning.
pub fn run(args: &ParseArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;
    let variant = Variant::from_name(&args.variant);
    let sink = DiagnosticSink::new();

    let estimator = project.estimator();
    let record = estimate_log(Path::new(&args.log), variant, &estimator)?;
    if !estimator.timing.is_modeled(record.variant()) {
        sink.emit(unmodeled_note(&record));
    }
    if record.is_degenerate() {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::EMPTY_REPORT,
                "report contains no design statistics",
            )
            .with_subject(args.log.as_str()),
        );
    }

    match args.format {
        ReportFormat::Text => print!("{}", describe(&record)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(record.metrics())?),
    }

    render_diagnostics(&sink, global, args.format);
    Ok(0)
}

/// Reads a synthesis log and estimates the record it describes.
///
/// Only the tool's stdout part of a log written by `mulscope analyze` is parsed.
pub fn estimate_log(
    path: &Path,
    variant: Variant,
    estimator: &Estimator,
) -> Result<EstimatedRecord, std::io::Error> {
    let text = std::fs::read_to_string(path)?;
    let stdout = text.split(STDERR_SEPARATOR).next().unwrap_or_default();
    Ok(estimator.estimate(&parse_report(variant, stdout)))
}

/// A short human-readable summary of one record.
fn describe(record: &EstimatedRecord) -> String {
    let counts = record.counts();
    let mut lines = vec![
        format!("{} Multiplier", record.variant()),
        format!("  Total cells:   {:>8}", counts.total_cells),
        format!("  Wires:         {:>8}", counts.wires),
        format!("  Public wires:  {:>8}", counts.public_wires),
    ];
    for kind in CellKind::ALL {
        lines.push(format!(
            "  {:<14} {:>8}",
            format!("{}:", kind.label()),
            counts.cells.get(kind)
        ));
    }
    lines.push(format!("  Other cells:   {:>8}", counts.other_cells()));
    lines.push(format!("  Estimated area: {:.1} GE", record.area_ge()));
    lines.push(format!("  Critical path:  {:.2} ns", record.delay_ns()));
    lines.push(format!("  Max frequency:  {:.1} MHz", record.max_frequency_mhz()));
    lines.push(format!("  Power:          {:.2} mW", record.power_mw()));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
