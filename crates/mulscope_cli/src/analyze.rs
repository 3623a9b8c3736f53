//! `mulscope analyze`: synthesize, estimate, compare and save.
//!
//! The full run:
//!
//! 1. Resolve the project and its `mulscope.toml`
//! 2. Check that the synthesis tool is installed (placeholders otherwise)
//! 3. Synthesize every configured variant in parallel, writing one log each
//! 4. Parse and estimate each report
//! 5. Compare, print the report and save `analysis_results.json`
//! 6. Render diagnostics

use std::io;
use std::path::Path;

use mulscope_common::Variant;
use mulscope_compare::{compare, render_report, store_from_reports, ResultStore};
use mulscope_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use mulscope_estimate::{theoretical_estimates, EstimatedRecord, Estimator};
use tokio::runtime::Runtime;

use crate::pipeline::{render_diagnostics, resolve_project, Project};
use crate::tool::{self, ToolError, ToolOutput};
use crate::{AnalyzeArgs, GlobalArgs, ReportFormat};

/// Runs the `mulscope analyze` command.
///
/// Returns exit code 0 when at least one variant was evaluated and the
/// results were saved, 1 otherwise.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;
    let estimator = project.estimator();
    let sink = DiagnosticSink::new();

    if !global.quiet {
        eprintln!("   Analyzing {}", project.config.project.name);
    }

    let store = if args.theoretical {
        if !global.quiet {
            eprintln!("   Using theoretical estimates");
        }
        theoretical_estimates().into_iter().collect()
    } else {
        let program = &project.config.tool.program;
        let runtime = tool::runtime()?;
        match runtime.block_on(tool::check_tool(program)) {
            Ok(version) => {
                if !global.quiet {
                    eprintln!("      Found {version}");
                }
                std::fs::create_dir_all(project.results_dir())?;
                synthesize_all(&runtime, &project, &estimator, &sink, global)
            }
            Err(e) => {
                sink.emit(
                    Diagnostic::warning(
                        DiagnosticCode::TOOL_NOT_FOUND,
                        format!("synthesis tool unavailable: {e}"),
                    )
                    .with_subject(program.as_str())
                    .with_note("using theoretical estimates for all variants")
                    .with_help("install yosys (macOS: `brew install yosys`, Linux: `sudo apt-get install yosys`)"),
                );
                theoretical_estimates().into_iter().collect()
            }
        }
    };

    if store.is_empty() {
        sink.emit(Diagnostic::error(
            DiagnosticCode::NO_RESULTS,
            "no variant could be evaluated",
        ));
        render_diagnostics(&sink, global, ReportFormat::Text);
        return Ok(1);
    }

    let report = compare(&store);
    print!("{}", render_report(&store, &report, &estimator));

    if !args.no_save {
        let path = project.results_file();
        if save_or_report(&store, &path, &sink) && !global.quiet {
            eprintln!("      Saved {}", path.display());
        }
    }

    render_diagnostics(&sink, global, ReportFormat::Text);
    if !global.quiet {
        eprintln!(
            "   Result: {} variant(s), {} warning(s), {} error(s)",
            store.len(),
            sink.warning_count(),
            sink.error_count()
        );
    }
    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Synthesizes every configured variant and estimates the reports.
///
/// Tool runs proceed concurrently on `runtime`; `store_from_reports` then
/// parses and estimates on the rayon pool. Failed variants are reported to
/// `sink` and left out of the returned store.
pub fn synthesize_all(
    runtime: &Runtime,
    project: &Project,
    estimator: &Estimator,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
) -> ResultStore {
    let outcomes = runtime.block_on(run_all(project, global));
    let reports: Vec<(Variant, String)> = outcomes
        .into_iter()
        .filter_map(|(variant, outcome)| accept_output(project, variant, outcome, sink))
        .collect();

    let store = store_from_reports(
        estimator,
        reports
            .iter()
            .map(|(variant, stdout)| (variant.clone(), stdout.as_str())),
    );
    for record in store.iter() {
        check_record(record, estimator, sink, global);
    }
    store
}

/// Starts one tool run per configured variant and waits for all of them.
///
/// Outcomes come back in canonical variant order.
async fn run_all(
    project: &Project,
    global: &GlobalArgs,
) -> Vec<(Variant, Result<ToolOutput, ToolError>)> {
    let tool_config = &project.config.tool;
    let mut handles = Vec::new();
    for (variant, script) in project.config.variant_scripts() {
        if !global.quiet {
            eprintln!("   Synthesizing {variant} ({})", script.display());
        }
        let program = tool_config.program.clone();
        let script = script.to_path_buf();
        let workdir = project.root.clone();
        let limit = tool_config.timeout();
        let handle = tokio::spawn(async move {
            tool::run_synthesis(&program, &script, limit, &workdir).await
        });
        handles.push((variant, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (variant, handle) in handles {
        let outcome = handle.await.unwrap_or_else(|e| {
            Err(ToolError::Io {
                program: tool_config.program.clone(),
                source: io::Error::other(e),
            })
        });
        outcomes.push((variant, outcome));
    }
    outcomes
}

/// Writes the log of one run and reports its problems.
///
/// Returns the stdout to parse, or `None` when the variant must be omitted.
fn accept_output(
    project: &Project,
    variant: Variant,
    outcome: Result<ToolOutput, ToolError>,
    sink: &DiagnosticSink,
) -> Option<(Variant, String)> {
    let output = match outcome {
        Ok(output) => output,
        Err(e) => {
            let code = match e {
                ToolError::Timeout { .. } => DiagnosticCode::TOOL_TIMEOUT,
                ToolError::NotFound { .. } | ToolError::Io { .. } => DiagnosticCode::TOOL_FAILED,
            };
            sink.emit(
                Diagnostic::warning(code, format!("synthesis failed: {e}"))
                    .with_subject(variant.name())
                    .with_note("variant omitted from the comparison"),
            );
            return None;
        }
    };

    let log = project.log_file(&variant);
    if let Err(e) = tool::write_log(&log, &output) {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::LOG_NOT_WRITTEN,
                format!("could not write {}: {e}", log.display()),
            )
            .with_subject(variant.name()),
        );
    }

    if !output.status.success() {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::TOOL_EXIT_STATUS,
                format!("synthesis completed with {}", output.status),
            )
            .with_subject(variant.name())
            .with_note(format!("check {} for details", log.display())),
        );
    }

    Some((variant, output.stdout))
}

fn check_record(
    record: &EstimatedRecord,
    estimator: &Estimator,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
) {
    let variant = record.variant();
    if record.is_degenerate() {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::EMPTY_REPORT,
                "report contains no design statistics",
            )
            .with_subject(variant.name())
            .with_help("make sure the synthesis script ends with `stat`"),
        );
    }
    if !estimator.timing.is_modeled(variant) {
        sink.emit(unmodeled_note(record));
    }

    if global.verbose {
        eprintln!("      {variant}: {} cells", record.counts().total_cells);
        eprintln!("      {variant}: {:.1} GE", record.area_ge());
        eprintln!("      {variant}: {:.2} ns critical path", record.delay_ns());
        eprintln!("      {variant}: {:.1} MHz", record.max_frequency_mhz());
    }
}

/// The note attached to a variant that has no dedicated timing model.
pub fn unmodeled_note(record: &EstimatedRecord) -> Diagnostic {
    Diagnostic::note(
        DiagnosticCode::UNMODELED_VARIANT,
        format!(
            "no timing model for this architecture; using a fixed {:.2} ns delay",
            record.delay_ns()
        ),
    )
    .with_subject(record.variant().name())
}

/// Saves the store, reporting a failure to `sink` instead of returning it.
///
/// Returns `true` when the document was written.
fn save_or_report(store: &ResultStore, path: &Path, sink: &DiagnosticSink) -> bool {
    match save_results(store, path) {
        Ok(()) => true,
        Err(e) => {
            sink.emit(
                Diagnostic::error(
                    DiagnosticCode::RESULTS_NOT_SAVED,
                    format!("could not save results: {e}"),
                )
                .with_subject(path.display().to_string()),
            );
            false
        }
    }
}

/// Writes the store to `path` as pretty-printed JSON.
pub fn save_results(store: &ResultStore, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, store.to_json()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulscope_config::CONFIG_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(toml: &str) -> (TempDir, GlobalArgs) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, toml).unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(path.display().to_string()),
        };
        (tmp, global)
    }

    fn saved(tmp: &TempDir) -> ResultStore {
        let text = fs::read_to_string(tmp.path().join("results").join("analysis_results.json"))
            .unwrap();
        ResultStore::from_json(&text).unwrap()
    }

    #[test]
    fn theoretical_run_saves_placeholders() {
        let (tmp, global) = project_with("[project]\nname = \"t\"\n");
        let args = AnalyzeArgs {
            theoretical: true,
            no_save: false,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
        let store = saved(&tmp);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&Variant::Classical).unwrap().area_ge(), 5000.0);
    }

    #[test]
    fn missing_tool_falls_back_to_placeholders() {
        let (tmp, global) = project_with(
            "[project]\nname = \"t\"\n\n[tool]\nprogram = \"mulscope-test-no-such-tool\"\n",
        );
        let args = AnalyzeArgs {
            theoretical: false,
            no_save: false,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
        let store = saved(&tmp);
        assert_eq!(store.get(&Variant::Dadda).unwrap().counts().total_cells, 1800);
    }

    #[test]
    fn no_save_writes_nothing() {
        let (tmp, global) = project_with("[project]\nname = \"t\"\n");
        let args = AnalyzeArgs {
            theoretical: true,
            no_save: true,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
        assert!(!tmp.path().join("results").exists());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let (_tmp, global) = project_with("[project]\nname = \"\"\n");
        let args = AnalyzeArgs {
            theoretical: true,
            no_save: true,
        };
        assert!(run(&args, &global).is_err());
    }

    #[test]
    fn unwritable_results_are_an_error_after_warnings() {
        let (tmp, global) = project_with("[project]\nname = \"t\"\n");
        // A file where the results directory should be.
        fs::write(tmp.path().join("results"), "").unwrap();
        let args = AnalyzeArgs {
            theoretical: true,
            no_save: false,
        };
        assert_eq!(run(&args, &global).unwrap(), 1);
    }

    #[test]
    fn failed_save_keeps_earlier_diagnostics() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("results"), "").unwrap();
        let store: ResultStore = theoretical_estimates().into_iter().collect();
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(DiagnosticCode::TOOL_TIMEOUT, "timed out").with_subject("Wallace"));

        let path = tmp.path().join("results").join("analysis_results.json");
        assert!(!save_or_report(&store, &path, &sink));
        assert!(sink.has_errors());
        let codes: Vec<_> = sink.take_all().into_iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            [DiagnosticCode::TOOL_TIMEOUT, DiagnosticCode::RESULTS_NOT_SAVED]
        );
    }

    #[test]
    fn unmodeled_variant_gets_a_note() {
        let booth = mulscope_estimate::estimate(&mulscope_synth::parse_report(
            Variant::from_name("Booth"),
            "=== design hierarchy ===\n   10 cells\n",
        ));
        let sink = DiagnosticSink::new();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        check_record(&booth, &Estimator::default(), &sink, &global);
        let diagnostics = sink.take_all();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UNMODELED_VARIANT);
        assert_eq!(diagnostics[0].severity, mulscope_diagnostics::Severity::Note);
        assert!(diagnostics[0].message.contains("5.00 ns"));
        assert_eq!(sink.warning_count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn empty_reports_are_kept_and_flagged() {
        // `sh -s <script>` exits cleanly without printing any statistics.
        let (tmp, global) = project_with(
            "[project]\nname = \"t\"\n\n[tool]\nprogram = \"sh\"\n\n\
             [variants.Wallace]\nscript = \"w.ys\"\n\n[variants.Dadda]\nscript = \"d.ys\"\n",
        );
        let project = resolve_project(&global).unwrap();
        let sink = DiagnosticSink::new();
        let runtime = tool::runtime().unwrap();
        let store = synthesize_all(&runtime, &project, &project.estimator(), &sink, &global);

        let variants: Vec<_> = store.variants().cloned().collect();
        assert_eq!(variants, [Variant::Dadda, Variant::Wallace]);
        assert!(store.iter().all(|r| r.is_degenerate()));
        assert_eq!(store.get(&Variant::Dadda).unwrap().delay_ns(), 4.25);

        let diagnostics = sink.take_all();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::EMPTY_REPORT));
        assert!(tmp.path().join("results").join("dadda_synthesis.log").is_file());
    }
}
