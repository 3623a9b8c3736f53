//! Shared helpers for CLI commands.
//!
//! Contains project and configuration resolution, construction of the
//! estimator from the configured operating point, and diagnostic rendering.

use std::path::{Path, PathBuf};

use mulscope_common::Variant;
use mulscope_config::{MulscopeConfig, CONFIG_FILE};
use mulscope_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, JsonRenderer, Severity, TerminalRenderer,
};
use mulscope_estimate::{Estimator, OperatingPoint};

use crate::{GlobalArgs, ReportFormat};

/// A resolved project: its root directory and validated configuration.
///
/// Relative paths in the configuration are interpreted against `root`.
#[derive(Debug)]
pub struct Project {
    /// Directory containing `mulscope.toml`, or the working directory.
    pub root: PathBuf,
    /// The loaded (or default) configuration.
    pub config: MulscopeConfig,
}

impl Project {
    /// Directory receiving logs and results.
    pub fn results_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.results_dir)
    }

    /// Path of `analysis_results.json`.
    pub fn results_file(&self) -> PathBuf {
        self.root.join(self.config.results_file())
    }

    /// Path of one variant's synthesis log.
    pub fn log_file(&self, variant: &Variant) -> PathBuf {
        self.root.join(self.config.log_file(variant))
    }

    /// The power-model operating point from `[model]`.
    pub fn operating_point(&self) -> OperatingPoint {
        let model = &self.config.model;
        OperatingPoint {
            activity_factor: model.activity_factor,
            supply_voltage: model.supply_voltage,
            frequency: model.frequency,
        }
    }

    /// An estimator with the standard models at the configured operating point.
    pub fn estimator(&self) -> Estimator {
        Estimator::new(self.operating_point())
    }
}

/// Walks up from `start` looking for the nearest directory containing `mulscope.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolves the project from global CLI args.
///
/// If `--config` names a file, that file is loaded and its directory is the
/// root. A directory is used as the root directly, with the built-in
/// defaults when it has no `mulscope.toml`. Otherwise the current directory
/// and its parents are searched for `mulscope.toml`, falling back to the
/// built-in defaults rooted at the current directory.
pub fn resolve_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            let root = p
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            let config = mulscope_config::load_config_file(&p)?;
            return Ok(Project { root, config });
        }
        if p.is_dir() {
            let config = mulscope_config::load_or_default(&p)?;
            return Ok(Project { root: p, config });
        }
        return Err(format!("config path '{}' does not exist", p.display()).into());
    }

    let cwd = std::env::current_dir()?;
    match find_project_root(&cwd) {
        Some(root) => {
            let config = mulscope_config::load_config(&root)?;
            Ok(Project { root, config })
        }
        None => Ok(Project {
            root: cwd,
            config: MulscopeConfig::default(),
        }),
    }
}

/// Renders all diagnostics from a sink to stderr.
///
/// Text output uses the terminal renderer; JSON output writes one object per
/// line.
pub fn render_diagnostics(sink: &DiagnosticSink, global: &GlobalArgs, format: ReportFormat) {
    let renderer: Box<dyn DiagnosticRenderer> = match format {
        ReportFormat::Text => Box::new(TerminalRenderer::new(global.color)),
        ReportFormat::Json => Box::new(JsonRenderer),
    };
    for diag in visible_diagnostics(sink, global.quiet) {
        eprintln!("{}", renderer.render(&diag));
    }
}

/// Drains the sink, dropping notes in quiet mode.
fn visible_diagnostics(sink: &DiagnosticSink, quiet: bool) -> Vec<Diagnostic> {
    sink.take_all()
        .into_iter()
        .filter(|diag| !(quiet && diag.severity == Severity::Note))
        .collect()
}
