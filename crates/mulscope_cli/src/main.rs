//! mulscope CLI: synthesis-driven comparison of multiplier architectures.
//!
//! Provides `mulscope analyze` for a full synthesis and comparison run,
//! `mulscope parse` for estimating a single existing synthesis log, and
//! `mulscope compare` for re-ranking a saved result document.

#![warn(missing_docs)]

mod analyze;
mod compare;
mod parse;
mod pipeline;
mod tool;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// mulscope: area, timing and power comparison of hardware multipliers.
#[derive(Parser, Debug)]
#[command(name = "mulscope", version, about = "Multiplier synthesis analysis")]
pub struct Cli {
    /// Suppress all output except errors and the report itself.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print per-variant details while running.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `mulscope.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize every configured variant, compare them and save the results.
    Analyze(AnalyzeArgs),
    /// Parse and estimate one existing synthesis log.
    Parse(ParseArgs),
    /// Re-rank a saved result document.
    Compare(CompareArgs),
}

/// Arguments for the `mulscope analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Skip the synthesis tool and use the built-in placeholder figures.
    #[arg(long)]
    pub theoretical: bool,

    /// Do not write `analysis_results.json`.
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the `mulscope parse` subcommand.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to the synthesis log.
    pub log: String,

    /// Variant the log belongs to (e.g. `Dadda`).
    #[arg(long)]
    pub variant: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `mulscope compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Path to a saved `analysis_results.json`.
    pub results: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress status output.
    pub quiet: bool,
    /// Whether to print per-variant details.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or project directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Analyze(ref args) => analyze::run(args, &global),
        Command::Parse(ref args) => parse::run(args, &global),
        Command::Compare(ref args) => compare::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_analyze_default() {
        let cli = Cli::parse_from(["mulscope", "analyze"]);
        match cli.command {
            Command::Analyze(args) => {
                assert!(!args.theoretical);
                assert!(!args.no_save);
            }
            _ => panic!("expected Analyze command"),
        }
        assert!(!cli.quiet);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_analyze_flags() {
        let cli = Cli::parse_from(["mulscope", "analyze", "--theoretical", "--no-save"]);
        match cli.command {
            Command::Analyze(args) => {
                assert!(args.theoretical);
                assert!(args.no_save);
            }
            _ => panic!("expected Analyze command"),
        }
    }

    #[test]
    fn parse_parse_command() {
        let cli = Cli::parse_from([
            "mulscope",
            "parse",
            "results/dadda_synthesis.log",
            "--variant",
            "Dadda",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.log, "results/dadda_synthesis.log");
                assert_eq!(args.variant, "Dadda");
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Parse command"),
        }
    }

    #[test]
    fn parse_requires_variant() {
        assert!(Cli::try_parse_from(["mulscope", "parse", "x.log"]).is_err());
    }

    #[test]
    fn parse_compare_command() {
        let cli = Cli::parse_from(["mulscope", "compare", "results/analysis_results.json"]);
        match cli.command {
            Command::Compare(args) => {
                assert_eq!(args.results, "results/analysis_results.json");
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Compare command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "mulscope",
            "--quiet",
            "--color",
            "never",
            "--config",
            "alt/mulscope.toml",
            "analyze",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("alt/mulscope.toml"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mulscope", "compare", "r.json", "-v"]);
        assert!(cli.verbose);
    }
}
