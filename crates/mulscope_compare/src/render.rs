//! Plain-text rendering of a comparison.

use crate::compare::{ComparisonReport, RecommendationKind};
use crate::store::ResultStore;
use mulscope_common::Variant;
use mulscope_estimate::Estimator;
use mulscope_synth::CellKind;
use std::fmt;

const RULE_WIDTH: usize = 70;

/// A printable comparison report.
///
/// Borrowing the store alongside the report keeps absolute values and
/// ratios in one place without copying records.
pub struct TextReport<'a> {
    store: &'a ResultStore,
    report: &'a ComparisonReport,
    estimator: &'a Estimator,
}

impl<'a> TextReport<'a> {
    /// Creates a report view. The estimator supplies the operating point
    /// and the timing models named in the report.
    pub fn new(
        store: &'a ResultStore,
        report: &'a ComparisonReport,
        estimator: &'a Estimator,
    ) -> Self {
        Self {
            store,
            report,
            estimator,
        }
    }

    fn heading(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }

    fn area(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f, "1. AREA ANALYSIS")?;
        writeln!(f, "{:<15} {:<12} {:<15} {:<12}", "Multiplier", "Cells", "Area (GE)", "Relative")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for record in self.store.iter() {
            let relative = self.report.row(record.variant()).and_then(|row| row.area);
            writeln!(
                f,
                "{:<15} {:<12} {:<15.1} {:<12}",
                record.variant().name(),
                record.counts().total_cells,
                record.area_ge(),
                times(relative)
            )?;
        }
        Ok(())
    }

    fn timing(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "2. TIMING ANALYSIS ({}-bit operands)",
            self.estimator.timing.width()
        );
        self.heading(f, &title)?;
        writeln!(
            f,
            "{:<15} {:<15} {:<15} {:<12}",
            "Multiplier", "Delay (ns)", "Max Freq (MHz)", "Speedup"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        let slowest = self
            .store
            .iter()
            .map(|r| r.delay_ns())
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);
        for record in self.store.iter() {
            let speedup = (record.delay_ns() != 0.0).then(|| slowest / record.delay_ns());
            writeln!(
                f,
                "{:<15} {:<15.2} {:<15.1} {:<12}",
                record.variant().name(),
                record.delay_ns(),
                record.max_frequency_mhz(),
                times(speedup)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Timing models:")?;
        for variant in self.store.variants() {
            let model = self.estimator.timing.model_for(variant);
            writeln!(f, "  {:<13} {}", format!("{variant}:"), model.describe())?;
        }
        Ok(())
    }

    fn power(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "3. POWER CONSUMPTION (@ {})",
            self.estimator.operating_point.frequency
        );
        self.heading(f, &title)?;
        writeln!(
            f,
            "{:<15} {:<15} {:<18} {:<12}",
            "Multiplier", "Power (mW)", "Energy/Op (pJ)", "Relative"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for record in self.store.iter() {
            let relative = self.report.row(record.variant()).and_then(|row| row.power);
            writeln!(
                f,
                "{:<15} {:<15.2} {:<18.1} {:<12}",
                record.variant().name(),
                record.power_mw(),
                self.estimator.operating_point.energy_per_op_pj(record.power_mw()),
                times(relative)
            )?;
        }
        Ok(())
    }

    fn gates(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f, "4. GATE TYPE BREAKDOWN")?;
        for record in self.store.iter() {
            writeln!(f)?;
            writeln!(f, "{} Multiplier:", record.variant())?;
            for kind in CellKind::ALL {
                let label = format!("{}:", kind.label());
                writeln!(f, "  {label:<12} {:>6}", record.counts().cells.get(kind))?;
            }
            writeln!(f, "  {}", "-".repeat(20))?;
            writeln!(f, "  {:<12} {:>6}", "Total:", record.counts().total_cells)?;
        }
        Ok(())
    }

    fn speedups(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f, "5. SPEEDUP ANALYSIS")?;
        for pairing in &self.report.pairings {
            let (reference, subject) = (&pairing.reference, &pairing.subject);
            if let Some(diff) = pairing.timing_difference_pct {
                writeln!(f, "{reference} vs {subject}: {diff:.1}% timing difference")?;
            } else {
                match pairing.speedup {
                    Some(speedup) => writeln!(
                        f,
                        "{subject} is {speedup:.2}x FASTER than {reference}"
                    )?,
                    None => writeln!(f, "{subject} vs {reference}: speedup unavailable")?,
                }
            }
            match pairing.size_saving_pct {
                Some(saving) if saving >= 0.0 => {
                    writeln!(f, "{subject} is {saving:.1}% SMALLER than {reference}")?
                }
                Some(saving) => {
                    writeln!(f, "{subject} is {:.1}% LARGER than {reference}", -saving)?
                }
                None => writeln!(f, "{subject} vs {reference}: size difference unavailable")?,
            }
        }
        if self.report.pairings.is_empty() {
            writeln!(f, "No comparable pairs.")?;
        }
        Ok(())
    }

    fn recommendation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f, "6. RECOMMENDATION")?;
        if let Some(winners) = &self.report.winners {
            writeln!(f)?;
            if let Some(r) = self.store.get(&winners.fastest) {
                writeln!(f, "Fastest:      {} ({:.2} ns)", r.variant(), r.delay_ns())?;
            }
            if let Some(r) = self.store.get(&winners.smallest) {
                writeln!(f, "Smallest:     {} ({:.1} GE)", r.variant(), r.area_ge())?;
            }
            if let Some(r) = self.store.get(&winners.least_power) {
                writeln!(f, "Least Power:  {} ({:.2} mW)", r.variant(), r.power_mw())?;
            }
        }

        let recommended = self.report.recommendation.as_ref();
        writeln!(f)?;
        writeln!(f, "Architecture notes:")?;
        for variant in self.store.variants() {
            let marker = if recommended.is_some_and(|r| &r.variant == variant) {
                "*"
            } else {
                "-"
            };
            writeln!(f, "{marker} {:<10} {}", format!("{variant}:"), guidance(variant))?;
        }

        if let Some(rec) = recommended {
            writeln!(f)?;
            let reason = match rec.kind {
                RecommendationKind::Balanced => {
                    "nearly as fast as the fastest design with noticeably less area"
                }
                RecommendationKind::Fastest => "no smaller design comes close in speed",
            };
            writeln!(f, "Recommended: {} ({reason})", rec.variant)?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "DETAILED COMPARISON REPORT")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        if self.store.is_empty() {
            return writeln!(f, "No results to display.");
        }
        self.area(f)?;
        writeln!(f)?;
        self.timing(f)?;
        writeln!(f)?;
        self.power(f)?;
        writeln!(f)?;
        self.gates(f)?;
        writeln!(f)?;
        self.speedups(f)?;
        writeln!(f)?;
        self.recommendation(f)
    }
}

/// Renders the full text report.
pub fn render_report(
    store: &ResultStore,
    report: &ComparisonReport,
    estimator: &Estimator,
) -> String {
    TextReport::new(store, report, estimator).to_string()
}

fn times(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{r:.2}x"),
        None => "n/a".to_string(),
    }
}

fn guidance(variant: &Variant) -> &'static str {
    match variant {
        Variant::Classical => "one adder stage per bit; compact but slow, suited to teaching",
        Variant::Wallace => "reduces partial products as early as possible; choose for raw speed",
        Variant::Dadda => "reduces only as needed; tree speed with fewer cells",
        Variant::Other(_) => "no dedicated timing model; delay is a fixed placeholder",
    }
}
