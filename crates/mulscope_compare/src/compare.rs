//! Ranking of the stored variants against each other.

use crate::store::ResultStore;
use mulscope_common::Variant;
use mulscope_estimate::EstimatedRecord;
use serde::Serialize;

/// Delay slack, relative to the fastest variant, allowed for a balanced pick.
pub const BALANCED_DELAY_TOLERANCE: f64 = 1.10;

/// Area a balanced pick must stay under, relative to the fastest variant.
pub const BALANCED_AREA_LIMIT: f64 = 0.95;

/// Metrics of one variant relative to the best present value.
///
/// `None` means the ratio is unavailable because the minimum is zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelativeRow {
    /// The variant.
    pub variant: Variant,
    /// Area divided by the smallest area.
    pub area: Option<f64>,
    /// Delay divided by the shortest delay.
    pub delay: Option<f64>,
    /// Power divided by the lowest power.
    pub power: Option<f64>,
}

/// A head-to-head comparison of two variants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pairing {
    /// The baseline variant.
    pub reference: Variant,
    /// The variant measured against the baseline.
    pub subject: Variant,
    /// `delay(reference) / delay(subject)`.
    pub speedup: Option<f64>,
    /// `(area(reference) - area(subject)) / area(reference) * 100`.
    pub size_saving_pct: Option<f64>,
    /// `|delay difference| / min(delay) * 100`; only reported for the tree pairing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_difference_pct: Option<f64>,
}

struct PairingRule {
    reference: Variant,
    subject: Variant,
    timing_difference: bool,
}

const PAIRINGS: [PairingRule; 3] = [
    PairingRule {
        reference: Variant::Classical,
        subject: Variant::Wallace,
        timing_difference: false,
    },
    PairingRule {
        reference: Variant::Classical,
        subject: Variant::Dadda,
        timing_difference: false,
    },
    PairingRule {
        reference: Variant::Wallace,
        subject: Variant::Dadda,
        timing_difference: true,
    },
];

/// The best variant per metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Winners {
    /// Shortest critical-path delay.
    pub fastest: Variant,
    /// Smallest area.
    pub smallest: Variant,
    /// Lowest power.
    pub least_power: Variant,
}

/// Why a variant was recommended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Nearly as fast as the fastest variant while noticeably smaller.
    Balanced,
    /// No smaller variant was close enough in speed; the fastest is recommended.
    Fastest,
}

/// The recommended variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    /// The recommended variant.
    pub variant: Variant,
    /// The rule that selected it.
    pub kind: RecommendationKind,
}

/// The outcome of comparing every stored variant.
///
/// All fields are empty when the store is.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// One row per present variant, in canonical order.
    pub rows: Vec<RelativeRow>,
    /// Pairings whose variants are both present.
    pub pairings: Vec<Pairing>,
    /// Per-metric winners.
    pub winners: Option<Winners>,
    /// The recommended variant.
    pub recommendation: Option<Recommendation>,
}

impl ComparisonReport {
    /// Returns `true` when there was nothing to compare.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The relative row of one variant.
    pub fn row(&self, variant: &Variant) -> Option<&RelativeRow> {
        self.rows.iter().find(|row| &row.variant == variant)
    }

    /// The pairing of `reference` against `subject`, if computed.
    pub fn pairing(&self, reference: &Variant, subject: &Variant) -> Option<&Pairing> {
        self.pairings
            .iter()
            .find(|p| &p.reference == reference && &p.subject == subject)
    }
}

/// Compares all variants in the store.
///
/// Never fails; an empty or partial store yields a correspondingly smaller report.
pub fn compare(store: &ResultStore) -> ComparisonReport {
    let Some(winners) = winners(store) else {
        return ComparisonReport::default();
    };

    let min_area = minimum(store, EstimatedRecord::area_ge);
    let min_delay = minimum(store, EstimatedRecord::delay_ns);
    let min_power = minimum(store, EstimatedRecord::power_mw);
    let rows = store
        .iter()
        .map(|record| RelativeRow {
            variant: record.variant().clone(),
            area: ratio(record.area_ge(), min_area),
            delay: ratio(record.delay_ns(), min_delay),
            power: ratio(record.power_mw(), min_power),
        })
        .collect();

    let pairings = PAIRINGS
        .iter()
        .filter_map(|rule| {
            let reference = store.get(&rule.reference)?;
            let subject = store.get(&rule.subject)?;
            Some(pair(rule, reference, subject))
        })
        .collect();

    let recommendation = recommend(store, &winners.fastest);

    ComparisonReport {
        rows,
        pairings,
        winners: Some(winners),
        recommendation,
    }
}

/// `value / min`, or `None` when the minimum is zero.
fn ratio(value: f64, min: f64) -> Option<f64> {
    (min != 0.0).then(|| value / min)
}

fn minimum(store: &ResultStore, key: fn(&EstimatedRecord) -> f64) -> f64 {
    store.iter().map(key).min_by(f64::total_cmp).unwrap_or(0.0)
}

/// The first record in canonical order with the smallest key.
fn best_by<'a>(
    records: impl Iterator<Item = &'a EstimatedRecord>,
    key: fn(&EstimatedRecord) -> f64,
) -> Option<&'a EstimatedRecord> {
    records.min_by(|a, b| key(a).total_cmp(&key(b)))
}

fn winners(store: &ResultStore) -> Option<Winners> {
    Some(Winners {
        fastest: best_by(store.iter(), EstimatedRecord::delay_ns)?.variant().clone(),
        smallest: best_by(store.iter(), EstimatedRecord::area_ge)?.variant().clone(),
        least_power: best_by(store.iter(), EstimatedRecord::power_mw)?.variant().clone(),
    })
}

fn pair(rule: &PairingRule, reference: &EstimatedRecord, subject: &EstimatedRecord) -> Pairing {
    let speedup = (subject.delay_ns() != 0.0).then(|| reference.delay_ns() / subject.delay_ns());
    let size_saving_pct = (reference.area_ge() != 0.0)
        .then(|| (reference.area_ge() - subject.area_ge()) / reference.area_ge() * 100.0);
    let timing_difference_pct = if rule.timing_difference {
        let min = reference.delay_ns().min(subject.delay_ns());
        ratio((reference.delay_ns() - subject.delay_ns()).abs(), min).map(|r| r * 100.0)
    } else {
        None
    };
    Pairing {
        reference: rule.reference.clone(),
        subject: rule.subject.clone(),
        speedup,
        size_saving_pct,
        timing_difference_pct,
    }
}

fn recommend(store: &ResultStore, fastest: &Variant) -> Option<Recommendation> {
    let f = store.get(fastest)?;
    let max_delay = f.delay_ns() * BALANCED_DELAY_TOLERANCE;
    let max_area = f.area_ge() * BALANCED_AREA_LIMIT;
    let candidates = store.iter().filter(|r| {
        r.variant() != fastest && r.delay_ns() <= max_delay && r.area_ge() <= max_area
    });
    let recommendation = match best_by(candidates, EstimatedRecord::area_ge) {
        Some(balanced) => Recommendation {
            variant: balanced.variant().clone(),
            kind: RecommendationKind::Balanced,
        },
        None => Recommendation {
            variant: fastest.clone(),
            kind: RecommendationKind::Fastest,
        },
    };
    Some(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulscope_estimate::theoretical_estimates;
    use mulscope_synth::{DerivedMetrics, MetricsRecord, StructuralCounts};

    fn record(name: &str, area: f64, delay: f64, power: f64) -> EstimatedRecord {
        EstimatedRecord::from_persisted(MetricsRecord {
            name: Variant::from_name(name),
            counts: StructuralCounts {
                total_cells: 1,
                ..Default::default()
            },
            derived: DerivedMetrics {
                critical_path_delay_ns: delay,
                estimated_area_ge: area,
                estimated_power_mw: power,
                max_frequency_mhz: 1000.0 / delay,
            },
        })
    }

    fn store(records: Vec<EstimatedRecord>) -> ResultStore {
        records.into_iter().collect()
    }

    fn close(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|a| (a - expected).abs() < 1e-9)
    }

    #[test]
    fn empty_store_yields_empty_report() {
        let report = compare(&ResultStore::new());
        assert!(report.is_empty());
        assert!(report.pairings.is_empty());
        assert!(report.winners.is_none());
        assert!(report.recommendation.is_none());
    }

    #[test]
    fn relative_ratios_against_minimum() {
        let report = compare(&store(vec![
            record("Classical", 5000.0, 9.6, 15.0),
            record("Dadda", 4000.0, 4.8, 10.0),
        ]));
        let classical = report.row(&Variant::Classical).unwrap();
        assert!(close(classical.area, 1.25));
        assert!(close(classical.delay, 2.0));
        assert!(close(classical.power, 1.5));
        let dadda = report.row(&Variant::Dadda).unwrap();
        assert!(close(dadda.area, 1.0));
        assert!(close(dadda.delay, 1.0));
    }

    #[test]
    fn zero_minimum_is_unavailable() {
        let report = compare(&store(vec![
            record("Classical", 0.0, 9.6, 0.0),
            record("Wallace", 120.0, 4.25, 3.0),
        ]));
        let wallace = report.row(&Variant::Wallace).unwrap();
        assert_eq!(wallace.area, None);
        assert_eq!(wallace.power, None);
        assert!(close(wallace.delay, 1.0));
        let pairing = report.pairing(&Variant::Classical, &Variant::Wallace).unwrap();
        assert_eq!(pairing.size_saving_pct, None);
        assert!(close(pairing.speedup, 9.6 / 4.25));
    }

    #[test]
    fn pairings_follow_fixed_table() {
        let report = compare(&store(theoretical_estimates()));
        let order: Vec<_> = report
            .pairings
            .iter()
            .map(|p| (p.reference.name(), p.subject.name()))
            .collect();
        assert_eq!(
            order,
            [("Classical", "Wallace"), ("Classical", "Dadda"), ("Wallace", "Dadda")]
        );

        let cw = &report.pairings[0];
        assert!(close(cw.speedup, 9.6 / 6.75));
        assert!(close(cw.size_saving_pct, -2.0));
        assert_eq!(cw.timing_difference_pct, None);

        let wd = &report.pairings[2];
        assert!(close(wd.timing_difference_pct, 0.0));
        assert!(close(wd.size_saving_pct, (5100.0 - 4200.0) / 5100.0 * 100.0));
    }

    #[test]
    fn only_tree_pairing_without_classical() {
        let report = compare(&store(vec![
            record("Wallace", 5100.0, 4.5, 14.8),
            record("Dadda", 4200.0, 4.0, 12.5),
        ]));
        assert_eq!(report.pairings.len(), 1);
        let p = &report.pairings[0];
        assert_eq!((&p.reference, &p.subject), (&Variant::Wallace, &Variant::Dadda));
        assert!(close(p.timing_difference_pct, 12.5));
        assert!(close(p.speedup, 1.125));
    }

    #[test]
    fn ties_go_to_canonical_order() {
        let report = compare(&store(vec![
            record("Wallace", 100.0, 4.25, 2.0),
            record("Dadda", 100.0, 4.25, 2.0),
        ]));
        let winners = report.winners.unwrap();
        assert_eq!(winners.fastest, Variant::Dadda);
        assert_eq!(winners.smallest, Variant::Dadda);
        assert_eq!(winners.least_power, Variant::Dadda);
    }

    #[test]
    fn winners_per_metric() {
        let report = compare(&store(vec![
            record("Classical", 3000.0, 9.6, 9.0),
            record("Dadda", 4200.0, 4.25, 12.5),
            record("Wallace", 5100.0, 4.0, 14.8),
        ]));
        let winners = report.winners.unwrap();
        assert_eq!(winners.fastest, Variant::Wallace);
        assert_eq!(winners.smallest, Variant::Classical);
        assert_eq!(winners.least_power, Variant::Classical);
    }

    #[test]
    fn balanced_recommendation() {
        // Dadda is within 10% of Wallace's delay and more than 5% smaller.
        let report = compare(&store(vec![
            record("Classical", 3000.0, 9.6, 9.0),
            record("Dadda", 4200.0, 4.3, 12.5),
            record("Wallace", 5100.0, 4.0, 14.8),
        ]));
        assert_eq!(
            report.recommendation,
            Some(Recommendation {
                variant: Variant::Dadda,
                kind: RecommendationKind::Balanced,
            })
        );
    }

    #[test]
    fn fastest_recommended_without_close_candidate() {
        let report = compare(&store(theoretical_estimates()));
        assert_eq!(report.winners.as_ref().unwrap().fastest, Variant::Dadda);
        assert_eq!(
            report.recommendation,
            Some(Recommendation {
                variant: Variant::Dadda,
                kind: RecommendationKind::Fastest,
            })
        );
    }

    #[test]
    fn single_variant() {
        let report = compare(&store(vec![record("Booth", 10.0, 5.0, 1.0)]));
        assert_eq!(report.rows.len(), 1);
        assert!(report.pairings.is_empty());
        let rec = report.recommendation.unwrap();
        assert_eq!(rec.variant, Variant::from_name("Booth"));
        assert_eq!(rec.kind, RecommendationKind::Fastest);
    }

    #[test]
    fn comparison_does_not_touch_records() {
        let s = store(theoretical_estimates());
        let before = s.clone();
        let _ = compare(&s);
        assert_eq!(s, before);
    }
}
