// Per-itemset error measurement and aggregation

use crate::accuracy::summary::SummaryStats;
use crate::accuracy::verdict::GuaranteeVerdict;
use crate::itemset::Itemset;
use crate::parser::{ExactResults, SampleResults};
use crate::reconcile::Reconciliation;
use serde::Serialize;
use thiserror::Error;

/// Conditions under which no accuracy figures can be produced
#[derive(Error, Debug, PartialEq)]
pub enum AccuracyError {
    #[error("No comparable itemsets: the sample shares no itemset with the exact results")]
    NoComparableItemsets,

    #[error("Exact frequency of itemset {0} is zero; relative error is undefined")]
    ZeroExactFrequency(Itemset),

    #[error("Itemset {0} is comparable but missing from the {1} results")]
    MissingItemset(Itemset, &'static str),
}

/// Error measurements for one comparable itemset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsetAccuracy {
    pub itemset: Itemset,
    pub exact_frequency: f64,
    pub sample_frequency: f64,
    pub lower: f64,
    pub upper: f64,
    pub absolute_error: f64,
    pub relative_error: f64,
    pub interval_width: f64,
}

impl ItemsetAccuracy {
    /// Absolute error exceeds epsilon
    pub fn violates_epsilon(&self, epsilon: f64) -> bool {
        self.absolute_error > epsilon
    }

    /// Exact frequency lies outside the reported interval
    pub fn violates_coverage(&self) -> bool {
        self.exact_frequency > self.upper || self.exact_frequency < self.lower
    }

    /// Interval is wider than 2 * epsilon
    pub fn violates_width(&self, epsilon: f64) -> bool {
        self.interval_width > 2.0 * epsilon
    }
}

/// Aggregated accuracy of a sample result set
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub epsilon: f64,
    /// Number of comparable itemsets
    pub comparable: usize,
    /// Itemsets whose absolute error exceeds epsilon
    pub wrong_epsilon: usize,
    /// Itemsets whose interval misses the exact frequency
    pub wrong_confidence_bound: usize,
    /// Itemsets whose interval is wider than 2 * epsilon
    pub wrong_confidence_bound_width: usize,
    pub absolute_error: SummaryStats,
    pub relative_error: SummaryStats,
    pub interval_width: SummaryStats,
    pub verdict: GuaranteeVerdict,
    #[serde(skip)]
    pub itemsets: Vec<ItemsetAccuracy>,
}

impl AccuracyReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match &self.verdict {
            GuaranteeVerdict::Holds => {
                report.push_str("✅ GUARANTEES HOLD\n\n");
            }
            GuaranteeVerdict::Violated {
                non_acceptable_false_positives,
                epsilon_violations,
                coverage_violations,
            } => {
                report.push_str("❌ GUARANTEES VIOLATED\n\n");
                report.push_str(&format!(
                    "Non-acceptable false positives: {}\n",
                    non_acceptable_false_positives
                ));
                report.push_str(&format!(
                    "Absolute error > epsilon: {}\n",
                    epsilon_violations
                ));
                report.push_str(&format!(
                    "Exact frequency outside interval: {}\n",
                    coverage_violations
                ));
            }
        }

        report.push_str(&format!(
            "\nComparable itemsets: {} (epsilon={})\n",
            self.comparable, self.epsilon
        ));
        report.push_str(&format!(
            "Intervals wider than 2*epsilon: {}\n",
            self.wrong_confidence_bound_width
        ));

        report.push_str("\n📊 Absolute error:\n");
        push_summary(&mut report, &self.absolute_error);
        report.push_str("\n📊 Confidence interval width:\n");
        push_summary(&mut report, &self.interval_width);

        let offenders: Vec<&ItemsetAccuracy> = self
            .itemsets
            .iter()
            .filter(|a| a.violates_epsilon(self.epsilon) || a.violates_coverage())
            .collect();
        if !offenders.is_empty() {
            report.push_str(&format!("\n⚠️  Offending itemsets ({}):\n", offenders.len()));
            for accuracy in offenders {
                report.push_str(&format!(
                    "  {} (exact={}, sample={}, interval=[{}, {}])\n",
                    accuracy.itemset,
                    accuracy.exact_frequency,
                    accuracy.sample_frequency,
                    accuracy.lower,
                    accuracy.upper
                ));
            }
        }

        report
    }
}

fn push_summary(report: &mut String, stats: &SummaryStats) {
    report.push_str(&format!(
        "  min={:.6} q1={:.6} median={:.6} q3={:.6} max={:.6} mean={:.6}\n",
        stats.min,
        stats.first_quartile,
        stats.median,
        stats.third_quartile,
        stats.max,
        stats.mean
    ));
}

/// Evaluate sample accuracy over the comparable itemsets
///
/// Exact frequencies come from `extended`, which holds both the
/// intersection and the acceptable false positives.
///
/// # Errors
/// [`AccuracyError::NoComparableItemsets`] when there is nothing to measure,
/// [`AccuracyError::ZeroExactFrequency`] when a relative error would divide
/// by zero.
pub fn evaluate(
    extended: &ExactResults,
    sample: &SampleResults,
    reconciliation: &Reconciliation,
    epsilon: f64,
) -> Result<AccuracyReport, AccuracyError> {
    let mut itemsets = Vec::with_capacity(reconciliation.comparable_len());

    for itemset in reconciliation.comparable() {
        let exact_frequency = extended
            .frequency(itemset)
            .ok_or_else(|| AccuracyError::MissingItemset(itemset.clone(), "exact"))?;
        let entry = sample
            .get(itemset)
            .ok_or_else(|| AccuracyError::MissingItemset(itemset.clone(), "sample"))?;
        if exact_frequency == 0.0 {
            return Err(AccuracyError::ZeroExactFrequency(itemset.clone()));
        }

        let absolute_error = (entry.frequency - exact_frequency).abs();
        itemsets.push(ItemsetAccuracy {
            itemset: itemset.clone(),
            exact_frequency,
            sample_frequency: entry.frequency,
            lower: entry.lower,
            upper: entry.upper,
            absolute_error,
            relative_error: absolute_error / exact_frequency,
            interval_width: entry.interval_width(),
        });
    }

    let absolute: Vec<f64> = itemsets.iter().map(|a| a.absolute_error).collect();
    let relative: Vec<f64> = itemsets.iter().map(|a| a.relative_error).collect();
    let widths: Vec<f64> = itemsets.iter().map(|a| a.interval_width).collect();

    let (Some(absolute_error), Some(relative_error), Some(interval_width)) = (
        SummaryStats::from_values(&absolute),
        SummaryStats::from_values(&relative),
        SummaryStats::from_values(&widths),
    ) else {
        return Err(AccuracyError::NoComparableItemsets);
    };

    let wrong_epsilon = itemsets
        .iter()
        .filter(|a| a.violates_epsilon(epsilon))
        .count();
    let wrong_confidence_bound = itemsets.iter().filter(|a| a.violates_coverage()).count();
    let wrong_confidence_bound_width = itemsets
        .iter()
        .filter(|a| a.violates_width(epsilon))
        .count();

    let verdict = GuaranteeVerdict::from_counts(
        reconciliation.non_acceptable_false_positives.len(),
        wrong_epsilon,
        wrong_confidence_bound,
    );

    tracing::debug!(
        comparable = itemsets.len(),
        wrong_epsilon,
        wrong_confidence_bound,
        wrong_confidence_bound_width,
        "evaluated sample accuracy"
    );

    Ok(AccuracyReport {
        epsilon,
        comparable: itemsets.len(),
        wrong_epsilon,
        wrong_confidence_bound,
        wrong_confidence_bound_width,
        absolute_error,
        relative_error,
        interval_width,
        verdict,
        itemsets,
    })
}
