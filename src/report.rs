//! Comparison report rendering
//!
//! Text mode prints four `key=value` summary lines; the same values go to a
//! single comma-separated line for machine consumption. JSON mode serializes
//! the whole report.
//!
//! The accuracy section is optional: when no itemset can be compared, the
//! set agreement part is still rendered so the false positives are visible.

use crate::accuracy::AccuracyReport;
use crate::config::ValidationConfig;
use crate::itemset::Itemset;
use crate::reconcile::Reconciliation;
use serde::Serialize;
use std::path::Path;

/// Set agreement counts between exact and sample results
#[derive(Debug, Clone, Serialize)]
pub struct SetAgreement {
    /// Exact itemsets at min_freq
    pub exact: usize,
    pub intersection: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    /// Size of the acceptable false positive band
    pub acceptable_candidates: usize,
    pub acceptable_false_positives: usize,
    pub non_acceptable_false_positives: usize,
    pub jaccard: Option<f64>,
}

impl SetAgreement {
    pub fn from_reconciliation(reconciliation: &Reconciliation) -> Self {
        Self {
            exact: reconciliation.exact.len(),
            intersection: reconciliation.intersection.len(),
            false_negatives: reconciliation.false_negatives.len(),
            false_positives: reconciliation.false_positives.len(),
            acceptable_candidates: reconciliation.acceptable_candidates.len(),
            acceptable_false_positives: reconciliation.acceptable_false_positives.len(),
            non_acceptable_false_positives: reconciliation.non_acceptable_false_positives.len(),
            jaccard: reconciliation.jaccard(),
        }
    }
}

/// Full result of one comparison run
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Base name of the exact result file
    pub large: String,
    /// Base name of the sample result file
    pub sample: String,
    pub epsilon: f64,
    pub min_freq: f64,
    pub agreement: SetAgreement,
    /// Sample itemsets outside the acceptable band
    pub non_acceptable_false_positives: Vec<Itemset>,
    /// Absent when no itemset could be compared
    pub accuracy: Option<AccuracyReport>,
}

impl ComparisonReport {
    pub fn new(
        large: &Path,
        sample: &Path,
        config: &ValidationConfig,
        reconciliation: &Reconciliation,
        accuracy: Option<AccuracyReport>,
    ) -> Self {
        Self {
            large: base_name(large),
            sample: base_name(sample),
            epsilon: config.epsilon,
            min_freq: config.min_freq,
            agreement: SetAgreement::from_reconciliation(reconciliation),
            non_acceptable_false_positives: reconciliation
                .non_acceptable_false_positives
                .iter()
                .cloned()
                .collect(),
            accuracy,
        }
    }

    /// Human-readable summary lines, two without an accuracy section
    pub fn summary_lines(&self) -> Vec<String> {
        let a = &self.agreement;
        let mut lines = vec![
            format!(
                "large={},sample={},e={},minFreq={},largeFIs={}",
                self.large,
                self.sample,
                num(self.epsilon),
                num(self.min_freq),
                a.exact
            ),
            format!(
                "inter={},fn={},fp={},maxfp={},nafp={},jaccard={}",
                a.intersection,
                a.false_negatives,
                a.false_positives,
                a.acceptable_candidates,
                a.non_acceptable_false_positives,
                jaccard(a.jaccard)
            ),
        ];

        if let Some(accuracy) = &self.accuracy {
            let abs = &accuracy.absolute_error;
            let width = &accuracy.interval_width;
            lines.push(format!(
                "we={},maxabserr={},avgabserr={},avgrelerr={},minabserr={},1stquartabserr={},medianabserr={},3rdquartabserr={}",
                accuracy.wrong_epsilon,
                num(abs.max),
                num(abs.mean),
                num(accuracy.relative_error.mean),
                num(abs.min),
                num(abs.first_quartile),
                num(abs.median),
                num(abs.third_quartile)
            ));
            lines.push(format!(
                "wcb={},wcb2={},maxcbsize={},avgcbsize={},mincbsize={},1stquartcbsize={},mediancbsize={},3rdquartcbsize={}",
                accuracy.wrong_confidence_bound,
                accuracy.wrong_confidence_bound_width,
                num(width.max),
                num(width.mean),
                num(width.min),
                num(width.first_quartile),
                num(width.median),
                num(width.third_quartile)
            ));
        }

        lines
    }

    /// All values on one comma-separated line, in summary order
    ///
    /// `None` without an accuracy section, since the columns are fixed.
    pub fn csv_line(&self) -> Option<String> {
        let accuracy = self.accuracy.as_ref()?;
        let a = &self.agreement;
        let abs = &accuracy.absolute_error;
        let width = &accuracy.interval_width;
        let line = [
            self.large.clone(),
            self.sample.clone(),
            num(self.epsilon),
            num(self.min_freq),
            a.exact.to_string(),
            a.intersection.to_string(),
            a.false_negatives.to_string(),
            a.false_positives.to_string(),
            a.acceptable_candidates.to_string(),
            a.non_acceptable_false_positives.to_string(),
            jaccard(a.jaccard),
            accuracy.wrong_epsilon.to_string(),
            num(abs.max),
            num(abs.mean),
            num(accuracy.relative_error.mean),
            num(abs.min),
            num(abs.first_quartile),
            num(abs.median),
            num(abs.third_quartile),
            accuracy.wrong_confidence_bound.to_string(),
            accuracy.wrong_confidence_bound_width.to_string(),
            num(width.max),
            num(width.mean),
            num(width.min),
            num(width.first_quartile),
            num(width.median),
            num(width.third_quartile),
        ]
        .join(",");
        Some(line)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Shortest round-trip float text, `1.0` rather than `1`
fn num(value: f64) -> String {
    format!("{:?}", value)
}

fn jaccard(value: Option<f64>) -> String {
    value.map(num).unwrap_or_else(|| "undefined".to_string())
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
