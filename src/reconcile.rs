//! Set reconciliation between exact and sample results
//!
//! The exact results are read at `min_freq - epsilon`. Itemsets between that
//! relaxed threshold and `min_freq` are not frequent, but a sampling
//! algorithm with an epsilon guarantee may still report them. Such false
//! positives are acceptable. Every other false positive breaks the
//! guarantee and is reported individually.

use crate::itemset::Itemset;
use crate::parser::{ExactResults, SampleResults};
use std::collections::BTreeSet;

/// Partition of the exact and sample itemsets
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Exact itemsets with frequency >= min_freq
    pub exact: BTreeSet<Itemset>,
    /// Itemsets only present under the relaxed threshold
    pub acceptable_candidates: BTreeSet<Itemset>,
    /// Sample itemsets
    pub sample: BTreeSet<Itemset>,
    pub intersection: BTreeSet<Itemset>,
    pub false_negatives: BTreeSet<Itemset>,
    pub false_positives: BTreeSet<Itemset>,
    pub non_acceptable_false_positives: BTreeSet<Itemset>,
    pub acceptable_false_positives: BTreeSet<Itemset>,
}

impl Reconciliation {
    /// `|exact ∩ sample| / |exact ∪ sample|`, `None` when both are empty
    pub fn jaccard(&self) -> Option<f64> {
        let union = self.union_len();
        if union == 0 {
            return None;
        }
        Some(self.intersection.len() as f64 / union as f64)
    }

    pub fn union_len(&self) -> usize {
        self.exact.len() + self.sample.len() - self.intersection.len()
    }

    /// Itemsets whose errors are measured: intersection and acceptable false positives
    pub fn comparable(&self) -> impl Iterator<Item = &Itemset> {
        self.intersection
            .iter()
            .chain(self.acceptable_false_positives.iter())
    }

    pub fn comparable_len(&self) -> usize {
        self.intersection.len() + self.acceptable_false_positives.len()
    }
}

/// Reconcile extended exact results with sample results
///
/// `extended` must have been parsed at `min_freq - epsilon`; the exact set
/// at `min_freq` is carved out of it.
///
/// # Example
/// ```
/// use fimcheck::itemset::{Itemset, ResultSet};
/// use fimcheck::parser::SampleEntry;
/// use fimcheck::reconcile::reconcile;
///
/// let extended: ResultSet<f64> = [
///     (Itemset::parse("A B"), 0.5),
///     (Itemset::parse("C"), 0.3),
/// ]
/// .into_iter()
/// .collect();
/// let sample: ResultSet<SampleEntry> = [(
///     Itemset::parse("C"),
///     SampleEntry { frequency: 0.36, lower: 0.3, upper: 0.42 },
/// )]
/// .into_iter()
/// .collect();
///
/// let reconciliation = reconcile(&extended, &sample, 0.4);
/// assert_eq!(reconciliation.false_negatives.len(), 1);
/// assert_eq!(reconciliation.acceptable_false_positives.len(), 1);
/// assert!(reconciliation.non_acceptable_false_positives.is_empty());
/// ```
pub fn reconcile(
    extended: &ExactResults,
    sample: &SampleResults,
    min_freq: f64,
) -> Reconciliation {
    let mut exact = BTreeSet::new();
    let mut acceptable_candidates = BTreeSet::new();
    for (itemset, &freq) in extended.iter() {
        if freq >= min_freq {
            exact.insert(itemset.clone());
        } else {
            acceptable_candidates.insert(itemset.clone());
        }
    }

    let sample: BTreeSet<Itemset> = sample.keys().cloned().collect();

    let intersection: BTreeSet<Itemset> = exact.intersection(&sample).cloned().collect();
    let false_negatives: BTreeSet<Itemset> = exact.difference(&sample).cloned().collect();
    let false_positives: BTreeSet<Itemset> = sample.difference(&exact).cloned().collect();
    let non_acceptable_false_positives: BTreeSet<Itemset> = false_positives
        .difference(&acceptable_candidates)
        .cloned()
        .collect();
    let acceptable_false_positives: BTreeSet<Itemset> = false_positives
        .intersection(&acceptable_candidates)
        .cloned()
        .collect();

    for itemset in &non_acceptable_false_positives {
        tracing::warn!(itemset = %itemset, "non-acceptable false positive");
    }

    tracing::info!(
        exact = exact.len(),
        sample = sample.len(),
        intersection = intersection.len(),
        false_negatives = false_negatives.len(),
        false_positives = false_positives.len(),
        non_acceptable = non_acceptable_false_positives.len(),
        "reconciled result sets"
    );

    Reconciliation {
        exact,
        acceptable_candidates,
        sample,
        intersection,
        false_negatives,
        false_positives,
        non_acceptable_false_positives,
        acceptable_false_positives,
    }
}
