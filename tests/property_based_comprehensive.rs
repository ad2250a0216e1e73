//! Property-based tests for the validation pipeline
//!
//! Core properties:
//! 1. Parsed frequencies are non-increasing and above the threshold
//! 2. The exact set is contained in the extended exact set
//! 3. False positives split into acceptable and non-acceptable parts
//! 4. Jaccard similarity stays in [0, 1] with the expected extremes
//! 5. Canonicalization is idempotent and preserves every record

use fimcheck::canonicalize::{canonicalize_reader, write_lines};
use fimcheck::config::ValidationConfig;
use fimcheck::itemset::{Itemset, ResultSet};
use fimcheck::parser::{read_exact, read_sample, ExactResults, SampleEntry, SampleResults};
use fimcheck::reconcile::reconcile;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::Path;

/// Distinct single-item itemsets with frequencies in descending order
fn descending_records(max_len: usize) -> impl Strategy<Value = Vec<(u32, f64)>> {
    prop::collection::btree_set(0u32..200, 0..max_len).prop_flat_map(|items| {
        let n = items.len();
        (
            Just(items.into_iter().collect::<Vec<_>>()),
            prop::collection::vec(1u32..=1000, n),
        )
            .prop_map(|(items, mut freqs)| {
                freqs.sort_unstable_by(|a, b| b.cmp(a));
                items
                    .into_iter()
                    .zip(freqs)
                    .map(|(item, freq)| (item, freq as f64 / 1000.0))
                    .collect()
            })
    })
}

fn exact_text(records: &[(u32, f64)]) -> String {
    records
        .iter()
        .map(|(item, freq)| format!("{}\t{}\n", item, freq))
        .collect()
}

fn sample_results(items: &BTreeSet<u32>, frequency: f64) -> SampleResults {
    items
        .iter()
        .map(|item| {
            (
                Itemset::parse(&item.to_string()),
                SampleEntry {
                    frequency,
                    lower: frequency - 0.01,
                    upper: frequency + 0.01,
                },
            )
        })
        .collect::<ResultSet<_>>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_parsed_frequencies_descend_above_threshold(
        records in descending_records(40),
        threshold in 1u32..1000,
    ) {
        let min_freq = threshold as f64 / 1000.0;
        let parsed = read_exact(Cursor::new(exact_text(&records)), Path::new("large"), min_freq)
            .unwrap();

        let freqs: Vec<f64> = parsed.iter().map(|(_, &f)| f).collect();
        prop_assert!(freqs.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(freqs.iter().all(|&f| f >= min_freq));

        let expected = records.iter().take_while(|(_, f)| *f >= min_freq).count();
        prop_assert_eq!(parsed.len(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_reconciliation_partitions(
        records in descending_records(40),
        sampled in prop::collection::btree_set(0u32..200, 0..40),
        min_freq_permille in 100u32..900,
        epsilon_permille in 0u32..100,
    ) {
        let config = ValidationConfig::new(
            epsilon_permille as f64 / 1000.0,
            min_freq_permille as f64 / 1000.0,
        );
        let extended: ExactResults = read_exact(
            Cursor::new(exact_text(&records)),
            Path::new("large"),
            config.extended_threshold(),
        )
        .unwrap();
        let sample = sample_results(&sampled, 0.5);
        let reconciliation = reconcile(&extended, &sample, config.min_freq);

        let extended_keys: BTreeSet<Itemset> = extended.keys().cloned().collect();
        prop_assert!(reconciliation.exact.is_subset(&extended_keys));

        let acceptable = &reconciliation.acceptable_false_positives;
        let non_acceptable = &reconciliation.non_acceptable_false_positives;
        prop_assert!(acceptable.is_disjoint(non_acceptable));
        let joined: BTreeSet<Itemset> = acceptable.union(non_acceptable).cloned().collect();
        prop_assert_eq!(&joined, &reconciliation.false_positives);

        prop_assert_eq!(
            reconciliation.intersection.len() + reconciliation.false_negatives.len(),
            reconciliation.exact.len()
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_jaccard_bounds(
        exact_items in prop::collection::btree_set(0u32..50, 0..20),
        sampled in prop::collection::btree_set(0u32..50, 0..20),
    ) {
        let extended: ExactResults = exact_items
            .iter()
            .map(|item| (Itemset::parse(&item.to_string()), 0.9))
            .collect();
        let sample = sample_results(&sampled, 0.9);
        let reconciliation = reconcile(&extended, &sample, 0.5);

        match reconciliation.jaccard() {
            None => {
                prop_assert!(exact_items.is_empty() && sampled.is_empty());
            }
            Some(jaccard) => {
                prop_assert!((0.0..=1.0).contains(&jaccard));
                prop_assert_eq!(jaccard == 1.0, exact_items == sampled);
                prop_assert_eq!(jaccard == 0.0, exact_items.is_disjoint(&sampled));
            }
        }
    }
}

/// Lines of shuffled integer items with a frequency triple
fn raw_sample_lines() -> impl Strategy<Value = Vec<(Vec<i64>, u32)>> {
    prop::collection::vec(
        (prop::collection::vec(-50i64..500, 1..6), 0u32..=100),
        0..30,
    )
}

fn raw_text(lines: &[(Vec<i64>, u32)]) -> String {
    lines
        .iter()
        .map(|(items, freq)| {
            let items: Vec<String> = items.iter().map(ToString::to_string).collect();
            let freq = *freq as f64 / 100.0;
            format!("{}({}, {}, {})\n", items.join(" "), freq, freq, freq)
        })
        .collect()
}

fn run_canonicalize(text: &str) -> String {
    let lines = canonicalize_reader(Cursor::new(text), Path::new("sample")).unwrap();
    let mut out = Vec::new();
    write_lines(&mut out, &lines).unwrap();
    String::from_utf8(out).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_canonicalize_idempotent(lines in raw_sample_lines()) {
        let once = run_canonicalize(&raw_text(&lines));
        let twice = run_canonicalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_canonicalize_preserves_records(lines in raw_sample_lines()) {
        let output = run_canonicalize(&raw_text(&lines));

        let mut expected: Vec<(Vec<i64>, u32)> = lines
            .iter()
            .map(|(items, freq)| {
                let mut items = items.clone();
                items.sort_unstable();
                (items, *freq)
            })
            .collect();
        let mut actual: Vec<(Vec<i64>, u32)> = output
            .lines()
            .map(|line| {
                let (items, rest) = line.split_once('(').unwrap();
                let items: Vec<i64> = items
                    .split_whitespace()
                    .map(|i| i.parse().unwrap())
                    .collect();
                let freq: f64 = rest.split(',').next().unwrap().trim().parse().unwrap();
                (items, (freq * 100.0).round() as u32)
            })
            .collect();

        // Items are ascending within each output line
        for (items, _) in &actual {
            prop_assert!(items.windows(2).all(|w| w[0] <= w[1]));
        }

        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn prop_canonicalized_output_is_parseable(lines in raw_sample_lines()) {
        let output = run_canonicalize(&raw_text(&lines));
        let parsed = read_sample(Cursor::new(output), Path::new("sample"), 0.0);
        prop_assert!(parsed.is_ok());
    }
}

#[test]
fn test_extended_threshold_keeps_band_records() {
    // Exact "A B 0.5", "C 0.3"; epsilon 0.1, min_freq 0.4
    let config = ValidationConfig::new(0.1, 0.4);
    let extended = read_exact(
        Cursor::new("A B\t0.5\nC\t0.3\n"),
        Path::new("large"),
        config.extended_threshold(),
    )
    .unwrap();
    assert_eq!(extended.len(), 2);

    let reconciliation = reconcile(&extended, &ResultSet::new(), config.min_freq);
    assert_eq!(reconciliation.exact.len(), 1);
    assert!(reconciliation
        .acceptable_candidates
        .contains(&Itemset::parse("C")));
}
