//! Result file parsing
//!
//! Exact results are `ITEMS<TAB>FREQ` lines; sample results are
//! `ITEMS(FREQ, LOWER, UPPER)` lines. Both files must be sorted by
//! non-increasing frequency. Parsing stops at the first record under the
//! threshold, since every later record is below it too.

use crate::itemset::{Itemset, ResultSet};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading result files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(
        "{}:{line}: results must be sorted (frequency {found} follows {previous})",
        path.display()
    )]
    NotSorted {
        path: PathBuf,
        line: usize,
        previous: f64,
        found: f64,
    },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Frequency and confidence interval reported by the sampling algorithm
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleEntry {
    pub frequency: f64,
    pub lower: f64,
    pub upper: f64,
}

impl crate::itemset::Frequency for SampleEntry {
    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl SampleEntry {
    pub fn interval_width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn covers(&self, frequency: f64) -> bool {
        frequency >= self.lower && frequency <= self.upper
    }
}

pub type ExactResults = ResultSet<f64>;
pub type SampleResults = ResultSet<SampleEntry>;

/// Parse an exact result file keeping records with frequency >= `min_freq`
pub fn parse_exact(path: impl AsRef<Path>, min_freq: f64) -> Result<ExactResults> {
    let path = path.as_ref();
    read_exact(open(path)?, path, min_freq)
}

/// Parse a sample result file keeping records with frequency >= `min_freq`
pub fn parse_sample(path: impl AsRef<Path>, min_freq: f64) -> Result<SampleResults> {
    let path = path.as_ref();
    read_sample(open(path)?, path, min_freq)
}

/// Parse exact results from any reader; `source` labels error messages
pub fn read_exact<R: BufRead>(reader: R, source: &Path, min_freq: f64) -> Result<ExactResults> {
    read_sorted(reader, source, min_freq, |text| {
        let (items, freq) = text
            .split_once('\t')
            .ok_or_else(|| "missing tab between itemset and frequency".to_string())?;
        let itemset = parse_itemset(items)?;
        // Columns after the frequency are ignored
        let freq = parse_number(freq.split('\t').next().unwrap_or(freq), "frequency")?;
        Ok((itemset, freq, freq))
    })
}

/// Parse sample results from any reader; `source` labels error messages
pub fn read_sample<R: BufRead>(reader: R, source: &Path, min_freq: f64) -> Result<SampleResults> {
    read_sorted(reader, source, min_freq, |text| {
        let (itemset, entry) = parse_sample_line(text)?;
        Ok((itemset, entry.frequency, entry))
    })
}

/// Parse one `ITEMS(FREQ, LOWER, UPPER)` line
pub fn parse_sample_line(text: &str) -> std::result::Result<(Itemset, SampleEntry), String> {
    let (items, rest) = text
        .split_once('(')
        .ok_or_else(|| "missing '(' before frequency triple".to_string())?;
    let itemset = parse_itemset(items)?;

    let mut fields = rest.split(',');
    let mut next_field = |name: &str| {
        fields
            .next()
            .ok_or_else(|| format!("missing {} in frequency triple", name))
    };
    let frequency = parse_number(next_field("frequency")?, "frequency")?;
    let lower = parse_number(next_field("lower bound")?, "lower bound")?;
    let upper_field = next_field("upper bound")?.trim_end().trim_end_matches(')');
    let upper = parse_number(upper_field, "upper bound")?;

    Ok((
        itemset,
        SampleEntry {
            frequency,
            lower,
            upper,
        },
    ))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_itemset(text: &str) -> std::result::Result<Itemset, String> {
    let itemset = Itemset::parse(text);
    if itemset.is_empty() {
        return Err("empty itemset".to_string());
    }
    Ok(itemset)
}

fn parse_number(text: &str, what: &str) -> std::result::Result<f64, String> {
    let text = text.trim();
    let value = text
        .parse::<f64>()
        .map_err(|_| format!("{} '{}' is not a number", what, text))?;
    // NaN compares false everywhere and would disable the sortedness check
    if !value.is_finite() {
        return Err(format!("{} '{}' is not a finite number", what, text));
    }
    Ok(value)
}

/// Shared loop: sortedness check, threshold cutoff, accumulation
fn read_sorted<R, V, F>(
    reader: R,
    source: &Path,
    min_freq: f64,
    mut parse_line: F,
) -> Result<ResultSet<V>>
where
    R: BufRead,
    F: FnMut(&str) -> std::result::Result<(Itemset, f64, V), String>,
{
    let mut results = ResultSet::new();
    let mut previous = 1.0_f64;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|err| ParseError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let (itemset, freq, value) =
            parse_line(&line).map_err(|reason| ParseError::Malformed {
                path: source.to_path_buf(),
                line: line_no,
                reason,
            })?;

        if freq > previous {
            return Err(ParseError::NotSorted {
                path: source.to_path_buf(),
                line: line_no,
                previous,
                found: freq,
            });
        }
        if freq < min_freq {
            tracing::debug!(
                source = %source.display(),
                line = line_no,
                freq,
                min_freq,
                "threshold cutoff"
            );
            break;
        }

        results.insert(itemset, value);
        previous = freq;
    }

    tracing::debug!(
        source = %source.display(),
        kept = results.len(),
        min_freq,
        "parsed result file"
    );
    Ok(results)
}
