//! Sample result canonicalization
//!
//! Rewrites each `ITEMS(FREQ, ...)` line with its integer items in ascending
//! order, then orders the lines by descending frequency. The output is what
//! [`crate::parser::parse_sample`] expects.
//!
//! Items are read as 128-bit signed integers, so identifiers beyond the
//! 64-bit range are accepted.

use crate::parser::{ParseError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A rewritten result line and the frequency it is sorted by
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalLine {
    /// Sorted items, each followed by a space, then the original `(...)` remainder
    pub text: String,
    pub frequency: f64,
}

/// Canonicalize a sample result file
pub fn canonicalize(path: impl AsRef<Path>) -> Result<Vec<CanonicalLine>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    canonicalize_reader(BufReader::new(file), path)
}

/// Canonicalize lines from any reader; `source` labels error messages
///
/// Lines with equal frequency keep their input order, so running this on
/// its own output changes nothing.
pub fn canonicalize_reader<R: BufRead>(reader: R, source: &Path) -> Result<Vec<CanonicalLine>> {
    let mut lines = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| ParseError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let canonical = canonicalize_line(&line).map_err(|reason| ParseError::Malformed {
            path: source.to_path_buf(),
            line: index + 1,
            reason,
        })?;
        lines.push(canonical);
    }

    // Stable: ties stay in input order
    lines.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));

    tracing::debug!(source = %source.display(), lines = lines.len(), "canonicalized");
    Ok(lines)
}

/// Rewrite one line with its items in ascending numeric order
pub fn canonicalize_line(line: &str) -> std::result::Result<CanonicalLine, String> {
    let (items, remainder) = line
        .split_once('(')
        .ok_or_else(|| "missing '(' before frequency triple".to_string())?;

    let mut parsed = items
        .split_whitespace()
        .map(|item| {
            item.parse::<i128>()
                .map_err(|_| format!("item '{}' is not an integer", item))
        })
        .collect::<std::result::Result<Vec<i128>, String>>()?;
    parsed.sort_unstable();

    let frequency_field = remainder.split(',').next().unwrap_or_default().trim();
    let frequency = frequency_field
        .parse::<f64>()
        .map_err(|_| format!("frequency '{}' is not a number", frequency_field))?;

    let mut text = String::with_capacity(line.len() + 1);
    for item in &parsed {
        text.push_str(&item.to_string());
        text.push(' ');
    }
    text.push('(');
    text.push_str(remainder);

    Ok(CanonicalLine { text, frequency })
}

/// Write canonical lines, one per line
pub fn write_lines<W: Write>(mut out: W, lines: &[CanonicalLine]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line.text)?;
    }
    out.flush()
}
