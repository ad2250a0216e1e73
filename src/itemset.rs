//! Itemset keys and ordered result mappings
//!
//! An [`Itemset`] compares by set equality: item order and duplicates in the
//! source text do not matter. The canonical item sequence is built once and
//! shared, so a key can never change after it is inserted into a map or set.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Immutable set of item identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset {
    items: Arc<[String]>,
}

impl Itemset {
    /// Build an itemset from item tokens in any order
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Self {
            items: items.into(),
        }
    }

    /// Parse whitespace-separated item tokens
    pub fn parse(text: &str) -> Self {
        Self::new(text.split_whitespace())
    }

    /// Items in canonical order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(" "))
    }
}

impl Serialize for Itemset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

/// Value stored per itemset that exposes a frequency
pub trait Frequency {
    fn frequency(&self) -> f64;
}

impl Frequency for f64 {
    fn frequency(&self) -> f64 {
        *self
    }
}

/// Itemset mapping that remembers file order
///
/// Re-inserting an itemset replaces its value but keeps its original
/// position.
#[derive(Debug, Clone)]
pub struct ResultSet<V> {
    records: Vec<(Itemset, V)>,
    index: HashMap<Itemset, usize>,
}

impl<V> Default for ResultSet<V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> ResultSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `itemset`
    pub fn insert(&mut self, itemset: Itemset, value: V) {
        match self.index.get(&itemset) {
            Some(&position) => self.records[position].1 = value,
            None => {
                self.index.insert(itemset.clone(), self.records.len());
                self.records.push((itemset, value));
            }
        }
    }

    pub fn get(&self, itemset: &Itemset) -> Option<&V> {
        self.index.get(itemset).map(|&position| &self.records[position].1)
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.index.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion (file) order
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, &V)> {
        self.records.iter().map(|(itemset, value)| (itemset, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Itemset> {
        self.records.iter().map(|(itemset, _)| itemset)
    }
}

impl<V: Frequency> ResultSet<V> {
    pub fn frequency(&self, itemset: &Itemset) -> Option<f64> {
        self.get(itemset).map(Frequency::frequency)
    }

    /// Frequency-only view in the same order
    pub fn frequencies(&self) -> ResultSet<f64> {
        let mut out = ResultSet::new();
        for (itemset, value) in self.iter() {
            out.insert(itemset.clone(), value.frequency());
        }
        out
    }
}

impl<V> FromIterator<(Itemset, V)> for ResultSet<V> {
    fn from_iter<T: IntoIterator<Item = (Itemset, V)>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        for (itemset, value) in iter {
            set.insert(itemset, value);
        }
        set
    }
}
