//! fimcheck - validation of approximate frequent-itemset mining results
//!
//! This library compares the itemsets reported by a sampling-based miner
//! with the exact frequent itemsets, checking the false positive band,
//! the epsilon accuracy guarantee, and confidence interval coverage.

pub mod accuracy;
pub mod canonicalize;
pub mod cli;
pub mod config;
pub mod itemset;
pub mod parser;
pub mod reconcile;
pub mod report;
