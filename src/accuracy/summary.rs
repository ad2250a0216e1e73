// Order statistics over per-itemset measurements

use serde::Serialize;

/// Count, sum, mean and order statistics of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarize `values`; `None` for an empty sample
    ///
    /// The sum runs in input order, the order statistics over a sorted copy.
    ///
    /// # Example
    /// ```
    /// use fimcheck::accuracy::SummaryStats;
    ///
    /// let stats = SummaryStats::from_values(&[0.4, 0.1, 0.3, 0.2]).unwrap();
    /// assert_eq!(stats.min, 0.1);
    /// assert_eq!(stats.first_quartile, 0.2); // index 4 / 4 = 1
    /// assert_eq!(stats.median, 0.3); // index 4 / 2 = 2
    /// assert_eq!(stats.third_quartile, 0.4); // index 12 / 4 = 3
    /// assert_eq!(stats.max, 0.4);
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        Some(Self {
            count: n,
            sum,
            mean: sum / n as f64,
            min: sorted[0],
            first_quartile: sorted[n / 4],
            median: sorted[n / 2],
            third_quartile: sorted[(3 * n) / 4],
            max: sorted[n - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert_eq!(SummaryStats::from_values(&[]), None);
    }

    #[test]
    fn test_single_value() {
        let stats = SummaryStats::from_values(&[0.25]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 0.25);
        assert_eq!(stats.first_quartile, 0.25);
        assert_eq!(stats.median, 0.25);
        assert_eq!(stats.third_quartile, 0.25);
        assert_eq!(stats.max, 0.25);
        assert_eq!(stats.mean, 0.25);
    }

    #[test]
    fn test_two_values_use_upper_median() {
        // n = 2: quartile index 0, median index 1, third quartile index 1
        let stats = SummaryStats::from_values(&[0.3, 0.1]).unwrap();
        assert_eq!(stats.first_quartile, 0.1);
        assert_eq!(stats.median, 0.3);
        assert_eq!(stats.third_quartile, 0.3);
    }

    #[test]
    fn test_odd_length_indices() {
        // n = 7: indices 1, 3, 5
        let values = [7.0, 1.0, 6.0, 2.0, 5.0, 3.0, 4.0];
        let stats = SummaryStats::from_values(&values).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.first_quartile, 2.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.third_quartile, 6.0);
        assert_eq!(stats.max, 7.0);
        assert_eq!(stats.sum, 28.0);
        assert_eq!(stats.mean, 4.0);
    }

    #[test]
    fn test_ties() {
        let stats = SummaryStats::from_values(&[0.1, 0.1, 0.1, 0.2, 0.2]).unwrap();
        assert_eq!(stats.first_quartile, 0.1);
        assert_eq!(stats.median, 0.1);
        assert_eq!(stats.third_quartile, 0.2);
    }
}
