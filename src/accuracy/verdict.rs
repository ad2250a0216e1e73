// Overall verdict on the sampling algorithm's guarantees

use serde::Serialize;

/// Whether the epsilon and confidence guarantees held for a run
///
/// Intervals wider than 2 * epsilon are reported separately and do not
/// affect the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GuaranteeVerdict {
    /// No non-acceptable false positive, epsilon or coverage violation
    Holds,

    /// At least one guarantee was broken
    Violated {
        non_acceptable_false_positives: usize,
        epsilon_violations: usize,
        coverage_violations: usize,
    },
}

impl GuaranteeVerdict {
    pub fn from_counts(
        non_acceptable_false_positives: usize,
        epsilon_violations: usize,
        coverage_violations: usize,
    ) -> Self {
        if non_acceptable_false_positives == 0 && epsilon_violations == 0 && coverage_violations == 0
        {
            Self::Holds
        } else {
            Self::Violated {
                non_acceptable_false_positives,
                epsilon_violations,
                coverage_violations,
            }
        }
    }

    pub fn holds(&self) -> bool {
        matches!(self, Self::Holds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_when_clean() {
        assert!(GuaranteeVerdict::from_counts(0, 0, 0).holds());
    }

    #[test]
    fn test_any_violation_breaks_verdict() {
        assert!(!GuaranteeVerdict::from_counts(1, 0, 0).holds());
        assert!(!GuaranteeVerdict::from_counts(0, 2, 0).holds());
        assert_eq!(
            GuaranteeVerdict::from_counts(0, 0, 3),
            GuaranteeVerdict::Violated {
                non_acceptable_false_positives: 0,
                epsilon_violations: 0,
                coverage_violations: 3,
            }
        );
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_string(&GuaranteeVerdict::Holds).unwrap();
        assert_eq!(json, r#"{"status":"holds"}"#);
    }
}
