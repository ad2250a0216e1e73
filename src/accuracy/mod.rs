// Accuracy evaluation of sample results against exact results
//
// Over the comparable itemsets (intersection plus acceptable false
// positives) this module measures:
// - absolute and relative frequency error
// - confidence interval width and coverage of the exact frequency
// - violations of the epsilon guarantee and of the interval width bound
//
// Quartiles are read from the ascending-sorted values at indices n/4, n/2
// and 3n/4 with truncating division, so small samples report an actual
// observation rather than an interpolated value.

mod evaluate;
mod summary;
mod verdict;

pub use evaluate::{evaluate, AccuracyError, AccuracyReport, ItemsetAccuracy};
pub use summary::SummaryStats;
pub use verdict::GuaranteeVerdict;
