//! Top-N selection over aggregated rows.

use crate::aggregate::AggregateRow;
use crate::model::Metric;

/// Default number of categories kept per view
pub const DEFAULT_TOP_N: usize = 10;

/// Order rows by `primary` descending, then `secondary` descending, and keep
/// the first `n`. Rows tied on both keys keep their input order.
pub fn rank(rows: &[AggregateRow], primary: Metric, secondary: Metric, n: usize) -> Vec<AggregateRow> {
    let mut ranked = rows.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| {
        b.value(primary)
            .total_cmp(&a.value(primary))
            .then_with(|| b.value(secondary).total_cmp(&a.value(secondary)))
    });
    ranked.truncate(n);
    ranked
}
