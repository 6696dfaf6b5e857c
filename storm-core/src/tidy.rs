//! Wide-to-long reshaping of ranked rows for chart rendering.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRow;
use crate::model::Metric;

/// One (category, metric) cell of a ranked view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRow {
    pub category: String,
    pub metric: Metric,
    pub value: f64,
    /// 1-based position of the category when ordered by total ascending
    pub display_rank: usize,
}

/// Emit one row per (ranked row, metric), in ranked order.
///
/// `display_rank` orders categories from smallest to largest total across
/// `metrics`; categories with equal totals keep their ranked order.
pub fn reshape(ranked: &[AggregateRow], metrics: &[Metric]) -> Vec<TidyRow> {
    let display = display_ranks(ranked, metrics);

    ranked
        .iter()
        .zip(display)
        .flat_map(|(row, display_rank)| {
            metrics.iter().map(move |metric| TidyRow {
                category: row.category.to_string(),
                metric: *metric,
                value: row.value(*metric),
                display_rank,
            })
        })
        .collect()
}

/// Display rank for each position of `ranked`
fn display_ranks(ranked: &[AggregateRow], metrics: &[Metric]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ranked.len()).collect();
    order.sort_by(|&a, &b| ranked[a].total(metrics).total_cmp(&ranked[b].total(metrics)));

    let mut ranks = vec![0; ranked.len()];
    for (pos, idx) in order.into_iter().enumerate() {
        ranks[idx] = pos + 1;
    }
    ranks
}
