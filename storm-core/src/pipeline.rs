//! End-to-end: records → categories → sums → top N → tidy rows

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateRow, aggregate};
use crate::classifier::classify;
use crate::model::{RawRecord, View};
use crate::rank::rank;
use crate::tidy::{TidyRow, reshape};

/// Both ranked views of one record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub health: Vec<TidyRow>,
    pub economic: Vec<TidyRow>,
}

impl Report {
    pub fn view(&self, view: View) -> &[TidyRow] {
        match view {
            View::Health => &self.health,
            View::Economic => &self.economic,
        }
    }
}

/// Aggregated table for a view, before ranking
pub fn aggregate_view(records: &[RawRecord], view: View) -> Vec<AggregateRow> {
    aggregate(records, view.metrics(), classify)
}

/// Top `n` categories for a view, ranked by the view's keys
pub fn rank_view(records: &[RawRecord], view: View, n: usize) -> Vec<AggregateRow> {
    let (primary, secondary) = view.ranking_keys();
    rank(&aggregate_view(records, view), primary, secondary, n)
}

/// Tidy rows for a single view
pub fn summarize(records: &[RawRecord], view: View, n: usize) -> Vec<TidyRow> {
    let ranked = rank_view(records, view, n);
    tracing::debug!(view = %view, ranked = ranked.len(), "ranked categories");
    reshape(&ranked, view.metrics())
}

/// Run both views
pub fn run(records: &[RawRecord], n: usize) -> Report {
    Report {
        health: summarize(records, View::Health, n),
        economic: summarize(records, View::Economic, n),
    }
}
