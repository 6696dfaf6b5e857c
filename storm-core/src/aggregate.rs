//! Per-category sums over a record set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Category, Metric, RawRecord};

/// Summed metrics for one observed category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub category: Category,
    pub values: BTreeMap<Metric, f64>,
}

impl AggregateRow {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            values: BTreeMap::new(),
        }
    }

    /// Summed value for a metric; 0.0 when the metric was not aggregated
    pub fn value(&self, metric: Metric) -> f64 {
        self.values.get(&metric).copied().unwrap_or(0.0)
    }

    /// Sum across the given metrics
    pub fn total(&self, metrics: &[Metric]) -> f64 {
        metrics.iter().map(|m| self.value(*m)).sum()
    }

    pub fn with_value(mut self, metric: Metric, value: f64) -> Self {
        self.values.insert(metric, value);
        self
    }
}

/// Running per-category sums.
///
/// Partial aggregations built over disjoint slices of records can be
/// combined with [`Aggregation::merge`]; the result equals a single pass.
#[derive(Debug, Clone)]
pub struct Aggregation {
    metrics: Vec<Metric>,
    sums: BTreeMap<Category, BTreeMap<Metric, f64>>,
    record_count: usize,
}

impl Aggregation {
    pub fn new(metrics: &[Metric]) -> Self {
        Self {
            metrics: metrics.to_vec(),
            sums: BTreeMap::new(),
            record_count: 0,
        }
    }

    /// Add one record's contribution under an already computed category
    pub fn add(&mut self, category: Category, record: &RawRecord) {
        let entry = self.sums.entry(category).or_default();
        for metric in &self.metrics {
            *entry.entry(*metric).or_insert(0.0) += metric.extract(record);
        }
        self.record_count += 1;
    }

    /// Fold another partial aggregation into this one
    pub fn merge(&mut self, other: Aggregation) {
        for (category, values) in other.sums {
            let entry = self.sums.entry(category).or_default();
            for (metric, value) in values {
                *entry.entry(metric).or_insert(0.0) += value;
            }
        }
        for metric in other.metrics {
            if !self.metrics.contains(&metric) {
                self.metrics.push(metric);
            }
        }
        self.record_count += other.record_count;
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn category_count(&self) -> usize {
        self.sums.len()
    }

    /// Rows ordered by category label
    pub fn into_rows(self) -> Vec<AggregateRow> {
        self.sums
            .into_iter()
            .map(|(category, values)| AggregateRow { category, values })
            .collect()
    }
}

/// Group `records` by `category_of(event_label)` and sum each metric.
///
/// Output is ordered by category label, so it does not depend on the order
/// of `records`.
pub fn aggregate<F>(records: &[RawRecord], metrics: &[Metric], category_of: F) -> Vec<AggregateRow>
where
    F: Fn(&str) -> Category,
{
    let mut agg = Aggregation::new(metrics);
    for record in records {
        agg.add(category_of(&record.event_label), record);
    }

    tracing::debug!(
        records = agg.record_count(),
        categories = agg.category_count(),
        "aggregated records"
    );

    agg.into_rows()
}
