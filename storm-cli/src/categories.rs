//! How raw event labels collapse into categories.

use std::collections::{BTreeMap, BTreeSet};
use storm_core::{Category, classify};

/// Distinct raw labels folded into one category
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGroup {
    pub category: Category,
    pub labels: Vec<String>,
    pub fallback: bool,
}

/// Group distinct labels by category, largest groups first, then by name
pub fn label_groups<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<LabelGroup> {
    let mut groups: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();
    for label in labels {
        groups.entry(classify(label)).or_default().insert(label.to_string());
    }

    let mut out: Vec<LabelGroup> = groups
        .into_iter()
        .map(|(category, labels)| {
            let labels: Vec<String> = labels.into_iter().collect();
            let fallback = labels.iter().all(|l| storm_core::is_fallback(l));
            LabelGroup { category, labels, fallback }
        })
        .collect();

    out.sort_by(|a, b| b.labels.len().cmp(&a.labels.len()).then_with(|| a.category.cmp(&b.category)));
    out
}
