//! Deterministic rules mapping free-text event labels to categories.
//!
//! Rules are checked top to bottom against the lower-cased label and the
//! first keyword hit wins, so a label mentioning both "flood" and "wind" is
//! a Flood. Labels that match nothing become their own category.

use crate::model::Category;

/// A keyword set and the category it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
}

impl Rule {
    /// True when any keyword occurs in an already lower-cased label
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Rules in priority order. Reordering changes classification results.
pub const RULES: &[Rule] = &[
    Rule { keywords: &["storm surge"], category: "Storm surge" },
    Rule { keywords: &["flood"], category: "Flood" },
    Rule { keywords: &["tornado"], category: "Tornado" },
    Rule {
        keywords: &["snow", "ice", "wintry", "freez", "blizzard", "cold", "winter"],
        category: "Wintry",
    },
    Rule { keywords: &["rain", "shower"], category: "Rain" },
    Rule { keywords: &["thunder", "lightning"], category: "Lightning" },
    Rule { keywords: &["wind"], category: "Wind" },
    Rule { keywords: &["hurricane", "tropical", "typhoon"], category: "Hurricane" },
    Rule { keywords: &["dry", "drought"], category: "Dry weather" },
    Rule { keywords: &["heat", "warm"], category: "Heat" },
    Rule { keywords: &["hail"], category: "Hail" },
    Rule { keywords: &["fire"], category: "Fire" },
];

/// Classify an event label. Never fails.
pub fn classify(event_label: &str) -> Category {
    let lowered = event_label.to_lowercase();

    match RULES.iter().find(|rule| rule.matches(&lowered)) {
        Some(rule) => Category::new(rule.category),
        None => Category::new(capitalize(&lowered)),
    }
}

/// True when the label falls through every rule
pub fn is_fallback(event_label: &str) -> bool {
    let lowered = event_label.to_lowercase();
    !RULES.iter().any(|rule| rule.matches(&lowered))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
