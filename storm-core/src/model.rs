//! Record, category, and metric types shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decoder::decode;

/// One weather event as handed over by the loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Free-text event type, e.g. "TSTM WIND" or "Flash Flood/ Flood"
    pub event_label: String,
    pub fatalities: f64,
    pub injuries: f64,
    /// Property damage before magnitude scaling
    pub property_coefficient: f64,
    /// Magnitude code for property damage (`K`, `M`, `B`, or anything else)
    pub property_code: Option<char>,
    /// Crop damage before magnitude scaling
    pub crop_coefficient: f64,
    pub crop_code: Option<char>,
}

impl RawRecord {
    /// Create a record with zeroed metrics
    pub fn new(event_label: impl Into<String>) -> Self {
        Self {
            event_label: event_label.into(),
            fatalities: 0.0,
            injuries: 0.0,
            property_coefficient: 0.0,
            property_code: None,
            crop_coefficient: 0.0,
            crop_code: None,
        }
    }

    pub fn with_harm(mut self, fatalities: f64, injuries: f64) -> Self {
        self.fatalities = fatalities;
        self.injuries = injuries;
        self
    }

    pub fn with_property(mut self, coefficient: f64, code: Option<char>) -> Self {
        self.property_coefficient = coefficient;
        self.property_code = code;
        self
    }

    pub fn with_crop(mut self, coefficient: f64, code: Option<char>) -> Self {
        self.crop_coefficient = coefficient;
        self.crop_code = code;
        self
    }

    /// Property damage in base currency units
    pub fn property_damage(&self) -> f64 {
        decode(self.property_coefficient, self.property_code)
    }

    /// Crop damage in base currency units
    pub fn crop_damage(&self) -> f64 {
        decode(self.crop_coefficient, self.crop_code)
    }
}

/// Normalized event category, ordered by label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// Quantities summed per category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    #[serde(rename = "fatalities")]
    Fatalities,
    #[serde(rename = "injuries")]
    Injuries,
    #[serde(rename = "property")]
    Property,
    #[serde(rename = "crop")]
    Crop,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Fatalities => "fatalities",
            Metric::Injuries => "injuries",
            Metric::Property => "property",
            Metric::Crop => "crop",
        }
    }

    /// Contribution of a single record to this metric
    pub fn extract(&self, record: &RawRecord) -> f64 {
        match self {
            Metric::Fatalities => record.fatalities,
            Metric::Injuries => record.injuries,
            Metric::Property => record.property_damage(),
            Metric::Crop => record.crop_damage(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which harm summary to produce
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum View {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "economic")]
    Economic,
}

impl View {
    pub const ALL: [View; 2] = [View::Health, View::Economic];

    /// Metrics carried by the view, in output order
    pub fn metrics(&self) -> &'static [Metric] {
        match self {
            View::Health => &[Metric::Injuries, Metric::Fatalities],
            View::Economic => &[Metric::Property, Metric::Crop],
        }
    }

    /// (primary, secondary) ranking keys
    pub fn ranking_keys(&self) -> (Metric, Metric) {
        match self {
            View::Health => (Metric::Injuries, Metric::Fatalities),
            View::Economic => (Metric::Property, Metric::Crop),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Health => "health",
            View::Economic => "economic",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builders() {
        let r = RawRecord::new("HAIL")
            .with_harm(1.0, 4.0)
            .with_property(2.5, Some('M'))
            .with_crop(7.0, None);
        assert_eq!(r.fatalities, 1.0);
        assert_eq!(r.injuries, 4.0);
        assert_eq!(r.property_damage(), 2_500_000.0);
        assert_eq!(r.crop_damage(), 7.0);
    }

    #[test]
    fn test_metric_extract() {
        let r = RawRecord::new("FLOOD")
            .with_harm(2.0, 3.0)
            .with_property(1.0, Some('b'))
            .with_crop(4.0, Some('k'));
        assert_eq!(Metric::Fatalities.extract(&r), 2.0);
        assert_eq!(Metric::Injuries.extract(&r), 3.0);
        assert_eq!(Metric::Property.extract(&r), 1e9);
        assert_eq!(Metric::Crop.extract(&r), 4000.0);
    }

    #[test]
    fn test_view_metrics() {
        assert_eq!(View::Health.metrics(), &[Metric::Injuries, Metric::Fatalities]);
        assert_eq!(View::Economic.ranking_keys(), (Metric::Property, Metric::Crop));
    }

    #[test]
    fn test_metric_serializes_lowercase() {
        let json = serde_json::to_string(&Metric::Property).unwrap();
        assert_eq!(json, "\"property\"");
        let cat = serde_json::to_string(&Category::new("Dry weather")).unwrap();
        assert_eq!(cat, "\"Dry weather\"");
    }
}
