use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use storm_core::RawRecord;

/// One row of a storm events export, reduced to the columns the ranking uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormEvent {
    /// Date part of `BGN_DATE`, when it parses
    pub begin_date: Option<NaiveDate>,
    /// `EVTYPE`, untouched
    pub event_type: String,
    pub fatalities: f64,
    pub injuries: f64,
    pub prop_dmg: f64,
    /// First character of `PROPDMGEXP`; None for a blank cell
    pub prop_dmg_exp: Option<char>,
    pub crop_dmg: f64,
    pub crop_dmg_exp: Option<char>,
}

impl StormEvent {
    pub fn year(&self) -> Option<i32> {
        self.begin_date.map(|d| d.year())
    }

    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            event_label: self.event_type.clone(),
            fatalities: self.fatalities,
            injuries: self.injuries,
            property_coefficient: self.prop_dmg,
            property_code: self.prop_dmg_exp,
            crop_coefficient: self.crop_dmg,
            crop_code: self.crop_dmg_exp,
        }
    }
}

/// Convert loaded events into pipeline records
pub fn to_raw_records(events: &[StormEvent]) -> Vec<RawRecord> {
    events.iter().map(StormEvent::to_raw).collect()
}

/// Keep events that began in `year` or later. Undated events are dropped.
pub fn since_year(events: Vec<StormEvent>, year: i32) -> Vec<StormEvent> {
    events
        .into_iter()
        .filter(|e| e.year().is_some_and(|y| y >= year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(label: &str, date: Option<(i32, u32, u32)>) -> StormEvent {
        StormEvent {
            begin_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            event_type: label.to_string(),
            fatalities: 1.0,
            injuries: 2.0,
            prop_dmg: 3.0,
            prop_dmg_exp: Some('K'),
            crop_dmg: 4.0,
            crop_dmg_exp: None,
        }
    }

    #[test]
    fn test_to_raw_keeps_codes() {
        let raw = event("HAIL", Some((1996, 1, 1))).to_raw();
        assert_eq!(raw.event_label, "HAIL");
        assert_eq!(raw.property_code, Some('K'));
        assert_eq!(raw.crop_code, None);
        assert_eq!(raw.property_damage(), 3000.0);
    }

    #[test]
    fn test_since_year() {
        let events = vec![
            event("A", Some((1950, 4, 18))),
            event("B", Some((1996, 1, 1))),
            event("C", None),
            event("D", Some((2011, 5, 22))),
        ];
        let kept = since_year(events, 1996);
        let labels: Vec<_> = kept.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(labels, vec!["B", "D"]);
    }
}
