//! Parse storm events CSV exports into typed rows.
//!
//! Columns are located by header name, so exports carrying the full
//! 37-column layout and trimmed extracts both load. Required headers:
//! BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

use crate::types::StormEvent;

/// Header positions of the columns we read
struct Columns {
    begin_date: usize,
    event_type: usize,
    fatalities: usize,
    injuries: usize,
    prop_dmg: usize,
    prop_dmg_exp: usize,
    crop_dmg: usize,
    crop_dmg_exp: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            match headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)) {
                Some(idx) => Ok(idx),
                None => bail!("missing required column {name}"),
            }
        };

        Ok(Self {
            begin_date: find("BGN_DATE")?,
            event_type: find("EVTYPE")?,
            fatalities: find("FATALITIES")?,
            injuries: find("INJURIES")?,
            prop_dmg: find("PROPDMG")?,
            prop_dmg_exp: find("PROPDMGEXP")?,
            crop_dmg: find("CROPDMG")?,
            crop_dmg_exp: find("CROPDMGEXP")?,
        })
    }
}

/// Load a storm events CSV file
pub fn load_storm_csv(path: impl AsRef<Path>) -> Result<Vec<StormEvent>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let events = parse_storm_csv(file).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(rows = events.len(), path = %path.display(), "loaded storm events");
    Ok(events)
}

/// Parse storm events from any reader.
///
/// Every data row becomes an event. Numeric cells that do not parse, are
/// not finite, or hold a negative people count are read as 0.0 and reported
/// in a single warning.
pub fn parse_storm_csv<R: Read>(reader: R) -> Result<Vec<StormEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let cols = Columns::locate(rdr.headers().context("reading header row")?)?;

    let mut events = Vec::new();
    let mut bad_cells = 0usize;

    for (i, result) in rdr.records().enumerate() {
        // +2: header row, 1-based lines
        let record = result.with_context(|| format!("reading row {}", i + 2))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let mut number = |idx: usize, parse: fn(&str) -> Option<f64>| match parse(cell(idx)) {
            Some(v) => v,
            None => {
                bad_cells += 1;
                tracing::debug!(row = i + 2, column = idx, value = cell(idx), "rejected number");
                0.0
            }
        };

        let fatalities = number(cols.fatalities, parse_count);
        let injuries = number(cols.injuries, parse_count);
        let prop_dmg = number(cols.prop_dmg, parse_amount);
        let crop_dmg = number(cols.crop_dmg, parse_amount);

        events.push(StormEvent {
            begin_date: parse_begin_date(cell(cols.begin_date)),
            event_type: cell(cols.event_type).to_string(),
            fatalities,
            injuries,
            prop_dmg,
            prop_dmg_exp: parse_code(cell(cols.prop_dmg_exp)),
            crop_dmg,
            crop_dmg_exp: parse_code(cell(cols.crop_dmg_exp)),
        });
    }

    if bad_cells > 0 {
        tracing::warn!(cells = bad_cells, "numeric cells defaulted to 0");
    }

    Ok(events)
}

/// Blank cells count as zero; anything else must parse to a finite number
fn parse_amount(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_amount`], but people counts cannot be negative
fn parse_count(s: &str) -> Option<f64> {
    parse_amount(s).filter(|v| *v >= 0.0)
}

/// Magnitude code: first character, None when blank
fn parse_code(s: &str) -> Option<char> {
    s.trim().chars().next()
}

/// `BGN_DATE` looks like "4/18/1950 0:00:00"; only the date is kept
fn parse_begin_date(s: &str) -> Option<NaiveDate> {
    let date = s.split_whitespace().next()?;
    NaiveDate::parse_from_str(date, "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_rows() {
        let text = r#""BGN_DATE","EVTYPE","FATALITIES","INJURIES","PROPDMG","PROPDMGEXP","CROPDMG","CROPDMGEXP"
"4/18/1950 0:00:00","TORNADO",0.00,15.00,25.00,"K",0.00,""
"8/29/2005 0:00:00","STORM SURGE",22.00,5.00,31.30,"B",1.5,"m"
"#;
        let events = parse_storm_csv(text.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "TORNADO");
        assert_eq!(events[0].injuries, 15.0);
        assert_eq!(events[0].prop_dmg_exp, Some('K'));
        assert_eq!(events[0].crop_dmg_exp, None);
        assert_eq!(events[0].begin_date, NaiveDate::from_ymd_opt(1950, 4, 18));
        assert_eq!(events[1].crop_dmg_exp, Some('m'));
        assert_eq!(events[1].prop_dmg, 31.3);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let text = "REFNUM,EVTYPE,CROPDMGEXP,CROPDMG,PROPDMGEXP,PROPDMG,INJURIES,FATALITIES,STATE,BGN_DATE\n\
                    1,HAIL,K,2,M,3,4,5,KS,6/1/2000 0:00:00\n";
        let events = parse_storm_csv(text.as_bytes()).unwrap();
        let e = &events[0];
        assert_eq!(e.event_type, "HAIL");
        assert_eq!(e.fatalities, 5.0);
        assert_eq!(e.injuries, 4.0);
        assert_eq!(e.prop_dmg, 3.0);
        assert_eq!(e.prop_dmg_exp, Some('M'));
        assert_eq!(e.crop_dmg, 2.0);
        assert_eq!(e.crop_dmg_exp, Some('K'));
        assert_eq!(e.year(), Some(2000));
    }

    #[test]
    fn test_missing_column_is_error() {
        let text = "BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG\n";
        let err = parse_storm_csv(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CROPDMGEXP"), "{err}");
    }

    #[test]
    fn test_bad_numbers_keep_row() {
        let text = "BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP\n\
                    garbage,FOG,n/a,,1,?,2,\n";
        let events = parse_storm_csv(text.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fatalities, 0.0);
        assert_eq!(events[0].injuries, 0.0);
        assert_eq!(events[0].prop_dmg_exp, Some('?'));
        assert_eq!(events[0].begin_date, None);
    }

    #[test]
    fn test_non_finite_and_negative_counts_rejected() {
        let text = "BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP\n\
                    1/1/2000 0:00:00,FOG,NaN,inf,-inf,K,NaN,\n\
                    1/1/2000 0:00:00,HEAT,-3,2,-4,K,1e400,\n\
                    1/1/2000 0:00:00,TORNADO,5,100,0,,0,\n";
        let events = parse_storm_csv(text.as_bytes()).unwrap();
        assert_eq!(events.len(), 3);

        let fog = &events[0];
        assert_eq!((fog.fatalities, fog.injuries, fog.prop_dmg, fog.crop_dmg), (0.0, 0.0, 0.0, 0.0));

        let heat = &events[1];
        assert_eq!(heat.fatalities, 0.0);
        assert_eq!(heat.injuries, 2.0);
        // negative damage coefficients are kept, only counts must be >= 0
        assert_eq!(heat.prop_dmg, -4.0);
        // overflows to inf
        assert_eq!(heat.crop_dmg, 0.0);

        let records = crate::to_raw_records(&events);
        let health = storm_core::summarize(&records, storm_core::View::Health, 10);
        assert_eq!(health[0].category, "Tornado");
        assert!(health.iter().all(|t| t.value.is_finite()));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Some(0.0));
        assert_eq!(parse_count("3.00"), Some(3.0));
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount("infinity"), None);
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code(""), None);
        assert_eq!(parse_code("  "), None);
        assert_eq!(parse_code("K"), Some('K'));
        assert_eq!(parse_code(" b "), Some('b'));
    }
}
