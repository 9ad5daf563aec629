//! Resort payload transform
//!
//! Flattens one `/get/resort/{id}/` document into a [`ReadingSet`]. Missing or
//! mistyped fields become `Null` readings (or zero, for the count arithmetic).
//! The one exception is today's opening hours: when an opening-hours object
//! is present but lacks today's window, strict mode fails the whole transform.

use crate::error::{FnuggError, Result};
use crate::services::readings::{Reading, ReadingSet, ReadingValue};
use chrono::{DateTime, Weekday};
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::warn;

static NULL: Value = Value::Null;

/// Prefix of per-lift reading keys
pub const LIFT_KEY_PREFIX: &str = "lift_";

/// Category of per-lift readings
pub const LIFT_STATUS_CATEGORY: &str = "lift_status";

/// Keys present in every transformed set, whatever the payload holds
pub const BASE_READING_KEYS: [&str; 19] = [
    "temp",
    "wind_speed",
    "wind_direction",
    "condition_description",
    "snow_depth",
    "new_snow",
    "lifts_total",
    "lifts_open",
    "lifts_percentage",
    "lifts_status_text",
    "slopes_total",
    "slopes_open",
    "slopes_percentage",
    "slopes_status",
    "resort_opening_date",
    "resort_closing_date",
    "last_updated",
    "resort_status",
    "opening_hours_today",
];

/// Operating status of a single lift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftStatus {
    Closed,
    Open,
    Unknown,
}

impl LiftStatus {
    /// Map the upstream status code; anything but 0 or 1 is unknown
    pub fn from_code(code: Option<&Value>) -> Self {
        match code.and_then(Value::as_i64) {
            Some(0) => Self::Closed,
            Some(1) => Self::Open,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "Closed",
            Self::Open => "Open",
            Self::Unknown => "Unknown",
        }
    }
}

/// Share of open units, rounded half-to-even; zero when there are none
pub fn percentage(open: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (open as f64 / total as f64 * 100.0).round_ties_even() as u64
}

/// "7 of 10 lifts open (70%)"
pub fn status_text(open: u64, total: u64, noun: &str) -> String {
    format!(
        "{open} of {total} {noun} open ({}%)",
        percentage(open, total)
    )
}

/// Reading key for a lift, or `None` for a blank name
pub fn lift_key(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(format!(
        "{LIFT_KEY_PREFIX}{}",
        name.to_lowercase().replace(' ', "_")
    ))
}

/// Lowercase full weekday name used as opening-hours key
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Payload-to-readings transform
#[derive(Debug, Clone, Copy)]
pub struct ResortTransform {
    strict_opening_hours: bool,
}

impl Default for ResortTransform {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ResortTransform {
    pub fn new(strict_opening_hours: bool) -> Self {
        Self {
            strict_opening_hours,
        }
    }

    /// Build the complete reading set for `document`, with `weekday` selecting
    /// today's opening hours
    pub fn transform(&self, document: &Value, weekday: Weekday) -> Result<ReadingSet> {
        let source = document.get("_source").unwrap_or(&NULL);
        let mut readings = ReadingSet::new();

        for reading in weather_readings(source) {
            readings.insert(reading);
        }

        let lifts = source.get("lifts").unwrap_or(&NULL);
        for reading in count_readings(lifts, "lifts", "lifts_status_text") {
            readings.insert(reading);
        }

        let slopes = source.get("slopes").unwrap_or(&NULL);
        for reading in count_readings(slopes, "slopes", "slopes_status") {
            readings.insert(reading);
        }

        for reading in lifecycle_readings(source) {
            readings.insert(reading);
        }

        readings.insert(self.opening_hours_today(source, weekday)?);

        for reading in lift_readings(source) {
            readings.insert(reading);
        }

        Ok(readings)
    }

    fn opening_hours_today(&self, source: &Value, weekday: Weekday) -> Result<Reading> {
        let Some(hours) = source.get("opening_hours").filter(|v| !v.is_null()) else {
            return Ok(Reading::new(
                "opening_hours_today",
                ReadingValue::Null,
                "opening_hours",
            ));
        };

        let day = weekday_key(weekday);
        let window = hours.get(day).and_then(|today| {
            let from = scalar_text(today.get("from"))?;
            let to = scalar_text(today.get("to"))?;
            Some(format!("{from} - {to}"))
        });

        let value = match window {
            Some(window) => ReadingValue::Text(window),
            None if self.strict_opening_hours => {
                return Err(FnuggError::missing_field(format!(
                    "opening_hours.{day}.from/to"
                )));
            }
            None => ReadingValue::Null,
        };

        Ok(Reading::new("opening_hours_today", value, "opening_hours")
            .with_attribute("opening_hours", hours.clone())
            .with_attribute("icon", json!("mdi:clock-outline")))
    }
}

fn weather_readings(source: &Value) -> Vec<Reading> {
    let top = source.pointer("/conditions/combined/top").unwrap_or(&NULL);
    let last_sample = top.get("last_updated");

    let weather = |key: &str, pointer: &str, icon: &str| {
        Reading::simple(key, number_at(top, pointer))
            .with_attribute("icon", json!(icon))
            .with_optional_attribute("last_sample", last_sample)
    };

    vec![
        weather("temp", "/temperature/value", "mdi:thermometer"),
        weather("wind_speed", "/wind/mps", "mdi:weather-windy"),
        weather("wind_direction", "/wind/degree", "mdi:compass-outline"),
        weather("snow_depth", "/snow/depth", "mdi:snowflake"),
        weather("new_snow", "/snow/today", "mdi:snowflake-variant"),
        Reading::simple(
            "condition_description",
            scalar_text(top.get("condition_description")).into(),
        )
        .with_optional_attribute("last_sample", last_sample),
    ]
}

/// `{noun}_total`, `{noun}_open`, `{noun}_percentage` and the text summary
fn count_readings(section: &Value, noun: &str, text_key: &str) -> Vec<Reading> {
    let open = count_at(section.get("open"));
    let total = count_at(section.get("count"));
    let (open_n, total_n) = (open.unwrap_or(0), total.unwrap_or(0));

    vec![
        Reading::simple(format!("{noun}_total"), total.into()),
        Reading::simple(format!("{noun}_open"), open.into()),
        Reading::simple(
            format!("{noun}_percentage"),
            Some(percentage(open_n, total_n)).into(),
        ),
        Reading::simple(text_key, ReadingValue::Text(status_text(open_n, total_n, noun))),
    ]
}

fn lifecycle_readings(source: &Value) -> Vec<Reading> {
    vec![
        Reading::simple(
            "resort_opening_date",
            scalar_text(source.get("resort_opening_date")).into(),
        ),
        Reading::simple(
            "resort_closing_date",
            scalar_text(source.get("resort_closing_date")).into(),
        ),
        Reading::simple("last_updated", timestamp_at(source.get("last_updated"))),
        Reading::simple(
            "resort_status",
            source.get("resort_open").and_then(Value::as_bool).into(),
        )
        .with_optional_attribute("contact", source.get("contact")),
    ]
}

/// One reading per named lift. Names that normalize to the same key share a
/// reading; the later lift in the list wins.
fn lift_readings(source: &Value) -> Vec<Reading> {
    let Some(lifts) = source.pointer("/lifts/list").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut readings = Vec::with_capacity(lifts.len());
    for lift in lifts {
        let Some(name) = lift.get("name").and_then(Value::as_str) else {
            continue;
        };
        let Some(key) = lift_key(name) else {
            continue;
        };
        if !seen.insert(key.clone()) {
            warn!(key = %key, lift = name.trim(), "Lift name collides with an earlier lift, replacing it");
        }

        let status = LiftStatus::from_code(lift.get("status"));
        readings.push(
            Reading::new(key, ReadingValue::text(status.as_str()), LIFT_STATUS_CATEGORY)
                .with_attribute("name", json!(name.trim()))
                .with_attribute("icon", json!("mdi:ski-lift"))
                .with_optional_attribute("status_code", lift.get("status"))
                .with_optional_attribute("slope_difficulty", lift.get("slope_difficulty")),
        );
    }
    readings
}

/// Numbers, or numeric strings, at `pointer`
fn number_at(value: &Value, pointer: &str) -> ReadingValue {
    match value.pointer(pointer) {
        Some(Value::Number(n)) => ReadingValue::Number(n.clone()),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_or(ReadingValue::Null, ReadingValue::float),
        _ => ReadingValue::Null,
    }
}

/// Non-negative whole count; fractional counts are rounded
fn count_at(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strings verbatim, numbers rendered; everything else is absent
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn timestamp_at(value: Option<&Value>) -> ReadingValue {
    match scalar_text(value) {
        Some(text) => DateTime::parse_from_rfc3339(&text)
            .map_or(ReadingValue::Text(text), ReadingValue::Timestamp),
        None => ReadingValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn week_hours() -> Value {
        let mut hours = serde_json::Map::new();
        for day in [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ] {
            hours.insert(day.to_string(), json!({"from": "09:00", "to": "16:00"}));
        }
        Value::Object(hours)
    }

    fn full_document() -> Value {
        json!({
            "_id": "14",
            "_source": {
                "name": "Hafjell",
                "resort_open": true,
                "resort_opening_date": "2024-11-30",
                "resort_closing_date": "2025-04-21",
                "last_updated": "2025-01-15T07:30:00+01:00",
                "contact": {"phone": "+47 61 27 47 00"},
                "opening_hours": week_hours(),
                "conditions": {"combined": {"top": {
                    "last_updated": "2025-01-15T07:00:00+01:00",
                    "temperature": {"value": -7.5, "unit": "celsius"},
                    "wind": {"mps": 3.2, "degree": 270},
                    "condition_description": "Lettskyet",
                    "snow": {"depth": 85, "today": 4}
                }}},
                "lifts": {
                    "count": 18,
                    "open": 12,
                    "list": [
                        {"name": "Hafjell Gondol", "status": 1, "slope_difficulty": "red"},
                        {"name": "Skavlen Express", "status": 0},
                        {"name": "Barnetrekket"}
                    ]
                },
                "slopes": {"count": 33, "open": 25}
            }
        })
    }

    fn transform(document: &Value) -> ReadingSet {
        ResortTransform::default()
            .transform(document, Weekday::Wed)
            .unwrap()
    }

    #[test]
    fn test_lift_and_slope_scenario() {
        let document = json!({"_source": {
            "lifts": {"count": 10, "open": 7, "list": [{"name": "Chair 1", "status": 1}]},
            "slopes": {"count": 4, "open": 2}
        }});

        let readings = transform(&document);
        assert_eq!(readings.value("lifts_percentage"), Some(&ReadingValue::integer(70)));
        assert_eq!(readings.value("slopes_percentage"), Some(&ReadingValue::integer(50)));
        assert_eq!(
            readings.value("lift_chair_1"),
            Some(&ReadingValue::text("Open"))
        );
        assert_eq!(
            readings.value("lifts_status_text").and_then(ReadingValue::as_str),
            Some("7 of 10 lifts open (70%)")
        );
        assert_eq!(
            readings.value("slopes_status").and_then(ReadingValue::as_str),
            Some("2 of 4 slopes open (50%)")
        );
    }

    #[test]
    fn test_full_document() {
        let readings = transform(&full_document());

        assert_eq!(readings.value("temp").and_then(ReadingValue::as_f64), Some(-7.5));
        assert_eq!(readings.value("wind_speed").and_then(ReadingValue::as_f64), Some(3.2));
        assert_eq!(readings.value("wind_direction").and_then(ReadingValue::as_i64), Some(270));
        assert_eq!(readings.value("snow_depth").and_then(ReadingValue::as_i64), Some(85));
        assert_eq!(readings.value("new_snow").and_then(ReadingValue::as_i64), Some(4));
        assert_eq!(
            readings.value("condition_description").and_then(ReadingValue::as_str),
            Some("Lettskyet")
        );
        assert_eq!(readings.value("lifts_percentage"), Some(&ReadingValue::integer(67)));
        assert_eq!(readings.value("slopes_percentage"), Some(&ReadingValue::integer(76)));
        assert_eq!(
            readings.value("resort_opening_date").and_then(ReadingValue::as_str),
            Some("2024-11-30")
        );
        assert_eq!(readings.value("resort_status"), Some(&ReadingValue::Bool(true)));
        assert!(matches!(
            readings.value("last_updated"),
            Some(ReadingValue::Timestamp(_))
        ));
        assert_eq!(
            readings.value("opening_hours_today").and_then(ReadingValue::as_str),
            Some("09:00 - 16:00")
        );

        let temp = readings.get("temp").unwrap();
        assert_eq!(
            temp.attribute("last_sample"),
            Some(&json!("2025-01-15T07:00:00+01:00"))
        );
        let status = readings.get("resort_status").unwrap();
        assert_eq!(status.attribute("contact"), Some(&json!({"phone": "+47 61 27 47 00"})));
    }

    #[test]
    fn test_reading_count_is_base_plus_named_lifts() {
        let readings = transform(&full_document());
        assert_eq!(readings.len(), BASE_READING_KEYS.len() + 3);
        for key in BASE_READING_KEYS {
            assert!(readings.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_empty_document_yields_nulls() {
        let readings = transform(&json!({}));

        assert_eq!(readings.len(), BASE_READING_KEYS.len());
        assert!(readings.value("temp").unwrap().is_null());
        assert!(readings.value("lifts_total").unwrap().is_null());
        assert!(readings.value("opening_hours_today").unwrap().is_null());
        assert_eq!(readings.value("lifts_percentage"), Some(&ReadingValue::integer(0)));
        assert_eq!(
            readings.value("lifts_status_text").and_then(ReadingValue::as_str),
            Some("0 of 0 lifts open (0%)")
        );
    }

    #[test]
    fn test_lift_details() {
        let readings = transform(&full_document());

        let gondola = readings.get("lift_hafjell_gondol").unwrap();
        assert_eq!(gondola.value, ReadingValue::text("Open"));
        assert_eq!(gondola.category, LIFT_STATUS_CATEGORY);
        assert_eq!(gondola.attribute("slope_difficulty"), Some(&json!("red")));

        let express = readings.get("lift_skavlen_express").unwrap();
        assert_eq!(express.value, ReadingValue::text("Closed"));
        assert!(express.attribute("slope_difficulty").is_none());

        let tow = readings.get("lift_barnetrekket").unwrap();
        assert_eq!(tow.value, ReadingValue::text("Unknown"));
        assert!(tow.attribute("status_code").is_none());
    }

    #[test]
    fn test_colliding_lift_names_share_one_reading() {
        let document = json!({"_source": {"lifts": {"list": [
            {"name": "Chair 1", "status": 1},
            {"name": "chair_1", "status": 0}
        ]}}});

        let readings = transform(&document);
        assert_eq!(readings.len(), BASE_READING_KEYS.len() + 1);

        let chair = readings.get("lift_chair_1").unwrap();
        assert_eq!(chair.value, ReadingValue::text("Closed"));
        assert_eq!(chair.attribute("name"), Some(&json!("chair_1")));
    }

    #[test]
    fn test_blank_lift_names_excluded() {
        let document = json!({"_source": {"lifts": {"list": [
            {"name": "", "status": 1},
            {"name": "   ", "status": 1},
            {"status": 0},
            {"name": "T-bar", "status": 7}
        ]}}});

        let readings = transform(&document);
        let lift_keys: Vec<&str> = readings
            .keys()
            .filter(|key| key.starts_with(LIFT_KEY_PREFIX))
            .collect();
        assert_eq!(lift_keys, vec!["lift_t-bar"]);
        assert_eq!(readings.value("lift_t-bar"), Some(&ReadingValue::text("Unknown")));
    }

    #[rstest]
    #[case(7, 10, 70)]
    #[case(2, 4, 50)]
    #[case(0, 5, 0)]
    #[case(5, 5, 100)]
    #[case(3, 0, 0)]
    #[case(0, 0, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 8, 12)]
    fn test_percentage(#[case] open: u64, #[case] total: u64, #[case] expected: u64) {
        assert_eq!(percentage(open, total), expected);
    }

    #[test]
    fn test_percentage_bounded_when_open_within_total() {
        for total in 1..=40 {
            for open in 0..=total {
                assert!(percentage(open, total) <= 100);
            }
        }
    }

    #[test]
    fn test_numeric_strings_and_fractional_counts() {
        let document = json!({"_source": {
            "conditions": {"combined": {"top": {"temperature": {"value": "-3.5"}}}},
            "lifts": {"count": "10", "open": 4.0}
        }});

        let readings = transform(&document);
        assert_eq!(readings.value("temp").and_then(ReadingValue::as_f64), Some(-3.5));
        assert_eq!(readings.value("lifts_total").and_then(ReadingValue::as_i64), Some(10));
        assert_eq!(readings.value("lifts_open").and_then(ReadingValue::as_i64), Some(4));
        assert_eq!(readings.value("lifts_percentage"), Some(&ReadingValue::integer(40)));
    }

    #[test]
    fn test_unparsable_last_updated_kept_as_text() {
        let document = json!({"_source": {"last_updated": "yesterday"}});
        assert_eq!(
            transform(&document).value("last_updated"),
            Some(&ReadingValue::text("yesterday"))
        );
    }

    #[test]
    fn test_missing_weekday_fails_in_strict_mode() {
        let document = json!({"_source": {"opening_hours": {
            "monday": {"from": "09:00", "to": "16:00"}
        }}});

        let result = ResortTransform::new(true).transform(&document, Weekday::Sat);
        assert!(matches!(result, Err(FnuggError::MissingField(_))));
    }

    #[test]
    fn test_missing_window_bound_fails_in_strict_mode() {
        let document = json!({"_source": {"opening_hours": {
            "saturday": {"from": "09:00"}
        }}});

        let result = ResortTransform::new(true).transform(&document, Weekday::Sat);
        assert!(matches!(result, Err(FnuggError::MissingField(_))));
    }

    #[test]
    fn test_missing_weekday_is_null_in_lenient_mode() {
        let document = json!({"_source": {"opening_hours": {
            "monday": {"from": "09:00", "to": "16:00"}
        }}});

        let readings = ResortTransform::new(false)
            .transform(&document, Weekday::Sat)
            .unwrap();
        let today = readings.get("opening_hours_today").unwrap();
        assert!(today.value.is_null());
        assert!(today.attribute("opening_hours").is_some());
    }

    #[test]
    fn test_weekday_selects_window() {
        let document = json!({"_source": {"opening_hours": {
            "sunday": {"from": "10:00", "to": "15:00"},
            "monday": {"from": "09:00", "to": "16:00"}
        }}});

        let readings = ResortTransform::new(false)
            .transform(&document, Weekday::Sun)
            .unwrap();
        assert_eq!(
            readings.value("opening_hours_today").and_then(ReadingValue::as_str),
            Some("10:00 - 15:00")
        );
    }

    #[rstest]
    #[case("Chair 1", Some("lift_chair_1"))]
    #[case("  Hafjell Gondol ", Some("lift_hafjell_gondol"))]
    #[case("\t", None)]
    fn test_lift_key(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(lift_key(name).as_deref(), expected);
    }
}
