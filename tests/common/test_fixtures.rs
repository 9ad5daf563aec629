//! JSON payloads shaped like the Fnugg API

use serde_json::{json, Map, Value};

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Opening hours with the same window every day
pub fn opening_hours(from: &str, to: &str) -> Value {
    let mut hours = Map::new();
    for day in WEEKDAYS {
        hours.insert(day.to_string(), json!({"from": from, "to": to}));
    }
    Value::Object(hours)
}

/// Search response with the given (id, name) hits
pub fn search_response(hits: &[(&str, &str)]) -> Value {
    let hits: Vec<Value> = hits
        .iter()
        .map(|(id, name)| json!({"_id": id, "_source": {"name": name}}))
        .collect();
    json!({"hits": {"total": hits.len(), "hits": hits}})
}

/// Complete resort document with three named lifts
pub fn resort_document(lifts_open: u64, temperature: f64) -> Value {
    json!({
        "_id": "14",
        "_source": {
            "name": "Hafjell",
            "resort_open": true,
            "resort_opening_date": "2024-11-30",
            "resort_closing_date": "2025-04-21",
            "last_updated": "2025-01-15T07:30:00+01:00",
            "contact": {"phone": "+47 61 27 47 00", "email": "post@hafjell.no"},
            "opening_hours": opening_hours("09:00", "16:00"),
            "conditions": {"combined": {"top": {
                "last_updated": "2025-01-15T07:00:00+01:00",
                "temperature": {"value": temperature, "unit": "celsius"},
                "wind": {"mps": 3.2, "degree": 270, "speed": "Svak vind"},
                "condition_description": "Lettskyet",
                "snow": {"depth": 85, "today": 4}
            }}},
            "lifts": {
                "count": 10,
                "open": lifts_open,
                "list": [
                    {"name": "Hafjell Gondol", "status": 1, "slope_difficulty": "red"},
                    {"name": "Skavlen Express", "status": 0},
                    {"name": "Chair 1"},
                    {"name": "  ", "status": 1}
                ]
            },
            "slopes": {"count": 4, "open": 2}
        }
    })
}

/// Number of lifts in [`resort_document`] with a usable name
pub const NAMED_LIFTS: usize = 3;
