//! Host-facing sensor view of a single reading
//!
//! The host registers one value holder per reading key and asks for the
//! value, unit, device class, state class and attributes on every update.

use crate::config::ResortEntry;
use crate::services::reading_registry::{DeviceClass, ReadingRegistry, StateClass};
use crate::services::readings::{Reading, ReadingValue};
use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute the transform uses for the upstream sample time
pub const LAST_SAMPLE_ATTRIBUTE: &str = "last_sample";

/// Normalized sample time exposed to the host
pub const TIMESTAMP_ATTRIBUTE: &str = "timestamp";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResortSensor {
    pub unique_id: String,
    pub name: String,
    pub key: String,
    pub value: ReadingValue,
    pub unit: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub attributes: BTreeMap<String, Value>,
}

impl ResortSensor {
    pub fn from_reading(entry: &ResortEntry, reading: &Reading, registry: &ReadingRegistry) -> Self {
        let metadata = registry.lookup(&reading.category);
        let mut attributes = reading.attributes.clone();

        let sample_time = reading
            .attribute(LAST_SAMPLE_ATTRIBUTE)
            .and_then(Value::as_str)
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok());
        if let Some(sample_time) = sample_time {
            attributes.insert(
                TIMESTAMP_ATTRIBUTE.to_string(),
                Value::String(sample_time.to_rfc3339()),
            );
        }

        Self {
            unique_id: format!("{}_{}", entry.unique_id(), reading.key),
            name: format!("{} {}", entry.name, humanize(&reading.key)),
            key: reading.key.clone(),
            value: reading.value.clone(),
            unit: metadata.unit,
            device_class: metadata.device_class,
            state_class: registry.state_class(&reading.key, &reading.category),
            attributes,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.value.is_null()
    }
}

/// "lifts_percentage" -> "Lifts Percentage"
fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
