//! Reading registry: unit and classification metadata per reading category
//!
//! The table is immutable. Fetchers receive it as an `Arc<ReadingRegistry>`
//! so tests and hosts can substitute their own.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Semantic device class of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Temperature,
    WindSpeed,
    Date,
    Timestamp,
    Enum,
}

/// How the host should treat successive values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
}

/// Metadata for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub unit: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    pub is_numeric_measurement: bool,
}

impl RegistryEntry {
    pub const TEXT: Self = Self {
        unit: None,
        device_class: None,
        is_numeric_measurement: false,
    };

    const fn measurement(unit: &'static str, device_class: Option<DeviceClass>) -> Self {
        Self {
            unit: Some(unit),
            device_class,
            is_numeric_measurement: true,
        }
    }

    const fn classified(device_class: DeviceClass) -> Self {
        Self {
            unit: None,
            device_class: Some(device_class),
            is_numeric_measurement: false,
        }
    }
}

pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_METERS_PER_SECOND: &str = "m/s";
pub const UNIT_DEGREE: &str = "°";
pub const UNIT_CENTIMETERS: &str = "cm";
pub const UNIT_PERCENTAGE: &str = "%";
pub const UNIT_LIFTS: &str = "lifts";
pub const UNIT_SLOPES: &str = "slopes";

const BUILTIN_CATEGORIES: &[(&str, RegistryEntry)] = &[
    // Resort lifecycle
    ("resort_status", RegistryEntry::TEXT),
    ("resort_opening_date", RegistryEntry::classified(DeviceClass::Date)),
    ("resort_closing_date", RegistryEntry::classified(DeviceClass::Date)),
    ("last_updated", RegistryEntry::classified(DeviceClass::Timestamp)),
    ("opening_hours", RegistryEntry::TEXT),
    ("facility_status", RegistryEntry::TEXT),
    // Weather
    (
        "temp",
        RegistryEntry::measurement(UNIT_CELSIUS, Some(DeviceClass::Temperature)),
    ),
    (
        "wind_speed",
        RegistryEntry::measurement(UNIT_METERS_PER_SECOND, Some(DeviceClass::WindSpeed)),
    ),
    ("wind_direction", RegistryEntry::measurement(UNIT_DEGREE, None)),
    ("condition_description", RegistryEntry::TEXT),
    // Snow
    ("snow_depth", RegistryEntry::measurement(UNIT_CENTIMETERS, None)),
    ("new_snow", RegistryEntry::measurement(UNIT_CENTIMETERS, None)),
    // Lifts
    ("lifts_total", RegistryEntry::measurement(UNIT_LIFTS, None)),
    ("lifts_open", RegistryEntry::measurement(UNIT_LIFTS, None)),
    ("lifts_percentage", RegistryEntry::measurement(UNIT_PERCENTAGE, None)),
    ("lifts_status_text", RegistryEntry::TEXT),
    ("lift_status", RegistryEntry::classified(DeviceClass::Enum)),
    // Slopes
    ("slopes_total", RegistryEntry::measurement(UNIT_SLOPES, None)),
    ("slopes_open", RegistryEntry::measurement(UNIT_SLOPES, None)),
    ("slopes_percentage", RegistryEntry::measurement(UNIT_PERCENTAGE, None)),
    ("slopes_status", RegistryEntry::TEXT),
];

/// Reading keys that are always measurements
pub const NUMERIC_READINGS: &[&str] = &[
    "temp",
    "wind_speed",
    "snow_depth",
    "new_snow",
    "lifts_open",
    "lifts_total",
    "slopes_open",
    "slopes_total",
    "lifts_percentage",
    "slopes_percentage",
];

/// Categories that never get a state class
pub const TEXT_CATEGORIES: &[&str] = &[
    "resort_status",
    "condition_description",
    "lifts_status_text",
    "slopes_status",
    "facility_status",
    "lift_status",
    "opening_hours",
];

const NUMERIC_SUFFIX: &str = "_numeric";
const TEXT_SUFFIX: &str = "_text";

static SHARED: Lazy<Arc<ReadingRegistry>> = Lazy::new(|| Arc::new(ReadingRegistry::builtin()));

/// Category lookup table
#[derive(Debug, Clone)]
pub struct ReadingRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

impl Default for ReadingRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReadingRegistry {
    /// The built-in category table
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_CATEGORIES.iter().copied())
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, RegistryEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Process-wide handle to the built-in table
    pub fn shared() -> Arc<Self> {
        SHARED.clone()
    }

    pub fn get(&self, category: &str) -> Option<&RegistryEntry> {
        self.entries.get(category)
    }

    /// Entry for `category`; unknown categories degrade to unitless text
    pub fn lookup(&self, category: &str) -> RegistryEntry {
        self.get(category).copied().unwrap_or(RegistryEntry::TEXT)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State class for a reading.
    ///
    /// Text overrides win over everything: a `_text` key or a listed text
    /// category has no state class. Otherwise a `_numeric` key, a listed
    /// numeric key or a numeric category entry makes it a measurement.
    pub fn state_class(&self, key: &str, category: &str) -> Option<StateClass> {
        if key.ends_with(TEXT_SUFFIX)
            || TEXT_CATEGORIES.contains(&category)
            || TEXT_CATEGORIES.contains(&key)
        {
            return None;
        }

        let numeric = key.ends_with(NUMERIC_SUFFIX)
            || NUMERIC_READINGS.contains(&key)
            || self.lookup(category).is_numeric_measurement;

        numeric.then_some(StateClass::Measurement)
    }
}
