//! Reading model: one named, typed value derived from a resort payload

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Value of a single reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    /// Absent or unavailable
    Null,
    Bool(bool),
    Number(Number),
    Timestamp(DateTime<FixedOffset>),
    Text(String),
}

impl ReadingValue {
    pub fn integer(value: i64) -> Self {
        Self::Number(Number::from(value))
    }

    /// Non-finite floats become `Null`
    pub fn float(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }

    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ReadingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Option<bool>> for ReadingValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Null, Self::Bool)
    }
}

impl From<Option<u64>> for ReadingValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Null, |n| Self::Number(Number::from(n)))
    }
}

impl From<Option<String>> for ReadingValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// One named reading with its category and auxiliary attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Stable reading key, e.g. "temp" or "lift_chair_1"
    pub key: String,

    pub value: ReadingValue,

    /// Registry category selecting unit/device-class metadata
    pub category: String,

    /// Icon hints, payload context, raw sub-objects
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Reading {
    pub fn new<K: Into<String>, C: Into<String>>(key: K, value: ReadingValue, category: C) -> Self {
        Self {
            key: key.into(),
            value,
            category: category.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Reading whose category matches its key
    pub fn simple<K: Into<String>>(key: K, value: ReadingValue) -> Self {
        let key = key.into();
        Self::new(key.clone(), value, key)
    }

    #[must_use]
    pub fn with_attribute<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Attach an attribute only when a value is present
    #[must_use]
    pub fn with_optional_attribute<K: Into<String>>(self, key: K, value: Option<&Value>) -> Self {
        match value {
            Some(v) if !v.is_null() => self.with_attribute(key, v.clone()),
            _ => self,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Complete snapshot of one resort's readings, keyed by reading key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingSet {
    readings: BTreeMap<String, Reading>,
}

impl ReadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reading, replacing any previous reading with the same key
    pub fn insert(&mut self, reading: Reading) -> Option<Reading> {
        self.readings.insert(reading.key.clone(), reading)
    }

    pub fn get(&self, key: &str) -> Option<&Reading> {
        self.readings.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&ReadingValue> {
        self.get(key).map(|reading| &reading.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.readings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.readings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.values()
    }
}

impl FromIterator<Reading> for ReadingSet {
    fn from_iter<T: IntoIterator<Item = Reading>>(iter: T) -> Self {
        let mut set = Self::new();
        for reading in iter {
            set.insert(reading);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ReadingSet {
    type Item = &'a Reading;
    type IntoIter = std::collections::btree_map::Values<'a, String, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.values()
    }
}
