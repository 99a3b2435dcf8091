//! Interval entries: the element type of a permit's `subjects` and `areas`.
//!
//! Both lists share one shape, `{<key>, start_time, end_time}`, and one
//! validator. [`EntryKey`] is the only thing that differs between them.

use crate::error::ValidationError;
use crate::types::area::AreaIdentifier;
use crate::types::registration::SubjectRegistration;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const START_TIME: &str = "start_time";
const END_TIME: &str = "end_time";

/// The identifying half of an interval entry.
pub trait EntryKey: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Name of the list holding these entries on a permit.
    const LIST: &'static str;
    /// JSON field carrying the key inside each entry.
    const FIELD: &'static str;

    fn parse(raw: &str) -> Result<Self, String>;

    fn as_text(&self) -> &str;
}

impl EntryKey for SubjectRegistration {
    const LIST: &'static str = "subjects";
    const FIELD: &'static str = "registration_number";

    fn parse(raw: &str) -> Result<Self, String> {
        Self::try_new(raw.to_string()).map_err(|e| e.to_string())
    }

    fn as_text(&self) -> &str {
        self.as_str()
    }
}

impl EntryKey for AreaIdentifier {
    const LIST: &'static str = "areas";
    const FIELD: &'static str = "area";

    fn parse(raw: &str) -> Result<Self, String> {
        Self::try_new(raw.to_string()).map_err(|e| e.to_string())
    }

    fn as_text(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalEntry<K> {
    pub key: K,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A permit's vehicle entry.
pub type Subject = IntervalEntry<SubjectRegistration>;

/// A permit's area entry.
pub type AreaEntry = IntervalEntry<AreaIdentifier>;

impl<K: EntryKey> IntervalEntry<K> {
    pub fn new(key: K, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            key,
            start_time,
            end_time,
        }
    }

    /// Validates and parses a JSON list of entries.
    ///
    /// `null` is an empty list. Each element must be an object with exactly
    /// the key field, `start_time` and `end_time`; timestamps are RFC 3339
    /// with an explicit offset.
    pub fn parse_list(value: &Value) -> Result<Vec<Self>, ValidationError> {
        let items = match value {
            Value::Null => return Ok(Vec::new()),
            Value::Array(items) => items,
            _ => return Err(ValidationError::NotAList { field: K::LIST }),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Self::parse_entry(item).map_err(|reason| ValidationError::Entry {
                    field: K::LIST,
                    index,
                    reason,
                })
            })
            .collect()
    }

    fn parse_entry(item: &Value) -> Result<Self, String> {
        let Value::Object(map) = item else {
            return Err("expected an object".to_string());
        };

        if let Some(unknown) = map
            .keys()
            .find(|k| ![K::FIELD, START_TIME, END_TIME].contains(&k.as_str()))
        {
            return Err(format!("unknown key {unknown:?}"));
        }

        let key = K::parse(required_str(map, K::FIELD)?)
            .map_err(|reason| format!("{}: {reason}", K::FIELD))?;
        let start_time = required_timestamp(map, START_TIME)?;
        let end_time = required_timestamp(map, END_TIME)?;

        Ok(Self {
            key,
            start_time,
            end_time,
        })
    }

    /// Renders entries back in the list schema accepted by [`Self::parse_list`].
    pub fn to_json(entries: &[Self]) -> Value {
        Value::Array(
            entries
                .iter()
                .map(|entry| {
                    let mut map = Map::new();
                    map.insert(K::FIELD.to_string(), Value::from(entry.key.as_text()));
                    map.insert(START_TIME.to_string(), Value::from(format_ts(entry.start_time)));
                    map.insert(END_TIME.to_string(), Value::from(format_ts(entry.end_time)));
                    Value::Object(map)
                })
                .collect(),
        )
    }
}

fn required_str<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a str, String> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(format!("{field}: expected a string")),
        None => Err(format!("missing key {field:?}")),
    }
}

fn required_timestamp(map: &Map<String, Value>, field: &str) -> Result<DateTime<Utc>, String> {
    let raw = required_str(map, field)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("{field}: invalid timestamp {raw:?}: {e}"))
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests;
