// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerant deserializers for values coming back from the remote service.
//!
//! The restaurant service stores some numbers and booleans as strings
//! (`"restaurant_id": "3"`, `"is_favorite": "true"`) and timestamps as epoch
//! milliseconds or RFC 3339 strings depending on the record's age. These
//! helpers accept every form and always serialize the canonical one.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

/// Deserialize an integer that may be encoded as a JSON string.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => Ok(n),
        NumberOrString::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        NumberOrString::Float(f) => Err(de::Error::custom(format!("not an integer: {f}"))),
        NumberOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("not an integer: '{s}'"))),
    }
}

/// Deserialize a boolean that may be encoded as `"true"`/`"false"`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.trim() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("not a boolean: '{other}'"))),
        },
    }
}

/// Timestamps as epoch milliseconds or RFC 3339 strings; `null` and missing
/// values become `None`.
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
        match value {
            None => Ok(None),
            Some(NumberOrString::Int(ms)) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
            Some(NumberOrString::Float(ms)) => Utc
                .timestamp_millis_opt(ms as i64)
                .single()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
            Some(NumberOrString::Str(s)) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|_| de::Error::custom(format!("invalid timestamp '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "lenient_tests.rs"]
mod tests;
