//! Column value encoding.
//!
//! The write half of the column mapping; the read half lives on
//! [`Row`](crate::session::Row).
//!
//! - UUIDs are stored as canonical lower-case text.
//! - Timestamps are stored as integer epoch milliseconds.
//! - Enums are stored as their textual name.
//! - Sets are stored as a JSON array of text; an empty set is stored as NULL.

use std::collections::BTreeSet;
use std::fmt::Display;

use rusqlite::types::Value;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// Canonical form of an id; input that is not a UUID is kept verbatim.
pub fn canonical_id(id: &str) -> String {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .unwrap_or_else(|_| id.to_string())
}

pub fn uuid(id: &str) -> Value {
    Value::Text(canonical_id(id))
}

pub fn optional_uuid(id: Option<&str>) -> Value {
    id.map_or(Value::Null, uuid)
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

pub fn timestamp(millis: Option<i64>) -> Value {
    millis.map_or(Value::Null, Value::Integer)
}

pub fn integer(value: i64) -> Value {
    Value::Integer(value)
}

pub fn blob(bytes: &[u8]) -> Value {
    Value::Blob(bytes.to_vec())
}

pub fn enum_name<T: Display>(value: Option<&T>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.to_string()))
}

/// Encode a set of ids, canonicalizing each member.
pub fn uuid_set<'a, I>(ids: I) -> Value
where
    I: IntoIterator<Item = &'a String>,
{
    let canonical: BTreeSet<String> = ids.into_iter().map(|id| canonical_id(id)).collect();
    string_set(canonical.iter().map(String::as_str))
}

pub fn enum_set<'a, T, I>(values: I) -> Value
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let names: BTreeSet<String> = values.into_iter().map(|v| v.to_string()).collect();
    string_set(names.iter().map(String::as_str))
}

fn string_set<'a>(values: impl Iterator<Item = &'a str>) -> Value {
    let values: Vec<&str> = values.collect();
    if values.is_empty() {
        return Value::Null;
    }
    match serde_json::to_string(&values) {
        Ok(json) => Value::Text(json),
        Err(_) => Value::Null,
    }
}

/// Serialize a structured payload into a JSON text column.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(Value::Text(serde_json::to_string(value)?))
}

/// Whole seconds covering `millis`, rounded up.
pub fn millis_to_seconds_ceil(millis: i64) -> i64 {
    let seconds = millis.div_euclid(1000);
    if millis.rem_euclid(1000) > 0 {
        seconds + 1
    } else {
        seconds
    }
}
