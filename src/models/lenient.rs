//! Tolerant field decoders for directory records.
//!
//! The directory is an external, loosely-shaped JSON document. Every decoder here accepts
//! whatever value is present and degrades to the neutral value instead of failing the record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::practitioner::{Clinic, Speciality};

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

/// Like [`text`], but blank values collapse to `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).filter(|s| !s.trim().is_empty()))
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

pub fn specialities<'de, D>(deserializer: D) -> Result<Vec<Speciality>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut obj) => obj
                .remove("name")
                .and_then(value_to_text)
                .map(|name| Speciality { name }),
            Value::String(name) => Some(Speciality { name }),
            _ => None,
        })
        .filter(|spec| !spec.name.trim().is_empty())
        .collect())
}

pub fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.into_iter().filter_map(value_to_text).collect()),
        _ => None,
    })
}

pub fn clinic<'de, D>(deserializer: D) -> Result<Option<Clinic>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}
