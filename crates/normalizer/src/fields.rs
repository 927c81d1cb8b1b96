//! Typed readers over an untyped JSON tree.
//!
//! A [`Section`] is one JSON object plus its dotted path from the payload
//! root. Absent keys and explicit `null` are treated the same way.

use crate::error::{NormalizationError, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Calendar date format used by the registry (ISO-8601 `yyyy-mm-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A JSON object within the payload.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    path: String,
    fields: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    /// The payload root. Fails unless it is a JSON object.
    pub fn root(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(|fields| Self {
                path: String::new(),
                fields,
            })
            .ok_or_else(|| NormalizationError::Malformed("payload root is not a JSON object".to_string()))
    }

    /// Dotted path of this section; empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Nested section, or `None` when absent or null.
    pub fn optional_section(&self, key: &str) -> Result<Option<Section<'a>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(Section {
                path: self.field_path(key),
                fields,
            })),
            Some(other) => Err(self.invalid_value(key, other)),
        }
    }

    pub fn required_section(&self, key: &str) -> Result<Section<'a>> {
        self.optional_section(key)?
            .ok_or_else(|| self.missing(key))
    }

    pub fn optional_text(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => coerce_text(value)
                .map(Some)
                .ok_or_else(|| self.invalid_value(key, value)),
        }
    }

    pub fn required_text(&self, key: &str) -> Result<String> {
        self.optional_text(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => coerce_bool(value)
                .map(Some)
                .ok_or_else(|| self.invalid_value(key, value)),
        }
    }

    pub fn required_bool(&self, key: &str) -> Result<bool> {
        self.optional_bool(key)?.ok_or_else(|| self.missing(key))
    }

    /// Date that may be missing. A present value must still parse.
    pub fn optional_date(&self, key: &str) -> Result<Option<NaiveDate>> {
        self.get(key)
            .map(|value| self.parse_date(key, value))
            .transpose()
    }

    pub fn required_date(&self, key: &str) -> Result<NaiveDate> {
        self.optional_date(key)?.ok_or_else(|| self.missing(key))
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    fn parse_date(&self, key: &str, value: &Value) -> Result<NaiveDate> {
        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let parsed = if is_calendar_date_shape(&raw) {
            NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok()
        } else {
            None
        };
        parsed.ok_or_else(|| NormalizationError::InvalidDate {
            field: self.field_path(key),
            raw_value: raw,
        })
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn missing(&self, key: &str) -> NormalizationError {
        NormalizationError::MissingMandatoryField {
            field: self.field_path(key),
        }
    }

    fn invalid_value(&self, key: &str, value: &Value) -> NormalizationError {
        NormalizationError::InvalidValue {
            field: self.field_path(key),
            raw_value: value.to_string(),
        }
    }
}

/// Exactly `dddd-dd-dd`. chrono alone accepts unpadded fields, a signed
/// year and leading whitespace.
fn is_calendar_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strings, numbers and booleans render as text; containers do not.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The registry is loose about boolean typing.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}
