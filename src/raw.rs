//! Tolerant accessors over schema-less search records.
//!
//! The search service guarantees nothing about record shape, so every lookup
//! here degrades to a default (empty string, empty slice, `None`) on absence,
//! `null`, or a type mismatch. The normalizer never has to null-check.

use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Borrowed view over one raw record (or any nested part of it)
#[derive(Debug, Clone, Copy)]
pub struct RawItem<'a> {
    value: &'a Value,
}

impl<'a> RawItem<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Nested lookup; yields a `null` view when the key is missing or
    /// this value is not an object.
    pub fn get(&self, key: &str) -> RawItem<'a> {
        let value = self.value.get(key).unwrap_or(&NULL);
        RawItem { value }
    }

    /// The mapping behind this view, if it is one
    pub fn object(&self) -> Option<&'a Map<String, Value>> {
        self.value.as_object()
    }

    /// String value of `key`, or `""` when absent, `null` or not a string.
    pub fn str_field(&self, key: &str) -> &'a str {
        self.value.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// First non-empty string among `keys`, in order
    pub fn first_str(&self, keys: &[&str]) -> &'a str {
        keys.iter()
            .map(|key| self.str_field(key))
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Array value of `key`, or an empty slice
    pub fn array(&self, key: &str) -> &'a [Value] {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Integer value of `key`. Integer-valued strings ("2021") are accepted,
    /// anything else yields `None`.
    pub fn int_field(&self, key: &str) -> Option<i64> {
        match self.value.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Render a loose JSON term as text. `null` has no text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
