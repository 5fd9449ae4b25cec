//! Raw and canonical record types.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// A row exactly as produced by the external file parser: external header
/// text mapped to the raw cell string. Immutable input to the pipeline.
pub type RawRecord = BTreeMap<String, String>;

/// A typed canonical value produced by normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Free text, trimmed.
    Text(String),
    /// Integer, including currency in minor units and resolved ids.
    Int(i64),
    Bool(bool),
    /// Instant anchored to the fixed import offset.
    DateTime(DateTime<FixedOffset>),
    /// Present in the input but not coercible; the validator decides
    /// whether that is acceptable for the field.
    Undefined,
}

impl Value {
    /// Renders the value the way an operator typed it, for composite keys
    /// and foreign-key references.
    pub fn display(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Int(n) => n.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::DateTime(instant) => instant.to_rfc3339(),
            Value::Undefined => String::new(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::DateTime(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            Value::Undefined => serializer.serialize_none(),
        }
    }
}

/// A record whose keys are canonical field names and whose values are
/// already type-coerced. Serializes to the JSON body the persistence API
/// expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    fields: BTreeMap<String, Value>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The text content of a field, if it holds text.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(Value::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.fields.get(key) {
            Some(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn date_time(&self, key: &str) -> Option<&DateTime<FixedOffset>> {
        match self.fields.get(key) {
            Some(Value::DateTime(instant)) => Some(instant),
            _ => None,
        }
    }

    /// True when the field is absent, undefined, or blank text.
    pub fn is_missing(&self, key: &str) -> bool {
        match self.fields.get(key) {
            None | Some(Value::Undefined) => true,
            Some(Value::Text(text)) => text.trim().is_empty(),
            Some(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for CanonicalRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
