//! # Flat Inputs
//!
//! The submitted form data, keyed by flat key. Top-level fields map to a
//! single value; fields inside a fieldset map to an array holding one value
//! per repetition, index-aligned across all children of that fieldset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormError;
use crate::path::KeyPath;
use crate::presence::Presence;

/// A flat input map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatInputs(Map<String, Value>);

impl FlatInputs {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, FormError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(FormError::load(
                "inputs",
                format!("expected an object of flat keys, got {}", kind_name(&other)),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        self.0.get(&path.encode())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn presence(&self, key: &str) -> Presence {
        Presence::of(self.0.get(key))
    }

    /// Number of repetitions stored under `key`.
    ///
    /// `None` when the key is absent or null; `Some(0)` when the value is
    /// present but not an array.
    pub fn repetitions(&self, key: &str) -> Option<usize> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.len()),
            Some(_) => Some(0),
        }
    }

    /// The value of one repetition of a repeated key.
    pub fn element(&self, key: &str, index: usize) -> Option<&Value> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items.get(index),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FlatInputs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for FlatInputs {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
