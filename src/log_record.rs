//! Log record representation for remote shipping.
//!
//! A [`LogRecord`] is the parsed form of one payload emitted by the logging
//! front end: a JSON object whose field order is preserved exactly as it
//! arrived. Anything other than an object at the top level is rejected.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::handler::SyncError;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogRecord {
    fields: Map<String, Value>,
}

impl LogRecord {
    /// Parse a serialised payload into a record.
    ///
    /// Trailing whitespace is accepted so payloads ending in the newline most
    /// JSON encoders append parse cleanly.
    pub fn parse(payload: &[u8]) -> Result<Self, SyncError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|err| SyncError::MalformedRecord(err.to_string()))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SyncError::MalformedRecord(format!(
                "expected a JSON object, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Wrap an already parsed field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert or overwrite a field, keeping its original position when it
    /// already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Borrow the underlying field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
