use serde::{Deserialize, Serialize};

use crate::data::{OwnerRef, Timestamp};

/// A field value of a host entity, as seen by the recheck helpers.
///
/// The ledger never stores these; it only asks whether a field is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Choice(i64),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Reference(Option<OwnerRef>),
    String(String),
    Timestamp(Timestamp),
}

impl Value {
    /// Loose emptiness: false, zero, "", "0", empty collections and unset
    /// references are all empty. Timestamps never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Blob(b) => b.is_empty(),
            Value::Bool(b) => !*b,
            Value::Choice(c) => *c == 0,
            Value::Float(f) => *f == 0.0,
            Value::Int(i) => *i == 0,
            Value::List(l) => l.is_empty(),
            Value::Reference(r) => r.is_none(),
            Value::String(s) => s.is_empty() || s == "0",
            Value::Timestamp(_) => false,
        }
    }
}

/// Emptiness of an optional field value; a missing value is empty.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_empty)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}
