//! The dynamic value union stored inside rows.
//!
//! Rows are schema-flexible, so every cell is one of these tags rather
//! than a statically typed column. Structured values (maps and lists)
//! keep their key order via [`IndexMap`] and travel to the embedded
//! file as plain JSON text.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single tagged value as held by a [`super::Row`].
///
/// The untagged serde representation makes a [`Value`] read and write
/// as ordinary JSON, which is exactly the encoding used for MAP and
/// LIST columns in the embedded file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        //! Get the value as a float. Integers are widened so numeric
        //! predicates do not have to care which of the two tags a cell
        //! carries.

        match self {
            Value::Float(number) => Some(*number),
            Value::Integer(number) => Some(*number as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Value {
        Value::Boolean(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Value {
        Value::Integer(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Value {
        Value::Integer(number as i64)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Value {
        Value::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Value {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Value {
        Value::Text(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Value {
        Value::Map(entries)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NIL"),
            Value::Boolean(flag) => write!(f, "{}", flag),
            Value::Integer(number) => write!(f, "{}", number),
            Value::Float(number) => write!(f, "{}", number),
            Value::Text(text) => write!(f, "{}", text),
            structured => {
                let json = serde_json::to_string(structured).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}
