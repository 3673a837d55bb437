//! The parsed document tree.
//!
//! Each `Value` owns its children exclusively. Dropping the root releases the
//! whole tree; a parse that fails part-way drops whatever it had built.

use std::collections::HashMap;

/// One node of a parsed JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Key to child mapping. Keys are unique; a repeated key keeps the last value.
    Object(HashMap<String, Value>),

    /// Ordered child values.
    Array(Vec<Value>),

    /// Raw text between the quotes, with no escape processing.
    String(String),

    Number(f64),

    Boolean(bool),
}

/// Variant accessors. Reading a value through the wrong accessor returns `None`.
impl Value {
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Field `key` of an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Element `index` of an array.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
        }
    }
}
