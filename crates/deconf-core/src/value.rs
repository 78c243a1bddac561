//! Dynamic value model and type constraints
//!
//! Parameter values are `serde_json::Value`s. A [`TypeConstraint`] is the
//! capability check applied to explicitly supplied values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The shape of a JSON value, as seen by a type constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Null,
    Boolean,
    /// A number representable as `i64` or `u64`.
    Integer,
    /// A number stored as a floating point value.
    Float,
    /// Any number, integral or not.
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    /// The most specific type of `value`.
    ///
    /// Numbers report [`ValueType::Integer`] or [`ValueType::Float`], never
    /// [`ValueType::Number`].
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
            Value::Number(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Check whether `value` is an instance of this type.
    ///
    /// Booleans are never integers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::Number => value.is_number(),
            other => *other == ValueType::of(value),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" | "none" => Ok(ValueType::Null),
            "bool" | "boolean" => Ok(ValueType::Boolean),
            "int" | "integer" => Ok(ValueType::Integer),
            "float" => Ok(ValueType::Float),
            "number" => Ok(ValueType::Number),
            "str" | "string" => Ok(ValueType::String),
            "list" | "array" => Ok(ValueType::Array),
            "dict" | "map" | "object" => Ok(ValueType::Object),
            _ => Err(Error::UnknownValueType {
                value: s.to_string(),
            }),
        }
    }
}

/// A constraint satisfied when the value matches any of its accepted types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConstraint {
    accepted: Vec<ValueType>,
}

impl TypeConstraint {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            accepted: vec![value_type],
        }
    }

    /// Accept any of the given types. Duplicates are dropped.
    pub fn any_of(types: impl IntoIterator<Item = ValueType>) -> Self {
        let mut accepted = Vec::new();
        for t in types {
            if !accepted.contains(&t) {
                accepted.push(t);
            }
        }
        Self { accepted }
    }

    pub fn accepted(&self) -> &[ValueType] {
        &self.accepted
    }

    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        self.accepted.iter().any(|t| t.matches(value))
    }
}

impl From<ValueType> for TypeConstraint {
    fn from(value_type: ValueType) -> Self {
        Self::new(value_type)
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.accepted.iter().map(ToString::to_string).collect();
        f.write_str(&names.join(" | "))
    }
}
