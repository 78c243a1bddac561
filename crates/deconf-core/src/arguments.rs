//! Raw construction arguments

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::value::ValueType;

/// Caller-supplied argument values, keyed by parameter name.
///
/// Arguments are fixed once construction starts; the resolver only reads
/// them.
///
/// # Example
///
/// ```
/// use deconf_core::Arguments;
///
/// let args = Arguments::new()
///     .with("first_name", "Ann")
///     .with("age", 25);
/// assert!(args.contains("age"));
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an argument.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Build arguments from an already parsed JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(Error::InvalidArguments {
                found: ValueType::of(&other).to_string(),
            }),
        }
    }

    /// Build arguments from any serializable struct or map.
    pub fn from_serialize<T: Serialize + ?Sized>(source: &T) -> Result<Self> {
        let value = serde_json::to_value(source).map_err(|e| Error::InvalidArguments {
            found: e.to_string(),
        })?;
        Self::from_json(value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
