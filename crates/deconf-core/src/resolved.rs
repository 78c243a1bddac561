//! Resolved parameter values
//!
//! The output of resolution: one final value per declared parameter. A
//! configurable type destructures it into its own typed fields.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Final parameter values for one construction, keyed by parameter name.
///
/// While resolution is in progress, the same type is handed to transforms
/// as a read-only view of the values resolved so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    #[serde(skip)]
    type_name: String,
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl Resolved {
    pub(crate) fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: Map::new(),
        }
    }

    /// Name of the configurable type these values belong to.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Deserialize the value of `name` into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingValue`] if `name` has no resolved value.
    /// - [`Error::Extract`] if the value does not deserialize into `T`.
    pub fn value<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.values.get(name).ok_or_else(|| Error::MissingValue {
            name: name.to_string(),
        })?;
        serde_json::from_value(value.clone()).map_err(|source| Error::Extract {
            name: name.to_string(),
            source,
        })
    }

    /// Deserialize every resolved value at once into a struct whose fields
    /// are named after the parameters.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(|source| {
            Error::Extract {
                name: self.type_name.clone(),
                source,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// Record a final value. Never overwrites: the first write for a name wins.
    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        if !self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);
        }
    }
}
