//! Parameter declarations
//!
//! A [`ParameterDeclaration`] is the static metadata for one named parameter:
//! its dependencies, optional type constraint, optional default and the
//! transform that turns the raw value into the stored one.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::resolved::Resolved;
use crate::value::TypeConstraint;

/// Outcome of a transform.
///
/// `UseRaw` keeps the raw (supplied or default) value. Anything wrapped in
/// `Transformed::Value`, including `false`, `0`, `""` and `null`, is stored as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Value(Value),
    UseRaw,
}

impl Transformed {
    /// Wrap anything convertible into a JSON value.
    pub fn value(value: impl Into<Value>) -> Self {
        Transformed::Value(value.into())
    }

    pub(crate) fn finish(self, raw: &Value) -> Value {
        match self {
            Transformed::Value(value) => value,
            Transformed::UseRaw => raw.clone(),
        }
    }
}

/// Shared transform routine.
///
/// Called with the raw value and the values resolved so far, which always
/// include every declared dependency of the parameter.
pub type Transform = Arc<dyn Fn(&Value, &Resolved) -> Result<Transformed> + Send + Sync>;

/// Static metadata describing a single parameter.
///
/// # Example
///
/// ```
/// use deconf_core::{ParameterDeclaration, Transformed, ValueType};
///
/// let can_vote = ParameterDeclaration::new("can_vote")
///     .ensure_type(ValueType::Boolean)
///     .depends_on(["age"])
///     .transform(|_raw, ctx| {
///         let age = ctx.get("age").and_then(|v| v.as_i64()).unwrap_or_default();
///         if age < 18 {
///             Ok(Transformed::value(false))
///         } else {
///             Ok(Transformed::UseRaw)
///         }
///     });
///
/// assert_eq!(can_vote.name(), "can_vote");
/// assert!(can_vote.is_required());
/// ```
#[derive(Clone)]
pub struct ParameterDeclaration {
    name: String,
    dependencies: Vec<String>,
    type_constraint: Option<TypeConstraint>,
    default: Option<Value>,
    transform: Transform,
}

impl ParameterDeclaration {
    /// Declare a required, unconstrained, pass-through parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            type_constraint: None,
            default: None,
            transform: Arc::new(|_, _| Ok(Transformed::UseRaw)),
        }
    }

    /// Names that must be resolved before this parameter. Appends to any
    /// dependencies already declared.
    pub fn depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    /// Require explicitly supplied values to satisfy `constraint`.
    ///
    /// Defaults are not checked against it.
    pub fn ensure_type(mut self, constraint: impl Into<TypeConstraint>) -> Self {
        self.type_constraint = Some(constraint.into());
        self
    }

    /// Make the parameter optional. `Value::Null` is a valid default.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Resolved) -> Result<Transformed> + Send + Sync + 'static,
    {
        self.transform = Arc::new(f);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn type_constraint(&self) -> Option<&TypeConstraint> {
        self.type_constraint.as_ref()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub(crate) fn apply(&self, raw: &Value, resolved: &Resolved) -> Result<Value> {
        let outcome = (self.transform)(raw, resolved)?;
        Ok(outcome.finish(raw))
    }
}

impl fmt::Debug for ParameterDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDeclaration")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("type_constraint", &self.type_constraint)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
