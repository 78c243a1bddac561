//! Error types for deconf-core

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring parameters or constructing a configurable.
///
/// Every variant is fatal to the construction attempt that produced it; no
/// partially resolved object is ever handed back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared parameter has neither a supplied value nor a default, or a
    /// dependency names a parameter that was never declared.
    #[error("'{type_name}' object missing required '{name}' parameter.")]
    RequiredParameter { type_name: String, name: String },

    /// A parameter transitively depends on itself.
    ///
    /// `root` is the parameter whose resolution started the failing walk;
    /// `cycle` is the offending path, starting and ending at the same name.
    #[error("Cyclical dependency discovered while processing '{root}' ({}).", .cycle.join(" -> "))]
    CyclicalDependency {
        type_name: String,
        root: String,
        cycle: Vec<String>,
    },

    /// A supplied value does not satisfy the declared type constraint.
    #[error("'{name}' parameter must be a '{expected}' instance (got '{found}').")]
    ParameterType {
        name: String,
        expected: String,
        found: String,
    },

    /// A transform rejected the value it was given.
    #[error("invalid value for '{name}' parameter: {message}")]
    ParameterValue { name: String, message: String },

    #[error("'{type_name}' declares parameter '{name}' more than once")]
    DuplicateParameter { type_name: String, name: String },

    #[error("invalid declaration on '{type_name}': {reason}")]
    InvalidDeclaration { type_name: String, reason: String },

    /// An argument was supplied that no declaration consumes.
    #[error("'{type_name}' object got unexpected argument '{name}'")]
    UnknownArgument { type_name: String, name: String },

    #[error("arguments must be a JSON object, got {found}")]
    InvalidArguments { found: String },

    #[error("no resolved value for '{name}'")]
    MissingValue { name: String },

    #[error("resolved value for '{name}' has an unexpected shape: {source}")]
    Extract {
        name: String,
        source: serde_json::Error,
    },

    #[error("unknown value type: {value}")]
    UnknownValueType { value: String },

    #[error("invalid policy: {value}")]
    InvalidPolicy { value: String },
}

/// Coarse classification of an [`Error`], for callers that branch on the
/// failure category rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RequiredParameter,
    CyclicalDependency,
    ParameterType,
    ParameterValue,
    Declaration,
    Arguments,
    Access,
    Options,
}

impl Error {
    /// Build a [`Error::ParameterValue`] from inside a transform.
    pub fn invalid_value(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParameterValue {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RequiredParameter { .. } => ErrorKind::RequiredParameter,
            Error::CyclicalDependency { .. } => ErrorKind::CyclicalDependency,
            Error::ParameterType { .. } => ErrorKind::ParameterType,
            Error::ParameterValue { .. } => ErrorKind::ParameterValue,
            Error::DuplicateParameter { .. }
            | Error::InvalidDeclaration { .. }
            | Error::UnknownValueType { .. } => ErrorKind::Declaration,
            Error::UnknownArgument { .. } | Error::InvalidArguments { .. } => {
                ErrorKind::Arguments
            }
            Error::MissingValue { .. } | Error::Extract { .. } => ErrorKind::Access,
            Error::InvalidPolicy { .. } => ErrorKind::Options,
        }
    }

    /// The parameter name this error is about, when there is one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Error::RequiredParameter { name, .. }
            | Error::ParameterType { name, .. }
            | Error::ParameterValue { name, .. }
            | Error::DuplicateParameter { name, .. }
            | Error::UnknownArgument { name, .. }
            | Error::MissingValue { name }
            | Error::Extract { name, .. } => Some(name),
            Error::CyclicalDependency { root, .. } => Some(root),
            Error::InvalidDeclaration { .. }
            | Error::InvalidArguments { .. }
            | Error::UnknownValueType { .. }
            | Error::InvalidPolicy { .. } => None,
        }
    }
}
