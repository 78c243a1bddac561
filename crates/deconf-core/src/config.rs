//! Resolver options
//!
//! Policies for the two situations the declaration model leaves open:
//! duplicate parameter names and arguments that no parameter consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// What to do when a declaration set names the same parameter twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the build with [`Error::DuplicateParameter`].
    #[default]
    Reject,
    /// The last registered declaration replaces the earlier one.
    OverwriteWins,
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            "overwrite-wins" | "overwrite" | "last-wins" => Ok(DuplicatePolicy::OverwriteWins),
            _ => Err(Error::InvalidPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::OverwriteWins => write!(f, "overwrite-wins"),
        }
    }
}

/// What to do with supplied arguments that match no declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownArgumentPolicy {
    #[default]
    Ignore,
    /// Log each unknown name at warn level and carry on.
    Warn,
    /// Fail with [`Error::UnknownArgument`] before any transform runs.
    Reject,
}

impl FromStr for UnknownArgumentPolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(UnknownArgumentPolicy::Ignore),
            "warn" => Ok(UnknownArgumentPolicy::Warn),
            "reject" | "error" | "strict" => Ok(UnknownArgumentPolicy::Reject),
            _ => Err(Error::InvalidPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnknownArgumentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownArgumentPolicy::Ignore => write!(f, "ignore"),
            UnknownArgumentPolicy::Warn => write!(f, "warn"),
            UnknownArgumentPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Options shared by declaration building and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverOptions {
    pub duplicates: DuplicatePolicy,
    pub unknown_arguments: UnknownArgumentPolicy,
}

impl ResolverOptions {
    /// Reject duplicates and unknown arguments.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            unknown_arguments: UnknownArgumentPolicy::Reject,
        }
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_unknown_arguments(mut self, policy: UnknownArgumentPolicy) -> Self {
        self.unknown_arguments = policy;
        self
    }

    /// Read options from an already parsed JSON value. Missing keys fall back
    /// to their defaults.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidPolicy {
            value: e.to_string(),
        })
    }
}
