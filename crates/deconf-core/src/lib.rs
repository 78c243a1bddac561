//! Declarative parameter resolution for configurable types.
//!
//! A configurable type declares named parameters, each with an optional
//! default, an optional type constraint, a list of dependencies and a
//! transform. Construction resolves every parameter from a map of raw
//! arguments in dependency order, detecting cycles and enforcing
//! required-ness and type constraints, and hands the resolved values back to
//! the type.

pub mod arguments;
pub mod config;
pub mod configurable;
pub mod declaration;
pub mod error;
pub mod registry;
pub mod resolved;
pub mod resolver;
pub mod value;

pub use arguments::Arguments;
pub use config::{DuplicatePolicy, ResolverOptions, UnknownArgumentPolicy};
pub use configurable::{Configurable, construct};
pub use declaration::{ParameterDeclaration, Transform, Transformed};
pub use error::{Error, ErrorKind, Result};
pub use registry::{DeclarationSet, DeclarationSetBuilder};
pub use resolved::Resolved;
pub use resolver::{Resolver, resolve};
pub use value::{TypeConstraint, ValueType};
