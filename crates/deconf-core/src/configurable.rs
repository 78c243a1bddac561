//! Construction of configurable types
//!
//! A type becomes configurable by listing its parameters in
//! [`Configurable::declare`] and reading the resolved values back into
//! its own fields in [`Configurable::from_resolved`].

use crate::arguments::Arguments;
use crate::config::ResolverOptions;
use crate::error::Result;
use crate::registry::{DeclarationSet, DeclarationSetBuilder};
use crate::resolved::Resolved;
use crate::resolver::Resolver;

/// A type whose instances are built from resolved parameters.
///
/// # Example
///
/// ```
/// use deconf_core::{
///     Arguments, Configurable, DeclarationSetBuilder, ParameterDeclaration, Resolved, Result,
///     ValueType,
/// };
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Configurable for Server {
///     const TYPE_NAME: &'static str = "Server";
///
///     fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder {
///         params
///             .parameter(ParameterDeclaration::new("host").ensure_type(ValueType::String))
///             .parameter(
///                 ParameterDeclaration::new("port")
///                     .ensure_type(ValueType::Integer)
///                     .default_value(8080),
///             )
///     }
///
///     fn from_resolved(resolved: Resolved) -> Result<Self> {
///         Ok(Self {
///             host: resolved.value("host")?,
///             port: resolved.value("port")?,
///         })
///     }
/// }
///
/// let server = Server::construct(Arguments::new().with("host", "localhost")).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
pub trait Configurable: Sized {
    /// Name reported in errors about this type.
    const TYPE_NAME: &'static str;

    /// Add this type's parameters to `params`.
    fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder;

    /// Destructure resolved values into an instance.
    fn from_resolved(resolved: Resolved) -> Result<Self>;

    /// Options used by [`Configurable::declarations`] and
    /// [`Configurable::construct`].
    fn options() -> ResolverOptions {
        ResolverOptions::default()
    }

    /// The declared parameters of this type, built under the duplicate
    /// policy of [`Configurable::options`].
    fn declarations() -> Result<DeclarationSet> {
        let params = DeclarationSet::builder(Self::TYPE_NAME).duplicates(Self::options().duplicates);
        Self::declare(params).build()
    }

    /// Build an instance from raw arguments.
    fn construct(arguments: Arguments) -> Result<Self> {
        let declarations = Self::declarations()?;
        Self::construct_with(&declarations, &arguments, Self::options())
    }

    /// Build an instance from a prebuilt declaration set, so a set can be
    /// shared across many constructions.
    fn construct_with(
        declarations: &DeclarationSet,
        arguments: &Arguments,
        options: ResolverOptions,
    ) -> Result<Self> {
        let resolved = Resolver::new(declarations, arguments)
            .with_options(options)
            .resolve()?;
        Self::from_resolved(resolved)
    }
}

/// Build a `T` from raw arguments.
pub fn construct<T: Configurable>(arguments: Arguments) -> Result<T> {
    T::construct(arguments)
}
