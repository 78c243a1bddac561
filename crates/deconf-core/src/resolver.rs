//! Dependency-ordered parameter resolution
//!
//! The [`Resolver`] computes the final value of every declared parameter from
//! a [`DeclarationSet`] and the caller's [`Arguments`]:
//!
//! 1. Dependencies are resolved depth-first, in declared order, before the
//!    parameter that names them.
//! 2. The active chain of parameters being resolved is tracked; meeting a
//!    name already on the chain is a cycle.
//! 3. The input value is the supplied argument (checked against the type
//!    constraint) or else the default (never checked). A parameter with
//!    neither is missing.
//! 4. The transform runs once and its result is recorded. A recorded
//!    parameter is never resolved again.
//!
//! The first violation aborts resolution.

use serde_json::Value;

use crate::arguments::Arguments;
use crate::config::{ResolverOptions, UnknownArgumentPolicy};
use crate::declaration::ParameterDeclaration;
use crate::error::{Error, Result};
use crate::registry::DeclarationSet;
use crate::resolved::Resolved;
use crate::value::ValueType;

/// Resolve `declarations` against `arguments` with default options.
pub fn resolve(declarations: &DeclarationSet, arguments: &Arguments) -> Result<Resolved> {
    Resolver::new(declarations, arguments).resolve()
}

/// One-shot resolver for a single construction.
///
/// Dependencies are walked recursively, so stack use grows with the longest
/// dependency chain in the set. Chains thousands of parameters deep can
/// overflow the stack.
#[derive(Debug)]
pub struct Resolver<'a> {
    declarations: &'a DeclarationSet,
    arguments: &'a Arguments,
    options: ResolverOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(declarations: &'a DeclarationSet, arguments: &'a Arguments) -> Self {
        Self {
            declarations,
            arguments,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve every declared parameter.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownArgument`] under [`UnknownArgumentPolicy::Reject`].
    /// - [`Error::CyclicalDependency`] when a parameter depends on itself.
    /// - [`Error::RequiredParameter`] for a missing value or an undeclared
    ///   dependency.
    /// - [`Error::ParameterType`] when a supplied value fails its constraint.
    /// - [`Error::ParameterValue`] when a transform rejects its input.
    pub fn resolve(self) -> Result<Resolved> {
        self.check_unknown_arguments()?;

        let type_name = self.declarations.type_name();
        tracing::debug!(
            type_name,
            parameters = self.declarations.len(),
            arguments = self.arguments.len(),
            "Resolving parameters"
        );

        let mut resolved = Resolved::new(type_name);
        let mut chain: Vec<&str> = Vec::new();

        for decl in self.declarations.iter() {
            if !resolved.contains(decl.name()) {
                self.resolve_parameter(decl, &mut chain, &mut resolved)?;
            }
        }

        Ok(resolved)
    }

    fn resolve_parameter(
        &self,
        decl: &'a ParameterDeclaration,
        chain: &mut Vec<&'a str>,
        resolved: &mut Resolved,
    ) -> Result<()> {
        chain.push(decl.name());

        for dep in decl.dependencies() {
            if let Some(err) = self.declarations.cycle_error(chain.as_slice(), dep) {
                return Err(err);
            }
            if resolved.contains(dep) {
                continue;
            }

            tracing::trace!(parameter = decl.name(), dependency = %dep, "Resolving dependency");
            let dep_decl = self
                .declarations
                .get(dep)
                .ok_or_else(|| self.declarations.missing(dep))?;
            self.resolve_parameter(dep_decl, chain, resolved)?;
        }

        let (raw, from_default) = self.input_value(decl)?;
        let value = decl.apply(raw, resolved)?;

        tracing::debug!(parameter = decl.name(), from_default, "Resolved parameter");
        resolved.insert(decl.name(), value);
        chain.pop();
        Ok(())
    }

    /// The raw value for `decl` and whether it came from the default.
    fn input_value(&self, decl: &'a ParameterDeclaration) -> Result<(&'a Value, bool)> {
        if let Some(value) = self.arguments.get(decl.name()) {
            if let Some(constraint) = decl.type_constraint() {
                if !constraint.is_satisfied_by(value) {
                    return Err(Error::ParameterType {
                        name: decl.name().to_string(),
                        expected: constraint.to_string(),
                        found: ValueType::of(value).to_string(),
                    });
                }
            }
            return Ok((value, false));
        }

        match decl.default() {
            Some(default) => Ok((default, true)),
            None => Err(self.declarations.missing(decl.name())),
        }
    }

    fn check_unknown_arguments(&self) -> Result<()> {
        if self.options.unknown_arguments == UnknownArgumentPolicy::Ignore {
            return Ok(());
        }

        for name in self.arguments.names() {
            if self.declarations.contains(name) {
                continue;
            }
            match self.options.unknown_arguments {
                UnknownArgumentPolicy::Reject => {
                    return Err(Error::UnknownArgument {
                        type_name: self.declarations.type_name().to_string(),
                        name: name.to_string(),
                    });
                }
                UnknownArgumentPolicy::Warn => {
                    tracing::warn!(
                        type_name = self.declarations.type_name(),
                        argument = name,
                        "Ignoring argument with no matching parameter"
                    );
                }
                UnknownArgumentPolicy::Ignore => {}
            }
        }
        Ok(())
    }
}
