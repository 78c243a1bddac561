//! Parameter declaration registry
//!
//! A [`DeclarationSet`] is the name-keyed table of every parameter a
//! configurable type declares. It is built once, never mutated afterwards,
//! and can be shared between any number of constructions.

use std::collections::{HashMap, HashSet};

use crate::config::DuplicatePolicy;
use crate::declaration::ParameterDeclaration;
use crate::error::{Error, Result};

/// The declared parameters of one configurable type.
///
/// Iteration follows registration order.
///
/// # Example
///
/// ```
/// use deconf_core::{DeclarationSet, ParameterDeclaration, ValueType};
///
/// let set = DeclarationSet::builder("Person")
///     .parameter(ParameterDeclaration::new("age").ensure_type(ValueType::Integer))
///     .parameter(ParameterDeclaration::new("can_vote").depends_on(["age"]))
///     .build()
///     .unwrap();
///
/// assert_eq!(set.names().collect::<Vec<_>>(), vec!["age", "can_vote"]);
/// assert_eq!(set.topological_order().unwrap(), vec!["age", "can_vote"]);
/// ```
#[derive(Debug, Clone)]
pub struct DeclarationSet {
    type_name: String,
    declarations: Vec<ParameterDeclaration>,
    /// Maps parameter name to its position in `declarations`
    index: HashMap<String, usize>,
}

impl DeclarationSet {
    /// Start building the declarations for `type_name`.
    pub fn builder(type_name: impl Into<String>) -> DeclarationSetBuilder {
        DeclarationSetBuilder {
            type_name: type_name.into(),
            declarations: Vec::new(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDeclaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Parameter names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(ParameterDeclaration::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDeclaration> {
        self.declarations.iter()
    }

    /// Declared dependencies of `name`, or an empty slice if it is unknown.
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.get(name)
            .map(ParameterDeclaration::dependencies)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Order every parameter so that each one follows its dependencies.
    ///
    /// Walks the same way resolution does, so it fails on the same problems
    /// without needing any argument values. Like resolution it recurses once
    /// per link in a dependency chain.
    ///
    /// # Errors
    ///
    /// - [`Error::CyclicalDependency`] if a parameter depends on itself.
    /// - [`Error::RequiredParameter`] if a dependency is not declared.
    pub fn topological_order(&self) -> Result<Vec<&str>> {
        let mut order = Vec::with_capacity(self.len());
        let mut visited = HashSet::with_capacity(self.len());
        let mut chain = Vec::new();

        for decl in &self.declarations {
            if !visited.contains(decl.name()) {
                self.visit(decl, &mut chain, &mut visited, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        decl: &'a ParameterDeclaration,
        chain: &mut Vec<&'a str>,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<&'a str>,
    ) -> Result<()> {
        chain.push(decl.name());

        for dep in decl.dependencies() {
            if let Some(err) = self.cycle_error(chain.as_slice(), dep) {
                return Err(err);
            }
            if visited.contains(dep.as_str()) {
                continue;
            }
            let dep_decl = self.get(dep).ok_or_else(|| self.missing(dep))?;
            self.visit(dep_decl, chain, visited, order)?;
        }

        chain.pop();
        visited.insert(decl.name());
        order.push(decl.name());
        Ok(())
    }

    /// Build the cycle error for `dep` if it is already on the active chain.
    pub(crate) fn cycle_error<S: AsRef<str>>(&self, chain: &[S], dep: &str) -> Option<Error> {
        let start = chain.iter().position(|name| name.as_ref() == dep)?;
        let mut cycle: Vec<String> = chain[start..]
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        cycle.push(dep.to_string());

        Some(Error::CyclicalDependency {
            type_name: self.type_name.clone(),
            root: chain[0].as_ref().to_string(),
            cycle,
        })
    }

    pub(crate) fn missing(&self, name: &str) -> Error {
        Error::RequiredParameter {
            type_name: self.type_name.clone(),
            name: name.to_string(),
        }
    }
}

/// Fluent builder for a [`DeclarationSet`].
#[derive(Debug)]
#[must_use]
pub struct DeclarationSetBuilder {
    type_name: String,
    declarations: Vec<ParameterDeclaration>,
    duplicates: DuplicatePolicy,
}

impl DeclarationSetBuilder {
    pub fn parameter(mut self, declaration: ParameterDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn parameters(mut self, declarations: impl IntoIterator<Item = ParameterDeclaration>) -> Self {
        self.declarations.extend(declarations);
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Finish the set.
    ///
    /// Under [`DuplicatePolicy::OverwriteWins`] a repeated name replaces the
    /// earlier declaration but keeps its registration position.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDeclaration`] for an empty parameter name.
    /// - [`Error::DuplicateParameter`] for a repeated name under
    ///   [`DuplicatePolicy::Reject`].
    pub fn build(self) -> Result<DeclarationSet> {
        let mut declarations: Vec<ParameterDeclaration> = Vec::with_capacity(self.declarations.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(self.declarations.len());

        for decl in self.declarations {
            if decl.name().is_empty() {
                return Err(Error::InvalidDeclaration {
                    type_name: self.type_name,
                    reason: "parameter name must not be empty".to_string(),
                });
            }

            match index.get(decl.name()) {
                Some(&pos) => match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateParameter {
                            type_name: self.type_name,
                            name: decl.name().to_string(),
                        });
                    }
                    DuplicatePolicy::OverwriteWins => {
                        tracing::debug!(
                            type_name = %self.type_name,
                            parameter = decl.name(),
                            "Replacing earlier declaration"
                        );
                        declarations[pos] = decl;
                    }
                },
                None => {
                    index.insert(decl.name().to_string(), declarations.len());
                    declarations.push(decl);
                }
            }
        }

        Ok(DeclarationSet {
            type_name: self.type_name,
            declarations,
            index,
        })
    }
}
