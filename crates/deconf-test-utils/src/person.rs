//! The `Person` fixture: a small configurable with a name formatter, a typed
//! age and a voting flag that depends on the age.

use deconf_core::{
    Configurable, DeclarationSet, DeclarationSetBuilder, Error, ParameterDeclaration, Resolved,
    Result, Transformed, ValueType,
};
use serde::Deserialize;
use serde_json::Value;

/// Voting age used by the `can_vote` transform.
pub const VOTING_AGE: i64 = 18;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub can_vote: bool,
}

impl Configurable for Person {
    const TYPE_NAME: &'static str = "Person";

    /// - `first_name`: string, required, trimmed and capitalized
    /// - `last_name`: string, defaults to `""`, trimmed and capitalized
    /// - `age`: integer, required
    /// - `can_vote`: boolean, required, depends on `age`; forced to `false`
    ///   below [`VOTING_AGE`]
    fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder {
        params
            .parameter(
                ParameterDeclaration::new("first_name")
                    .ensure_type(ValueType::String)
                    .transform(format_name("first_name")),
            )
            .parameter(
                ParameterDeclaration::new("last_name")
                    .ensure_type(ValueType::String)
                    .default_value("")
                    .transform(format_name("last_name")),
            )
            .parameter(ParameterDeclaration::new("age").ensure_type(ValueType::Integer))
            .parameter(
                ParameterDeclaration::new("can_vote")
                    .ensure_type(ValueType::Boolean)
                    .depends_on(["age"])
                    .transform(|_, ctx| {
                        let age: i64 = ctx.value("age")?;
                        if age < VOTING_AGE {
                            Ok(Transformed::value(false))
                        } else {
                            Ok(Transformed::UseRaw)
                        }
                    }),
            )
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        resolved.deserialize()
    }
}

/// Declarations for [`Person`].
pub fn person_declarations() -> Result<DeclarationSet> {
    Person::declarations()
}

/// Name formatter for the parameter `param`: `"  sOME kid "` becomes
/// `"Some kid"`.
pub fn format_name(
    param: &'static str,
) -> impl Fn(&Value, &Resolved) -> Result<Transformed> + Send + Sync + 'static {
    move |raw, _| {
        let name = raw
            .as_str()
            .ok_or_else(|| Error::invalid_value(param, format!("expected a string, got {raw}")))?
            .trim()
            .to_lowercase();

        let mut chars = name.chars();
        let formatted = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        Ok(Transformed::value(formatted))
    }
}
