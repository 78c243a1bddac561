//! End-to-end tests for declaring, resolving and constructing configurables
//!
//! These exercise the complete flow: declarations -> arguments -> resolution
//! -> typed construction.

use std::sync::{Arc, Mutex};

use deconf_core::{
    Arguments, Configurable, DeclarationSetBuilder, Error, ParameterDeclaration, Resolved,
    Result, ResolverOptions, Transformed, TypeConstraint, UnknownArgumentPolicy, ValueType,
};
use deconf_test_utils::{Person, init_tracing, person_declarations};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

/// A service endpoint whose `url` is derived from `scheme`, `host` and `port`,
/// and whose `scheme` depends on whether `tls` is on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Endpoint {
    host: String,
    port: u16,
    tls: bool,
    scheme: String,
    url: String,
    tags: Vec<String>,
    timeout: Option<f64>,
}

impl Configurable for Endpoint {
    const TYPE_NAME: &'static str = "Endpoint";

    fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder {
        params
            // Declared before its dependencies on purpose.
            .parameter(
                ParameterDeclaration::new("url")
                    .depends_on(["scheme", "host", "port"])
                    .default_value(json!(null))
                    .transform(|raw, ctx| {
                        if !raw.is_null() {
                            return Ok(Transformed::UseRaw);
                        }
                        let scheme: String = ctx.value("scheme")?;
                        let host: String = ctx.value("host")?;
                        let port: u16 = ctx.value("port")?;
                        Ok(Transformed::value(format!("{scheme}://{host}:{port}")))
                    }),
            )
            .parameter(
                ParameterDeclaration::new("scheme")
                    .depends_on(["tls"])
                    .default_value(json!(null))
                    .transform(|raw, ctx| {
                        if raw.is_string() {
                            return Ok(Transformed::UseRaw);
                        }
                        let tls: bool = ctx.value("tls")?;
                        Ok(Transformed::value(if tls { "https" } else { "http" }))
                    }),
            )
            .parameter(ParameterDeclaration::new("host").ensure_type(ValueType::String))
            .parameter(
                ParameterDeclaration::new("port")
                    .ensure_type(ValueType::Integer)
                    .default_value(80)
                    .transform(|raw, _| match raw.as_u64() {
                        Some(port) if port <= u64::from(u16::MAX) => Ok(Transformed::UseRaw),
                        _ => Err(Error::invalid_value("port", format!("{raw} is not a port"))),
                    }),
            )
            .parameter(
                ParameterDeclaration::new("tls")
                    .ensure_type(ValueType::Boolean)
                    .default_value(false),
            )
            .parameter(
                ParameterDeclaration::new("tags")
                    .ensure_type(TypeConstraint::any_of([ValueType::Array, ValueType::String]))
                    .default_value(json!([]))
                    .transform(|raw, _| match raw.as_str() {
                        Some(single) => Ok(Transformed::value(json!([single]))),
                        None => Ok(Transformed::UseRaw),
                    }),
            )
            .parameter(
                ParameterDeclaration::new("timeout")
                    .ensure_type(TypeConstraint::any_of([ValueType::Number, ValueType::Null]))
                    .default_value(json!(null)),
            )
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        resolved.deserialize()
    }
}

#[test]
fn test_endpoint_defaults() {
    init_tracing();
    let endpoint = Endpoint::construct(Arguments::new().with("host", "example.org")).unwrap();

    assert_eq!(
        endpoint,
        Endpoint {
            host: "example.org".into(),
            port: 80,
            tls: false,
            scheme: "http".into(),
            url: "http://example.org:80".into(),
            tags: vec![],
            timeout: None,
        }
    );
}

#[test]
fn test_endpoint_from_json_arguments() {
    init_tracing();
    let args = Arguments::from_json(json!({
        "host": "example.org",
        "port": 8443,
        "tls": true,
        "tags": "edge",
        "timeout": 2.5,
    }))
    .unwrap();

    let endpoint = Endpoint::construct(args).unwrap();
    assert_eq!(endpoint.url, "https://example.org:8443");
    assert_eq!(endpoint.tags, vec!["edge".to_string()]);
    assert_eq!(endpoint.timeout, Some(2.5));
}

#[test]
fn test_explicit_values_win_over_derived_ones() {
    let args = Arguments::new()
        .with("host", "example.org")
        .with("scheme", "ftp")
        .with("url", "ftp://mirror");

    let endpoint = Endpoint::construct(args).unwrap();
    assert_eq!(endpoint.scheme, "ftp");
    assert_eq!(endpoint.url, "ftp://mirror");
}

#[test]
fn test_transform_rejects_out_of_range_port() {
    let args = Arguments::new().with("host", "example.org").with("port", 70000);

    let err = Endpoint::construct(args).unwrap_err();
    assert!(matches!(err, Error::ParameterValue { ref name, .. } if name == "port"));
}

#[test]
fn test_from_serialized_struct() {
    #[derive(serde::Serialize)]
    struct Raw<'a> {
        host: &'a str,
        tls: bool,
    }

    let args = Arguments::from_serialize(&Raw {
        host: "internal",
        tls: true,
    })
    .unwrap();
    let endpoint = Endpoint::construct(args).unwrap();
    assert_eq!(endpoint.url, "https://internal:80");
}

#[test]
fn test_options_from_json_with_shared_declarations() {
    let options = ResolverOptions::from_json(json!({"unknown-arguments": "reject"})).unwrap();
    assert_eq!(options.unknown_arguments, UnknownArgumentPolicy::Reject);

    let set = Endpoint::declarations().unwrap();
    let ok = Endpoint::construct_with(&set, &Arguments::new().with("host", "a"), options).unwrap();
    assert_eq!(ok.host, "a");

    let err = Endpoint::construct_with(
        &set,
        &Arguments::new().with("host", "a").with("hots", "b"),
        options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownArgument { ref name, .. } if name == "hots"));
}

#[test]
fn test_declarations_shared_across_threads() {
    let set = Arc::new(person_declarations().unwrap());
    let people = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for age in [10_i64, 20, 30, 40] {
            let set = Arc::clone(&set);
            let people = &people;
            scope.spawn(move || {
                let args = Arguments::new()
                    .with("first_name", "ann")
                    .with("age", age)
                    .with("can_vote", true);
                let person =
                    Person::construct_with(&set, &args, ResolverOptions::default()).unwrap();
                people.lock().unwrap().push(person);
            });
        }
    });

    let mut people = people.into_inner().unwrap();
    people.sort_by_key(|p| p.age);
    let votes: Vec<(i64, bool)> = people.iter().map(|p| (p.age, p.can_vote)).collect();
    assert_eq!(votes, vec![(10, false), (20, true), (30, true), (40, true)]);
}

#[test]
fn test_topological_order_of_endpoint() {
    let set = Endpoint::declarations().unwrap();
    let order = set.topological_order().unwrap();
    let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();

    assert!(pos("tls") < pos("scheme"));
    assert!(pos("scheme") < pos("url"));
    assert!(pos("host") < pos("url"));
    assert!(pos("port") < pos("url"));
    assert_eq!(order.len(), set.len());
}
