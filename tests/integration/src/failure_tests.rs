//! Failure paths: every violation aborts construction with a single error
//! naming the offending parameter.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use deconf_core::{
    Arguments, Configurable, DeclarationSet, DeclarationSetBuilder, DuplicatePolicy, Error,
    ErrorKind, ParameterDeclaration, Resolved, Result, ResolverOptions, Transformed, resolve,
};
use deconf_test_utils::Person;
use rstest::rstest;
use serde_json::json;

struct Loop;

impl Configurable for Loop {
    const TYPE_NAME: &'static str = "Loop";

    fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder {
        params
            .parameter(ParameterDeclaration::new("x").depends_on(["y"]))
            .parameter(ParameterDeclaration::new("y").depends_on(["x"]))
    }

    fn from_resolved(_: Resolved) -> Result<Self> {
        Ok(Loop)
    }
}

#[rstest]
#[case(json!({}))]
#[case(json!({"x": 1}))]
#[case(json!({"x": 1, "y": 2}))]
fn test_cycle_fails_for_any_arguments(#[case] input: serde_json::Value) {
    let args = Arguments::from_json(input).unwrap();
    let err = match Loop::construct(args) {
        Ok(_) => panic!("cyclic declarations must not construct"),
        Err(err) => err,
    };

    assert_eq!(err.kind(), ErrorKind::CyclicalDependency);
    assert_eq!(
        err.to_string(),
        "Cyclical dependency discovered while processing 'x' (x -> y -> x)."
    );
}

#[test]
fn test_longer_cycle_reports_root_and_path() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let set = DeclarationSet::builder("Ring")
        .parameter(ParameterDeclaration::new("entry").depends_on(["a"]))
        .parameter(ParameterDeclaration::new("a").depends_on(["b"]))
        .parameter(ParameterDeclaration::new("b").depends_on(["c"]))
        .parameter(
            ParameterDeclaration::new("c")
                .depends_on(["a"])
                .transform(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Transformed::UseRaw)
                }),
        )
        .build()
        .unwrap();
    let args: Arguments = ["entry", "a", "b", "c"].into_iter().map(|n| (n, 1)).collect();

    match resolve(&set, &args).unwrap_err() {
        Error::CyclicalDependency {
            type_name,
            root,
            cycle,
        } => {
            assert_eq!(type_name, "Ring");
            assert_eq!(root, "entry");
            assert_eq!(cycle, vec!["a", "b", "c", "a"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_dependency_names_the_dependency() {
    let set = DeclarationSet::builder("Report")
        .parameter(ParameterDeclaration::new("title").default_value("untitled"))
        .parameter(ParameterDeclaration::new("summary").depends_on(["title", "author"]))
        .build()
        .unwrap();
    let args = Arguments::new().with("summary", "...").with("author", "someone");

    let err = resolve(&set, &args).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'Report' object missing required 'author' parameter."
    );
}

#[rstest]
#[case("first_name")]
#[case("age")]
#[case("can_vote")]
fn test_every_required_person_field(#[case] omitted: &str) {
    let full = json!({"first_name": "Ann", "age": 25, "can_vote": true});
    let mut input = full.as_object().cloned().unwrap();
    input.remove(omitted);

    let err = Person::construct(Arguments::from_json(input.into()).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequiredParameter);
    assert_eq!(err.parameter(), Some(omitted));
}

#[test]
fn test_failing_dependency_stops_dependents() {
    let downstream_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&downstream_calls);
    let set = DeclarationSet::builder("Chain")
        .parameter(
            ParameterDeclaration::new("derived")
                .depends_on(["base"])
                .default_value(0)
                .transform(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Transformed::UseRaw)
                }),
        )
        .parameter(
            ParameterDeclaration::new("base")
                .transform(|_, _| Err(Error::invalid_value("base", "always rejected"))),
        )
        .build()
        .unwrap();

    let err = resolve(&set, &Arguments::new().with("base", 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterValue);
    assert_eq!(downstream_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_duplicate_declarations() {
    let build = |policy| {
        DeclarationSet::builder("Twice")
            .duplicates(policy)
            .parameter(ParameterDeclaration::new("level").default_value(1))
            .parameter(ParameterDeclaration::new("level").default_value(2))
            .build()
    };

    let err = build(DuplicatePolicy::Reject).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Declaration);
    assert_eq!(err.parameter(), Some("level"));

    let set = build(DuplicatePolicy::OverwriteWins).unwrap();
    let resolved = resolve(&set, &Arguments::new()).unwrap();
    assert_eq!(resolved.get("level"), Some(&json!(2)));
}

/// `level` is declared twice; the type opts into letting the later
/// declaration win.
struct Levels {
    level: i64,
}

impl Configurable for Levels {
    const TYPE_NAME: &'static str = "Levels";

    fn declare(params: DeclarationSetBuilder) -> DeclarationSetBuilder {
        params
            .parameter(ParameterDeclaration::new("level").default_value(1))
            .parameter(ParameterDeclaration::new("level").default_value(2))
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        Ok(Self {
            level: resolved.value("level")?,
        })
    }

    fn options() -> ResolverOptions {
        ResolverOptions::default().with_duplicates(DuplicatePolicy::OverwriteWins)
    }
}

#[test]
fn test_type_options_allow_duplicate_declarations() {
    let levels = Levels::construct(Arguments::new()).unwrap();
    assert_eq!(levels.level, 2);

    let levels = Levels::construct(Arguments::new().with("level", 7)).unwrap();
    assert_eq!(levels.level, 7);

    let err = Levels::declare(DeclarationSet::builder("Levels"))
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'Levels' declares parameter 'level' more than once"
    );
}
