use super::*;

#[test]
fn test_parse_plain_name() {
    assert_eq!(TypeExpr::parse("int").unwrap(), TypeExpr::named("int"));
    assert_eq!(
        TypeExpr::parse("  System.Collections.IEnumerable ").unwrap(),
        TypeExpr::named("System.Collections.IEnumerable")
    );
}

#[test]
fn test_parse_nested_generic() {
    let expr = TypeExpr::parse("Dictionary<int, List<string?>>").unwrap();
    assert_eq!(
        expr,
        TypeExpr::generic(
            "Dictionary",
            vec![
                TypeExpr::named("int"),
                TypeExpr::generic(
                    "List",
                    vec![TypeExpr::Nullable(Box::new(TypeExpr::named("string")))]
                ),
            ]
        )
    );
    assert_eq!(expr.to_string(), "Dictionary<int, List<string?>>");
}

#[test]
fn test_parse_open_definitions() {
    assert_eq!(
        TypeExpr::parse("IEnumerable<>").unwrap(),
        TypeExpr::Open {
            name: "IEnumerable".into(),
            arity: 1
        }
    );
    let expr = TypeExpr::parse("IDictionary< , >").unwrap();
    assert_eq!(
        expr,
        TypeExpr::Open {
            name: "IDictionary".into(),
            arity: 2
        }
    );
    assert_eq!(expr.to_string(), "IDictionary<,>");
}

#[test]
fn test_parse_errors_report_offset() {
    match TypeExpr::parse("List<int") {
        Err(StoreError::Parse { offset, .. }) => assert_eq!(offset, 8),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(TypeExpr::parse("").is_err());
    assert!(TypeExpr::parse("List<int> extra").is_err());
    assert!(TypeExpr::parse("1Bad").is_err());
    assert!(TypeExpr::parse("System..Object").is_err());
}

#[test]
fn test_from_str_matches_parse() {
    let expr: TypeExpr = "Nullable<int>".parse().unwrap();
    assert_eq!(expr, TypeExpr::generic("Nullable", vec![TypeExpr::named("int")]));
}

fn nested_list(levels: usize, leaf: &str) -> String {
    format!("{}{leaf}{}", "List<".repeat(levels), ">".repeat(levels))
}

#[test]
fn test_parse_nesting_limit() {
    let limit = MAX_PARSER_RECURSION_DEPTH as usize;
    // `levels` generic wrappers around the leaf take `levels + 1` nested parses.
    let deepest = TypeExpr::parse(&nested_list(limit - 1, "int")).unwrap();
    assert!(matches!(deepest, TypeExpr::Named { .. }));

    match TypeExpr::parse(&nested_list(limit, "int")) {
        Err(StoreError::Parse { message, offset, .. }) => {
            assert_eq!(message, "type nesting too deep");
            assert_eq!(offset, limit * "List<".len());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_runaway_nesting_is_an_error() {
    let err = TypeExpr::parse(&nested_list(200_000, "int")).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "{err:?}");
}
