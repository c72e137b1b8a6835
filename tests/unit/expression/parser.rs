use super::*;
use crate::value::{Value, ValueKind};

fn catalog() -> FunctionCatalog {
    FunctionCatalog::with_builtins()
}

fn parse(src: &str) -> Expression {
    Expression::parse(src, &catalog()).unwrap()
}

fn parse_err(src: &str) -> ExprError {
    Expression::parse(src, &catalog()).unwrap_err()
}

fn simplified(src: &str) -> Expression {
    let options = ParseOptions {
        simplify_constants: true,
    };
    Expression::parse_with(src, &catalog(), &options).unwrap()
}

#[test]
fn builds_literal_arguments() {
    let expr = parse("=ADD(1 2)");
    assert_eq!(expr.root().name(), "ADD");
    assert_eq!(
        expr.root().args(),
        &[
            ExprNode::Literal(Value::U32(1)),
            ExprNode::Literal(Value::U32(2)),
        ]
    );
}

#[test]
fn function_names_are_case_insensitive() {
    assert_eq!(parse("add(1 2)"), parse("ADD(1 2)"));
}

#[test]
fn zero_argument_root() {
    let expr = parse("PI");
    assert_eq!(expr.root().name(), "PI");
    assert!(expr.root().args().is_empty());
}

#[test]
fn nested_calls_become_function_nodes() {
    let expr = parse("MAX(=MIN(3 2) 1)");
    let [ExprNode::Function(inner), ExprNode::Literal(Value::U32(1))] = expr.root().args() else {
        panic!("unexpected args: {:?}", expr.root().args());
    };
    assert_eq!(inner.name(), "MIN");
    assert_eq!(inner.args().len(), 2);
}

#[test]
fn nested_zero_argument_call_before_separator() {
    let expr = parse("MUL(=PI 2)");
    let [ExprNode::Function(pi), ExprNode::Literal(_)] = expr.root().args() else {
        panic!("unexpected args: {:?}", expr.root().args());
    };
    assert_eq!(pi.name(), "PI");
    assert!(pi.args().is_empty());

    let expr = parse("ABS(=PI)");
    assert!(matches!(expr.root().args(), [ExprNode::Function(f)] if f.name() == "PI"));
}

#[test]
fn references_become_reference_nodes() {
    let expr = parse("ADD(@Damage_Player #(This.AssetName))");
    let [ExprNode::Property(prop), ExprNode::Data(data)] = expr.root().args() else {
        panic!("unexpected args: {:?}", expr.root().args());
    };
    assert_eq!(prop.name, "Damage_Player");
    assert_eq!(data.chain.len(), 1);
    assert!(!expr.is_constant());
}

#[test]
fn unknown_function_is_a_format_error() {
    let err = parse_err("=NOPE(1)");
    assert_eq!(err.offset, 1);
    assert!(err.message.contains("NOPE"), "{err}");
}

#[test]
fn arity_mismatch_is_a_format_error() {
    assert!(parse_err("ADD(1)").message.contains("does not accept 1"));
    assert!(parse_err("ABS(1 2)").message.contains("does not accept 2"));
    assert!(parse_err("ADD").message.contains("does not accept 0"));
    assert!(parse_err("PI(1)").message.contains("does not accept 1"));
}

#[test]
fn fourth_argument_is_rejected() {
    let err = parse_err("CAT(a b c d)");
    assert!(err.message.contains("at most 3"), "{err}");
}

#[test]
fn numeric_hint_rejects_text() {
    let err = parse_err("ADD(x 1)");
    assert_eq!(err.offset, 4);
    assert!(err.message.contains("expected a number"));
}

#[test]
fn kind_hint_reads_literal_as_kind() {
    let expr = parse("REP(12 1 ())");
    assert_eq!(
        expr.root().args(),
        &[
            ExprNode::Literal(Value::str("12")),
            ExprNode::Literal(Value::str("1")),
            ExprNode::Literal(Value::str("")),
        ]
    );

    let expr = parse("CUSTOM_BALLISTIC_GRAV(120 4 0.4)");
    assert!(
        expr.root()
            .args()
            .iter()
            .all(|arg| matches!(arg, ExprNode::Literal(v) if v.kind() == ValueKind::F32))
    );
}

#[test]
fn reference_errors_point_into_the_source() {
    let err = parse_err("ADD(@Gun:: 1)");
    assert_eq!(err.offset, 10);
    assert!(err.message.contains("property name"));
}

#[test]
fn scanner_errors_propagate() {
    assert!(parse_err("").message.contains("function name"));
    assert!(parse_err("ADD(1 2").message.contains("')'"));
    assert!(parse_err("ADD(1  2)").message.contains("argument"));
}

#[test]
fn simplify_folds_nested_constant_calls() {
    let expr = simplified("MAX(=ADD(=MIN(4 3) 2) 1)");
    assert_eq!(
        expr.root().args(),
        &[
            ExprNode::Literal(Value::U32(5)),
            ExprNode::Literal(Value::U32(1)),
        ]
    );
}

#[test]
fn simplify_keeps_calls_with_references() {
    let expr = simplified("MAX(=ADD(@Damage 2) =MIN(4 3))");
    let [ExprNode::Function(add), ExprNode::Literal(Value::U32(3))] = expr.root().args() else {
        panic!("unexpected args: {:?}", expr.root().args());
    };
    assert_eq!(add.name(), "ADD");
}

#[test]
fn simplify_skips_null_and_non_finite_results() {
    let expr = simplified("ADD(=NULL 1)");
    assert!(matches!(expr.root().args(), [ExprNode::Function(f), _] if f.name() == "NULL"));

    let expr = simplified("ADD(=DIV(1 0) 1)");
    assert!(matches!(expr.root().args(), [ExprNode::Function(f), _] if f.name() == "DIV"));
}

#[test]
fn custom_catalog_is_isolated() {
    let empty = FunctionCatalog::new();
    assert!(Expression::parse("ADD(1 2)", &empty).is_err());
}
