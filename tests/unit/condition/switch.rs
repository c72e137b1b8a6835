use super::*;
use crate::condition::OperationRegistry;
use crate::context::StaticContext;
use crate::expression::{Expression, FunctionCatalog};
use crate::reference::PropertyRef;
use crate::value::Value;

fn when(property: &str, op: &str, comparand: Value<'static>) -> Condition {
    let operation = OperationRegistry::with_builtins().get(op).unwrap();
    Condition::new(PropertyRef::new(property), operation, Some(comparand.into()))
}

fn literal(value: impl Into<Value<'static>>) -> SpecValue {
    SpecValue::Literal(value.into())
}

fn scale_switch() -> SwitchValue {
    SwitchValue::new(vec![
        SwitchCase::Conditional {
            when: when("Uniform_Scale", "eq", Value::Bool(true)),
            value: literal(1u32),
        },
        SwitchCase::Complex {
            junction: Junction::Or,
            conditions: vec![
                when("Scale", "gt", Value::U32(10)),
                when("Mode", "eq", Value::str("big")),
            ],
            value: literal(2u32),
        },
        SwitchCase::Default(literal(0u32)),
    ])
}

#[test]
fn first_passing_case_wins() {
    let switch = scale_switch();
    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", true)
        .with_property("Scale", 20u32)
        .with_property("Mode", "big");
    assert_eq!(switch.select(Some(&ctx)), Some(&literal(1u32)));

    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", false)
        .with_property("Scale", 1u32)
        .with_property("Mode", "big");
    assert_eq!(switch.select(Some(&ctx)), Some(&literal(2u32)));

    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", false)
        .with_property("Scale", 1u32)
        .with_property("Mode", "small");
    assert_eq!(switch.select(Some(&ctx)), Some(&literal(0u32)));
}

#[test]
fn undecidable_case_fails_the_switch() {
    let switch = scale_switch();
    assert_eq!(switch.select(None), None);
    // Uniform_Scale decides false, then Scale is missing.
    let ctx = StaticContext::new().with_property("Uniform_Scale", false);
    assert_eq!(switch.select(Some(&ctx)), None);
}

#[test]
fn later_cases_are_not_evaluated_after_a_match() {
    let switch = scale_switch();
    let ctx = StaticContext::new().with_property("Uniform_Scale", true);
    assert_eq!(switch.select(Some(&ctx)), Some(&literal(1u32)));
}

#[test]
fn no_match_is_none() {
    let switch = SwitchValue::new(vec![SwitchCase::Conditional {
        when: Condition::constant(false),
        value: literal(1u32),
    }]);
    assert_eq!(switch.select(None), None);
    assert_eq!(SwitchValue::default().select(None), None);
}

#[test]
fn junctions_short_circuit() {
    let ctx = StaticContext::new().with_property("A", 1u32);
    let and = SwitchCase::Complex {
        junction: Junction::And,
        conditions: vec![when("A", "eq", Value::U32(2)), when("Missing", "eq", Value::U32(1))],
        value: literal(1u32),
    };
    assert_eq!(and.passes(Some(&ctx)), Some(false));

    let or = SwitchCase::Complex {
        junction: Junction::Or,
        conditions: vec![when("A", "eq", Value::U32(1)), when("Missing", "eq", Value::U32(1))],
        value: literal(1u32),
    };
    assert_eq!(or.passes(Some(&ctx)), Some(true));

    let and = SwitchCase::Complex {
        junction: Junction::And,
        conditions: vec![when("A", "eq", Value::U32(1)), when("Missing", "eq", Value::U32(1))],
        value: literal(1u32),
    };
    assert_eq!(and.passes(Some(&ctx)), None);
}

#[test]
fn empty_junctions() {
    let empty = |junction| SwitchCase::Complex {
        junction,
        conditions: Vec::new(),
        value: literal(1u32),
    };
    assert_eq!(empty(Junction::And).passes(None), Some(true));
    assert_eq!(empty(Junction::Or).passes(None), Some(false));
}

#[test]
fn switch_is_a_typed_value() {
    let switch = scale_switch();
    let ctx = StaticContext::new().with_property("Uniform_Scale", true);
    assert_eq!(switch.try_evaluate::<f64>(&ctx), Some(Some(1.0)));
    assert_eq!(switch.try_evaluate::<String>(&ctx), Some(Some("1".to_owned())));
    assert_eq!(switch.try_concrete::<u32>(), None);
}

#[test]
fn selected_expression_evaluates_in_context() {
    let catalog = FunctionCatalog::with_builtins();
    let switch = SwitchValue::new(vec![SwitchCase::Default(SpecValue::Expression(
        Expression::parse("=MUL(@Zoom 2)", &catalog).unwrap(),
    ))]);
    let ctx = StaticContext::new().with_property("Zoom", 4u32);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), Some(Some(8)));
}

#[test]
fn simplified_folds_case_values() {
    let catalog = FunctionCatalog::with_builtins();
    let switch = SwitchValue::new(vec![
        SwitchCase::Conditional {
            when: when("A", "eq", Value::U32(1)),
            value: SpecValue::Expression(Expression::parse("=ADD(1 2)", &catalog).unwrap()),
        },
        SwitchCase::Default(SpecValue::Expression(
            Expression::parse("=ADD(@A 2)", &catalog).unwrap(),
        )),
    ]);
    let simplified = switch.simplified();
    assert_eq!(simplified.cases()[0].value(), &literal(3u32));
    assert!(matches!(simplified.cases()[1].value(), SpecValue::Expression(_)));
    assert_eq!(simplified.cases()[0], SwitchCase::Conditional {
        when: when("A", "eq", Value::U32(1)),
        value: literal(3u32),
    });
}
