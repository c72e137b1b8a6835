use super::*;
use crate::context::StaticContext;

fn op(name: &str) -> Arc<dyn ConditionOperation> {
    builtins()
        .into_iter()
        .find(|op| op.name() == name)
        .unwrap_or_else(|| panic!("no operation `{name}`"))
}

fn check(name: &str, variable: Value<'_>, comparand: Value<'_>) -> Option<bool> {
    op(name).evaluate(&variable, &comparand, None)
}

#[test]
fn null_policy() {
    // (operation, both null, one null)
    for (name, both, one) in [
        ("eq", true, false),
        ("neq", false, true),
        ("lt", false, false),
        ("gt", false, false),
        ("lte", true, false),
        ("gte", true, false),
        ("contains", true, false),
        ("starts with", true, false),
        ("ends with-i", true, false),
        ("matches", false, false),
    ] {
        assert_eq!(check(name, Value::Null, Value::Null), Some(both), "{name} null/null");
        assert_eq!(check(name, Value::U32(1), Value::Null), Some(one), "{name} value/null");
        assert_eq!(check(name, Value::Null, Value::U32(1)), Some(one), "{name} null/value");
    }
}

#[test]
fn numbers_compare_across_kinds() {
    assert_eq!(check("eq", Value::U32(3), Value::I64(3)), Some(true));
    assert_eq!(check("eq", Value::F32(0.5), Value::F64(0.5)), Some(true));
    assert_eq!(check("lt", Value::I32(-1), Value::U64(0)), Some(true));
    assert_eq!(check("gte", Value::F64(2.5), Value::U32(2)), Some(true));
    assert_eq!(check("gt", Value::U32(2), Value::F64(2.5)), Some(false));
}

#[test]
fn comparand_converts_to_the_variable_kind() {
    assert_eq!(check("eq", Value::U32(3), Value::str("3")), Some(true));
    assert_eq!(check("eq", Value::Bool(true), Value::str("true")), Some(true));
    assert_eq!(check("eq", Value::Bool(true), Value::U32(1)), Some(true));
    assert_eq!(check("eq", Value::U32(3), Value::str("three")), None);
}

#[test]
fn case_insensitive_variants() {
    assert_eq!(check("eq", Value::str("Gun"), Value::str("gun")), Some(false));
    assert_eq!(check("eq-i", Value::str("Gun"), Value::str("gun")), Some(true));
    assert_eq!(check("lt-i", Value::str("apple"), Value::str("Banana")), Some(true));
    assert_eq!(check("lt", Value::str("apple"), Value::str("Banana")), Some(false));
}

#[test]
fn text_operations() {
    assert_eq!(check("contains", Value::str("unfair chair"), Value::str("air")), Some(true));
    assert_eq!(check("starts with", Value::str("Eaglefire"), Value::str("Eagle")), Some(true));
    assert_eq!(check("ends with", Value::str("Eaglefire"), Value::str("FIRE")), Some(false));
    assert_eq!(check("ends with-i", Value::str("Eaglefire"), Value::str("FIRE")), Some(true));
    assert_eq!(check("contains", Value::U32(1234), Value::U32(23)), Some(true));
}

#[test]
fn matches_searches_the_variable_with_the_comparand_pattern() {
    assert_eq!(check("matches", Value::str("Gun_42"), Value::str(r"^Gun_\d+$")), Some(true));
    assert_eq!(check("matches", Value::str("Melee"), Value::str(r"^Gun_\d+$")), Some(false));
    assert_eq!(check("matches", Value::str("x"), Value::str("(")), None);
}

#[test]
fn presence_ignores_the_comparand() {
    assert_eq!(check("included", Value::U32(0), Value::Null), Some(true));
    assert_eq!(check("included", Value::Null, Value::Null), Some(false));
    assert_eq!(check("excluded", Value::Null, Value::U32(1)), Some(true));
    assert_eq!(check("excluded", Value::str("x"), Value::Null), Some(false));
}

#[test]
fn type_relations_need_a_context() {
    let ctx = StaticContext::new().with_supertype("ItemGunAsset", "ItemAsset");
    let gun = Value::str("ItemGunAsset");
    let item = Value::str("ItemAsset");
    assert_eq!(op("assignable-to").evaluate(&gun, &item, None), None);
    assert_eq!(op("assignable-to").evaluate(&gun, &item, Some(&ctx)), Some(true));
    assert_eq!(op("assignable-from").evaluate(&gun, &item, Some(&ctx)), Some(false));
    assert_eq!(op("assignable-from").evaluate(&item, &gun, Some(&ctx)), Some(true));
    assert_eq!(
        op("is-type").evaluate(&Value::F32(1.0), &Value::str("float32"), Some(&ctx)),
        Some(true)
    );
}

#[test]
fn declared_inverses_are_exact_complements() {
    let samples = [
        (Value::Null, Value::Null),
        (Value::U32(1), Value::Null),
        (Value::U32(1), Value::U32(1)),
        (Value::U32(1), Value::U32(2)),
    ];
    for op in builtins() {
        let Some(inverse) = op.inverse() else {
            continue;
        };
        let inverse = self::op(inverse);
        for (a, b) in &samples {
            assert_eq!(
                op.evaluate(a, b, None).map(|r| !r),
                inverse.evaluate(a, b, None),
                "{} vs {}",
                op.name(),
                inverse.name()
            );
        }
    }
}
