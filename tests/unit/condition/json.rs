use super::*;
use crate::context::StaticContext;
use crate::typed::TypedValue;

const UNIFORM_SCALE: &str = r#"
[
    {
        "And":
        [
            { "Variable": "Uniform_Scale", "Operation": "eq", "Comparand": true },
            { "Variable": "Something_Else", "Operation": "eq", "Comparand": true }
        ],
        "Value": 0
    },
    {
        "And": [{ "Variable": "Uniform_Scale", "Operation": "eq", "Comparand": true }],
        "Value": 1
    },
    {
        "Value": "0, 0, 0"
    }
]
"#;

fn load(text: &str) -> SpecResult<SwitchValue> {
    let catalog = FunctionCatalog::with_builtins();
    let operations = OperationRegistry::with_builtins();
    SpecLoader::new(&catalog, &operations).switch_from_str(text)
}

fn value(text: &str) -> SpecResult<SpecValue> {
    let catalog = FunctionCatalog::with_builtins();
    let operations = OperationRegistry::with_builtins();
    let json: Json = serde_json::from_str(text).unwrap();
    SpecLoader::new(&catalog, &operations).value_from_json(&json)
}

fn round_trip(switch: &SwitchValue) {
    let json = switch.to_json();
    let reloaded = load(&json.to_string()).unwrap();
    assert_eq!(&reloaded, switch, "{json}");
}

#[test]
fn reads_case_list() {
    let switch = load(UNIFORM_SCALE).unwrap();
    assert_eq!(switch.cases().len(), 3);
    assert!(matches!(
        &switch.cases()[0],
        SwitchCase::Complex { junction: Junction::And, conditions, .. } if conditions.len() == 2
    ));
    assert_eq!(
        switch.cases()[2],
        SwitchCase::Default(SpecValue::Literal(Value::str("0, 0, 0")))
    );
    round_trip(&switch);
}

#[test]
fn selects_by_context() {
    let switch = load(UNIFORM_SCALE).unwrap();

    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", true)
        .with_property("Something_Else", true);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), Some(Some(0)));

    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", true)
        .with_property("Something_Else", false);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), Some(Some(1)));

    let ctx = StaticContext::new()
        .with_property("Uniform_Scale", false)
        .with_property("Something_Else", false);
    assert_eq!(
        switch.try_evaluate::<String>(&ctx),
        Some(Some("0, 0, 0".to_owned()))
    );

    let ctx = StaticContext::new().with_property("Uniform_Scale", true);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), None);
}

#[test]
fn nested_cases_and_shorthand_conditions() {
    let switch = load(
        r#"{ "Cases": [
            { "When": "Has_Scope", "Cases": [
                { "When": { "Variable": "Zoom", "Operation": "gt", "Comparand": 1 }, "Value": "=MUL(@Zoom 2)" },
                { "Value": 1 }
            ] },
            { "Case": false, "Value": "never" },
            { "When": null, "Value": "never" },
            { "When": true, "Value": "fallback" }
        ] }"#,
    )
    .unwrap();

    let ctx = StaticContext::new()
        .with_property("Has_Scope", true)
        .with_property("Zoom", 4u32);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), Some(Some(8)));

    let ctx = StaticContext::new()
        .with_property("Has_Scope", true)
        .with_property("Zoom", 1u32);
    assert_eq!(switch.try_evaluate::<u32>(&ctx), Some(Some(1)));

    let ctx = StaticContext::new().with_property("Has_Scope", false);
    assert_eq!(
        switch.try_evaluate::<String>(&ctx),
        Some(Some("fallback".to_owned()))
    );
    round_trip(&switch);
}

#[test]
fn cases_take_precedence_over_value() {
    let switch = load(r#"[{ "Value": 1, "Cases": [2] }]"#).unwrap();
    assert!(matches!(switch.cases()[0].value(), SpecValue::Switch(_)));
    assert_eq!(switch.try_concrete::<u32>(), Some(Some(2)));
}

#[test]
fn condition_fields() {
    let switch = load(
        r#"[{ "When": { "Variable": "%Eaglefire", "Operation": "starts with-i",
                         "Comparand": "eagle", "Inverted": true }, "Value": 1 }, 0]"#,
    )
    .unwrap();
    let SwitchCase::Conditional { when, .. } = &switch.cases()[0] else {
        panic!("expected a conditional case");
    };
    assert_eq!(when.variable, SpecValue::Literal(Value::str("Eaglefire")));
    assert!(when.inverted);
    assert_eq!(switch.try_concrete::<u32>(), Some(Some(0)));
    round_trip(&switch);
}

#[test]
fn value_positions() {
    assert_eq!(value("12").unwrap(), SpecValue::Literal(Value::U32(12)));
    assert_eq!(value("-1").unwrap(), SpecValue::Literal(Value::I32(-1)));
    assert_eq!(value("5000000000").unwrap(), SpecValue::Literal(Value::U64(5_000_000_000)));
    assert_eq!(value("2.5").unwrap(), SpecValue::Literal(Value::F64(2.5)));
    assert_eq!(value("null").unwrap(), SpecValue::Literal(Value::Null));
    assert_eq!(value(r#""%0.5f""#).unwrap(), SpecValue::Literal(Value::F32(0.5)));
    assert!(matches!(value(r#""@Damage""#).unwrap(), SpecValue::Property(_)));
    assert!(matches!(value(r##""#This.AssetName""##).unwrap(), SpecValue::Data(_)));
    assert!(matches!(
        value(r#"{ "Variable": "A", "Operation": "gt", "Comparand": 1 }"#).unwrap(),
        SpecValue::Condition(_)
    ));
    assert!(matches!(value("[1]").unwrap(), SpecValue::Switch(_)));
}

#[test]
fn literals_keep_their_kind_through_json() {
    let switch = SwitchValue::new(
        [
            Value::F32(0.5),
            Value::F64(2.0),
            Value::U64(7),
            Value::I64(-3),
            Value::F64(f64::NEG_INFINITY),
            Value::F32(f32::NAN),
            Value::str("=not an expression"),
            Value::Null,
        ]
        .into_iter()
        .map(|v| SwitchCase::Default(SpecValue::Literal(v)))
        .collect(),
    );
    round_trip(&switch);
}

#[test]
fn constant_conditions_serialize_as_bools() {
    let switch = SwitchValue::new(vec![SwitchCase::Conditional {
        when: Condition::constant(false),
        value: SpecValue::Literal(Value::U32(1)),
    }]);
    assert_eq!(
        switch.to_json(),
        serde_json::json!({ "Cases": [{ "When": false, "Value": 1 }] })
    );
}

#[test]
fn rejects_malformed_switches() {
    for text in [
        r#"[{ "When": { "Variable": "A", "Operation": "bogus" }, "Value": 1 }]"#,
        r#"[{ "When": { "Operation": "eq" }, "Value": 1 }]"#,
        r#"[{ "When": { "Variable": "A", "Operation": "eq", "Inverted": 1 }, "Value": 1 }]"#,
        r#"[{ "And": [], "Value": 1 }]"#,
        r#"[{ "Or": {}, "Value": 1 }]"#,
        r#"[{ "When": true }]"#,
        r#"[{ "Value": { "Something": 1 } }]"#,
        r#"[{ "Value": "=ADD(1" }]"#,
        r#"{ "Cases": 3 }"#,
        r#""text""#,
    ] {
        assert!(load(text).is_err(), "{text}");
    }
    assert!(matches!(load("[").unwrap_err(), SpecError::Serde(_)));
    assert!(matches!(load(r#"[{ "Value": "=ADD(1" }]"#).unwrap_err(), SpecError::Format(_)));
}
