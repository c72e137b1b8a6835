use super::*;

#[test]
fn digit_char_coerces_to_integers() {
    assert_eq!(u32::from_value(&Value::Char('4')), Some(4));
    assert_eq!(f64::from_value(&Value::Char('9')), Some(9.0));
    assert_eq!(i32::from_value(&Value::Char('z')), None);
}

#[test]
fn bool_coerces_to_zero_or_one_and_back() {
    assert_eq!(i64::from_value(&Value::Bool(true)), Some(1));
    assert_eq!(bool::from_value(&Value::U32(0)), Some(false));
    assert_eq!(bool::from_value(&Value::U32(2)), None);
}

#[test]
fn asset_ids_reduce_to_numbers() {
    assert_eq!(u32::from_value(&Value::Asset(AssetRef::Id(1024))), Some(1024));
    assert_eq!(AssetRef::from_value(&Value::U32(7)), Some(AssetRef::Id(7)));
    assert_eq!(AssetRef::from_value(&Value::U32(70_000)), None);
    assert_eq!(
        u64::from_value(&Value::Asset(AssetRef::Guid(Guid(1)))),
        None
    );
}

#[test]
fn strings_render_any_value() {
    assert_eq!(String::from_value(&Value::F64(3.1)).as_deref(), Some("3.1"));
    assert_eq!(String::from_value(&Value::Null), None);
}

#[test]
fn char_from_single_char_string() {
    assert_eq!(char::from_value(&Value::str("x")), Some('x'));
    assert_eq!(char::from_value(&Value::str("xy")), None);
    assert_eq!(char::from_value(&Value::U32(3)), Some('3'));
}

#[test]
fn convert_visitor_separates_null_from_failure() {
    let mut visitor = ConvertVisitor::<i32>::default();
    Value::Null.visit(&mut visitor);
    assert_eq!(visitor.finish(), Some(None));

    let mut visitor = ConvertVisitor::<i32>::default();
    Value::str("nope").visit(&mut visitor);
    assert_eq!(visitor.finish(), None);

    let mut visitor = ConvertVisitor::<i32>::default();
    Value::F64(-73.0).visit(&mut visitor);
    assert_eq!(visitor.finish(), Some(Some(-73)));
}

#[test]
fn collector_owns_borrowed_strings() {
    let text = String::from("borrowed");
    let mut collector = ValueCollector::new(Some(ValueKind::Str));
    Value::str(text.as_str()).visit(&mut collector);
    drop(text);
    assert_eq!(collector.finish(), Some(Value::str("borrowed")));
}
