use super::*;

#[test]
fn float_equality_is_bitwise() {
    assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
    assert_ne!(Value::F64(0.0), Value::F64(-0.0));
    assert_ne!(Value::F32(1.0), Value::F64(1.0));
}

#[test]
fn borrowed_and_owned_strings_compare_equal() {
    let owned = Value::str(String::from("abc"));
    assert_eq!(owned.borrowed(), Value::str("abc"));
    assert_eq!(owned.clone().into_owned(), owned);
}

#[test]
fn reduced_maps_digit_chars_bools_and_ids() {
    assert_eq!(Value::Char('7').reduced(), Value::U32(7));
    assert_eq!(Value::Char('x').reduced(), Value::Char('x'));
    assert_eq!(Value::Bool(true).reduced(), Value::U32(1));
    assert_eq!(Value::Asset(AssetRef::Id(42)).reduced(), Value::U32(42));
    assert_eq!(Value::F64(1.5).reduced(), Value::F64(1.5));
}

#[test]
fn convert_respects_ranges() {
    assert_eq!(Value::I64(5).convert(ValueKind::I32), Some(Value::I32(5)));
    assert_eq!(Value::I64(i64::MAX).convert(ValueKind::I32), None);
    assert_eq!(Value::I32(-1).convert(ValueKind::U32), None);
    assert_eq!(Value::F64(3.0).convert(ValueKind::U32), Some(Value::U32(3)));
    assert_eq!(Value::F64(3.5).convert(ValueKind::U32), None);
    assert_eq!(Value::Null.convert(ValueKind::U32), Some(Value::Null));
}

#[test]
fn convert_parses_strings_for_the_demanded_kind() {
    assert_eq!(Value::str("73").convert(ValueKind::F64), Some(Value::F64(73.0)));
    assert_eq!(Value::str(" 12 ").convert(ValueKind::I32), Some(Value::I32(12)));
    assert_eq!(Value::str("abc").convert(ValueKind::I32), None);
    assert_eq!(Value::str("TRUE").convert(ValueKind::Bool), Some(Value::Bool(true)));
}

#[test]
fn guid_parses_plain_dashed_and_braced() {
    let plain = Guid::parse("0123456789abcdef0123456789abcdef").unwrap();
    let dashed = Guid::parse("01234567-89ab-cdef-0123-456789abcdef").unwrap();
    let braced = Guid::parse("{01234567-89ab-cdef-0123-456789abcdef}").unwrap();
    assert_eq!(plain, dashed);
    assert_eq!(plain, braced);
    assert_eq!(plain.to_string(), "01234567-89ab-cdef-0123-456789abcdef");
    assert!(Guid::parse("01234567-89ab-cdef-0123_456789abcdef").is_none());
    assert!(Guid::parse("xyz").is_none());
}

#[test]
fn visit_reports_concrete_kind() {
    struct KindProbe(Option<ValueKind>);

    impl ValueVisitor for KindProbe {
        fn accept<T: Scalar>(&mut self, _value: T) {
            self.0 = Some(T::KIND);
        }

        fn accept_null(&mut self) {
            self.0 = Some(ValueKind::Null);
        }
    }

    for value in [
        Value::Null,
        Value::Bool(true),
        Value::U64(1),
        Value::F32(1.0),
        Value::str("x"),
        Value::Asset(AssetRef::Id(3)),
    ] {
        let mut probe = KindProbe(None);
        value.visit(&mut probe);
        assert_eq!(probe.0, Some(value.kind()));
    }
}

#[test]
fn kind_names_parse_back() {
    for kind in [ValueKind::Bool, ValueKind::I32, ValueKind::U64, ValueKind::F32, ValueKind::Str] {
        assert_eq!(kind.name().parse::<ValueKind>(), Ok(kind));
    }
    assert!("vector".parse::<ValueKind>().is_err());
}
