use super::*;

#[derive(Debug)]
struct Constant {
    name: &'static str,
    value: u32,
}

impl ExpressionFunction for Constant {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ZERO
    }

    fn evaluate0(&self, _out: ValueKind) -> Option<Value<'static>> {
        Some(Value::U32(self.value))
    }
}

fn constant(name: &'static str, value: u32) -> Arc<dyn ExpressionFunction> {
    Arc::new(Constant { name, value })
}

fn active_value(catalog: &FunctionCatalog, name: &str) -> Option<Value<'static>> {
    catalog.get(name)?.evaluate0(ValueKind::U32)
}

#[test]
fn arity_mask_bits_match_counts() {
    let mask = ArityMask::ONE.union(ArityMask::TWO);
    assert!(!mask.supports(0));
    assert!(mask.supports(1));
    assert!(mask.supports(2));
    assert!(!mask.supports(3));
    assert!(!mask.supports(4));
    assert_eq!(mask.to_string(), "1|2");
}

#[test]
fn lookups_are_case_insensitive() {
    let catalog = FunctionCatalog::new();
    catalog.register(constant("Answer", 42));
    assert_eq!(active_value(&catalog, "ANSWER"), Some(Value::U32(42)));
    assert_eq!(active_value(&catalog, "answer"), Some(Value::U32(42)));
}

#[test]
fn later_registration_shadows_and_deregistration_restores() {
    let catalog = FunctionCatalog::new();
    let first = constant("F", 1);
    let second = constant("F", 2);
    catalog.register(first.clone());
    catalog.register(second.clone());
    assert_eq!(active_value(&catalog, "F"), Some(Value::U32(2)));

    assert!(catalog.deregister(&second));
    assert_eq!(active_value(&catalog, "F"), Some(Value::U32(1)));

    assert!(catalog.deregister(&first));
    assert!(catalog.get("F").is_none());
    assert!(catalog.is_empty());
}

#[test]
fn deregistering_a_buried_entry_keeps_the_top() {
    let catalog = FunctionCatalog::new();
    let first = constant("F", 1);
    let second = constant("F", 2);
    catalog.register(first.clone());
    catalog.register(second.clone());

    assert!(catalog.deregister(&first));
    assert_eq!(active_value(&catalog, "F"), Some(Value::U32(2)));
    assert!(!catalog.deregister(&first));
}

#[test]
fn deregistering_unknown_is_a_no_op() {
    let catalog = FunctionCatalog::new();
    assert!(!catalog.deregister(&constant("F", 1)));
}

#[test]
fn enumerate_returns_active_entry_per_name() {
    let catalog = FunctionCatalog::new();
    catalog.register(constant("B", 1));
    catalog.register(constant("A", 2));
    catalog.register(constant("B", 3));

    let active: Vec<_> = catalog
        .enumerate()
        .iter()
        .map(|f| (f.name().to_owned(), f.evaluate0(ValueKind::U32)))
        .collect();
    assert_eq!(
        active,
        vec![
            ("A".to_owned(), Some(Value::U32(2))),
            ("B".to_owned(), Some(Value::U32(3))),
        ]
    );
}

#[test]
fn readers_keep_their_snapshot_across_mutation() {
    let catalog = FunctionCatalog::new();
    let first = constant("F", 1);
    catalog.register(first.clone());
    let held = catalog.get("F").unwrap();
    catalog.deregister(&first);
    assert_eq!(held.evaluate0(ValueKind::U32), Some(Value::U32(1)));
}

#[test]
fn builtins_are_registered() {
    let catalog = FunctionCatalog::with_builtins();
    for name in ["PI", "add", "Cat", "CUSTOM_BALLISTIC_GRAV", "atand"] {
        assert!(catalog.get(name).is_some(), "{name} missing");
    }
}
