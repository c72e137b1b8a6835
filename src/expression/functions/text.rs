use std::{borrow::Cow, sync::Arc};

use crate::expression::catalog::{ArgumentHint, ArityMask, ExpressionFunction};
use crate::value::{Value, ValueKind};

/// Text of an argument as the string functions see it. Null reads as empty.
fn text<'v>(value: &'v Value<'_>) -> Cow<'v, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Str(s) => Cow::Borrowed(s.as_ref()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Concatenation of up to three arguments.
#[derive(Debug)]
struct Cat;

impl ExpressionFunction for Cat {
    fn name(&self) -> &str {
        "CAT"
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ONE
            .union(ArityMask::TWO)
            .union(ArityMask::THREE)
    }

    fn reduces_arguments(&self) -> bool {
        false
    }

    fn evaluate1(&self, a: &Value<'_>, _out: ValueKind) -> Option<Value<'static>> {
        Some(Value::str(text(a).into_owned()))
    }

    fn evaluate2(&self, a: &Value<'_>, b: &Value<'_>, _out: ValueKind) -> Option<Value<'static>> {
        Some(Value::str([text(a), text(b)].concat()))
    }

    fn evaluate3(
        &self,
        a: &Value<'_>,
        b: &Value<'_>,
        c: &Value<'_>,
        _out: ValueKind,
    ) -> Option<Value<'static>> {
        Some(Value::str([text(a), text(b), text(c)].concat()))
    }
}

/// `REP(text pattern replacement)`: replaces every occurrence of `pattern`.
#[derive(Debug)]
struct Rep;

impl ExpressionFunction for Rep {
    fn name(&self) -> &str {
        "REP"
    }

    fn arity(&self) -> ArityMask {
        ArityMask::THREE
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Kind(ValueKind::Str)
    }

    fn reduces_arguments(&self) -> bool {
        false
    }

    fn evaluate3(
        &self,
        a: &Value<'_>,
        b: &Value<'_>,
        c: &Value<'_>,
        _out: ValueKind,
    ) -> Option<Value<'static>> {
        if a.is_null() {
            return Some(Value::Null);
        }
        let haystack = text(a);
        let pattern = text(b);
        if pattern.is_empty() {
            return Some(Value::str(haystack.into_owned()));
        }
        Some(Value::str(haystack.replace(pattern.as_ref(), &text(c))))
    }
}

pub(super) fn all() -> Vec<Arc<dyn ExpressionFunction>> {
    vec![Arc::new(Cat), Arc::new(Rep)]
}
