use std::sync::Arc;

use crate::expression::catalog::{ArityMask, ExpressionFunction};
use crate::expression::math::real_result;
use crate::value::{Value, ValueKind};

#[derive(Debug)]
struct Constant {
    name: &'static str,
    value: f64,
}

impl ExpressionFunction for Constant {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ZERO
    }

    fn evaluate0(&self, out: ValueKind) -> Option<Value<'static>> {
        Some(real_result(self.value, out))
    }
}

/// Always null. Useful as an explicit "no value" branch.
#[derive(Debug)]
struct Null;

impl ExpressionFunction for Null {
    fn name(&self) -> &str {
        "NULL"
    }

    fn arity(&self) -> ArityMask {
        ArityMask::ZERO
    }

    fn evaluate0(&self, _out: ValueKind) -> Option<Value<'static>> {
        Some(Value::Null)
    }
}

pub(super) fn all() -> Vec<Arc<dyn ExpressionFunction>> {
    vec![
        Arc::new(Constant {
            name: "PI",
            value: std::f64::consts::PI,
        }),
        Arc::new(Constant {
            name: "TAU",
            value: std::f64::consts::TAU,
        }),
        Arc::new(Constant {
            name: "E",
            value: std::f64::consts::E,
        }),
        Arc::new(Null),
    ]
}
