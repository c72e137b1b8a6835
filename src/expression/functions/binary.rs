use std::sync::Arc;

use crate::expression::catalog::{ArgumentHint, ArityMask, ExpressionFunction};
use crate::expression::math::{BinaryOp, binary};
use crate::value::{Value, ValueKind};

#[derive(Debug)]
struct Arithmetic {
    name: &'static str,
    op: BinaryOp,
}

impl ExpressionFunction for Arithmetic {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> ArityMask {
        ArityMask::TWO
    }

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Numeric
    }

    fn evaluate2(&self, a: &Value<'_>, b: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
        binary(self.op, a, b, out)
    }
}

pub(super) fn all() -> Vec<Arc<dyn ExpressionFunction>> {
    [
        ("ADD", BinaryOp::Add),
        ("SUB", BinaryOp::Sub),
        ("MUL", BinaryOp::Mul),
        ("DIV", BinaryOp::Div),
        ("MOD", BinaryOp::Mod),
        ("MIN", BinaryOp::Min),
        ("MAX", BinaryOp::Max),
        ("POW", BinaryOp::Pow),
    ]
    .into_iter()
    .map(|(name, op)| Arc::new(Arithmetic { name, op }) as Arc<dyn ExpressionFunction>)
    .collect()
}
