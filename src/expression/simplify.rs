use crate::expression::ast::{ExprNode, Expression, FunctionCall};
use crate::expression::catalog::ArgumentHint;
use crate::value::{Value, ValueKind};

/// Replaces a reference-free call with its value. Null and non-finite results stay as calls so
/// the tree can still be written back out as text.
pub(crate) fn fold_call(call: FunctionCall, hint: ArgumentHint) -> ExprNode {
    if !call.is_constant() {
        return ExprNode::Function(call);
    }
    let desired = match hint {
        ArgumentHint::Kind(kind) => kind,
        _ => ValueKind::F64,
    };
    match call.evaluate(None, desired) {
        Some(value) if is_foldable(&value) => {
            tracing::trace!(function = call.name(), %value, "folded constant call");
            ExprNode::Literal(value)
        }
        _ => ExprNode::Function(call),
    }
}

fn is_foldable(value: &Value<'_>) -> bool {
    match value {
        Value::Null => false,
        Value::F32(v) => v.is_finite(),
        Value::F64(v) => v.is_finite(),
        _ => true,
    }
}

impl Expression {
    /// The value of a reference-free expression, or `None` if it has references or fails.
    pub fn fold(&self, out: ValueKind) -> Option<Value<'static>> {
        if self.is_constant() {
            self.evaluate_concrete(out)
        } else {
            None
        }
    }
}
