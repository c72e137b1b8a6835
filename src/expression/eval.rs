//! Evaluation of expression trees.
//!
//! Arguments are evaluated left to right into a small inline buffer; literal string arguments are
//! borrowed from the tree. Any argument that cannot be determined fails the whole call.

use smallvec::SmallVec;

use crate::context::EvaluationContext;
use crate::expression::ast::{ExprNode, Expression, FunctionCall};
use crate::expression::catalog::{ArgumentHint, MAX_ARGUMENTS};
use crate::value::{Value, ValueKind};

impl ExprNode {
    /// Evaluates the node. `desired` is the kind the consumer would like; references need `ctx`.
    pub fn evaluate(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        desired: ValueKind,
    ) -> Option<Value<'_>> {
        match self {
            Self::Literal(value) => Some(value.borrowed()),
            Self::Function(call) => call.evaluate(ctx, desired),
            Self::Property(r) => ctx?.property(r),
            Self::Data(r) => ctx?.data(r),
        }
    }
}

impl FunctionCall {
    pub fn evaluate(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        out: ValueKind,
    ) -> Option<Value<'static>> {
        let function = self.function();
        let mut args: SmallVec<[Value<'_>; MAX_ARGUMENTS]> = SmallVec::new();
        for (index, node) in self.args().iter().enumerate() {
            let hint = function.hint(index);
            let desired = match hint {
                ArgumentHint::Kind(kind) => kind,
                _ => ValueKind::F64,
            };
            let mut value = node.evaluate(ctx, desired)?;
            if function.reduces_arguments() {
                value = value.reduced();
            }
            if let ArgumentHint::Kind(kind) = hint {
                if value.kind() != kind && !value.is_null() {
                    value = value.convert(kind)?;
                }
            }
            args.push(value);
        }

        let result = match args.as_slice() {
            [] => function.evaluate0(out),
            [a] => function.evaluate1(a, out),
            [a, b] => function.evaluate2(a, b, out),
            [a, b, c] => function.evaluate3(a, b, c, out),
            _ => None,
        };
        if result.is_none() {
            tracing::trace!(function = function.name(), "call could not be evaluated");
        }
        result
    }
}

impl Expression {
    /// Evaluates without a context. Fails if the tree contains references.
    pub fn evaluate_concrete(&self, out: ValueKind) -> Option<Value<'static>> {
        self.root().evaluate(None, out).map(Value::into_owned)
    }

    pub fn evaluate(&self, ctx: &dyn EvaluationContext, out: ValueKind) -> Option<Value<'static>> {
        self.root().evaluate(Some(ctx), out).map(Value::into_owned)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
