use std::{fmt, sync::Arc};

use crate::condition::operation::{self, ConditionOperation};
use crate::condition::registry::OperationRegistry;
use crate::context::EvaluationContext;
use crate::typed::{SpecValue, TypedValue};
use crate::value::{Value, ValueVisitor};

/// `variable <operation> comparand`, optionally inverted.
#[derive(Debug, Clone)]
pub struct Condition {
    pub variable: SpecValue,
    pub operation: Arc<dyn ConditionOperation>,
    pub comparand: Option<SpecValue>,
    pub inverted: bool,
}

impl Condition {
    pub fn new(
        variable: impl Into<SpecValue>,
        operation: Arc<dyn ConditionOperation>,
        comparand: Option<SpecValue>,
    ) -> Self {
        Self {
            variable: variable.into(),
            operation,
            comparand,
            inverted: false,
        }
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// A condition that always evaluates to `value`.
    pub fn constant(value: bool) -> Self {
        Self::new(
            Value::Bool(value),
            operation::equals(),
            Some(Value::Bool(true).into()),
        )
    }

    /// `variable eq true`.
    pub fn is_true(variable: impl Into<SpecValue>) -> Self {
        Self::new(variable, operation::equals(), Some(Value::Bool(true).into()))
    }

    /// The constant this condition always evaluates to, if it is one built by
    /// [`Condition::constant`].
    pub fn as_constant(&self) -> Option<bool> {
        match (&self.variable, &self.comparand) {
            (SpecValue::Literal(Value::Bool(v)), Some(SpecValue::Literal(Value::Bool(true))))
                if self.operation.name() == "eq" =>
            {
                Some(*v != self.inverted)
            }
            _ => None,
        }
    }

    /// Evaluates the condition. `None` means it cannot currently be decided.
    pub fn evaluate(&self, ctx: Option<&dyn EvaluationContext>) -> Option<bool> {
        let hint = self.comparand.as_ref().and_then(SpecValue::literal_kind);
        let variable = self.variable.resolve(ctx, hint)?;
        let comparand = match &self.comparand {
            Some(comparand) => {
                let desired = (!variable.is_null()).then(|| variable.kind());
                comparand.resolve(ctx, desired)?
            }
            None => Value::Null,
        };
        let result = self.operation.evaluate(&variable, &comparand, ctx)?;
        Some(result != self.inverted)
    }

    /// The logical inverse. Uses the operation's declared inverse when `registry` has it,
    /// otherwise flips `inverted`.
    pub fn opposite(&self, registry: &OperationRegistry) -> Self {
        let inverse = self.operation.inverse().and_then(|name| registry.get(name));
        match inverse {
            Some(operation) => Self {
                operation,
                ..self.clone()
            },
            None => Self {
                inverted: !self.inverted,
                ..self.clone()
            },
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.operation.name() == other.operation.name()
            && self.inverted == other.inverted
            && self.variable == other.variable
            && self.comparand == other.comparand
    }
}

impl Eq for Condition {}

impl TypedValue for Condition {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        match self.evaluate(ctx) {
            Some(result) => {
                visitor.accept(result);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.as_constant() {
            return write!(f, "{value}");
        }
        if self.inverted {
            f.write_str("not ")?;
        }
        write!(f, "{} {}", self.variable, self.operation.name())?;
        if let Some(comparand) = &self.comparand {
            write!(f, " {comparand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/predicate.rs"]
mod tests;
