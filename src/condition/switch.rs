use crate::condition::Condition;
use crate::context::EvaluationContext;
use crate::typed::{SpecValue, TypedValue};
use crate::value::ValueVisitor;

/// How the conditions of a complex case combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    And,
    Or,
}

impl Junction {
    pub fn key(self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchCase {
    /// Always passes.
    Default(SpecValue),
    Conditional {
        when: Condition,
        value: SpecValue,
    },
    /// Conditions combined left to right, short-circuiting. An empty `And` passes; an empty `Or`
    /// does not.
    Complex {
        junction: Junction,
        conditions: Vec<Condition>,
        value: SpecValue,
    },
}

impl SwitchCase {
    pub fn value(&self) -> &SpecValue {
        match self {
            Self::Default(value)
            | Self::Conditional { value, .. }
            | Self::Complex { value, .. } => value,
        }
    }

    /// Whether the case applies. `None` when one of its conditions cannot be decided.
    pub fn passes(&self, ctx: Option<&dyn EvaluationContext>) -> Option<bool> {
        match self {
            Self::Default(_) => Some(true),
            Self::Conditional { when, .. } => when.evaluate(ctx),
            Self::Complex {
                junction: Junction::And,
                conditions,
                ..
            } => {
                for condition in conditions {
                    if !condition.evaluate(ctx)? {
                        return Some(false);
                    }
                }
                Some(true)
            }
            Self::Complex {
                junction: Junction::Or,
                conditions,
                ..
            } => {
                for condition in conditions {
                    if condition.evaluate(ctx)? {
                        return Some(true);
                    }
                }
                Some(false)
            }
        }
    }

    fn map_value(&self, f: impl FnOnce(&SpecValue) -> SpecValue) -> Self {
        match self {
            Self::Default(value) => Self::Default(f(value)),
            Self::Conditional { when, value } => Self::Conditional {
                when: when.clone(),
                value: f(value),
            },
            Self::Complex {
                junction,
                conditions,
                value,
            } => Self::Complex {
                junction: *junction,
                conditions: conditions.clone(),
                value: f(value),
            },
        }
    }
}

/// Ordered cases; the first one that passes supplies the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchValue {
    cases: Vec<SwitchCase>,
}

impl SwitchValue {
    pub fn new(cases: Vec<SwitchCase>) -> Self {
        Self { cases }
    }

    pub fn cases(&self) -> &[SwitchCase] {
        &self.cases
    }

    /// The value of the first passing case.
    ///
    /// Fails if a case before the match cannot be decided, or if no case passes.
    pub fn select(&self, ctx: Option<&dyn EvaluationContext>) -> Option<&SpecValue> {
        for (index, case) in self.cases.iter().enumerate() {
            match case.passes(ctx) {
                Some(true) => {
                    tracing::debug!(case = index, "switch case selected");
                    return Some(case.value());
                }
                Some(false) => {}
                None => {
                    tracing::debug!(case = index, "switch case undecidable");
                    return None;
                }
            }
        }
        tracing::debug!(cases = self.cases.len(), "no switch case matched");
        None
    }

    pub fn simplified(&self) -> Self {
        Self::new(
            self.cases
                .iter()
                .map(|case| case.map_value(SpecValue::simplified))
                .collect(),
        )
    }
}

impl TypedValue for SwitchValue {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        self.select(ctx)
            .is_some_and(|value| value.visit_with(ctx, visitor))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/switch.rs"]
mod tests;
