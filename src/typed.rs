//! The typed-value capability shared by literals, references, expressions, conditions and
//! switches.
//!
//! Every [`TypedValue`] reports its concrete value to a [`ValueVisitor`] instead of returning a
//! boxed result. Higher-level constructs are composed from [`SpecValue`]s and never downcast.

use std::fmt;

use crate::condition::{Condition, SwitchValue};
use crate::context::EvaluationContext;
use crate::expression::{
    Expression, FunctionCatalog, ParseOptions, format_literal, parse_literal,
};
use crate::foundation::error::SpecResult;
use crate::reference::{DataRef, PropertyRef};
use crate::value::{ConvertVisitor, FromValue, Value, ValueCollector, ValueKind, ValueVisitor};

/// Something that can produce a value, with or without an evaluation context.
pub trait TypedValue {
    /// Hands the value to `visitor`. Returns `false` when the value cannot be determined; the
    /// visitor is not called in that case.
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool;

    /// The value as an owned [`Value`]. `desired` steers expressions towards a result kind.
    fn resolve(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        desired: Option<ValueKind>,
    ) -> Option<Value<'static>> {
        let mut collector = ValueCollector::new(desired);
        if !self.visit_with(ctx, &mut collector) {
            return None;
        }
        collector.finish()
    }

    /// The value converted to `T`. `Some(None)` is a determined null.
    fn evaluate_as<T: FromValue>(&self, ctx: Option<&dyn EvaluationContext>) -> Option<Option<T>> {
        let mut visitor = ConvertVisitor::<T>::default();
        if !self.visit_with(ctx, &mut visitor) {
            return None;
        }
        visitor.finish()
    }

    /// Context-free evaluation.
    fn try_concrete<T: FromValue>(&self) -> Option<Option<T>> {
        self.evaluate_as(None)
    }

    fn try_evaluate<T: FromValue>(&self, ctx: &dyn EvaluationContext) -> Option<Option<T>> {
        self.evaluate_as(Some(ctx))
    }
}

impl TypedValue for Value<'_> {
    fn visit_with<V: ValueVisitor>(
        &self,
        _ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        Value::visit(self, visitor);
        true
    }
}

impl TypedValue for Expression {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        let out = visitor.desired_kind().unwrap_or(ValueKind::F64);
        match self.root().evaluate(ctx, out) {
            Some(value) => {
                value.visit(visitor);
                true
            }
            None => false,
        }
    }
}

impl TypedValue for PropertyRef {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        match ctx.and_then(|ctx| ctx.property(self)) {
            Some(value) => {
                value.visit(visitor);
                true
            }
            None => false,
        }
    }
}

impl TypedValue for DataRef {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        match ctx.and_then(|ctx| ctx.data(self)) {
            Some(value) => {
                value.visit(visitor);
                true
            }
            None => false,
        }
    }
}

/// Any value a specification property can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecValue {
    Literal(Value<'static>),
    Property(PropertyRef),
    Data(DataRef),
    Expression(Expression),
    Switch(SwitchValue),
    Condition(Box<Condition>),
}

impl SpecValue {
    /// Parses a value descriptor: `@property`, `#data`, `=EXPR`, `%literal` (`%null` for null), or
    /// plain text which is taken as a string.
    pub fn parse_descriptor(
        text: &str,
        catalog: &FunctionCatalog,
        options: &ParseOptions,
    ) -> SpecResult<Self> {
        match text.chars().next() {
            Some('@') => Ok(Self::Property(PropertyRef::parse(text)?)),
            Some('#') => Ok(Self::Data(DataRef::parse(text)?)),
            Some('=') => Ok(Self::Expression(Expression::parse_with(
                text, catalog, options,
            )?)),
            Some('%') if text[1..].eq_ignore_ascii_case("null") => Ok(Self::Literal(Value::Null)),
            Some('%') => Ok(Self::Literal(parse_literal(&text[1..]))),
            _ => Ok(Self::Literal(Value::str(text.to_owned()))),
        }
    }

    /// Kind of a literal value. Used to pick a result kind for expressions compared against it.
    pub fn literal_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Literal(value) if !value.is_null() => Some(value.kind()),
            _ => None,
        }
    }

    /// Whether the value can be resolved without a context.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Property(_) | Self::Data(_) => false,
            Self::Expression(expr) => expr.is_constant(),
            Self::Switch(_) | Self::Condition(_) => false,
        }
    }

    /// Replaces reference-free expressions with their value, recursing into switch cases.
    pub fn simplified(&self) -> Self {
        match self {
            Self::Expression(expr) => match expr.fold(ValueKind::F64) {
                Some(value) => Self::Literal(value),
                None => self.clone(),
            },
            Self::Switch(switch) => Self::Switch(switch.simplified()),
            other => other.clone(),
        }
    }
}

impl TypedValue for SpecValue {
    fn visit_with<V: ValueVisitor>(
        &self,
        ctx: Option<&dyn EvaluationContext>,
        visitor: &mut V,
    ) -> bool {
        match self {
            Self::Literal(value) => value.visit_with(ctx, visitor),
            Self::Property(r) => r.visit_with(ctx, visitor),
            Self::Data(r) => r.visit_with(ctx, visitor),
            Self::Expression(expr) => expr.visit_with(ctx, visitor),
            Self::Switch(switch) => switch.visit_with(ctx, visitor),
            Self::Condition(condition) => condition.visit_with(ctx, visitor),
        }
    }
}

impl From<Value<'static>> for SpecValue {
    fn from(value: Value<'static>) -> Self {
        Self::Literal(value)
    }
}

impl From<PropertyRef> for SpecValue {
    fn from(value: PropertyRef) -> Self {
        Self::Property(value)
    }
}

impl From<DataRef> for SpecValue {
    fn from(value: DataRef) -> Self {
        Self::Data(value)
    }
}

impl From<Expression> for SpecValue {
    fn from(value: Expression) -> Self {
        Self::Expression(value)
    }
}

impl From<SwitchValue> for SpecValue {
    fn from(value: SwitchValue) -> Self {
        Self::Switch(value)
    }
}

impl From<Condition> for SpecValue {
    fn from(value: Condition) -> Self {
        Self::Condition(Box::new(value))
    }
}

/// Descriptor text. Parsing it with [`SpecValue::parse_descriptor`] gives back an equal value for
/// literals, references and expressions.
impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Value::Str(text)) => {
                if text.starts_with(['@', '#', '=', '%']) {
                    write!(f, "%{text}")
                } else {
                    f.write_str(text)
                }
            }
            Self::Literal(Value::Null) => f.write_str("%null"),
            Self::Literal(value) => write!(f, "%{}", format_literal(value)),
            Self::Property(r) => write!(f, "@{r}"),
            Self::Data(r) => write!(f, "#{r}"),
            Self::Expression(expr) => write!(f, "={expr}"),
            Self::Switch(switch) => write!(f, "{}", switch.to_json()),
            Self::Condition(condition) => condition.fmt(f),
        }
    }
}
