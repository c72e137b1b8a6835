#![forbid(unsafe_code)]

pub mod condition;
pub mod context;
pub mod expression;
mod foundation;
pub mod reference;
pub mod typed;
pub mod value;

pub use condition::{Condition, ConditionOperation, OperationRegistry, SpecLoader, SwitchValue};
pub use context::{EvaluationContext, StaticContext};
pub use expression::{ExprError, Expression, FunctionCatalog, ParseOptions};
pub use foundation::error::{SpecError, SpecResult};
pub use typed::{SpecValue, TypedValue};
pub use value::{Value, ValueKind};
