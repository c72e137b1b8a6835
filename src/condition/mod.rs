//! Conditions and first-match switch values.

mod json;
mod operation;
mod predicate;
mod registry;
mod switch;

pub use json::SpecLoader;
pub use operation::ConditionOperation;
pub use predicate::Condition;
pub use registry::OperationRegistry;
pub use switch::{Junction, SwitchCase, SwitchValue};
