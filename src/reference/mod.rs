//! Property (`@`) and data (`#`) reference grammar.

mod data;
mod property;

pub use data::{DataProperty, DataRef, DataRoot};
pub use property::{PropertyContext, PropertyRef};
