//! Per-asset evaluation context.
//!
//! The editor side implements [`EvaluationContext`] over a parsed asset file. [`StaticContext`]
//! is an in-memory implementation used by the CLI and tests.

use std::collections::HashMap;

use crate::reference::{DataRef, PropertyRef};
use crate::value::Value;

/// Resolves references while evaluating against one asset file.
///
/// `None` means the reference cannot currently be determined. A reference that resolves to
/// nothing is `Some(Value::Null)`.
pub trait EvaluationContext {
    fn property(&self, reference: &PropertyRef) -> Option<Value<'static>>;

    fn data(&self, reference: &DataRef) -> Option<Value<'static>>;

    /// Whether type `from` can be assigned to type `to`.
    fn is_assignable(&self, from: &str, to: &str) -> Option<bool> {
        Some(from.eq_ignore_ascii_case(to))
    }

    /// Whether `value` is of the named type.
    fn is_type(&self, value: &Value<'_>, type_name: &str) -> Option<bool> {
        let kind = value.kind();
        Some(
            kind.name().eq_ignore_ascii_case(type_name)
                || type_name
                    .parse()
                    .is_ok_and(|named: crate::value::ValueKind| named == kind),
        )
    }
}

/// Map-backed context. Property names are case-insensitive; data references are keyed by their
/// canonical text.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    properties: HashMap<String, Value<'static>>,
    data: HashMap<String, Value<'static>>,
    supertypes: HashMap<String, Vec<String>>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: &str, value: impl Into<Value<'static>>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<Value<'static>>) {
        self.properties
            .insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn with_data(mut self, reference: &DataRef, value: impl Into<Value<'static>>) -> Self {
        self.data.insert(reference.to_string(), value.into());
        self
    }

    /// Declares `child` assignable to `parent` (directly or through `parent`'s own supertypes).
    pub fn with_supertype(mut self, child: &str, parent: &str) -> Self {
        self.supertypes
            .entry(child.to_ascii_lowercase())
            .or_default()
            .push(parent.to_ascii_lowercase());
        self
    }

    fn assignable(&self, from: &str, to: &str, depth: usize) -> bool {
        if from == to {
            return true;
        }
        if depth > 32 {
            return false;
        }
        self.supertypes
            .get(from)
            .is_some_and(|parents| parents.iter().any(|p| self.assignable(p, to, depth + 1)))
    }
}

impl EvaluationContext for StaticContext {
    fn property(&self, reference: &PropertyRef) -> Option<Value<'static>> {
        let name = reference.name.to_ascii_lowercase();
        if let Some(owner) = &reference.owner {
            let qualified = format!("{}::{name}", owner.to_ascii_lowercase());
            if let Some(value) = self.properties.get(&qualified) {
                return Some(value.clone());
            }
        }
        self.properties.get(&name).cloned()
    }

    fn data(&self, reference: &DataRef) -> Option<Value<'static>> {
        self.data.get(&reference.to_string()).cloned()
    }

    fn is_assignable(&self, from: &str, to: &str) -> Option<bool> {
        Some(self.assignable(&from.to_ascii_lowercase(), &to.to_ascii_lowercase(), 0))
    }
}
