use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::value::{Value, ValueKind};

/// Set of supported argument counts. Bit `n` set means `n` arguments are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArityMask(u8);

impl ArityMask {
    pub const NONE: Self = Self(0);
    pub const ZERO: Self = Self(1);
    pub const ONE: Self = Self(1 << 1);
    pub const TWO: Self = Self(1 << 2);
    pub const THREE: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn supports(self, count: usize) -> bool {
        count <= MAX_ARGUMENTS && self.0 & (1 << count) != 0
    }

    pub fn counts(self) -> impl Iterator<Item = usize> {
        (0..=MAX_ARGUMENTS).filter(move |&n| self.supports(n))
    }
}

impl fmt::Display for ArityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for n in self.counts() {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{n}")?;
            first = false;
        }
        Ok(())
    }
}

pub const MAX_ARGUMENTS: usize = 3;

/// How the parser should read a literal argument, and what the evaluator should coerce it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArgumentHint {
    #[default]
    Any,
    /// The literal must be numeric.
    Numeric,
    /// The literal is read as this kind, and evaluated arguments are coerced to it.
    Kind(ValueKind),
}

/// A function callable from expressions.
///
/// Arguments arrive already evaluated. `out` is the kind the caller would like back; functions
/// may use it to pick a precision but are free to return any kind.
pub trait ExpressionFunction: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn arity(&self) -> ArityMask;

    fn hint(&self, _index: usize) -> ArgumentHint {
        ArgumentHint::Any
    }

    /// Whether arguments pass through the coercion table (digit characters, booleans and legacy
    /// asset ids reduced to integers) before the call.
    fn reduces_arguments(&self) -> bool {
        true
    }

    fn evaluate0(&self, _out: ValueKind) -> Option<Value<'static>> {
        None
    }

    fn evaluate1(&self, _a: &Value<'_>, _out: ValueKind) -> Option<Value<'static>> {
        None
    }

    fn evaluate2(&self, _a: &Value<'_>, _b: &Value<'_>, _out: ValueKind) -> Option<Value<'static>> {
        None
    }

    fn evaluate3(
        &self,
        _a: &Value<'_>,
        _b: &Value<'_>,
        _c: &Value<'_>,
        _out: ValueKind,
    ) -> Option<Value<'static>> {
        None
    }
}

type Stack = Arc<[Arc<dyn ExpressionFunction>]>;

/// Name to implementation-stack map. Names are case-insensitive.
///
/// Every mutation swaps in a freshly built stack for the affected name, so a reader holding an
/// entry never sees it change.
#[derive(Default)]
pub struct FunctionCatalog {
    entries: RwLock<HashMap<String, Stack>>,
}

impl fmt::Debug for FunctionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCatalog")
            .field("functions", &self.len())
            .finish()
    }
}

impl FunctionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the built-in function set.
    pub fn with_builtins() -> Self {
        let catalog = Self::new();
        crate::expression::functions::register_builtins(&catalog);
        catalog
    }

    /// Makes `function` the active implementation for its name.
    #[tracing::instrument(level = "debug", skip_all, fields(function = function.name()))]
    pub fn register(&self, function: Arc<dyn ExpressionFunction>) {
        let key = function.name().to_ascii_lowercase();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let stack: Stack = match entries.get(&key) {
            Some(prev) => prev.iter().cloned().chain([function.clone()]).collect(),
            None => Arc::from([function.clone()]),
        };
        tracing::debug!(depth = stack.len(), "registered");
        entries.insert(key, stack);
    }

    /// Removes this exact implementation wherever it sits. Returns whether it was found.
    #[tracing::instrument(level = "debug", skip_all, fields(function = function.name()))]
    pub fn deregister(&self, function: &Arc<dyn ExpressionFunction>) -> bool {
        let key = function.name().to_ascii_lowercase();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(prev) = entries.get(&key) else {
            return false;
        };
        let Some(pos) = prev.iter().rposition(|f| Arc::ptr_eq(f, function)) else {
            return false;
        };

        let stack: Stack = prev
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != pos)
            .map(|(_, f)| f.clone())
            .collect();
        tracing::debug!(depth = stack.len(), "deregistered");
        if stack.is_empty() {
            entries.remove(&key);
        } else {
            entries.insert(key, stack);
        }
        true
    }

    /// The active implementation for `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ExpressionFunction>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&name.to_ascii_lowercase())
            .and_then(|stack| stack.last().cloned())
    }

    /// One active implementation per name, sorted by name.
    pub fn enumerate(&self) -> Vec<Arc<dyn ExpressionFunction>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<_> = entries
            .values()
            .filter_map(|stack| stack.last().cloned())
            .collect();
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/catalog.rs"]
mod tests;
