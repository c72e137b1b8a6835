use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::condition::operation::{self, ConditionOperation};

type Stack = Arc<[Arc<dyn ConditionOperation>]>;

/// Name to condition-operation map. Unlike function names, operation names are case-sensitive.
///
/// Shadowing works as in [`FunctionCatalog`](crate::expression::FunctionCatalog): the most
/// recent registration for a name is active until it is deregistered.
#[derive(Default)]
pub struct OperationRegistry {
    entries: RwLock<HashMap<String, Stack>>,
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.len())
            .finish()
    }
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for op in operation::builtins() {
            registry.register(op);
        }
        registry
    }

    pub fn register(&self, op: Arc<dyn ConditionOperation>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let stack: Stack = match entries.get(op.name()) {
            Some(prev) => prev.iter().cloned().chain([op.clone()]).collect(),
            None => Arc::from([op.clone()]),
        };
        tracing::debug!(operation = op.name(), depth = stack.len(), "registered");
        entries.insert(op.name().to_owned(), stack);
    }

    pub fn deregister(&self, op: &Arc<dyn ConditionOperation>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(prev) = entries.get(op.name()) else {
            return false;
        };
        let Some(pos) = prev.iter().rposition(|o| Arc::ptr_eq(o, op)) else {
            return false;
        };
        let stack: Stack = prev
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != pos)
            .map(|(_, o)| o.clone())
            .collect();
        tracing::debug!(operation = op.name(), depth = stack.len(), "deregistered");
        if stack.is_empty() {
            entries.remove(op.name());
        } else {
            entries.insert(op.name().to_owned(), stack);
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ConditionOperation>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(name).and_then(|stack| stack.last().cloned())
    }

    /// Active operations sorted by name.
    pub fn enumerate(&self) -> Vec<Arc<dyn ConditionOperation>> {
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
