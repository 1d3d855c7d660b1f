//! The per-run signal store.
//!
//! [`SignalStore`] maps every signal name to its value in the cycle currently
//! being processed. It is overwritten, never cleared, from one cycle to the
//! next, so each read during update evaluation must follow a write made
//! earlier in the same cycle. Circuit validation is what guarantees that.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use latchsim_common::{Ident, Interner};

use crate::error::SimError;

/// Mutable mapping from signal name to its current boolean value.
///
/// A store is exclusively owned by one simulation run and threaded through
/// the driver by `&mut` reference.
#[derive(Debug)]
pub struct SignalStore {
    /// Shared name table, used to name signals in errors.
    interner: Arc<Interner>,
    /// Current value of every bound signal.
    values: HashMap<Ident, bool>,
}

impl SignalStore {
    /// Creates an empty store resolving names through `interner`.
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            values: HashMap::new(),
        }
    }

    /// Binds `name` to `value`, overwriting any previous value.
    pub fn set(&mut self, name: Ident, value: bool) {
        self.values.insert(name, value);
    }

    /// Returns the current value of `name`.
    pub fn get(&self, name: Ident) -> Result<bool, SimError> {
        self.values
            .get(&name)
            .copied()
            .ok_or_else(|| SimError::UndefinedSignal(self.resolve(name).to_string()))
    }

    /// Returns `true` if `name` is bound.
    pub fn has(&self, name: Ident) -> bool {
        self.values.contains_key(&name)
    }

    /// Returns the set of currently bound names, in no particular order.
    pub fn names(&self) -> HashSet<Ident> {
        self.values.keys().copied().collect()
    }

    /// Resolves a name to its text.
    pub fn resolve(&self, name: Ident) -> &str {
        self.interner.resolve(name)
    }

    /// Number of bound signals.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no signal is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> (SignalStore, Vec<Ident>) {
        let interner = Arc::new(Interner::new());
        let ids = names.iter().map(|n| interner.get_or_intern(n)).collect();
        (SignalStore::new(interner), ids)
    }

    #[test]
    fn set_then_get() {
        let (mut store, ids) = store_with(&["a"]);
        store.set(ids[0], true);
        assert!(store.get(ids[0]).unwrap());
    }

    #[test]
    fn set_overwrites() {
        let (mut store, ids) = store_with(&["a"]);
        store.set(ids[0], true);
        store.set(ids[0], false);
        assert!(!store.get(ids[0]).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_undefined() {
        let (store, ids) = store_with(&["ghost"]);
        match store.get(ids[0]) {
            Err(SimError::UndefinedSignal(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected UndefinedSignal, got {other:?}"),
        }
    }

    #[test]
    fn has_never_fails() {
        let (mut store, ids) = store_with(&["a", "b"]);
        store.set(ids[0], false);
        assert!(store.has(ids[0]));
        assert!(!store.has(ids[1]));
    }

    #[test]
    fn names_lists_bound_signals() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        assert!(store.is_empty());
        store.set(ids[0], true);
        store.set(ids[2], false);
        let names = store.names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&ids[0]));
        assert!(names.contains(&ids[2]));
        assert!(!names.contains(&ids[1]));
    }
}
