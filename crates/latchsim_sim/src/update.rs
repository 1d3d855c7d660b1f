//! Combinational signal updates.

use latchsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::expr::Expr;
use crate::store::SignalStore;

/// A combinational assignment `target = expr`, recomputed every cycle from
/// that same cycle's signal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// The signal written by this update.
    pub target: Ident,
    /// The formula computing the target.
    pub expr: Expr,
}

impl Update {
    /// Creates an update assigning `expr` to `target`.
    pub fn new(target: Ident, expr: Expr) -> Self {
        Self { target, expr }
    }

    /// Evaluates the expression and writes the result to the target.
    pub fn eval(&self, store: &mut SignalStore) -> Result<(), SimError> {
        let value = self.expr.eval(store)?;
        store.set(self.target, value);
        Ok(())
    }

    /// The signals this update reads, in left-to-right order.
    pub fn dependencies(&self) -> Vec<Ident> {
        self.expr.references()
    }
}
