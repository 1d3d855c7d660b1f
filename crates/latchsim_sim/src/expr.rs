//! Boolean expression trees over signal references.
//!
//! [`Expr`] is built once when the circuit is constructed and never changes.
//! [`Expr::eval`] is a pure function of the signal store; [`Expr::references`]
//! exposes the referenced names for static dependency checking.

use latchsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::store::SignalStore;

/// A boolean formula over named signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// The current value of a signal.
    Signal(Ident),
    /// Conjunction of two sub-expressions.
    And(Box<Expr>, Box<Expr>),
    /// Disjunction of two sub-expressions.
    Or(Box<Expr>, Box<Expr>),
    /// Negation of a sub-expression.
    Not(Box<Expr>),
}

impl Expr {
    /// A reference to `name`.
    pub fn signal(name: Ident) -> Self {
        Expr::Signal(name)
    }

    /// `lhs AND rhs`.
    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// `lhs OR rhs`.
    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// `NOT inner`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Evaluates the expression against the current store.
    ///
    /// Both operands of `And`/`Or` are always evaluated, so a reference to an
    /// undefined signal is reported even where it could not change the result.
    pub fn eval(&self, store: &SignalStore) -> Result<bool, SimError> {
        match self {
            Expr::Signal(name) => store.get(*name),
            Expr::And(lhs, rhs) => {
                let l = lhs.eval(store)?;
                let r = rhs.eval(store)?;
                Ok(l & r)
            }
            Expr::Or(lhs, rhs) => {
                let l = lhs.eval(store)?;
                let r = rhs.eval(store)?;
                Ok(l | r)
            }
            Expr::Not(inner) => Ok(!inner.eval(store)?),
        }
    }

    /// Returns every referenced signal in left-to-right order, duplicates kept.
    pub fn references(&self) -> Vec<Ident> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<Ident>) {
        match self {
            Expr::Signal(name) => out.push(*name),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
            Expr::Not(inner) => inner.collect_references(out),
        }
    }
}
