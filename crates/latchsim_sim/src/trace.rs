//! Per-signal time series.

use latchsim_common::{BitString, Ident};
use serde::{Deserialize, Serialize};

/// The values of one signal over the cycles of a run.
///
/// Input traces are supplied before the run; output traces are allocated
/// unset by `Circuit::initialize` and filled in one cycle at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The traced signal.
    pub signal: Ident,
    /// One entry per cycle; `None` marks a value not (yet) known.
    pub values: Vec<Option<bool>>,
}

impl Trace {
    /// Creates a trace from per-cycle values.
    pub fn new(signal: Ident, values: Vec<Option<bool>>) -> Self {
        Self { signal, values }
    }

    /// Creates a fully set trace.
    pub fn from_bools(signal: Ident, values: &[bool]) -> Self {
        Self::new(signal, values.iter().copied().map(Some).collect())
    }

    /// Creates a trace of `len` unset values.
    pub fn unset(signal: Ident, len: usize) -> Self {
        Self::new(signal, vec![None; len])
    }

    /// Number of cycles covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the trace covers no cycle.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `cycle`, if the trace covers it and it is set.
    pub fn get(&self, cycle: usize) -> Option<bool> {
        self.values.get(cycle).copied().flatten()
    }

    /// Records `value` at `cycle`. Cycles past the end are ignored.
    pub fn record(&mut self, cycle: usize, value: bool) {
        if let Some(slot) = self.values.get_mut(cycle) {
            *slot = Some(value);
        }
    }

    /// Returns all values if every cycle is set.
    pub fn to_bools(&self) -> Option<Vec<bool>> {
        self.values.iter().copied().collect()
    }

    /// The trace as a bit-string literal.
    pub fn bits(&self) -> BitString {
        BitString::new(self.values.clone())
    }
}
