//! One-cycle latches.

use latchsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::store::SignalStore;

/// A one-cycle register: at cycle `t`, `output` holds the value `input` had
/// when cycle `t - 1` settled, and `false` at cycle 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latch {
    /// The signal sampled at the end of each cycle.
    pub input: Ident,
    /// The signal driven by the latch.
    pub output: Ident,
}

impl Latch {
    /// Creates a latch copying `input` into `output` with one cycle of delay.
    pub fn new(input: Ident, output: Ident) -> Self {
        Self { input, output }
    }

    /// Drives the reset value onto the output.
    pub fn initialize(&self, store: &mut SignalStore) {
        store.set(self.output, false);
    }

    /// Copies the current value of the input to the output.
    pub fn advance_cycle(&self, store: &mut SignalStore) -> Result<(), SimError> {
        let value = self.sample(store)?;
        self.load(store, value);
        Ok(())
    }

    /// Reads the input without touching the output.
    ///
    /// Sampling every latch before loading any of them keeps a batch of
    /// latches reading one consistent snapshot of the previous cycle.
    pub fn sample(&self, store: &SignalStore) -> Result<bool, SimError> {
        store.get(self.input)
    }

    /// Drives a previously sampled value onto the output.
    pub fn load(&self, store: &mut SignalStore, value: bool) {
        store.set(self.output, value);
    }
}
