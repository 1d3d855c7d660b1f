//! The parsed circuit description handed to the simulator.

use latchsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::latch::Latch;
use crate::trace::Trace;
use crate::update::Update;

/// A circuit as produced by a front end, before validation.
///
/// All sequences are ordered. The order of `updates` is the evaluation order,
/// and `outputs` fixes the order of the traces a run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitModel {
    /// The circuit name.
    pub name: Ident,
    /// Signals fed from the input traces.
    pub inputs: Vec<Ident>,
    /// Signals whose values are recorded every cycle.
    pub outputs: Vec<Ident>,
    /// One-cycle delay elements.
    pub latches: Vec<Latch>,
    /// Combinational assignments, in evaluation order.
    pub updates: Vec<Update>,
    /// Input traces, one per fed signal.
    pub siminputs: Vec<Trace>,
}

impl CircuitModel {
    /// Creates an empty model named `name`.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            latches: Vec::new(),
            updates: Vec::new(),
            siminputs: Vec::new(),
        }
    }

    /// Every write site in role order: inputs, latch outputs, update targets.
    ///
    /// A well-formed circuit has no repeated entry here.
    pub fn write_sites(&self) -> impl Iterator<Item = Ident> + '_ {
        self.inputs
            .iter()
            .copied()
            .chain(self.latches.iter().map(|l| l.output))
            .chain(self.updates.iter().map(|u| u.target))
    }
}
