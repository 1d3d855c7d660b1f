//! The circuit and its cycle-by-cycle simulation driver.
//!
//! [`Circuit`] owns a [`CircuitModel`] and walks it through the phases of a
//! run: `initialize` validates and settles cycle 0, each `advance_cycle`
//! computes and records one cycle, and `run_all` does both end to end. The
//! signal store is not part of the circuit; it is passed in by the caller and
//! exclusively borrowed for the duration of each call.
//!
//! Within a cycle the order is fixed:
//!
//! 1. every latch samples its input (the settled value of the previous cycle),
//! 2. the cycle's input values are written,
//! 3. every latch drives its sampled value,
//! 4. updates are evaluated in declared order,
//! 5. every output is recorded.
//!
//! Cycle 0 also checks the settled store for orphan bindings before recording.
//! Any error moves the run to [`SimPhase::Failed`] and drops the partial
//! output traces.

use std::fmt;
use std::sync::Arc;

use latchsim_common::Interner;

use crate::error::SimError;
use crate::model::CircuitModel;
use crate::store::SignalStore;
use crate::trace::Trace;
use crate::validate;

/// Where a circuit is in its simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Constructed; nothing validated or simulated yet.
    Uninitialized,
    /// Validated, with cycle 0 settled and output traces allocated.
    Initialized,
    /// The given cycle has been simulated and recorded.
    Running {
        /// The last completed cycle.
        cycle: usize,
    },
    /// Every cycle has been simulated; output traces are complete.
    Completed,
    /// A validation or runtime error aborted the run.
    Failed,
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimPhase::Uninitialized => write!(f, "uninitialized"),
            SimPhase::Initialized => write!(f, "initialized"),
            SimPhase::Running { cycle } => write!(f, "running cycle {cycle}"),
            SimPhase::Completed => write!(f, "completed"),
            SimPhase::Failed => write!(f, "failed"),
        }
    }
}

/// A circuit together with the state of its simulation run.
///
/// Construct with [`Circuit::new`], then call [`run_all`](Circuit::run_all),
/// or drive it manually with [`initialize`](Circuit::initialize) followed by
/// [`advance_cycle`](Circuit::advance_cycle) for cycles `0..N` in order.
#[derive(Debug)]
pub struct Circuit {
    /// The circuit description.
    model: CircuitModel,
    /// Name table shared with the signal store.
    interner: Arc<Interner>,
    /// Number of cycles, set by `initialize`.
    simulation_length: usize,
    /// One trace per output, allocated by `initialize`.
    simoutputs: Vec<Trace>,
    /// Current phase of the run.
    phase: SimPhase,
}

impl Circuit {
    /// Wraps a model for simulation. No validation happens here.
    pub fn new(model: CircuitModel, interner: Arc<Interner>) -> Self {
        Self {
            model,
            interner,
            simulation_length: 0,
            simoutputs: Vec::new(),
            phase: SimPhase::Uninitialized,
        }
    }

    /// The circuit name.
    pub fn name(&self) -> &str {
        self.interner.resolve(self.model.name)
    }

    /// The underlying description.
    pub fn model(&self) -> &CircuitModel {
        &self.model
    }

    /// The name table shared with this circuit's signal stores.
    pub fn interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    /// The current phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Number of cycles to simulate; zero before `initialize`.
    pub fn simulation_length(&self) -> usize {
        self.simulation_length
    }

    /// The input traces.
    pub fn siminputs(&self) -> &[Trace] {
        &self.model.siminputs
    }

    /// The output traces, in `outputs` order. Complete once the phase is
    /// [`SimPhase::Completed`].
    pub fn simoutputs(&self) -> &[Trace] {
        &self.simoutputs
    }

    /// Creates an empty signal store sharing this circuit's name table.
    pub fn new_store(&self) -> SignalStore {
        SignalStore::new(Arc::clone(&self.interner))
    }

    /// Runs the static checks in order: unique writers, declared update
    /// order, written latch inputs, then input traces bound to declared inputs.
    pub fn validate(&self) -> Result<(), SimError> {
        validate::check_unique_writers(&self.model, &self.interner)?;
        validate::check_update_order(&self.model, &self.interner)?;
        validate::check_latch_inputs(&self.model, &self.interner)?;
        validate::check_trace_bindings(&self.model, &self.interner)
    }

    /// Validates the circuit and settles cycle 0.
    ///
    /// Checks the input traces (present, non-empty, equal length, cycle 0 set),
    /// writes the cycle 0 inputs, resets every latch, evaluates every update
    /// once, and allocates an unset trace of length `N` per output.
    pub fn initialize(&mut self, store: &mut SignalStore) -> Result<(), SimError> {
        if self.phase != SimPhase::Uninitialized {
            return Err(self.invalid_phase("initialize".to_string()));
        }
        let result = self.try_initialize(store);
        self.settle(result)
    }

    /// Simulates and records `cycle`, which must be the next cycle of the run.
    pub fn advance_cycle(&mut self, store: &mut SignalStore, cycle: usize) -> Result<(), SimError> {
        let expected = match self.phase {
            SimPhase::Initialized => Some(0),
            SimPhase::Running { cycle: last } => Some(last + 1),
            _ => None,
        };
        if expected != Some(cycle) {
            return Err(self.invalid_phase(format!("advance to cycle {cycle}")));
        }
        let result = self.try_advance(store, cycle);
        self.settle(result)
    }

    /// Initializes and simulates every cycle with a fresh store, returning the
    /// completed output traces. Stops at the first error.
    pub fn run_all(&mut self) -> Result<&[Trace], SimError> {
        let mut store = self.new_store();
        self.initialize(&mut store)?;
        for cycle in 0..self.simulation_length {
            self.advance_cycle(&mut store, cycle)?;
        }
        Ok(&self.simoutputs)
    }

    fn try_initialize(&mut self, store: &mut SignalStore) -> Result<(), SimError> {
        self.validate()?;
        let length = self.check_trace_lengths()?;

        self.apply_inputs(store, 0)?;
        for latch in &self.model.latches {
            latch.initialize(store);
        }
        for update in &self.model.updates {
            update.eval(store)?;
        }

        self.simulation_length = length;
        self.simoutputs = self
            .model
            .outputs
            .iter()
            .map(|&name| Trace::unset(name, length))
            .collect();
        self.phase = SimPhase::Initialized;
        Ok(())
    }

    fn try_advance(&mut self, store: &mut SignalStore, cycle: usize) -> Result<(), SimError> {
        // At cycle 0 latches keep the reset value from `initialize`.
        let sampled = if cycle == 0 {
            vec![false; self.model.latches.len()]
        } else {
            self.model
                .latches
                .iter()
                .map(|latch| latch.sample(store))
                .collect::<Result<Vec<_>, _>>()?
        };

        self.apply_inputs(store, cycle)?;
        for (latch, value) in self.model.latches.iter().zip(sampled) {
            latch.load(store, value);
        }
        for update in &self.model.updates {
            update.eval(store)?;
        }
        if cycle == 0 {
            validate::check_orphans(&self.model, store)?;
        }

        for trace in &mut self.simoutputs {
            trace.record(cycle, store.get(trace.signal)?);
        }

        self.phase = if cycle + 1 >= self.simulation_length {
            SimPhase::Completed
        } else {
            SimPhase::Running { cycle }
        };
        Ok(())
    }

    /// Returns the common length of the input traces.
    fn check_trace_lengths(&self) -> Result<usize, SimError> {
        let first = self.model.siminputs.first().ok_or(SimError::EmptyInput)?;
        let expected = first.len();
        if expected == 0 {
            return Err(SimError::EmptyInput);
        }
        for trace in &self.model.siminputs[1..] {
            if trace.len() != expected {
                return Err(SimError::LengthMismatch {
                    signal: self.interner.resolve(trace.signal).to_string(),
                    expected,
                    found: trace.len(),
                });
            }
        }
        Ok(expected)
    }

    fn check_inputs_present(&self, cycle: usize) -> Result<(), SimError> {
        match self.model.siminputs.iter().find(|t| t.get(cycle).is_none()) {
            Some(trace) => Err(SimError::MissingValue {
                signal: self.interner.resolve(trace.signal).to_string(),
                cycle,
            }),
            None => Ok(()),
        }
    }

    /// Writes every input value of `cycle` to the store.
    fn apply_inputs(&self, store: &mut SignalStore, cycle: usize) -> Result<(), SimError> {
        self.check_inputs_present(cycle)?;
        for trace in &self.model.siminputs {
            if let Some(value) = trace.get(cycle) {
                store.set(trace.signal, value);
            }
        }
        Ok(())
    }

    fn invalid_phase(&mut self, operation: String) -> SimError {
        let err = SimError::InvalidPhase {
            operation,
            phase: self.phase,
        };
        self.phase = SimPhase::Failed;
        self.simoutputs.clear();
        err
    }

    /// Moves the run to `Failed` if `result` is an error. A failed run keeps
    /// no output traces.
    fn settle<T>(&mut self, result: Result<T, SimError>) -> Result<T, SimError> {
        if result.is_err() {
            self.phase = SimPhase::Failed;
            self.simoutputs.clear();
        }
        result
    }
}
