//! Simulation error types.
//!
//! Every failure of a simulation run, static or dynamic, is a variant of
//! [`SimError`]. None of them are recoverable: the run that produced one is
//! abandoned and its partial output discarded.

use std::io;

use crate::circuit::SimPhase;

/// Errors that can occur while validating or simulating a circuit.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A signal is written by more than one input, latch output, or update.
    #[error("signal '{0}' is driven more than once")]
    DuplicateSignal(String),

    /// An update reads a signal that is not available at its position in the
    /// declared update order.
    #[error("unresolved dependency on signal '{0}'")]
    UnresolvedDependency(String),

    /// The signal store holds a binding that no input, latch, or update writes.
    #[error("signal '{0}' is bound but has no driver")]
    OrphanSignal(String),

    /// Evaluation read a signal that has no value in the store.
    #[error("signal '{0}' is not defined")]
    UndefinedSignal(String),

    /// No input traces were supplied, or the traces cover zero cycles.
    #[error("simulation input is empty")]
    EmptyInput,

    /// Input traces disagree on the simulation length.
    #[error("trace for '{signal}' has {found} cycles, expected {expected}")]
    LengthMismatch {
        /// The signal whose trace has the wrong length.
        signal: String,
        /// The simulation length set by the first trace.
        expected: usize,
        /// The length of the offending trace.
        found: usize,
    },

    /// An input trace has no value for the cycle being processed.
    #[error("trace for '{signal}' has no value at cycle {cycle}")]
    MissingValue {
        /// The input signal lacking a value.
        signal: String,
        /// The cycle being processed.
        cycle: usize,
    },

    /// A driver operation was called in a phase that does not allow it.
    #[error("cannot {operation} while the simulation is {phase}")]
    InvalidPhase {
        /// The attempted operation.
        operation: String,
        /// The phase the circuit was in.
        phase: SimPhase,
    },

    /// A waveform change was recorded for a signal never registered.
    #[error("signal #{0} is not registered with the waveform recorder")]
    UnregisteredWaveformSignal(u32),

    /// An I/O error occurred while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),
}
