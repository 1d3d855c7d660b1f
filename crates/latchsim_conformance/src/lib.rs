//! Conformance test helpers for latchsim.
//!
//! Provides pipeline functions that take circuit file text through the whole
//! flow (parse → lower → simulate) and return the output traces as plain
//! strings for assertion in integration tests.

#![warn(missing_docs)]

use std::sync::Arc;

use latchsim_common::Interner;
use latchsim_config::ConfigError;
use latchsim_sim::{Circuit, CircuitModel, SimConfig, SimError};

/// A failure anywhere in the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The circuit file could not be parsed or lowered.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Validation or simulation failed.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl PipelineError {
    /// Returns the simulator error, if this is one.
    pub fn as_sim(&self) -> Option<&SimError> {
        match self {
            PipelineError::Sim(e) => Some(e),
            PipelineError::Config(_) => None,
        }
    }
}

/// Output traces of a completed run, as `(signal, bits)` pairs in output order.
pub type Outputs = Vec<(String, String)>;

/// Parses and lowers circuit file text.
pub fn load_model(source: &str) -> Result<(CircuitModel, Arc<Interner>), ConfigError> {
    let file = latchsim_config::load_circuit_from_str(source)?;
    let interner = Arc::new(Interner::new());
    let model = latchsim_config::lower(&file, &interner)?;
    Ok((model, interner))
}

/// Builds an unstarted [`Circuit`] from circuit file text, for tests that
/// drive the phases by hand.
pub fn build_circuit(source: &str) -> Result<Circuit, ConfigError> {
    let (model, interner) = load_model(source)?;
    Ok(Circuit::new(model, interner))
}

/// Runs the full pipeline on circuit file text.
pub fn run_circuit(source: &str) -> Result<Outputs, PipelineError> {
    let (model, interner) = load_model(source)?;
    let circuit = latchsim_sim::simulate(model, &SimConfig::default(), interner)?;
    Ok(collect_outputs(&circuit))
}

/// Runs the full pipeline and returns only the simulator error.
///
/// # Panics
///
/// Panics if the run succeeds or fails while loading.
pub fn expect_sim_error(source: &str) -> SimError {
    match run_circuit(source) {
        Ok(outputs) => panic!("expected a simulation error, got outputs {outputs:?}"),
        Err(PipelineError::Config(e)) => panic!("expected a simulation error, got {e}"),
        Err(PipelineError::Sim(e)) => e,
    }
}

/// Reads the output traces of a completed circuit.
pub fn collect_outputs(circuit: &Circuit) -> Outputs {
    circuit
        .simoutputs()
        .iter()
        .map(|trace| {
            (
                circuit.interner().resolve(trace.signal).to_string(),
                trace.bits().to_string(),
            )
        })
        .collect()
}

/// Looks up one output trace by name.
pub fn output<'a>(outputs: &'a Outputs, signal: &str) -> Option<&'a str> {
    outputs
        .iter()
        .find(|(name, _)| name == signal)
        .map(|(_, bits)| bits.as_str())
}
