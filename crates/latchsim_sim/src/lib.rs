//! Cycle-based simulator for latch/update circuits.
//!
//! A circuit is a set of boolean signals: inputs fed from per-cycle traces,
//! latches that delay a signal by one cycle, and combinational updates
//! `name = expr` evaluated every cycle in their declared order. Given the
//! input traces, the simulator computes the output traces cycle by cycle.
//!
//! # Architecture
//!
//! A [`CircuitModel`] is wrapped in a [`Circuit`], which validates it (every
//! signal has one writer, and the declared update order reads only signals
//! already computed) and then drives the cycle loop against a [`SignalStore`]
//! passed in by the caller.
//!
//! # Usage
//!
//! ```ignore
//! use latchsim_sim::{simulate, SimConfig};
//!
//! let circuit = simulate(model, &SimConfig::default(), interner)?;
//! print!("{}", latchsim_sim::render::render_outputs(&circuit));
//! ```
//!
//! # Modules
//!
//! - `error` — Simulation error types
//! - `expr` — Boolean expression trees
//! - `store` — The per-run signal store
//! - `latch` — One-cycle latches
//! - `update` — Combinational updates
//! - `trace` — Per-signal time series
//! - `model` — The circuit description
//! - `validate` — Static well-formedness checks
//! - `circuit` — The cycle driver
//! - `render` — Plain-text trace output
//! - `waveform` — VCD waveform output

#![warn(missing_docs)]

pub mod circuit;
pub mod error;
pub mod expr;
pub mod latch;
pub mod model;
pub mod render;
pub mod store;
pub mod trace;
pub mod update;
pub mod validate;
pub mod waveform;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use latchsim_common::Interner;

pub use circuit::{Circuit, SimPhase};
pub use error::SimError;
pub use expr::Expr;
pub use latch::Latch;
pub use model::CircuitModel;
pub use store::SignalStore;
pub use trace::Trace;
pub use update::Update;
pub use waveform::{VcdRecorder, WaveformRecorder};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// Optional path for VCD waveform output.
    pub waveform_path: Option<PathBuf>,
    /// Whether to write the waveform. Ignored if `waveform_path` is `None`.
    pub record_waveform: bool,
}

/// High-level entry point: validates and simulates a circuit to completion.
///
/// Returns the completed [`Circuit`], whose output traces are all set. If the
/// configuration asks for a waveform, it is written once the run succeeds; a
/// failed run writes nothing.
pub fn simulate(
    model: CircuitModel,
    config: &SimConfig,
    interner: Arc<Interner>,
) -> Result<Circuit, SimError> {
    let mut circuit = Circuit::new(model, interner);
    circuit.run_all()?;

    if config.record_waveform {
        if let Some(path) = &config.waveform_path {
            let file = File::create(path)?;
            let mut recorder = VcdRecorder::new(BufWriter::new(file));
            waveform::record_run(&circuit, &mut recorder)?;
        }
    }

    Ok(circuit)
}
