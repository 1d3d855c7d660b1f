//! The `latchsim check` command: static validation without simulation.

use latchsim_sim::Circuit;

use crate::pipeline;
use crate::{CheckArgs, GlobalArgs};

/// Runs the `latchsim check` command.
///
/// Returns exit code 0 if the circuit passes every static check (one writer
/// per signal, a well-ordered update list, written latch inputs, traces only
/// for declared inputs), 1 otherwise. Files that cannot be loaded are
/// propagated as errors.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = pipeline::load(&args.circuit, global)?;
    let circuit = Circuit::new(loaded.model, loaded.interner);

    match circuit.validate() {
        Ok(()) => {
            if !global.quiet {
                eprintln!(
                    "   Checked {}: {} latch(es), {} update(s), no errors",
                    circuit.name(),
                    circuit.model().latches.len(),
                    circuit.model().updates.len()
                );
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("error: {}: {e}", circuit.name());
            Ok(1)
        }
    }
}
