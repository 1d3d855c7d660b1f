//! Shared pipeline helpers for CLI commands.
//!
//! Both `run` and `check` load a circuit file, lower it into a simulator
//! model, and report a few status lines along the way.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use latchsim_common::Interner;
use latchsim_config::CircuitFile;
use latchsim_sim::CircuitModel;

use crate::GlobalArgs;

/// A circuit file loaded and lowered, ready to simulate.
pub struct LoadedCircuit {
    /// The path the circuit was read from.
    pub path: PathBuf,
    /// The parsed file.
    pub file: CircuitFile,
    /// The lowered model.
    pub model: CircuitModel,
    /// The name table the model was interned into.
    pub interner: Arc<Interner>,
}

/// Reads, validates and lowers the circuit file at `arg`.
pub fn load(arg: &str, global: &GlobalArgs) -> Result<LoadedCircuit, Box<dyn std::error::Error>> {
    let path = PathBuf::from(arg);
    if !path.is_file() {
        return Err(format!("circuit file not found: '{arg}'").into());
    }

    let file = latchsim_config::load_circuit(&path)?;
    let interner = Arc::new(Interner::new());
    let model = latchsim_config::lower(&file, &interner)?;

    if global.verbose {
        eprintln!(
            "   Loaded {} ({} inputs, {} outputs, {} latches, {} updates)",
            path.display(),
            model.inputs.len(),
            model.outputs.len(),
            model.latches.len(),
            model.updates.len()
        );
    }

    Ok(LoadedCircuit {
        path,
        file,
        model,
        interner,
    })
}

/// Resolves `target` against the directory holding the circuit file.
///
/// Absolute paths are returned unchanged.
pub fn relative_to_circuit(circuit_path: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match circuit_path.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}
