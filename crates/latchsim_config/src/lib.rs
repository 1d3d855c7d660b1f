//! Loading of TOML circuit files.
//!
//! This crate reads a circuit file, produces a strongly-typed [`CircuitFile`],
//! and lowers it into the simulator's [`CircuitModel`](latchsim_sim::CircuitModel).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod lower;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_circuit, load_circuit_from_str};
pub use lower::lower;
pub use types::*;
