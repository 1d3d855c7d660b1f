//! Types deserialized from a circuit file.
//!
//! ```toml
//! [circuit]
//! name = "toggle"
//! inputs = ["en"]
//! outputs = ["q"]
//!
//! [[latches]]
//! input = "d"
//! output = "q"
//!
//! [[updates]]
//! target = "d"
//! expr = { or = [{ and = ["en", { not = "q" }] }, { and = [{ not = "en" }, "q"] }] }
//!
//! [simulate]
//! en = "1101"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

/// A complete circuit file.
#[derive(Debug, Deserialize)]
pub struct CircuitFile {
    /// Name and signal interface.
    pub circuit: CircuitMeta,
    /// One-cycle latches.
    #[serde(default)]
    pub latches: Vec<LatchSpec>,
    /// Combinational updates, in evaluation order.
    #[serde(default)]
    pub updates: Vec<UpdateSpec>,
    /// Input traces keyed by signal name.
    #[serde(default)]
    pub simulate: BTreeMap<String, TraceLiteral>,
    /// How results are presented.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[circuit]` table.
#[derive(Debug, Deserialize)]
pub struct CircuitMeta {
    /// The circuit name.
    pub name: String,
    /// A free-form description.
    #[serde(default)]
    pub description: String,
    /// Signals fed from the `[simulate]` traces.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Signals whose traces are reported.
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// A `[[latches]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LatchSpec {
    /// The sampled signal.
    pub input: String,
    /// The delayed signal.
    pub output: String,
}

/// An `[[updates]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpec {
    /// The assigned signal.
    pub target: String,
    /// The formula.
    pub expr: ExprSpec,
}

/// A boolean expression as written in the file.
///
/// A bare string names a signal; otherwise a single-key table selects the
/// operator: `{ signal = "a" }`, `{ not = e }`, `{ and = [e1, e2] }`,
/// `{ or = [e1, e2] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExprSpec {
    /// Shorthand for `{ signal = "..." }`.
    Name(String),
    /// An operator node.
    Node(ExprNode),
}

/// An operator node of an [`ExprSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprNode {
    /// A signal reference.
    Signal(String),
    /// Conjunction.
    And(Box<ExprSpec>, Box<ExprSpec>),
    /// Disjunction.
    Or(Box<ExprSpec>, Box<ExprSpec>),
    /// Negation.
    Not(Box<ExprSpec>),
}

/// A trace as written in the file: a bit string such as `"10-1"`, or an
/// array of booleans.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TraceLiteral {
    /// `1`/`0` characters, `-` for an unset cycle.
    Bits(String),
    /// One boolean per cycle.
    Bools(Vec<bool>),
}

/// The `[output]` table.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// How output traces are printed.
    #[serde(default)]
    pub format: OutputFormat,
    /// Optional VCD waveform path, relative to the circuit file.
    pub waveform: Option<String>,
}

/// Output trace presentation.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `<bits> <name>` line per output (default).
    #[default]
    Text,
    /// A JSON document.
    Json,
}
