//! Circuit file loading and validation.

use crate::error::ConfigError;
use crate::types::{CircuitFile, ExprNode, ExprSpec};
use std::path::Path;

/// Loads and validates a circuit file from disk.
pub fn load_circuit(path: &Path) -> Result<CircuitFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_circuit_from_str(&content)
}

/// Parses and validates a circuit file from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_circuit_from_str(content: &str) -> Result<CircuitFile, ConfigError> {
    let file: CircuitFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_file(&file)?;
    Ok(file)
}

/// Checks required fields and rejects empty signal names.
///
/// Circuit-level checks (duplicate writers, update order) are left to the
/// simulator, which reports them with its own error kinds.
fn validate_file(file: &CircuitFile) -> Result<(), ConfigError> {
    if file.circuit.name.is_empty() {
        return Err(ConfigError::MissingField("circuit.name".to_string()));
    }

    let mut names: Vec<&str> = Vec::new();
    names.extend(file.circuit.inputs.iter().map(String::as_str));
    names.extend(file.circuit.outputs.iter().map(String::as_str));
    for latch in &file.latches {
        names.push(&latch.input);
        names.push(&latch.output);
    }
    for update in &file.updates {
        names.push(&update.target);
        collect_names(&update.expr, &mut names);
    }
    names.extend(file.simulate.keys().map(String::as_str));

    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "signal names must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn collect_names<'a>(expr: &'a ExprSpec, out: &mut Vec<&'a str>) {
    match expr {
        ExprSpec::Name(name) | ExprSpec::Node(ExprNode::Signal(name)) => out.push(name),
        ExprSpec::Node(ExprNode::And(lhs, rhs)) | ExprSpec::Node(ExprNode::Or(lhs, rhs)) => {
            collect_names(lhs, out);
            collect_names(rhs, out);
        }
        ExprSpec::Node(ExprNode::Not(inner)) => collect_names(inner, out),
    }
}
