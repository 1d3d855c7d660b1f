//! Lowering of a [`CircuitFile`] into the simulator's [`CircuitModel`].

use latchsim_common::{BitString, Ident, Interner};
use latchsim_sim::{CircuitModel, Expr, Latch, Trace, Update};

use crate::error::ConfigError;
use crate::types::{CircuitFile, ExprNode, ExprSpec, TraceLiteral};

/// Interns every name in `file` and builds the simulator model.
///
/// Input traces follow the declared `inputs` order. Traces for signals that
/// are not declared inputs are kept too, after the declared ones and in name
/// order, so that validation rejects them instead of dropping them silently.
pub fn lower(file: &CircuitFile, interner: &Interner) -> Result<CircuitModel, ConfigError> {
    let mut model = CircuitModel::new(interner.get_or_intern(&file.circuit.name));

    model.inputs = intern_all(&file.circuit.inputs, interner);
    model.outputs = intern_all(&file.circuit.outputs, interner);
    model.latches = file
        .latches
        .iter()
        .map(|l| {
            Latch::new(
                interner.get_or_intern(&l.input),
                interner.get_or_intern(&l.output),
            )
        })
        .collect();
    model.updates = file
        .updates
        .iter()
        .map(|u| Update::new(interner.get_or_intern(&u.target), lower_expr(&u.expr, interner)))
        .collect();

    let declared = file
        .circuit
        .inputs
        .iter()
        .filter_map(|name| file.simulate.get_key_value(name));
    let extra = file
        .simulate
        .iter()
        .filter(|(name, _)| !file.circuit.inputs.contains(name));
    for (name, literal) in declared.chain(extra) {
        let values = lower_trace(name, literal)?;
        model
            .siminputs
            .push(Trace::new(interner.get_or_intern(name), values));
    }

    Ok(model)
}

/// Converts a file expression into a simulator expression.
pub fn lower_expr(expr: &ExprSpec, interner: &Interner) -> Expr {
    match expr {
        ExprSpec::Name(name) | ExprSpec::Node(ExprNode::Signal(name)) => {
            Expr::signal(interner.get_or_intern(name))
        }
        ExprSpec::Node(ExprNode::And(lhs, rhs)) => {
            Expr::and(lower_expr(lhs, interner), lower_expr(rhs, interner))
        }
        ExprSpec::Node(ExprNode::Or(lhs, rhs)) => {
            Expr::or(lower_expr(lhs, interner), lower_expr(rhs, interner))
        }
        ExprSpec::Node(ExprNode::Not(inner)) => Expr::not(lower_expr(inner, interner)),
    }
}

fn lower_trace(signal: &str, literal: &TraceLiteral) -> Result<Vec<Option<bool>>, ConfigError> {
    match literal {
        TraceLiteral::Bits(text) => text
            .parse::<BitString>()
            .map(BitString::into_values)
            .map_err(|e| ConfigError::InvalidTrace {
                signal: signal.to_string(),
                reason: e.to_string(),
            }),
        TraceLiteral::Bools(values) => Ok(values.iter().copied().map(Some).collect()),
    }
}

fn intern_all(names: &[String], interner: &Interner) -> Vec<Ident> {
    names.iter().map(|n| interner.get_or_intern(n)).collect()
}
