//! Plain-text rendering of traces.
//!
//! One line per trace: the values as `1`/`0` characters (`-` if unset),
//! a space, then the signal name.

use latchsim_common::Interner;

use crate::circuit::Circuit;
use crate::trace::Trace;

/// Renders one trace as `<bits> <name>`.
pub fn render_trace(trace: &Trace, interner: &Interner) -> String {
    format!("{} {}", trace.bits(), interner.resolve(trace.signal))
}

/// Renders every output trace of `circuit`, one per line, in output order.
pub fn render_outputs(circuit: &Circuit) -> String {
    let mut out = String::new();
    for trace in circuit.simoutputs() {
        out.push_str(&render_trace(trace, circuit.interner()));
        out.push('\n');
    }
    out
}
