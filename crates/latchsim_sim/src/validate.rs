//! Static well-formedness checks for circuits.
//!
//! [`check_unique_writers`], [`check_update_order`], [`check_latch_inputs`]
//! and [`check_trace_bindings`] run before any cycle is simulated.
//! [`check_orphans`] runs once while the first cycle settles and compares the
//! live store against the declared write sites.

use std::collections::HashSet;

use latchsim_common::Interner;

use crate::error::SimError;
use crate::model::CircuitModel;
use crate::store::SignalStore;

/// Checks that every signal has at most one writer.
///
/// Inputs, latch outputs and update targets together must not repeat a name.
/// The first repeated occurrence, in that role order, is reported.
pub fn check_unique_writers(model: &CircuitModel, interner: &Interner) -> Result<(), SimError> {
    let mut seen = HashSet::new();
    for site in model.write_sites() {
        if !seen.insert(site) {
            return Err(SimError::DuplicateSignal(interner.resolve(site).to_string()));
        }
    }
    Ok(())
}

/// Checks that the declared update order is already a valid evaluation order.
///
/// Each update may read inputs, latch outputs, and targets of updates declared
/// strictly before it. Updates are never reordered: a circuit that would only
/// be valid after sorting is rejected, as is any self or forward reference.
pub fn check_update_order(model: &CircuitModel, interner: &Interner) -> Result<(), SimError> {
    let mut available: HashSet<_> = model
        .inputs
        .iter()
        .copied()
        .chain(model.latches.iter().map(|l| l.output))
        .collect();

    for update in &model.updates {
        if let Some(missing) = update
            .dependencies()
            .into_iter()
            .find(|dep| !available.contains(dep))
        {
            return Err(SimError::UnresolvedDependency(
                interner.resolve(missing).to_string(),
            ));
        }
        available.insert(update.target);
    }
    Ok(())
}

/// Checks that every latch samples a signal that has a writer.
///
/// Latches are checked in declared order; the first unwritten input is
/// reported.
pub fn check_latch_inputs(model: &CircuitModel, interner: &Interner) -> Result<(), SimError> {
    let sites: HashSet<_> = model.write_sites().collect();
    match model.latches.iter().find(|l| !sites.contains(&l.input)) {
        Some(latch) => Err(SimError::UnresolvedDependency(
            interner.resolve(latch.input).to_string(),
        )),
        None => Ok(()),
    }
}

/// Checks that every input trace feeds a declared input.
///
/// A trace for a latch output or an update target would be a second writer
/// and is reported as a duplicate. A trace for any other name is an orphan.
/// Traces are checked in order and the first offender is reported.
pub fn check_trace_bindings(model: &CircuitModel, interner: &Interner) -> Result<(), SimError> {
    let inputs: HashSet<_> = model.inputs.iter().copied().collect();
    let driven: HashSet<_> = model
        .latches
        .iter()
        .map(|l| l.output)
        .chain(model.updates.iter().map(|u| u.target))
        .collect();

    match model.siminputs.iter().find(|t| !inputs.contains(&t.signal)) {
        Some(trace) => {
            let name = interner.resolve(trace.signal).to_string();
            if driven.contains(&trace.signal) {
                Err(SimError::DuplicateSignal(name))
            } else {
                Err(SimError::OrphanSignal(name))
            }
        }
        None => Ok(()),
    }
}

/// Checks that every binding in the store belongs to a declared write site.
///
/// Of several orphans, the alphabetically first is reported so the message
/// does not depend on store iteration order.
pub fn check_orphans(model: &CircuitModel, store: &SignalStore) -> Result<(), SimError> {
    let sites: HashSet<_> = model.write_sites().collect();
    let orphan = store
        .names()
        .into_iter()
        .filter(|name| !sites.contains(name))
        .map(|name| store.resolve(name))
        .min();
    match orphan {
        Some(name) => Err(SimError::OrphanSignal(name.to_string())),
        None => Ok(()),
    }
}
