//! Manually driven runs: phases, cycle-by-cycle settling, and properties
//! checked against every recorded cycle.

use latchsim_conformance::{build_circuit, collect_outputs, run_circuit};
use latchsim_sim::{SimError, SimPhase};

const COUNTER: &str = r#"
[circuit]
name = "counter2"
inputs = ["en"]
outputs = ["q0", "q1"]

[[latches]]
input = "d0"
output = "q0"

[[latches]]
input = "d1"
output = "q1"

[[updates]]
target = "d0"
expr = { or = [{ and = ["en", { not = "q0" }] }, { and = [{ not = "en" }, "q0"] }] }

[[updates]]
target = "carry"
expr = { and = ["en", "q0"] }

[[updates]]
target = "d1"
expr = { or = [{ and = ["carry", { not = "q1" }] }, { and = [{ not = "carry" }, "q1"] }] }

[simulate]
en = "1111011"
"#;

#[test]
fn stepping_matches_run_all() {
    let mut circuit = build_circuit(COUNTER).unwrap();
    let mut store = circuit.new_store();

    circuit.initialize(&mut store).unwrap();
    assert_eq!(circuit.phase(), SimPhase::Initialized);
    let n = circuit.simulation_length();
    assert_eq!(n, 7);

    for cycle in 0..n {
        circuit.advance_cycle(&mut store, cycle).unwrap();
    }
    assert_eq!(circuit.phase(), SimPhase::Completed);

    assert_eq!(collect_outputs(&circuit), run_circuit(COUNTER).unwrap());
}

#[test]
fn counter_counts_enabled_cycles() {
    let outputs = run_circuit(COUNTER).unwrap();
    // value seen at cycle i is the number of enabled cycles before i, mod 4
    assert_eq!(outputs[0], ("q0".to_string(), "0101001".to_string()));
    assert_eq!(outputs[1], ("q1".to_string(), "0011000".to_string()));
}

#[test]
fn latch_delay_law_holds_every_cycle() {
    let source = r#"
[circuit]
name = "probe"
inputs = ["a", "b"]
outputs = ["d", "q"]

[[latches]]
input = "d"
output = "q"

[[updates]]
target = "d"
expr = { or = [{ and = ["a", { not = "q" }] }, "b"] }

[simulate]
a = "110100111"
b = "001000010"
"#;
    let mut circuit = build_circuit(source).unwrap();
    circuit.run_all().unwrap();
    let d = circuit.simoutputs()[0].to_bools().unwrap();
    let q = circuit.simoutputs()[1].to_bools().unwrap();

    assert!(!q[0]);
    for i in 1..q.len() {
        assert_eq!(q[i], d[i - 1], "cycle {i}");
    }
}

#[test]
fn settled_cycle_zero_is_stable() {
    // The cycle 0 values seen right after `initialize` are the ones recorded.
    let mut circuit = build_circuit(COUNTER).unwrap();
    let mut store = circuit.new_store();
    circuit.initialize(&mut store).unwrap();

    let interner = circuit.interner().clone();
    let d0 = store.get(interner.get_or_intern("d0")).unwrap();
    let q0 = store.get(interner.get_or_intern("q0")).unwrap();

    circuit.advance_cycle(&mut store, 0).unwrap();
    assert_eq!(store.get(interner.get_or_intern("d0")).unwrap(), d0);
    assert_eq!(circuit.simoutputs()[0].get(0), Some(q0));
    assert!(!q0);
}

#[test]
fn advance_before_initialize_is_rejected() {
    let mut circuit = build_circuit(COUNTER).unwrap();
    let mut store = circuit.new_store();
    let err = circuit.advance_cycle(&mut store, 0).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidPhase { phase: SimPhase::Uninitialized, .. }
    ));
    assert_eq!(circuit.phase(), SimPhase::Failed);
}

#[test]
fn skipping_a_cycle_is_rejected() {
    let mut circuit = build_circuit(COUNTER).unwrap();
    let mut store = circuit.new_store();
    circuit.initialize(&mut store).unwrap();
    circuit.advance_cycle(&mut store, 0).unwrap();

    let err = circuit.advance_cycle(&mut store, 2).unwrap_err();
    assert!(matches!(err, SimError::InvalidPhase { .. }));
    assert_eq!(circuit.phase(), SimPhase::Failed);
}

#[test]
fn failed_run_stays_failed() {
    let source = r#"
[circuit]
name = "gap"
inputs = ["a"]
outputs = ["a"]

[simulate]
a = "1-"
"#;
    let mut circuit = build_circuit(source).unwrap();
    let mut store = circuit.new_store();
    circuit.initialize(&mut store).unwrap();
    circuit.advance_cycle(&mut store, 0).unwrap();
    assert_eq!(circuit.phase(), SimPhase::Running { cycle: 0 });

    let err = circuit.advance_cycle(&mut store, 1).unwrap_err();
    assert!(matches!(err, SimError::MissingValue { cycle: 1, .. }));
    assert_eq!(circuit.phase(), SimPhase::Failed);

    assert!(circuit.initialize(&mut store).is_err());
    assert_eq!(circuit.phase(), SimPhase::Failed);
}

#[test]
fn validation_fails_before_any_cycle() {
    let source = r#"
[circuit]
name = "bad"
inputs = ["a"]
outputs = ["y"]

[[updates]]
target = "y"
expr = { and = ["a", "later"] }

[[updates]]
target = "later"
expr = "a"

[simulate]
a = "1-"
"#;
    let mut circuit = build_circuit(source).unwrap();
    let mut store = circuit.new_store();
    let err = circuit.initialize(&mut store).unwrap_err();
    assert!(matches!(err, SimError::UnresolvedDependency(ref n) if n == "later"));
    assert!(store.is_empty());
    assert!(circuit.simoutputs().is_empty());
}
