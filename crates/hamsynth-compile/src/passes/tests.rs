//! Tests for the built-in passes.

use std::f64::consts::PI;

use hamsynth_ir::{Circuit, CircuitDag, Instruction, QubitId, StandardGate};
use num_complex::Complex64;

use crate::error::CompileError;
use crate::pass::Pass;
use crate::property::{GateSet, PropertySet};
use crate::unitary::Unitary2x2;

use super::{
    CancelInversePairs, FixedPoint, GateSetVerification, MergeRotations, Optimize1qGates,
    VerificationResult,
};

fn run(pass: &dyn Pass, circuit: Circuit) -> (CircuitDag, PropertySet) {
    let mut dag = circuit.into_dag();
    let mut props = PropertySet::new();
    pass.run(&mut dag, &mut props).unwrap();
    (dag, props)
}

fn gates(dag: &CircuitDag) -> Vec<StandardGate> {
    dag.topological_ops()
        .filter_map(|(_, i)| i.as_gate().copied())
        .collect()
}

/// Matrix of a one-qubit circuit including its global phase.
fn single_qubit_matrix(dag: &CircuitDag) -> Unitary2x2 {
    let mut m = Unitary2x2::identity();
    for g in gates(dag) {
        m = Unitary2x2::from_gate(&g).unwrap() * m;
    }
    let phase = Complex64::from_polar(1.0, dag.global_phase());
    Unitary2x2::new(
        m.data[0] * phase,
        m.data[1] * phase,
        m.data[2] * phase,
        m.data[3] * phase,
    )
}

#[test]
fn test_cancel_self_inverse_pairs() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.s(QubitId(1)).unwrap();
    circuit.sdg(QubitId(1)).unwrap();

    let (dag, props) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
    assert_eq!(props.stats.cancelled, 6);
}

#[test]
fn test_cancel_nested_pairs() {
    // H S CX CX Sdg H unwinds from the inside out.
    let mut circuit = Circuit::with_size("t", 2);
    circuit.h(QubitId(1)).unwrap();
    circuit.s(QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.sdg(QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();

    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_cancel_respects_direction_and_blockers() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(1), QubitId(0)).unwrap();
    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 2);

    let mut circuit = Circuit::with_size("t", 2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 3);

    let mut circuit = Circuit::with_size("t", 1);
    circuit.h(QubitId(0)).unwrap();
    circuit.barrier_all().unwrap();
    circuit.h(QubitId(0)).unwrap();
    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(gates(&dag).len(), 2);
}

#[test]
fn test_cancel_symmetric_cz() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.cz(QubitId(0), QubitId(1)).unwrap();
    circuit.cz(QubitId(1), QubitId(0)).unwrap();
    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_cancel_keeps_global_phase() {
    let mut circuit = Circuit::with_size("t", 1);
    circuit.add_global_phase(0.5);
    circuit.x(QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    let (dag, _) = run(&CancelInversePairs::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
    assert!((dag.global_phase() - 0.5).abs() < 1e-15);
}

#[test]
fn test_merge_rotation_chain() {
    let mut circuit = Circuit::with_size("t", 1);
    circuit.rz(0.25, QubitId(0)).unwrap();
    circuit.rz(0.5, QubitId(0)).unwrap();
    circuit.rz(1.0, QubitId(0)).unwrap();
    let (dag, props) = run(&MergeRotations::new(), circuit);
    assert_eq!(gates(&dag), vec![StandardGate::Rz(1.75)]);
    assert_eq!(props.stats.merged, 2);
}

#[test]
fn test_merge_drops_zero_rotations() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.rx(0.0, QubitId(0)).unwrap();
    circuit.p(2.0 * PI, QubitId(1)).unwrap();
    circuit.ry(0.4, QubitId(1)).unwrap();
    circuit.ry(-0.4, QubitId(1)).unwrap();
    let (dag, _) = run(&MergeRotations::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_merge_keeps_full_turn_rotation() {
    // Rz(2π) = -I, so only the phase gate may be dropped.
    let mut circuit = Circuit::with_size("t", 1);
    circuit.rz(PI, QubitId(0)).unwrap();
    circuit.rz(PI, QubitId(0)).unwrap();
    let (dag, _) = run(&MergeRotations::new(), circuit);
    assert_eq!(gates(&dag), vec![StandardGate::Rz(2.0 * PI)]);
}

#[test]
fn test_merge_different_axes_untouched() {
    let mut circuit = Circuit::with_size("t", 1);
    circuit.rx(0.3, QubitId(0)).unwrap();
    circuit.rz(0.3, QubitId(0)).unwrap();
    let (dag, _) = run(&MergeRotations::new(), circuit);
    assert_eq!(dag.num_ops(), 2);
}

#[test]
fn test_optimize_1q_fuses_run_exactly() {
    let mut circuit = Circuit::with_size("t", 1);
    circuit.h(QubitId(0)).unwrap();
    circuit.s(QubitId(0)).unwrap();
    circuit.rz(0.7, QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    let before = single_qubit_matrix(circuit.dag());

    let (dag, _) = run(&Optimize1qGates::new(), circuit);
    assert_eq!(dag.num_ops(), 1);
    assert!(matches!(gates(&dag)[0], StandardGate::U(..)));
    assert!(single_qubit_matrix(&dag).approx_eq(&before, 1e-10));
}

#[test]
fn test_optimize_1q_removes_identity_run() {
    let mut circuit = Circuit::with_size("t", 1);
    for _ in 0..8 {
        circuit.t(QubitId(0)).unwrap();
    }
    let (dag, _) = run(&Optimize1qGates::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
    assert!(dag.global_phase().abs() < 1e-10);

    // Rz(2π) is -I: removed, with the sign moved into the global phase.
    let mut circuit = Circuit::with_size("t", 1);
    circuit.rz(PI, QubitId(0)).unwrap();
    circuit.rz(PI, QubitId(0)).unwrap();
    let (dag, _) = run(&Optimize1qGates::new(), circuit);
    assert_eq!(dag.num_ops(), 0);
    assert!((dag.global_phase().abs() - PI).abs() < 1e-10);
}

#[test]
fn test_optimize_1q_stops_at_two_qubit_gates() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.s(QubitId(0)).unwrap();
    let (dag, _) = run(&Optimize1qGates::new(), circuit);
    assert_eq!(dag.num_ops(), 3);
    assert_eq!(gates(&dag)[0], StandardGate::H);
    assert_eq!(gates(&dag)[1], StandardGate::CX);
}

#[test]
fn test_fixed_point_converges() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.h(QubitId(1)).unwrap();
    circuit.rz(0.5, QubitId(1)).unwrap();
    circuit.rz(-0.5, QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();

    let pass = FixedPoint::new(10)
        .with_pass(MergeRotations::new())
        .with_pass(CancelInversePairs::new());
    assert_eq!(pass.len(), 2);
    let (dag, _) = run(&pass, circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_gate_set_verification() {
    let mut circuit = Circuit::with_size("t", 2);
    circuit.u(0.1, 0.2, 0.3, QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.barrier_all().unwrap();
    let (_, props) = run(&GateSetVerification, circuit);
    let result = props.get::<VerificationResult>().unwrap();
    assert!(result.passed);
    assert_eq!(result.gates_checked, 2);
}

#[test]
fn test_gate_set_verification_rejects() {
    for gate in [StandardGate::CZ, StandardGate::Swap] {
        let mut circuit = Circuit::with_size("t", 2);
        circuit
            .push(Instruction::two_qubit_gate(gate, QubitId(0), QubitId(1)))
            .unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();
        let err = GateSetVerification.run(&mut dag, &mut props).unwrap_err();
        assert!(matches!(err, CompileError::GateNotAllowed { qubits: 2, .. }));
    }

    let mut circuit = Circuit::with_size("t", 1);
    circuit.h(QubitId(0)).unwrap();
    let mut dag = circuit.into_dag();
    let mut props = PropertySet::new().with_gate_set(GateSet::from_names(&["rz", "cx"]));
    let err = GateSetVerification.run(&mut dag, &mut props).unwrap_err();
    assert!(matches!(err, CompileError::GateNotAllowed { ref gate, .. } if gate == "h"));
}
