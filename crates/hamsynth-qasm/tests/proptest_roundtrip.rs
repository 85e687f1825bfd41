//! Property-based tests for QASM round-trips.
//!
//! Circuit → QASM → circuit must keep every gate, angle and the global phase.
//! OpenQASM 2.0 has no phase statement, so there the phase comes back as
//! trailing `u1`/`x` gates on `q[0]`.

use hamsynth_ir::{Circuit, QubitId, StandardGate};
use hamsynth_qasm::{QasmVersion, emit_version, parse};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    S(u32),
    Sdg(u32),
    Rz(u32, f64),
    U(u32, f64, f64, f64),
    Cx(u32, u32),
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        let _ = match *self {
            GateOp::H(q) => circuit.h(QubitId(q)),
            GateOp::S(q) => circuit.s(QubitId(q)),
            GateOp::Sdg(q) => circuit.sdg(QubitId(q)),
            GateOp::Rz(q, a) => circuit.rz(a, QubitId(q)),
            GateOp::U(q, a, b, c) => circuit.u(a, b, c, QubitId(q)),
            GateOp::Cx(a, b) => circuit.cx(QubitId(a), QubitId(b)),
        };
    }
}

fn arb_gate_op(n: u32) -> impl Strategy<Value = GateOp> {
    let angle = -10.0f64..10.0;
    prop_oneof![
        (0..n).prop_map(GateOp::H),
        (0..n).prop_map(GateOp::S),
        (0..n).prop_map(GateOp::Sdg),
        (0..n, angle.clone()).prop_map(|(q, a)| GateOp::Rz(q, a)),
        (0..n, angle.clone(), angle.clone(), angle).prop_map(|(q, a, b, c)| GateOp::U(q, a, b, c)),
        (0..n, 0..n)
            .prop_filter("distinct qubits", |(a, b)| a != b)
            .prop_map(|(a, b)| GateOp::Cx(a, b)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(arb_gate_op(n), 0..40),
            -3.0f64..3.0,
        )
            .prop_map(move |(ops, phase)| {
                let mut circuit = Circuit::with_size("prop", n);
                for op in &ops {
                    op.apply(&mut circuit);
                }
                circuit.add_global_phase(phase);
                circuit
            })
    })
}

fn gates(circuit: &Circuit) -> Vec<(StandardGate, Vec<QubitId>)> {
    circuit
        .instructions()
        .filter_map(|i| i.as_gate().map(|g| (*g, i.qubits.clone())))
        .collect()
}

fn assert_same_gates(
    ga: &[(StandardGate, Vec<QubitId>)],
    gb: &[(StandardGate, Vec<QubitId>)],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(ga.len(), gb.len());
    for ((g1, q1), (g2, q2)) in ga.iter().zip(gb) {
        prop_assert_eq!(q1, q2);
        prop_assert_eq!(g1.name(), g2.name());
        for (p1, p2) in g1.parameters().iter().zip(g2.parameters()) {
            prop_assert!((p1 - p2).abs() <= 1e-14 * p1.abs().max(1.0));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn qasm2_round_trip(circuit in arb_circuit()) {
        let qasm = emit_version(&circuit, QasmVersion::Qasm2).unwrap();
        let back = parse(&qasm).unwrap();
        prop_assert_eq!(back.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(back.global_phase(), 0.0);

        let original = gates(&circuit);
        let parsed = gates(&back);
        let phase = circuit.global_phase();
        let extra = if phase == 0.0 { 0 } else { 4 };
        prop_assert_eq!(parsed.len(), original.len() + extra);
        assert_same_gates(&original, &parsed[..original.len()])?;
        for (i, (gate, qubits)) in parsed[original.len()..].iter().enumerate() {
            prop_assert_eq!(qubits, &vec![QubitId(0)]);
            if i % 2 == 0 {
                let StandardGate::P(angle) = *gate else {
                    return Err(TestCaseError::fail(format!("expected u1, got {}", gate.name())));
                };
                prop_assert!((angle - phase).abs() <= 1e-14 * phase.abs().max(1.0));
            } else {
                prop_assert_eq!(*gate, StandardGate::X);
            }
        }
        prop_assert!(back.depth() <= circuit.depth() + extra);
    }

    #[test]
    fn qasm3_round_trip(circuit in arb_circuit()) {
        let qasm = emit_version(&circuit, QasmVersion::Qasm3).unwrap();
        let back = parse(&qasm).unwrap();
        prop_assert_eq!(back.depth(), circuit.depth());
        prop_assert!((back.global_phase() - circuit.global_phase()).abs() < 1e-15);
        assert_same_gates(&gates(&circuit), &gates(&back))?;
    }
}
