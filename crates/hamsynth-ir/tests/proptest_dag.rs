//! Property-based tests for the circuit DAG.

use hamsynth_ir::{Circuit, QubitId, StandardGate};
use proptest::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    S(u32),
    Rz(u32, f64),
    Cx(u32, u32),
}

fn arb_gate_op(n: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..n).prop_map(GateOp::H),
        (0..n).prop_map(GateOp::S),
        (0..n, -3.0f64..3.0).prop_map(|(q, a)| GateOp::Rz(q, a)),
        (0..n, 0..n)
            .prop_filter("distinct qubits", |(a, b)| a != b)
            .prop_map(|(a, b)| GateOp::Cx(a, b)),
    ]
}

fn build(n: u32, ops: &[GateOp]) -> Circuit {
    let mut circuit = Circuit::with_size("prop", n);
    for op in ops {
        match *op {
            GateOp::H(q) => circuit.h(QubitId(q)).unwrap(),
            GateOp::S(q) => circuit.s(QubitId(q)).unwrap(),
            GateOp::Rz(q, a) => circuit.rz(a, QubitId(q)).unwrap(),
            GateOp::Cx(a, b) => circuit.cx(QubitId(a), QubitId(b)).unwrap(),
        };
    }
    circuit
}

proptest! {
    #[test]
    fn inverse_preserves_depth_and_size(ops in prop::collection::vec(arb_gate_op(4), 0..60)) {
        let circuit = build(4, &ops);
        let inv = circuit.inverse().unwrap();
        prop_assert_eq!(inv.depth(), circuit.depth());
        prop_assert_eq!(inv.num_ops(), circuit.num_ops());
        inv.dag().verify_integrity().unwrap();
    }

    #[test]
    fn rebuild_without_edits_is_identity(ops in prop::collection::vec(arb_gate_op(3), 0..40)) {
        let circuit = build(3, &ops);
        let rebuilt = circuit.dag().rebuild(&FxHashMap::default()).unwrap();
        let before: Vec<_> = circuit.instructions().cloned().collect();
        let after: Vec<_> = rebuilt.topological_ops().map(|(_, i)| i.clone()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(rebuilt.depth(), circuit.depth());
    }

    #[test]
    fn depth_bounded_by_op_count(ops in prop::collection::vec(arb_gate_op(5), 0..50)) {
        let circuit = build(5, &ops);
        prop_assert!(circuit.depth() <= circuit.num_ops());
        let cx_count = circuit.gate_counts().get(StandardGate::CX.name()).copied().unwrap_or(0);
        prop_assert!(cx_count <= circuit.num_ops());
    }
}
