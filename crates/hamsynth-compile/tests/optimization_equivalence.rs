//! Property tests: optimization never changes the implemented operator.
//!
//! Random three-qubit circuits are compared column by column, global phase
//! included, before and after the level-3 pipeline.

use hamsynth_compile::{GateSet, PassManagerBuilder, Unitary2x2};
use hamsynth_ir::{Circuit, CircuitDag, QubitId, StandardGate};
use num_complex::Complex64;
use proptest::prelude::*;

const N: u32 = 3;
const DIM: usize = 1 << N;

fn apply(dag: &CircuitDag, state: &mut [Complex64]) {
    for (_, inst) in dag.topological_ops() {
        let Some(gate) = inst.as_gate() else {
            continue;
        };
        let q: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
        if let Some(u) = Unitary2x2::from_gate(gate) {
            let bit = 1 << q[0];
            for i in (0..DIM).filter(|i| i & bit == 0) {
                let (a, b) = (state[i], state[i | bit]);
                state[i] = u.data[0] * a + u.data[1] * b;
                state[i | bit] = u.data[2] * a + u.data[3] * b;
            }
        } else {
            match gate {
                StandardGate::CX => {
                    let (c, t) = (1 << q[0], 1 << q[1]);
                    for i in (0..DIM).filter(|i| i & c != 0 && i & t == 0) {
                        state.swap(i, i | t);
                    }
                }
                other => panic!("unexpected gate {other:?}"),
            }
        }
    }
    let phase = Complex64::from_polar(1.0, dag.global_phase());
    for amp in state.iter_mut() {
        *amp *= phase;
    }
}

fn columns(dag: &CircuitDag) -> Vec<Vec<Complex64>> {
    (0..DIM)
        .map(|k| {
            let mut state = vec![Complex64::new(0.0, 0.0); DIM];
            state[k] = Complex64::new(1.0, 0.0);
            apply(dag, &mut state);
            state
        })
        .collect()
}

fn arb_gate() -> impl Strategy<Value = (StandardGate, Vec<u32>)> {
    let fixed = prop_oneof![
        Just(StandardGate::H),
        Just(StandardGate::S),
        Just(StandardGate::Sdg),
        Just(StandardGate::X),
        Just(StandardGate::T),
    ];
    let angle = prop_oneof![
        Just(0.0),
        Just(std::f64::consts::PI),
        -4.0f64..4.0,
    ];
    let rotation = (0..3usize, angle).prop_map(|(axis, a)| match axis {
        0 => StandardGate::Rz(a),
        1 => StandardGate::Rx(a),
        _ => StandardGate::P(a),
    });
    prop_oneof![
        (prop_oneof![fixed, rotation], 0..N).prop_map(|(g, q)| (g, vec![q])),
        (0..N, 0..N)
            .prop_filter("distinct", |(a, b)| a != b)
            .prop_map(|(a, b)| (StandardGate::CX, vec![a, b])),
    ]
}

proptest! {
    #[test]
    fn optimization_preserves_operator(ops in prop::collection::vec(arb_gate(), 0..40)) {
        let mut circuit = Circuit::with_size("prop", N);
        for (gate, qubits) in ops {
            circuit.gate(gate, qubits.into_iter().map(QubitId)).unwrap();
        }
        let before = columns(circuit.dag());

        let (pm, mut props) = PassManagerBuilder::new()
            .with_optimization_level(3)
            .with_gate_set(GateSet::single_qubit_and_cx())
            .build();
        let mut dag = circuit.into_dag();
        pm.run(&mut dag, &mut props).unwrap();
        let after = columns(&dag);

        for (b, a) in before.iter().zip(&after) {
            for (x, y) in b.iter().zip(a) {
                prop_assert!((x - y).norm() < 1e-8, "{x} != {y}");
            }
        }
        prop_assert!(dag.num_ops() <= 40);
    }
}
