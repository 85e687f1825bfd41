//! Property-based tests for grouping and diagonalization.

use hamsynth_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use hamsynth_sim::pauli::{CliffordGate, Pauli, Tableau};
use hamsynth_sim::synthesis::append_group_evolution;
use hamsynth_sim::{
    ErrorOptions, GroupedEvolution, GroupingStrategy, approximation_error, diagonalize,
    group_commuting,
};
use hamsynth_ir::Circuit;
use proptest::prelude::*;

fn arb_op() -> impl Strategy<Value = PauliOp> {
    prop_oneof![
        2 => Just(PauliOp::I),
        1 => Just(PauliOp::X),
        1 => Just(PauliOp::Y),
        1 => Just(PauliOp::Z),
    ]
}

fn arb_hamiltonian(max_qubits: u32) -> impl Strategy<Value = Hamiltonian> {
    (1..=max_qubits).prop_flat_map(|n| {
        let term = (
            prop::collection::vec(arb_op(), n as usize),
            -1.0f64..1.0,
        )
            .prop_map(|(ops, coeff)| {
                let ops = ops.into_iter().enumerate().map(|(q, op)| (q as u32, op));
                HamiltonianTerm::new(coeff, PauliString::from_ops(ops))
            });
        prop::collection::vec(term, 1..12)
            .prop_map(move |terms| Hamiltonian::from_terms(terms).with_num_qubits(n))
    })
}

/// Random Z strings pushed through a random Clifford: always one commuting set.
fn arb_commuting_hamiltonian() -> impl Strategy<Value = Hamiltonian> {
    (2u32..=4).prop_flat_map(|n| {
        let gate = prop_oneof![
            (0..n).prop_map(CliffordGate::H),
            (0..n).prop_map(CliffordGate::S),
            (0..n, 0..n)
                .prop_filter("distinct qubits", |(a, b)| a != b)
                .prop_map(|(a, b)| CliffordGate::Cx(a, b)),
        ];
        (
            prop::collection::vec((1u64..(1 << n), -1.0f64..1.0), 1..8),
            prop::collection::vec(gate, 0..12),
        )
            .prop_map(move |(masks, gates)| {
                let mut tableau =
                    Tableau::new(masks.iter().map(|&(z, _)| Pauli::new(0, z, false)).collect());
                tableau.apply_all(&gates);
                let terms = tableau
                    .rows()
                    .iter()
                    .zip(&masks)
                    .map(|(p, &(_, c))| {
                        let coeff = if p.negative { -c } else { c };
                        HamiltonianTerm::new(coeff, p.to_pauli_string())
                    })
                    .collect();
                Hamiltonian::from_terms(terms).with_num_qubits(n)
            })
    })
}

fn arb_strategy() -> impl Strategy<Value = GroupingStrategy> {
    prop_oneof![
        Just(GroupingStrategy::Sequential),
        Just(GroupingStrategy::LargestFirst),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grouping_partitions_into_commuting_sets(
        h in arb_hamiltonian(6),
        strategy in arb_strategy(),
    ) {
        let grouping = group_commuting(&h, strategy).unwrap();
        let non_identity = h.terms().iter().filter(|t| !t.pauli.is_identity()).count();
        prop_assert_eq!(grouping.n_terms(), non_identity);

        for group in &grouping.groups {
            prop_assert!(!group.is_empty());
            for a in group.paulis() {
                for b in group.paulis() {
                    prop_assert!(a.commutes_with(b));
                }
            }
        }
    }

    #[test]
    fn diagonalization_reaches_z_form(h in arb_hamiltonian(8)) {
        let grouping = group_commuting(&h, GroupingStrategy::Sequential).unwrap();
        for group in &grouping.groups {
            let diag = diagonalize(&group.weighted_paulis(), grouping.n_qubits).unwrap();

            let mut tableau = Tableau::new(group.paulis().to_vec());
            tableau.apply_all(&diag.clifford);
            for (row, term) in tableau.rows().iter().zip(&diag.diagonal) {
                prop_assert_eq!(row.x, 0);
                prop_assert_eq!(row.z, term.mask);
            }

            // Undoing the basis change restores every term with its sign.
            let mut back = Tableau::new(
                diag.diagonal.iter().map(|t| Pauli::new(0, t.mask, false)).collect(),
            );
            for (row, src) in back.rows_mut().iter_mut().zip(tableau.rows()) {
                row.negative = src.negative;
            }
            back.apply_all(&diag.inverse_clifford());
            prop_assert_eq!(back.rows(), group.paulis());
        }
    }

    #[test]
    fn group_block_is_exact(h in arb_hamiltonian(4), tau in -1.5f64..1.5) {
        let grouping = group_commuting(&h, GroupingStrategy::Sequential).unwrap();
        for group in &grouping.groups {
            let diag = diagonalize(&group.weighted_paulis(), grouping.n_qubits).unwrap();
            let mut circuit = Circuit::with_size("block", grouping.n_qubits);
            append_group_evolution(&mut circuit, &diag, tau).unwrap();

            let group_h = Hamiltonian::from_terms(group.terms().to_vec())
                .with_num_qubits(grouping.n_qubits);
            let err = approximation_error(&group_h, tau, &circuit, &ErrorOptions::default())
                .unwrap()
                .norm;
            prop_assert!(err < 1e-9, "group error {}", err);
        }
    }

    #[test]
    fn commuting_hamiltonian_is_exact_in_one_step(h in arb_commuting_hamiltonian()) {
        let grouping = group_commuting(&h, GroupingStrategy::Sequential).unwrap();
        prop_assert_eq!(grouping.len(), 1);
        let circuit = GroupedEvolution::new(&grouping, 0.8, 1).circuit().unwrap();
        let err = approximation_error(&h, 0.8, &circuit, &ErrorOptions::default())
            .unwrap()
            .norm;
        prop_assert!(err < 1e-9, "error {}", err);
    }
}
