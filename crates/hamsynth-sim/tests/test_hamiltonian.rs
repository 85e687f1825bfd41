//! Tests for Hamiltonian data structures and the text format.

use hamsynth_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, QubitOrder};
use hamsynth_sim::{SimError, parse_hamiltonian};

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_drops_identity_and_sorts() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::I), (0, PauliOp::Y)]);
    assert_eq!(ps.ops(), &[(0, PauliOp::Y), (3, PauliOp::X)]);
    assert_eq!(ps.weight(), 2);
    assert_eq!(ps.max_qubit(), Some(3));
    assert_eq!(ps.to_string(), "Y0 X3");
}

#[test]
fn pauli_string_identity_is_empty() {
    let ps = PauliString::from_ops([] as [(u32, PauliOp); 0]);
    assert!(ps.is_identity());
    assert!(ps.is_diagonal());
    assert_eq!(ps.max_qubit(), None);
    assert_eq!(ps.to_string(), "I");
}

#[test]
fn label_orders() {
    let little = PauliString::from_label("XIZ", QubitOrder::LittleEndian).unwrap();
    assert_eq!(little.ops(), &[(0, PauliOp::Z), (2, PauliOp::X)]);
    let big = PauliString::from_label("XIZ", QubitOrder::BigEndian).unwrap();
    assert_eq!(big.ops(), &[(0, PauliOp::X), (2, PauliOp::Z)]);
    assert_eq!(big.label(4, QubitOrder::BigEndian), "XIZI");
    assert!(matches!(
        PauliString::from_label("XQ", QubitOrder::LittleEndian),
        Err(SimError::InvalidLabel(_))
    ));
}

#[test]
fn commutation_counts_differing_positions() {
    let a = PauliString::from_label("XXI", QubitOrder::LittleEndian).unwrap();
    let b = PauliString::from_label("ZZI", QubitOrder::LittleEndian).unwrap();
    let c = PauliString::from_label("IZX", QubitOrder::LittleEndian).unwrap();
    assert!(a.commutes_with(&b));
    assert!(!a.commutes_with(&c));
    assert!(b.commutes_with(&c));
    assert!(c.commutes_with(&c));
}

// ---------------------------------------------------------------------------
// Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn hamiltonian_lambda() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::z(0, -1.0),
        HamiltonianTerm::z(1, 0.5),
        HamiltonianTerm::zz(0, 1, -0.25),
    ]);
    // |−1.0| + |0.5| + |−0.25| = 1.75
    assert!((h.lambda() - 1.75).abs() < 1e-12);
}

#[test]
fn hamiltonian_min_qubits() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::z(0, 1.0),
        HamiltonianTerm::zz(2, 4, 0.5),
    ]);
    assert_eq!(h.min_qubits(), 5);
    assert_eq!(h.num_qubits(), 5);
    assert_eq!(h.clone().with_num_qubits(7).num_qubits(), 7);
    assert_eq!(h.with_num_qubits(2).num_qubits(), 5);
}

#[test]
fn hamiltonian_simplify_merges_and_drops() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::x(0, 0.5),
        HamiltonianTerm::z(1, 0.25),
        HamiltonianTerm::x(0, 0.25),
        HamiltonianTerm::z(1, -0.25),
    ]);
    let s = h.simplify();
    assert_eq!(s.n_terms(), 1);
    assert_eq!(s.terms()[0].pauli.ops(), &[(0, PauliOp::X)]);
    assert!((s.terms()[0].coeff - 0.75).abs() < 1e-15);
}

#[test]
fn hamiltonian_from_iter() {
    let h: Hamiltonian = vec![HamiltonianTerm::z(0, 1.0), HamiltonianTerm::y(1, -0.5)]
        .into_iter()
        .collect();
    assert_eq!(h.n_terms(), 2);
    assert_eq!(h.identity_coeff(), 0.0);
}

// ---------------------------------------------------------------------------
// Text format
// ---------------------------------------------------------------------------

#[test]
fn parse_sets_declared_width() {
    let h = parse_hamiltonian("1.0 * IIZI\n", QubitOrder::LittleEndian).unwrap();
    assert_eq!(h.min_qubits(), 2);
    assert_eq!(h.num_qubits(), 4);
}

#[test]
fn parse_reports_line_numbers() {
    let text = "0.5 XX\n\n# comment\n0.25 XYZ\n";
    let err = parse_hamiltonian(text, QubitOrder::LittleEndian).unwrap_err();
    assert!(matches!(err, SimError::Parse { line: 4, .. }));

    let err = parse_hamiltonian("0.5 XX\nabc ZZ\n", QubitOrder::LittleEndian).unwrap_err();
    assert!(matches!(err, SimError::Parse { line: 2, .. }));
}

#[test]
fn parse_from_str_is_little_endian() {
    let h: Hamiltonian = "- 0.5 * XZ".parse().unwrap();
    assert_eq!(h.terms()[0].coeff, -0.5);
    assert_eq!(h.terms()[0].pauli.ops(), &[(0, PauliOp::Z), (1, PauliOp::X)]);
}
