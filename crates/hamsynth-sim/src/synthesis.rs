//! Gate synthesis for Pauli exponentials.
//!
//! Two building blocks:
//!
//! - [`append_exp_pauli`] implements a single `exp(-i · coeff · t · P)` with
//!   a basis change and a CNOT ladder:
//!
//!     exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//!   with `X → H·Z·H` and `Y → Sdg·H·Z·H·S` handled by basis rotations.
//!
//! - [`append_group_evolution`] implements a whole commuting group as the
//!   operator product `W† · D(τ) · W` (rightmost factor applied first), where
//!   `W` is the diagonalizing Clifford and `D` a product of commuting Z
//!   rotations. In circuit order that is `W`, then `D`, then `W†`. The Z
//!   rotations are sequenced as a parity network: per target qubit, the
//!   parities are visited in Gray-code order so consecutive rotations differ
//!   by few CX gates.

use std::collections::BTreeMap;

use hamsynth_ir::{Circuit, QubitId};

use crate::diagonalize::{DiagonalTerm, Diagonalization};
use crate::error::{SimError, SimResult};
use crate::hamiltonian::{HamiltonianTerm, PauliOp};
use crate::pauli::{CliffordGate, bits};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// `n_qubits` is the total width of the circuit (used for bounds checking
/// only; the circuit must already have been allocated with that many qubits).
///
/// The identity string contributes only the global phase `-coeff · t`.
pub fn append_exp_pauli(
    circuit: &mut Circuit,
    term: &HamiltonianTerm,
    t: f64,
    n_qubits: u32,
) -> SimResult<()> {
    let ops = term.pauli.ops();
    let Some(&(last, _)) = ops.last() else {
        circuit.add_global_phase(-term.coeff * t);
        return Ok(());
    };

    for &(q, _) in ops {
        if q >= n_qubits {
            return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
        }
    }

    // Rz(θ) implements exp(-i θ/2 Z)
    let theta = 2.0 * term.coeff * t;

    basis_change(circuit, ops, false)?;
    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();
    cnot_ladder(circuit, &qubits, false)?;
    circuit.rz(theta, QubitId(last))?;
    cnot_ladder(circuit, &qubits, true)?;
    basis_change(circuit, ops, true)?;

    Ok(())
}

/// Append `exp(-i · τ · Σ_k c_k P_k)` for a diagonalized commuting group.
///
/// Emits, in circuit order, the basis change `W`, the diagonal rotations,
/// then `W†`; as an operator this is `W† · D(τ) · W`. Every qubit referenced
/// must already exist in `circuit`.
pub fn append_group_evolution(
    circuit: &mut Circuit,
    diag: &Diagonalization,
    tau: f64,
) -> SimResult<()> {
    append_clifford(circuit, &diag.clifford)?;
    append_diagonal(circuit, &diag.diagonal, tau)?;
    append_clifford(circuit, &diag.inverse_clifford())?;
    Ok(())
}

/// Append a Clifford gate list, expanding CZ into `H·CX·H`.
pub fn append_clifford(circuit: &mut Circuit, gates: &[CliffordGate]) -> SimResult<()> {
    for &gate in gates {
        match gate {
            CliffordGate::H(q) => circuit.h(QubitId(q))?,
            CliffordGate::S(q) => circuit.s(QubitId(q))?,
            CliffordGate::Sdg(q) => circuit.sdg(QubitId(q))?,
            CliffordGate::Cx(c, t) => circuit.cx(QubitId(c), QubitId(t))?,
            CliffordGate::Cz(a, b) => {
                circuit.h(QubitId(b))?;
                circuit.cx(QubitId(a), QubitId(b))?;
                circuit.h(QubitId(b))?
            }
        };
    }
    Ok(())
}

/// Append `exp(-i · τ · Σ c_k Z^{m_k})` as a parity network.
///
/// Equal masks are merged first. Each remaining mask is rotated on its
/// highest qubit (the target) after the other qubits of the mask have been
/// folded into the target's parity with CX gates.
pub fn append_diagonal(circuit: &mut Circuit, terms: &[DiagonalTerm], tau: f64) -> SimResult<()> {
    let mut merged: BTreeMap<u64, f64> = BTreeMap::new();
    for term in terms {
        *merged.entry(term.mask).or_insert(0.0) += term.coeff;
    }

    // target -> [(rest mask, coeff)]
    let mut buckets: BTreeMap<u32, Vec<(u64, f64)>> = BTreeMap::new();
    for (&mask, &coeff) in &merged {
        if mask == 0 {
            circuit.add_global_phase(-coeff * tau);
            continue;
        }
        if coeff == 0.0 {
            continue;
        }
        let target = 63 - mask.leading_zeros();
        buckets
            .entry(target)
            .or_default()
            .push((mask & !(1u64 << target), coeff));
    }

    for (target, mut rotations) in buckets {
        rotations.sort_by_key(|&(rest, _)| gray_rank(rest));
        let t = QubitId(target);
        let mut parity = 0u64;
        for (rest, coeff) in rotations {
            for q in bits(parity ^ rest) {
                circuit.cx(QubitId(q), t)?;
            }
            parity = rest;
            circuit.rz(2.0 * coeff * tau, t)?;
        }
        for q in bits(parity) {
            circuit.cx(QubitId(q), t)?;
        }
    }
    Ok(())
}

/// Position of `code` in the binary-reflected Gray code sequence.
fn gray_rank(code: u64) -> u64 {
    let mut rank = code;
    let mut shift = 1;
    while shift < 64 {
        rank ^= rank >> shift;
        shift <<= 1;
    }
    rank
}

/// Rotate each Pauli factor into the Z basis (`undo = false`) or back.
///
///   X → H
///   Y → Sdg · H  (undone by H · S)
fn basis_change(circuit: &mut Circuit, ops: &[(u32, PauliOp)], undo: bool) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                circuit.h(qid)?;
            }
            (PauliOp::Y, false) => {
                circuit.sdg(qid)?;
                circuit.h(qid)?;
            }
            (PauliOp::Y, true) => {
                circuit.h(qid)?;
                circuit.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// CX(q[0],q[1]), CX(q[1],q[2]), … collecting the parity on the last qubit;
/// `reverse` runs the same ladder backwards to uncompute it.
fn cnot_ladder(circuit: &mut Circuit, qubits: &[u32], reverse: bool) -> SimResult<()> {
    let pairs: Vec<&[u32]> = if reverse {
        qubits.windows(2).rev().collect()
    } else {
        qubits.windows(2).collect()
    };
    for pair in pairs {
        circuit.cx(QubitId(pair[0]), QubitId(pair[1]))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::PauliString;

    fn cx_count(circuit: &Circuit) -> usize {
        circuit.gate_counts().get("cx").copied().unwrap_or(0)
    }

    #[test]
    fn test_gray_rank_inverts_gray_code() {
        for i in 0..256u64 {
            assert_eq!(gray_rank(i ^ (i >> 1)), i);
        }
    }

    #[test]
    fn test_exp_pauli_gate_counts() {
        let mut c = Circuit::with_size("t", 3);
        let term = HamiltonianTerm::new(
            0.5,
            PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Y), (2, PauliOp::Z)]),
        );
        append_exp_pauli(&mut c, &term, 1.0, 3).unwrap();
        let counts = c.gate_counts();
        assert_eq!(counts.get("cx"), Some(&4));
        assert_eq!(counts.get("rz"), Some(&1));
        assert_eq!(counts.get("h"), Some(&4));
        assert_eq!(counts.get("sdg"), Some(&1));
        assert_eq!(counts.get("s"), Some(&1));
    }

    #[test]
    fn test_exp_pauli_identity_is_phase() {
        let mut c = Circuit::with_size("t", 1);
        append_exp_pauli(&mut c, &HamiltonianTerm::new(0.3, PauliString::identity()), 2.0, 1)
            .unwrap();
        assert_eq!(c.num_ops(), 0);
        assert!((c.global_phase() + 0.6).abs() < 1e-15);
    }

    #[test]
    fn test_exp_pauli_out_of_range() {
        let mut c = Circuit::with_size("t", 2);
        let err = append_exp_pauli(&mut c, &HamiltonianTerm::z(5, 1.0), 1.0, 2).unwrap_err();
        assert!(matches!(err, SimError::QubitOutOfRange { qubit: 5, n_qubits: 2 }));
    }

    #[test]
    fn test_diagonal_merges_equal_masks() {
        let mut c = Circuit::with_size("t", 2);
        let terms = [
            DiagonalTerm { mask: 0b11, coeff: 0.25 },
            DiagonalTerm { mask: 0b11, coeff: -0.25 },
            DiagonalTerm { mask: 0b01, coeff: 0.5 },
        ];
        append_diagonal(&mut c, &terms, 1.0).unwrap();
        assert_eq!(c.num_ops(), 1);
        assert_eq!(cx_count(&c), 0);
    }

    #[test]
    fn test_diagonal_shares_parities() {
        // Z0Z2, Z1Z2, Z0Z1Z2 on target 2: rest masks 01, 10, 11 in Gray order
        // 01, 11, 10 need one CX each plus one to uncompute.
        let mut c = Circuit::with_size("t", 3);
        let terms = [
            DiagonalTerm { mask: 0b101, coeff: 0.1 },
            DiagonalTerm { mask: 0b110, coeff: 0.2 },
            DiagonalTerm { mask: 0b111, coeff: 0.3 },
        ];
        append_diagonal(&mut c, &terms, 1.0).unwrap();
        assert_eq!(cx_count(&c), 4);
        assert_eq!(c.gate_counts().get("rz"), Some(&3));
    }

    #[test]
    fn test_diagonal_identity_mask_is_phase() {
        let mut c = Circuit::with_size("t", 1);
        append_diagonal(&mut c, &[DiagonalTerm { mask: 0, coeff: 2.0 }], 0.5).unwrap();
        assert_eq!(c.num_ops(), 0);
        assert!((c.global_phase() + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_clifford_cz_expands_to_cx() {
        let mut c = Circuit::with_size("t", 2);
        append_clifford(&mut c, &[CliffordGate::Cz(0, 1), CliffordGate::S(0)]).unwrap();
        let counts = c.gate_counts();
        assert_eq!(counts.get("cz"), None);
        assert_eq!(counts.get("cx"), Some(&1));
        assert_eq!(counts.get("h"), Some(&2));
    }
}
