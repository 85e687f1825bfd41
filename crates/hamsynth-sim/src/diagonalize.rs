//! Simultaneous diagonalization of commuting Pauli groups.
//!
//! For a set of pairwise-commuting Paulis `{P_k}` this finds a Clifford
//! circuit `W` (H, S and CX/CZ gates) with `W P_k W† = ±Z^{m_k}` for every
//! `k`. The construction works on an independent generating set over GF(2):
//!
//! 1. make the X block of the generators full rank, applying H on pivot
//!    columns of generators that have no X part;
//! 2. reduce the X block to the identity on its pivot columns with CX;
//! 3. clear the Z block with CZ (off-diagonal) and S (diagonal);
//! 4. H on every pivot turns each generator into a single Z.
//!
//! The gates are then applied to every term, signs included.

use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::pauli::{
    CliffordGate, MAX_QUBITS, Pauli, Tableau, bits, independent_subset, inverse_sequence, rref,
};

/// A diagonal term `coeff · Z^{mask}` with the conjugation sign folded into
/// the coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalTerm {
    /// Qubits carrying Z.
    pub mask: u64,
    /// Signed coefficient.
    pub coeff: f64,
}

/// Result of diagonalizing one commuting group.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonalization {
    /// Basis change `W`, in circuit order.
    pub clifford: Vec<CliffordGate>,
    /// The group's terms after conjugation, in input order.
    pub diagonal: Vec<DiagonalTerm>,
}

impl Diagonalization {
    /// `W†`, in circuit order.
    pub fn inverse_clifford(&self) -> Vec<CliffordGate> {
        inverse_sequence(&self.clifford)
    }
}

/// Diagonalize a commuting set of weighted Paulis on `n_qubits` qubits.
///
/// Fails with [`SimError::QubitOutOfRange`] if `n_qubits` exceeds
/// [`MAX_QUBITS`], and with [`SimError::DiagonalizationFailed`] if a
/// conjugated term keeps an X component, which happens only when the input
/// does not commute.
pub fn diagonalize(terms: &[(Pauli, f64)], n_qubits: u32) -> SimResult<Diagonalization> {
    if n_qubits > MAX_QUBITS {
        return Err(SimError::QubitOutOfRange {
            qubit: n_qubits - 1,
            n_qubits: MAX_QUBITS,
        });
    }
    let paulis: Vec<Pauli> = terms.iter().map(|(p, _)| *p).collect();
    let clifford = if paulis.iter().all(Pauli::is_diagonal) {
        Vec::new()
    } else {
        let generators: Vec<Pauli> = independent_subset(&paulis)
            .into_iter()
            .map(|i| paulis[i])
            .collect();
        basis_change(&generators, n_qubits)
    };

    let mut tableau = Tableau::new(paulis);
    tableau.apply_all(&clifford);

    let mut diagonal = Vec::with_capacity(terms.len());
    for (row, (_, coeff)) in tableau.rows().iter().zip(terms) {
        if !row.is_diagonal() {
            return Err(SimError::DiagonalizationFailed {
                term: row.to_string(),
            });
        }
        let sign = if row.negative { -1.0 } else { 1.0 };
        diagonal.push(DiagonalTerm {
            mask: row.z,
            coeff: sign * coeff,
        });
    }

    debug!(
        terms = terms.len(),
        clifford_gates = clifford.len(),
        "diagonalized commuting group"
    );
    Ok(Diagonalization { clifford, diagonal })
}

/// Gate sequence mapping every generator to a single-qubit Z.
fn basis_change(generators: &[Pauli], n_qubits: u32) -> Vec<CliffordGate> {
    let mut gates = Vec::new();
    let mut rows: Vec<Pauli> = generators.to_vec();
    let all_columns: Vec<u32> = (0..n_qubits).collect();

    // X-block pivots; rows without an X part sink to the bottom.
    let mut x_rows: Vec<(u64, u64)> = rows.iter().map(|p| (p.x, p.z)).collect();
    let x_pivots = row_reduce_x(&mut x_rows, &all_columns);
    let pivot_mask: u64 = x_pivots.iter().fold(0, |m, &c| m | (1 << c));

    // Z-only generators: pick Z pivots outside the X pivots and rotate them
    // into the X block. Commutation with the X rows guarantees such pivots.
    let mut z_only: Vec<u64> = x_rows[x_pivots.len()..].iter().map(|r| r.1).collect();
    if !z_only.is_empty() {
        let preferred: Vec<u32> = all_columns
            .iter()
            .copied()
            .filter(|c| pivot_mask & (1 << c) == 0)
            .chain(x_pivots.iter().copied())
            .collect();
        for col in rref(&mut z_only, &preferred) {
            apply(&mut gates, &mut rows, CliffordGate::H(col));
        }
    }

    // Full-rank X block: reduce to pivots, then clear the remaining X entries.
    let mut x_rows: Vec<(u64, u64)> = rows.iter().map(|p| (p.x, p.z)).collect();
    let pivots = row_reduce_x(&mut x_rows, &all_columns);
    trace!(?pivots, "x block pivots");
    let pivot_mask: u64 = pivots.iter().fold(0, |m, &c| m | (1 << c));
    for (i, &p) in pivots.iter().enumerate() {
        for j in bits(x_rows[i].0 & !pivot_mask) {
            apply_rows(&mut gates, &mut x_rows, CliffordGate::Cx(p, j));
        }
    }

    // Z block: CZ clears off-diagonal entries (pivot pairs are symmetric, so
    // one CZ clears both rows); S clears the diagonal.
    for i in 0..pivots.len() {
        let p = pivots[i];
        for j in bits(x_rows[i].1) {
            if j != p {
                apply_rows(&mut gates, &mut x_rows, CliffordGate::Cz(p, j));
            }
        }
        if x_rows[i].1 & (1 << p) != 0 {
            apply_rows(&mut gates, &mut x_rows, CliffordGate::S(p));
        }
    }

    for &p in &pivots {
        gates.push(CliffordGate::H(p));
    }
    gates
}

/// Row-reduce `(x, z)` rows on their X part, carrying Z along. Returns pivot
/// columns; pivot rows come first.
fn row_reduce_x(rows: &mut [(u64, u64)], columns: &[u32]) -> Vec<u32> {
    let mut pivots = Vec::new();
    let mut r = 0;
    for &col in columns {
        if r == rows.len() {
            break;
        }
        let bit = 1u64 << col;
        let Some(found) = (r..rows.len()).find(|&i| rows[i].0 & bit != 0) else {
            continue;
        };
        rows.swap(r, found);
        let pivot_row = rows[r];
        for (i, row) in rows.iter_mut().enumerate() {
            if i != r && row.0 & bit != 0 {
                row.0 ^= pivot_row.0;
                row.1 ^= pivot_row.1;
            }
        }
        pivots.push(col);
        r += 1;
    }
    pivots
}

/// Record `gate` and conjugate the generator rows.
fn apply(gates: &mut Vec<CliffordGate>, rows: &mut [Pauli], gate: CliffordGate) {
    gates.push(gate);
    for row in rows {
        row.conjugate(gate);
    }
}

/// Record `gate` and update unsigned `(x, z)` rows.
fn apply_rows(gates: &mut Vec<CliffordGate>, rows: &mut [(u64, u64)], gate: CliffordGate) {
    gates.push(gate);
    for row in rows {
        let mut p = Pauli::new(row.0, row.1, false);
        p.conjugate(gate);
        *row = (p.x, p.z);
    }
}
