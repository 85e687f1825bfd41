//! Symplectic Pauli algebra.
//!
//! A Pauli operator on up to 64 qubits is a pair of bit masks plus a sign:
//!
//!   P = (-1)^negative · i^{|x ∧ z|} · X^x · Z^z
//!
//! so `(x, z) = (1, 1)` on a qubit is exactly `Y`. Conjugation by the
//! Clifford gates H, S, S† and CX updates the masks and the sign with the
//! Aaronson–Gottesman rules; CZ is handled as `H·CX·H`.

use std::fmt;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{PauliOp, PauliString};

/// Widest register the symplectic representation supports.
pub const MAX_QUBITS: u32 = 64;

/// A signed Pauli operator in symplectic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pauli {
    /// X component, bit q for qubit q.
    pub x: u64,
    /// Z component, bit q for qubit q.
    pub z: u64,
    /// Overall sign.
    pub negative: bool,
}

impl Pauli {
    /// Create from masks and sign.
    pub const fn new(x: u64, z: u64, negative: bool) -> Self {
        Self { x, z, negative }
    }

    /// Convert a Pauli string (positive sign).
    pub fn from_string(pauli: &PauliString) -> SimResult<Self> {
        let mut p = Self::default();
        for &(q, op) in pauli.ops() {
            if q >= MAX_QUBITS {
                return Err(SimError::QubitOutOfRange {
                    qubit: q,
                    n_qubits: MAX_QUBITS,
                });
            }
            let bit = 1u64 << q;
            match op {
                PauliOp::I => {}
                PauliOp::X => p.x |= bit,
                PauliOp::Y => {
                    p.x |= bit;
                    p.z |= bit;
                }
                PauliOp::Z => p.z |= bit,
            }
        }
        Ok(p)
    }

    /// The unsigned Pauli string.
    pub fn to_pauli_string(&self) -> PauliString {
        let support = self.x | self.z;
        PauliString::from_ops(bits(support).map(|q| {
            let bit = 1u64 << q;
            let op = match (self.x & bit != 0, self.z & bit != 0) {
                (true, true) => PauliOp::Y,
                (true, false) => PauliOp::X,
                (false, true) => PauliOp::Z,
                (false, false) => PauliOp::I,
            };
            (q, op)
        }))
    }

    /// True if no qubit carries X, Y or Z.
    pub fn is_identity(&self) -> bool {
        self.x == 0 && self.z == 0
    }

    /// True if the operator is a product of Z and I.
    pub fn is_diagonal(&self) -> bool {
        self.x == 0
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> u32 {
        (self.x | self.z).count_ones()
    }

    /// Symplectic inner product is even.
    pub fn commutes_with(&self, other: &Pauli) -> bool {
        ((self.x & other.z) ^ (self.z & other.x)).count_ones() % 2 == 0
    }

    /// Packed `(x | z << 64)` vector for GF(2) elimination.
    pub fn symplectic(&self) -> u128 {
        u128::from(self.x) | (u128::from(self.z) << 64)
    }

    /// Conjugate in place: `P ← G P G†`.
    pub fn conjugate(&mut self, gate: CliffordGate) {
        match gate {
            CliffordGate::H(q) => self.apply_h(q),
            CliffordGate::S(q) => self.apply_s(q),
            CliffordGate::Sdg(q) => self.apply_sdg(q),
            CliffordGate::Cx(c, t) => self.apply_cx(c, t),
            CliffordGate::Cz(a, b) => {
                self.apply_h(b);
                self.apply_cx(a, b);
                self.apply_h(b);
            }
        }
    }

    fn bit(mask: u64, q: u32) -> bool {
        (mask >> q) & 1 == 1
    }

    fn apply_h(&mut self, q: u32) {
        let (x, z) = (Self::bit(self.x, q), Self::bit(self.z, q));
        self.negative ^= x && z;
        let m = 1u64 << q;
        if x != z {
            self.x ^= m;
            self.z ^= m;
        }
    }

    fn apply_s(&mut self, q: u32) {
        let (x, z) = (Self::bit(self.x, q), Self::bit(self.z, q));
        self.negative ^= x && z;
        if x {
            self.z ^= 1u64 << q;
        }
    }

    fn apply_sdg(&mut self, q: u32) {
        let (x, z) = (Self::bit(self.x, q), Self::bit(self.z, q));
        self.negative ^= x && !z;
        if x {
            self.z ^= 1u64 << q;
        }
    }

    fn apply_cx(&mut self, c: u32, t: u32) {
        let (xc, zc) = (Self::bit(self.x, c), Self::bit(self.z, c));
        let (xt, zt) = (Self::bit(self.x, t), Self::bit(self.z, t));
        self.negative ^= xc && zt && (xt == zc);
        if xc {
            self.x ^= 1u64 << t;
        }
        if zt {
            self.z ^= 1u64 << c;
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "+" };
        write!(f, "{sign}{}", self.to_pauli_string())
    }
}

/// Clifford gates used for basis changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliffordGate {
    /// Hadamard.
    H(u32),
    /// Phase gate.
    S(u32),
    /// Inverse phase gate.
    Sdg(u32),
    /// CNOT (control, target).
    Cx(u32, u32),
    /// Controlled-Z; emitted as `H(b)·CX(a, b)·H(b)`.
    Cz(u32, u32),
}

impl CliffordGate {
    /// The inverse gate.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            CliffordGate::S(q) => CliffordGate::Sdg(q),
            CliffordGate::Sdg(q) => CliffordGate::S(q),
            other => other,
        }
    }
}

/// Reverse a gate list and invert each gate.
pub fn inverse_sequence(gates: &[CliffordGate]) -> Vec<CliffordGate> {
    gates.iter().rev().map(|g| g.inverse()).collect()
}

/// Rows of Paulis that are conjugated together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tableau {
    rows: Vec<Pauli>,
}

impl Tableau {
    /// Create from rows.
    pub fn new(rows: Vec<Pauli>) -> Self {
        Self { rows }
    }

    /// Conjugate every row by `gate`.
    pub fn apply(&mut self, gate: CliffordGate) {
        for row in &mut self.rows {
            row.conjugate(gate);
        }
    }

    /// Conjugate every row by a gate sequence, first gate first.
    pub fn apply_all(&mut self, gates: &[CliffordGate]) {
        for &gate in gates {
            self.apply(gate);
        }
    }

    /// The rows.
    pub fn rows(&self) -> &[Pauli] {
        &self.rows
    }

    /// Mutable access to the rows.
    pub fn rows_mut(&mut self) -> &mut [Pauli] {
        &mut self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Indices of a maximal linearly independent subset of `paulis`, in order.
pub fn independent_subset(paulis: &[Pauli]) -> Vec<usize> {
    // Basis kept in echelon form keyed by leading bit.
    let mut basis: Vec<u128> = Vec::new();
    let mut chosen = Vec::new();
    for (i, p) in paulis.iter().enumerate() {
        let mut v = p.symplectic();
        for b in &basis {
            let lead = 127 - b.leading_zeros();
            if (v >> lead) & 1 == 1 {
                v ^= b;
            }
        }
        if v != 0 {
            // Insert keeping leading bits in descending order.
            let lead = 127 - v.leading_zeros();
            let pos = basis
                .iter()
                .position(|b| 127 - b.leading_zeros() < lead)
                .unwrap_or(basis.len());
            basis.insert(pos, v);
            chosen.push(i);
        }
    }
    chosen
}

/// Reduced row echelon form over GF(2).
///
/// Pivot columns are searched in `columns` order. Rows are reordered so the
/// pivot rows come first; returns the pivot column of each pivot row.
pub fn rref(rows: &mut [u64], columns: &[u32]) -> Vec<u32> {
    let mut pivots = Vec::new();
    let mut r = 0;
    for &col in columns {
        if r == rows.len() {
            break;
        }
        let bit = 1u64 << col;
        let Some(found) = (r..rows.len()).find(|&i| rows[i] & bit != 0) else {
            continue;
        };
        rows.swap(r, found);
        let pivot_row = rows[r];
        for (i, row) in rows.iter_mut().enumerate() {
            if i != r && *row & bit != 0 {
                *row ^= pivot_row;
            }
        }
        pivots.push(col);
        r += 1;
    }
    pivots
}

/// Iterate over the set bit positions of `mask`, lowest first.
pub fn bits(mut mask: u64) -> impl Iterator<Item = u32> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let q = mask.trailing_zeros();
            mask &= mask - 1;
            Some(q)
        }
    })
}
