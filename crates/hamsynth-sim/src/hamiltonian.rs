//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! # Example
//!
//! ```rust
//! use hamsynth_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, QubitOrder};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new( 0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//!
//! // Labels put qubit 0 on the right by default.
//! let p = PauliString::from_label("XZ", QubitOrder::LittleEndian).unwrap();
//! assert_eq!(p.ops(), &[(0, PauliOp::Z), (1, PauliOp::X)]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; contributes a global phase only.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Parse a label character (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PauliOp::I),
            'X' => Some(PauliOp::X),
            'Y' => Some(PauliOp::Y),
            'Z' => Some(PauliOp::Z),
            _ => None,
        }
    }

    /// The label character.
    pub fn as_char(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// How a text label maps characters to qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QubitOrder {
    /// Rightmost character is qubit 0 (Qiskit convention).
    #[default]
    LittleEndian,
    /// Leftmost character is qubit 0.
    BigEndian,
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted.  Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    /// A qubit listed twice keeps its last operator.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.reverse();
        v.sort_by_key(|(q, _)| *q);
        v.dedup_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// The identity string.
    pub fn identity() -> Self {
        Self { ops: Vec::new() }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Parse a label such as `"XIZY"`.
    pub fn from_label(label: &str, order: QubitOrder) -> SimResult<Self> {
        let chars: Vec<char> = label.chars().collect();
        let width = chars.len();
        let mut ops = Vec::with_capacity(width);
        for (i, c) in chars.into_iter().enumerate() {
            let op = PauliOp::from_char(c).ok_or_else(|| SimError::InvalidLabel(label.into()))?;
            let qubit = match order {
                QubitOrder::LittleEndian => width - 1 - i,
                QubitOrder::BigEndian => i,
            };
            let qubit = u32::try_from(qubit).map_err(|_| SimError::InvalidLabel(label.into()))?;
            ops.push((qubit, op));
        }
        Ok(Self::from_ops(ops))
    }

    /// Render as a label of `width` characters.
    pub fn label(&self, width: u32, order: QubitOrder) -> String {
        let mut chars: Vec<char> = (0..width).map(|q| self.get(q).as_char()).collect();
        if order == QubitOrder::LittleEndian {
            chars.reverse();
        }
        chars.into_iter().collect()
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// The operator acting on `qubit`.
    pub fn get(&self, qubit: u32) -> PauliOp {
        self.ops
            .binary_search_by_key(&qubit, |(q, _)| *q)
            .map_or(PauliOp::I, |i| self.ops[i].1)
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// True if every factor is Z or I.
    pub fn is_diagonal(&self) -> bool {
        self.ops.iter().all(|(_, op)| *op == PauliOp::Z)
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// True if the two strings commute, i.e. they differ (both non-identity)
    /// on an even number of qubits.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        let (mut i, mut j) = (0, 0);
        let mut anticommuting = 0usize;
        while i < self.ops.len() && j < other.ops.len() {
            let (qa, a) = self.ops[i];
            let (qb, b) = other.ops[j];
            match qa.cmp(&qb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    if a != b {
                        anticommuting += 1;
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        anticommuting % 2 == 0
    }
}

impl fmt::Display for PauliString {
    /// Sparse form, e.g. `X0 Z3`, or `I` for the identity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (i, (q, op)) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{q}", op.as_char())?;
        }
        Ok(())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: single-qubit Y term.
    pub fn y(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Y)]))
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    /// Declared width, e.g. the label length of a parsed file.
    #[serde(default)]
    n_qubits: Option<u32>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self {
            terms,
            n_qubits: None,
        }
    }

    /// Declare the register width.
    ///
    /// The effective width never drops below [`Self::min_qubits`].
    #[must_use]
    pub fn with_num_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Register width: the declared width or [`Self::min_qubits`], whichever
    /// is larger.
    pub fn num_qubits(&self) -> u32 {
        self.n_qubits.unwrap_or(0).max(self.min_qubits())
    }

    /// Sum of the coefficients of all identity terms.
    pub fn identity_coeff(&self) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    /// Merge terms with equal Pauli strings and drop zero coefficients.
    ///
    /// Each merged term takes the position of its first occurrence.
    #[must_use]
    pub fn simplify(&self) -> Self {
        let mut index: rustc_hash::FxHashMap<&PauliString, usize> = Default::default();
        let mut merged: Vec<HamiltonianTerm> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match index.get(&term.pauli) {
                Some(&i) => merged[i].coeff += term.coeff,
                None => {
                    index.insert(&term.pauli, merged.len());
                    merged.push(term.clone());
                }
            }
        }
        merged.retain(|t| t.coeff != 0.0);
        Self {
            terms: merged,
            n_qubits: self.n_qubits,
        }
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}
