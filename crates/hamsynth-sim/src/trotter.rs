//! Trotter-Suzuki product-formula synthesis.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n_steps`
//! slices.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i H_k t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i H_k τ/2)] · [∏_k exp(-i H_{m-k} τ/2)]
//!
//! Error: O(t³ / n²).
//!
//! [`TrotterEvolution`] slices term by term. [`GroupedEvolution`] slices by
//! commuting group: each `H_k` is a whole group, implemented exactly through
//! its diagonalizing Clifford, so only the group boundaries contribute error.

use std::fmt;
use std::str::FromStr;

use hamsynth_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagonalize::{Diagonalization, diagonalize};
use crate::error::{SimError, SimResult};
use crate::grouping::Grouping;
use crate::hamiltonian::Hamiltonian;
use crate::synthesis::{append_exp_pauli, append_group_evolution};

/// Product formula used for each Trotter slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFormula {
    /// Lie-Trotter.
    #[default]
    FirstOrder,
    /// Symmetric Suzuki-Trotter.
    SecondOrder,
}

/// Trotter product-formula time-evolution synthesiser, one term at a time.
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
    /// Number of qubits; if None, taken from the Hamiltonian.
    n_qubits: Option<u32>,
}

impl TrotterEvolution {
    /// Construct a new first- or second-order Trotter synthesiser.
    ///
    /// # Arguments
    /// * `hamiltonian` — the Hamiltonian H = Σ c_k P_k
    /// * `t`          — total evolution time
    /// * `n_steps`    — number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: Hamiltonian, t: f64, n_steps: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_steps,
            n_qubits: None,
        }
    }

    /// Override the circuit width (number of qubits).
    ///
    /// By default the width is the Hamiltonian's register width. Use this
    /// method to pad extra ancilla qubits.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Synthesise a first-order Trotter circuit.
    ///
    /// Each Trotter slice applies every term once with time step `t / n_steps`.
    pub fn first_order(&self) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let step_t = self.t / self.n_steps as f64;

        let mut circuit = Circuit::with_size("trotter1", n_qubits);
        debug!(
            n_terms = self.hamiltonian.n_terms(),
            n_steps = self.n_steps,
            n_qubits,
            "synthesising first-order Trotter circuit"
        );

        for _ in 0..self.n_steps {
            for term in self.hamiltonian.terms() {
                append_exp_pauli(&mut circuit, term, step_t, n_qubits)?;
            }
        }
        Ok(circuit)
    }

    /// Synthesise a second-order Suzuki-Trotter circuit.
    ///
    /// Each slice is a symmetric product: forward half-step then reverse
    /// half-step, giving O(t³/n²) error.
    pub fn second_order(&self) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let half_t = self.t / (2.0 * self.n_steps as f64);

        let mut circuit = Circuit::with_size("trotter2", n_qubits);
        debug!(
            n_terms = self.hamiltonian.n_terms(),
            n_steps = self.n_steps,
            n_qubits,
            "synthesising second-order Trotter circuit"
        );

        for _ in 0..self.n_steps {
            for term in self.hamiltonian.terms() {
                append_exp_pauli(&mut circuit, term, half_t, n_qubits)?;
            }
            for term in self.hamiltonian.terms().iter().rev() {
                append_exp_pauli(&mut circuit, term, half_t, n_qubits)?;
            }
        }
        Ok(circuit)
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        Ok(())
    }

    fn effective_n_qubits(&self) -> u32 {
        self.n_qubits
            .unwrap_or_else(|| self.hamiltonian.num_qubits())
    }
}

// ---------------------------------------------------------------------------
// Group ordering
// ---------------------------------------------------------------------------

/// A permutation of commuting-group indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupOrder(Vec<usize>);

impl GroupOrder {
    /// `0, 1, …, n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Wrap an index list without validation; see [`Self::validate`].
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The indices.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that this is a permutation of `0..n_groups`.
    pub fn validate(&self, n_groups: usize) -> SimResult<()> {
        if self.0.len() != n_groups {
            return Err(SimError::InvalidOrder(format!(
                "expected {n_groups} group indices, got {}",
                self.0.len()
            )));
        }
        let mut seen = vec![false; n_groups];
        for &i in &self.0 {
            match seen.get_mut(i) {
                None => {
                    return Err(SimError::InvalidOrder(format!(
                        "group index {i} out of range for {n_groups} groups"
                    )));
                }
                Some(true) => {
                    return Err(SimError::InvalidOrder(format!(
                        "group index {i} appears more than once"
                    )));
                }
                Some(slot) => *slot = true,
            }
        }
        Ok(())
    }
}

impl FromStr for GroupOrder {
    type Err = SimError;

    /// Parse a comma-separated index list such as `3,0,2,1`.
    fn from_str(s: &str) -> SimResult<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| SimError::InvalidOrder(format!("'{part}' is not a group index")))
            })
            .collect::<SimResult<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grouped evolution
// ---------------------------------------------------------------------------

/// Trotterized evolution over commuting groups.
#[derive(Debug, Clone)]
pub struct GroupedEvolution<'a> {
    grouping: &'a Grouping,
    t: f64,
    n_steps: usize,
    order: Option<GroupOrder>,
    formula: ProductFormula,
}

impl<'a> GroupedEvolution<'a> {
    /// Evolve for time `t` in `n_steps` slices, groups in index order.
    pub fn new(grouping: &'a Grouping, t: f64, n_steps: usize) -> Self {
        Self {
            grouping,
            t,
            n_steps,
            order: None,
            formula: ProductFormula::default(),
        }
    }

    /// Visit the groups in `order` within each slice.
    #[must_use]
    pub fn with_order(mut self, order: GroupOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Select the product formula.
    #[must_use]
    pub fn with_formula(mut self, formula: ProductFormula) -> Self {
        self.formula = formula;
        self
    }

    /// The group blocks in circuit order, as `(group index, duration)`.
    ///
    /// Adjacent blocks of the same group are merged, which is exact because
    /// a group commutes with itself.
    pub fn schedule(&self) -> SimResult<Vec<(usize, f64)>> {
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        let order = match &self.order {
            Some(order) => {
                order.validate(self.grouping.len())?;
                order.clone()
            }
            None => GroupOrder::identity(self.grouping.len()),
        };

        let tau = self.t / self.n_steps as f64;
        let mut blocks: Vec<(usize, f64)> = Vec::new();
        for _ in 0..self.n_steps {
            match self.formula {
                ProductFormula::FirstOrder => {
                    for &g in order.indices() {
                        push_block(&mut blocks, g, tau);
                    }
                }
                ProductFormula::SecondOrder => {
                    for &g in order.indices() {
                        push_block(&mut blocks, g, tau / 2.0);
                    }
                    for &g in order.indices().iter().rev() {
                        push_block(&mut blocks, g, tau / 2.0);
                    }
                }
            }
        }
        Ok(blocks)
    }

    /// Build the evolution circuit.
    ///
    /// Identity terms of the Hamiltonian become the global phase
    /// `-identity_coeff · t`.
    pub fn circuit(&self) -> SimResult<Circuit> {
        let schedule = self.schedule()?;
        let n_qubits = self.grouping.n_qubits;
        let diagonalizations = diagonalize_groups(self.grouping)?;

        let mut circuit = Circuit::with_size("trotter", n_qubits);
        for &(group, duration) in &schedule {
            append_group_evolution(&mut circuit, &diagonalizations[group], duration)?;
        }
        circuit.add_global_phase(-self.grouping.identity_coeff * self.t);

        debug!(
            groups = self.grouping.len(),
            n_steps = self.n_steps,
            blocks = schedule.len(),
            formula = ?self.formula,
            depth = circuit.depth(),
            "synthesised grouped Trotter circuit"
        );
        Ok(circuit)
    }
}

fn push_block(blocks: &mut Vec<(usize, f64)>, group: usize, duration: f64) {
    if let Some(last) = blocks.last_mut() {
        if last.0 == group {
            last.1 += duration;
            return;
        }
    }
    blocks.push((group, duration));
}

/// Diagonalize every group of a grouping, in group order.
pub fn diagonalize_groups(grouping: &Grouping) -> SimResult<Vec<Diagonalization>> {
    grouping
        .groups
        .iter()
        .map(|g| diagonalize(&g.weighted_paulis(), grouping.n_qubits))
        .collect()
}
