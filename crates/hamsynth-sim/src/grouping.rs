//! Greedy partition of a Hamiltonian into commuting groups.
//!
//! Every term of a commuting group can be diagonalized by one Clifford
//! circuit, so a group's evolution is implemented exactly and Trotter error
//! only arises between groups.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::pauli::Pauli;

/// Order in which terms are offered to the greedy grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingStrategy {
    /// Input order.
    #[default]
    Sequential,
    /// Decreasing `|coeff|`, ties in input order.
    LargestFirst,
}

impl std::str::FromStr for GroupingStrategy {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "largest-first" => Ok(Self::LargestFirst),
            other => Err(SimError::InvalidConfig(format!(
                "unknown grouping strategy '{other}'"
            ))),
        }
    }
}

/// A set of pairwise-commuting terms.
#[derive(Debug, Clone, PartialEq)]
pub struct CommutingGroup {
    terms: Vec<HamiltonianTerm>,
    paulis: Vec<Pauli>,
}

impl CommutingGroup {
    fn new(term: HamiltonianTerm, pauli: Pauli) -> Self {
        Self {
            terms: vec![term],
            paulis: vec![pauli],
        }
    }

    /// The member terms, in insertion order.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Symplectic form of each member, parallel to [`Self::terms`].
    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }

    /// Members paired with their coefficients.
    pub fn weighted_paulis(&self) -> Vec<(Pauli, f64)> {
        self.paulis
            .iter()
            .zip(&self.terms)
            .map(|(p, t)| (*p, t.coeff))
            .collect()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if the group has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Σ |c| over the members.
    pub fn weight(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// True if `pauli` commutes with every member.
    pub fn commutes_with(&self, pauli: &Pauli) -> bool {
        self.paulis.iter().all(|p| p.commutes_with(pauli))
    }

    fn push(&mut self, term: HamiltonianTerm, pauli: Pauli) {
        self.terms.push(term);
        self.paulis.push(pauli);
    }
}

/// Result of [`group_commuting`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    /// Groups in creation order.
    pub groups: Vec<CommutingGroup>,
    /// Summed coefficient of the identity terms, kept aside as a phase.
    pub identity_coeff: f64,
    /// Register width of the source Hamiltonian.
    pub n_qubits: u32,
}

impl Grouping {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of grouped terms.
    pub fn n_terms(&self) -> usize {
        self.groups.iter().map(CommutingGroup::len).sum()
    }
}

/// Greedily partition the non-identity terms of `h` into commuting groups.
///
/// Each term joins the first group whose members all commute with it, or
/// opens a new group.
pub fn group_commuting(h: &Hamiltonian, strategy: GroupingStrategy) -> SimResult<Grouping> {
    if h.n_terms() == 0 {
        return Err(SimError::EmptyHamiltonian);
    }

    let mut indices: Vec<usize> = (0..h.n_terms()).collect();
    if strategy == GroupingStrategy::LargestFirst {
        indices.sort_by(|&a, &b| {
            h.terms()[b]
                .coeff
                .abs()
                .total_cmp(&h.terms()[a].coeff.abs())
        });
    }

    let mut groups: Vec<CommutingGroup> = Vec::new();
    for i in indices {
        let term = &h.terms()[i];
        if term.pauli.is_identity() {
            continue;
        }
        let pauli = Pauli::from_string(&term.pauli)?;
        match groups.iter_mut().find(|g| g.commutes_with(&pauli)) {
            Some(group) => group.push(term.clone(), pauli),
            None => groups.push(CommutingGroup::new(term.clone(), pauli)),
        }
    }

    debug!(
        terms = h.n_terms(),
        groups = groups.len(),
        ?strategy,
        "grouped Hamiltonian into commuting sets"
    );
    Ok(Grouping {
        groups,
        identity_coeff: h.identity_coeff(),
        n_qubits: h.num_qubits(),
    })
}
