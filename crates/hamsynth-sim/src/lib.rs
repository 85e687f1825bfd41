//! `hamsynth-sim` — Hamiltonian time-evolution circuit synthesis.
//!
//! Converts a sum-of-Paulis Hamiltonian into a `hamsynth_ir::Circuit` that
//! approximates `exp(-i H t)`:
//!
//! 1. **Grouping**: terms are greedily partitioned into commuting groups.
//! 2. **Diagonalization**: each group gets a Clifford basis change that maps
//!    every member to a Z string, so the group evolves exactly as a parity
//!    network of Z rotations.
//! 3. **Trotterization**: the group blocks are repeated in a chosen order
//!    with a first- or second-order product formula.
//! 4. **Optimization**: peephole passes cancel gates across block
//!    boundaries; the result uses single-qubit gates and `cx` only.
//! 5. **Diagnostics**: the spectral-norm error against the exact evolution
//!    and the circuit depth.
//!
//! # Quick start
//!
//! ```rust
//! use hamsynth_sim::hamiltonian::{Hamiltonian, HamiltonianTerm};
//! use hamsynth_sim::{SynthesisConfig, Synthesizer};
//!
//! // Transverse-field Ising model: H = -J·ZZ - h·X
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::zz(0, 1, -1.0),
//!     HamiltonianTerm::x(0, -0.5),
//!     HamiltonianTerm::x(1, -0.5),
//! ]);
//!
//! let config = SynthesisConfig { steps: Some(4), ..Default::default() };
//! let report = Synthesizer::new(config).unwrap().run(&h).unwrap();
//! assert_eq!(report.circuit.num_qubits(), 2);
//! assert!(report.error.is_some());
//! ```

pub mod approximation;
pub mod config;
pub mod diagonalize;
pub mod error;
pub mod evolution;
pub mod grouping;
pub mod hamiltonian;
pub mod parse;
pub mod pauli;
pub mod pipeline;
pub mod search;
pub mod statevector;
pub mod synthesis;
pub mod trotter;

pub use approximation::{ErrorEstimate, ErrorOptions, approximation_error};
pub use config::SynthesisConfig;
pub use diagonalize::{Diagonalization, diagonalize};
pub use error::{SimError, SimResult};
pub use evolution::ExactEvolution;
pub use grouping::{CommutingGroup, Grouping, GroupingStrategy, group_commuting};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, QubitOrder};
pub use parse::parse_hamiltonian;
pub use pipeline::{Evaluation, SynthesisReport, Synthesizer, evaluate, optimize};
pub use search::{Candidate, OrderSearch, SearchResult};
pub use statevector::{MAX_SIM_QUBITS, Statevector};
pub use trotter::{GroupOrder, GroupedEvolution, ProductFormula, TrotterEvolution};
