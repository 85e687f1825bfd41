//! Error types for the sim crate.

use hamsynth_compile::CompileError;
use hamsynth_ir::IrError;
use thiserror::Error;

/// Errors produced by Hamiltonian time-evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty, no terms to synthesise")]
    EmptyHamiltonian,

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but circuit only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits available.
        n_qubits: u32,
    },

    /// A line of a Hamiltonian file could not be read.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A Pauli label contains something other than I, X, Y, Z.
    #[error("invalid Pauli label '{0}'")]
    InvalidLabel(String),

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// A group order is not a permutation of the group indices.
    #[error("invalid group order: {0}")]
    InvalidOrder(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A commuting group could not be brought to diagonal form.
    #[error("diagonalization failed: term {term} still has an X component after conjugation")]
    DiagonalizationFailed {
        /// Label of the offending term after conjugation.
        term: String,
    },

    /// No step count up to the limit met the error tolerance.
    #[error("tolerance not met within {max_steps} Trotter steps (best error {best_error:.6})")]
    ToleranceNotMet {
        /// Smallest error seen.
        best_error: f64,
        /// Largest step count tried.
        max_steps: usize,
    },

    /// The system is too wide for dense statevector simulation.
    #[error("{n_qubits} qubits exceed the simulation limit of {max}")]
    TooManyQubits {
        /// Requested width.
        n_qubits: u32,
        /// Supported maximum.
        max: u32,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Optimization or gate-set verification failed.
    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
