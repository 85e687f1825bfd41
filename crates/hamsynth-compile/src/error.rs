//! Error types for the compilation framework.

use hamsynth_ir::IrError;
use thiserror::Error;

/// Compilation error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A gate outside the allowed gate set survived compilation.
    #[error("Gate '{gate}' on {qubits} qubit(s) is not in the allowed gate set")]
    GateNotAllowed { gate: String, qubits: usize },

    /// Error from the circuit IR.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
