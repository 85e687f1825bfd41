//! hamsynth circuit intermediate representation
//!
//! Core data structures for the circuits produced by the synthesis pipeline.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (Directed Acyclic Graph) over qubit wires,
//! which gives cheap depth computation and lets optimization passes look at
//! the next operation on a wire. The high-level [`Circuit`] API wraps the DAG
//! with a builder interface and a global phase.
//!
//! # Example
//!
//! ```rust
//! use hamsynth_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("zz", 2);
//!
//! // exp(-i·0.3·Z⊗Z) as a CNOT ladder around an Rz
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.rz(0.6, QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase Clifford(+T) gates |
//! | `SX`, `SXdg` | 1 | sqrt(X) and its inverse |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ`, `Swap` | 2 | Accepted on input, rejected by gate-set verification |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
