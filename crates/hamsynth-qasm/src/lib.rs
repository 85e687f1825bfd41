//! OpenQASM reader and writer for hamsynth
//!
//! Writes synthesized circuits as OpenQASM 3.0 (the default) or 2.0, and
//! reads the same gate-level subset back so a circuit file can be verified
//! independently of the run that produced it.
//!
//! # Supported Features
//!
//! | Feature | 2.0 | 3.0 | Example |
//! |---------|-----|-----|---------|
//! | Version declaration | ✅ | ✅ | `OPENQASM 2.0;` |
//! | Register declarations | ✅ | ✅ | `qreg q[10];`, `qubit[10] q;` |
//! | Standard gates | ✅ | ✅ | `h q[0];`, `cx q[0], q[1];` |
//! | Angle expressions | ✅ | ✅ | `rz(-3*pi/4) q[0];` |
//! | Register broadcast | ✅ | ✅ | `h q;` |
//! | Global phase | `u1`/`x` on `q[0]` | ✅ | `gphase(0.5);` |
//! | Measure / reset / classical control | ❌ | ❌ | rejected with a line number |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use hamsynth_ir::{Circuit, QubitId};
//! use hamsynth_qasm::{emit_qasm2, parse};
//!
//! let mut circuit = Circuit::with_size("demo", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.rz(0.125, QubitId(1)).unwrap();
//!
//! let qasm = emit_qasm2(&circuit).unwrap();
//! assert!(qasm.contains("cx q[0], q[1];"));
//!
//! let reparsed = parse(&qasm).unwrap();
//! assert_eq!(reparsed.num_qubits(), 2);
//! assert_eq!(reparsed.depth(), circuit.depth());
//! ```
//!
//! # Supported Gates
//!
//! Single-qubit: `id`, `x`, `y`, `z`, `h`, `s`, `sdg`, `t`, `tdg`, `sx`, `sxdg`
//!
//! Parameterized: `rx(θ)`, `ry(θ)`, `rz(θ)`, `p(θ)`/`u1(θ)`, `u2(φ,λ)`, `u(θ,φ,λ)`/`u3(θ,φ,λ)`
//!
//! Two-qubit: `cx`, `cz`, `swap`

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{QasmVersion, emit, emit_qasm2, emit_version};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_program};

/// Syntax tree types returned by [`parse_program`].
pub mod syntax {
    pub use crate::ast::*;
}
