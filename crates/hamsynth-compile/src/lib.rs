//! Compilation passes for hamsynth circuits
//!
//! Synthesized Trotter circuits are long concatenations of basis changes,
//! parity ladders and rotations. Neighbouring blocks often end and begin with
//! mutually inverse gates, so a small set of peephole passes removes a large
//! share of the depth. This crate provides the pass framework, those passes,
//! and a verification pass that checks the gate-set restriction.
//!
//! # Architecture
//!
//! ```text
//! Synthesized circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (gate set, optimization stats)
//! └─────────────┘
//!       │
//!       ├── FixedPoint [ CancelInversePairs, MergeRotations, Optimize1qGates ]
//!       └── GateSetVerification
//!       │
//!       ▼
//! Optimized circuit (single-qubit gates + cx)
//! ```
//!
//! # Example
//!
//! ```rust
//! use hamsynth_compile::{GateSet, PassManagerBuilder};
//! use hamsynth_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2);
//! circuit.h(QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.h(QubitId(1)).unwrap();
//!
//! let (pm, mut props) = PassManagerBuilder::new()
//!     .with_optimization_level(2)
//!     .with_gate_set(GateSet::single_qubit_and_cx())
//!     .build();
//!
//! let mut dag = circuit.into_dag();
//! pm.run(&mut dag, &mut props).unwrap();
//! assert_eq!(dag.num_ops(), 0);
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | None |
//! | 1 | One round of inverse cancellation and rotation merging |
//! | 2 | Level 1 to a fixed point |
//! | 3 | + single-qubit fusion into `U` gates |
//!
//! # Custom Passes
//!
//! ```rust
//! use hamsynth_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use hamsynth_ir::CircuitDag;
//!
//! struct DepthProbe;
//!
//! impl Pass for DepthProbe {
//!     fn name(&self) -> &str { "depth_probe" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, dag: &mut CircuitDag, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(dag.depth());
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;
pub mod unitary;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{AnalysisPass, Pass, PassKind, TransformationPass};
pub use property::{GateSet, OptimizationStats, PropertySet};
pub use unitary::Unitary2x2;
