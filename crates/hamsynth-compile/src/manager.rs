//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use hamsynth_ir::CircuitDag;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{
    CancelInversePairs, FixedPoint, GateSetVerification, MergeRotations, Optimize1qGates,
};
use crate::property::{GateSet, PropertySet};

/// Round limit for the fixed-point optimization loop.
const MAX_ROUNDS: usize = 50;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given DAG.
    #[instrument(skip(self, dag, properties))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits, {} ops",
            self.passes.len(),
            dag.num_qubits(),
            dag.num_ops()
        );

        for pass in &self.passes {
            if pass.should_run(dag, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(dag, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), dag.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}, removed: {}",
            dag.depth(),
            dag.num_ops(),
            properties.stats.removed()
        );

        Ok(())
    }

    /// Names of the passes, in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
    /// Shared properties handed to the passes.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: No optimization
    /// - Level 1: One round of inverse cancellation and rotation merging (default)
    /// - Level 2: Level 1 repeated to a fixed point
    /// - Level 3: Level 2 plus single-qubit gate fusion
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Verify the result against a gate set after optimization.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.properties.gate_set = Some(gate_set);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        match self.optimization_level {
            0 => {}
            1 => {
                pm.add_pass(CancelInversePairs::new());
                pm.add_pass(MergeRotations::new());
            }
            2 => pm.add_pass(
                FixedPoint::new(MAX_ROUNDS)
                    .with_pass(CancelInversePairs::new())
                    .with_pass(MergeRotations::new()),
            ),
            _ => pm.add_pass(
                FixedPoint::new(MAX_ROUNDS)
                    .with_pass(CancelInversePairs::new())
                    .with_pass(MergeRotations::new())
                    .with_pass(Optimize1qGates::new()),
            ),
        }

        // Verification goes last so it sees the final circuit.
        if self.properties.gate_set.is_some() {
            pm.add_pass(GateSetVerification);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
