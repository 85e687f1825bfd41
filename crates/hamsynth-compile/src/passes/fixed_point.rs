//! Repeat a pass sequence until the circuit stops shrinking.

use hamsynth_ir::CircuitDag;
use tracing::{debug, warn};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Runs its inner passes in order, again and again, until a round removes
/// no operation or `max_iterations` rounds have run.
///
/// Every inner pass must only ever remove operations; otherwise the operation
/// count is no measure of progress.
pub struct FixedPoint {
    passes: Vec<Box<dyn Pass>>,
    max_iterations: usize,
}

impl FixedPoint {
    /// Create an empty loop with the given round limit.
    pub fn new(max_iterations: usize) -> Self {
        Self {
            passes: Vec::new(),
            max_iterations,
        }
    }

    /// Add a pass to the loop body.
    #[must_use]
    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Number of passes in the loop body.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the loop body is empty.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Pass for FixedPoint {
    fn name(&self) -> &'static str {
        "FixedPoint"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        for round in 1..=self.max_iterations {
            let before = dag.num_ops();
            for pass in &self.passes {
                if pass.should_run(dag, properties) {
                    pass.run(dag, properties)?;
                }
            }
            let after = dag.num_ops();
            debug!("Fixed-point round {round}: {before} -> {after} ops");
            if after >= before {
                return Ok(());
            }
        }
        warn!(
            "Fixed-point loop stopped after {} rounds without converging",
            self.max_iterations
        );
        Ok(())
    }
}
