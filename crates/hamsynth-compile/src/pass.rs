//! Pass trait and related types.

use hamsynth_ir::CircuitDag;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass: reads the DAG, writes properties.
    Analysis,
    /// Transformation pass: modifies the DAG.
    Transformation,
}

/// A compilation pass.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the DAG.
    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run.
    fn should_run(&self, _dag: &CircuitDag, _properties: &PropertySet) -> bool {
        true
    }
}

/// Marker trait for analysis passes.
pub trait AnalysisPass: Pass {
    /// Analyze the DAG and update properties.
    fn analyze(&self, dag: &CircuitDag, properties: &mut PropertySet) -> CompileResult<()>;
}

/// Marker trait for transformation passes.
pub trait TransformationPass: Pass {
    /// Transform the DAG.
    fn transform(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamsynth_ir::{Circuit, QubitId};

    struct CountOps;

    impl Pass for CountOps {
        fn name(&self) -> &'static str {
            "count_ops"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
            properties.insert(dag.num_ops());
            Ok(())
        }
    }

    #[test]
    fn test_custom_pass_writes_property() {
        let mut circuit = Circuit::with_size("t", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();

        let pass = CountOps;
        assert_eq!(pass.kind(), PassKind::Analysis);
        assert!(pass.should_run(&dag, &props));
        pass.run(&mut dag, &mut props).unwrap();
        assert_eq!(props.get::<usize>(), Some(&2));
    }
}
