//! Single-qubit gate fusion.

use hamsynth_ir::{CircuitDag, Instruction, NodeIndex, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::Unitary2x2;

/// Fuses every run of two or more single-qubit gates on a wire into one
/// `U(θ, φ, λ)` gate, or removes the run when it multiplies to the identity.
///
/// The phase split off by the decomposition is added to the circuit's global
/// phase, so the rewritten circuit implements exactly the same operator.
pub struct Optimize1qGates;

impl Optimize1qGates {
    /// Create a new single-qubit fusion pass.
    pub fn new() -> Self {
        Self
    }

    /// Maximal runs of consecutive single-qubit gates, per wire.
    fn find_runs(dag: &CircuitDag) -> Vec<(QubitId, Vec<NodeIndex>)> {
        let mut open: FxHashMap<QubitId, Vec<NodeIndex>> = FxHashMap::default();
        let mut runs = Vec::new();

        for (node, inst) in dag.topological_ops() {
            let single = inst.as_gate().is_some_and(|g| g.num_qubits() == 1);
            if single {
                open.entry(inst.qubits[0]).or_default().push(node);
                continue;
            }
            for q in &inst.qubits {
                if let Some(run) = open.remove(q) {
                    runs.push((*q, run));
                }
            }
        }
        runs.extend(open);
        runs.retain(|(_, nodes)| nodes.len() >= 2);
        runs.sort_unstable_by_key(|(q, _)| *q);
        runs
    }
}

impl Default for Optimize1qGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for Optimize1qGates {
    fn name(&self) -> &'static str {
        "Optimize1qGates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let runs = Self::find_runs(dag);
        if runs.is_empty() {
            return Ok(());
        }

        let mut edits = FxHashMap::default();
        let mut phase = 0.0;
        let mut removed = 0;

        for (qubit, nodes) in &runs {
            let mut combined = Unitary2x2::identity();
            for node in nodes {
                if let Some(u) = dag
                    .get_instruction(*node)
                    .and_then(|i| i.as_gate())
                    .and_then(Unitary2x2::from_gate)
                {
                    combined = u * combined;
                }
            }

            let replacement = if combined.is_identity_up_to_phase() {
                phase += combined.data[0].arg();
                Vec::new()
            } else {
                let (theta, phi, lambda, gamma) = combined.to_u3();
                phase += gamma;
                vec![Instruction::single_qubit_gate(
                    StandardGate::U(theta, phi, lambda),
                    *qubit,
                )]
            };
            removed += nodes.len() - replacement.len();

            let (first, rest) = nodes.split_at(1);
            edits.insert(first[0], replacement);
            for node in rest {
                edits.insert(*node, Vec::new());
            }
        }

        debug!("Fused {} single-qubit runs, {removed} gates removed", runs.len());
        let global_phase = dag.global_phase() + phase;
        *dag = dag.rebuild(&edits)?;
        dag.set_global_phase(global_phase);
        properties.stats.merged += removed;
        Ok(())
    }

    fn should_run(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.num_ops() > 1
    }
}
