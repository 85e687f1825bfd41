//! Inverse-pair cancellation.

use hamsynth_ir::{CircuitDag, NodeIndex, StandardGate};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::{EPSILON, MAX_ITERATIONS};

/// Removes a gate immediately followed by its inverse on the same qubits.
///
/// `H·H`, `X·X`, `S·Sdg`, `CX·CX`, `Rz(θ)·Rz(-θ)` and so on. For two-qubit
/// gates both wires must lead directly from the first gate to the second.
pub struct CancelInversePairs;

impl CancelInversePairs {
    /// Create a new cancellation pass.
    pub fn new() -> Self {
        Self
    }

    fn find_pairs(dag: &CircuitDag) -> Vec<(NodeIndex, NodeIndex)> {
        let mut pairs = Vec::new();
        let mut taken: FxHashSet<NodeIndex> = FxHashSet::default();

        for (node, inst) in dag.topological_ops() {
            if taken.contains(&node) {
                continue;
            }
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            let Some(next) = dag.common_successor(node) else {
                continue;
            };
            if taken.contains(&next) {
                continue;
            }
            let Some(next_inst) = dag.get_instruction(next) else {
                continue;
            };
            let Some(next_gate) = next_inst.as_gate() else {
                continue;
            };
            let same_operands = next_inst.qubits == inst.qubits
                || (is_symmetric(gate) && same_set(&next_inst.qubits, &inst.qubits));
            if same_operands && is_inverse_pair(gate, next_gate) {
                taken.insert(node);
                taken.insert(next);
                pairs.push((node, next));
            }
        }

        pairs
    }
}

impl Default for CancelInversePairs {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for CancelInversePairs {
    fn name(&self) -> &'static str {
        "CancelInversePairs"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        for _ in 0..MAX_ITERATIONS {
            let pairs = Self::find_pairs(dag);
            if pairs.is_empty() {
                break;
            }
            debug!("Cancelling {} inverse pairs", pairs.len());

            let mut edits = FxHashMap::default();
            for (first, second) in &pairs {
                edits.insert(*first, Vec::new());
                edits.insert(*second, Vec::new());
            }
            *dag = dag.rebuild(&edits)?;
            properties.stats.cancelled += 2 * pairs.len();
        }
        Ok(())
    }

    fn should_run(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.num_ops() > 1
    }
}

/// True if `second` undoes `first`.
pub(crate) fn is_inverse_pair(first: &StandardGate, second: &StandardGate) -> bool {
    let inverse = first.inverse();
    inverse.name() == second.name()
        && inverse
            .parameters()
            .iter()
            .zip(second.parameters())
            .all(|(a, b)| (a - b).abs() < EPSILON)
}

fn is_symmetric(gate: &StandardGate) -> bool {
    matches!(gate, StandardGate::CZ | StandardGate::Swap)
}

fn same_set<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}
