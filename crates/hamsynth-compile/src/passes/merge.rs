//! Rotation merging.

use std::f64::consts::PI;

use hamsynth_ir::{CircuitDag, Instruction, NodeIndex, StandardGate};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::{EPSILON, MAX_ITERATIONS};

/// Merges adjacent same-axis rotations on one wire and drops zero rotations.
///
/// `Rz(a)·Rz(b) = Rz(a+b)`, likewise for `Rx`, `Ry` and `P`. Rotation angles
/// are summed without reduction modulo 2π, since `Rz(θ + 2π) = -Rz(θ)`; phase
/// angles are reduced because `P` has period 2π.
pub struct MergeRotations;

impl MergeRotations {
    /// Create a new rotation merging pass.
    pub fn new() -> Self {
        Self
    }

    fn find_edits(dag: &CircuitDag) -> FxHashMap<NodeIndex, Vec<Instruction>> {
        let mut edits = FxHashMap::default();
        let mut taken: FxHashSet<NodeIndex> = FxHashSet::default();

        for (node, inst) in dag.topological_ops() {
            if taken.contains(&node) {
                continue;
            }
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            let Some(angle) = rotation_angle(gate) else {
                continue;
            };
            let qubit = inst.qubits[0];

            if is_zero(gate, angle) {
                taken.insert(node);
                edits.insert(node, Vec::new());
                continue;
            }

            let Some(next) = dag.successor_on(node, qubit) else {
                continue;
            };
            if taken.contains(&next) {
                continue;
            }
            let Some(next_gate) = dag.get_instruction(next).and_then(|i| i.as_gate()) else {
                continue;
            };
            if let Some(merged) = merge(gate, next_gate) {
                taken.insert(node);
                taken.insert(next);
                let replacement = match rotation_angle(&merged) {
                    Some(sum) if is_zero(&merged, sum) => Vec::new(),
                    _ => vec![Instruction::single_qubit_gate(merged, qubit)],
                };
                edits.insert(node, replacement);
                edits.insert(next, Vec::new());
            }
        }

        edits
    }
}

impl Default for MergeRotations {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "MergeRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        for _ in 0..MAX_ITERATIONS {
            let edits = Self::find_edits(dag);
            if edits.is_empty() {
                break;
            }
            let before = dag.num_ops();
            *dag = dag.rebuild(&edits)?;
            let removed = before - dag.num_ops();
            debug!("Merged rotations, {removed} gates removed");
            properties.stats.merged += removed;
        }
        Ok(())
    }
}

fn rotation_angle(gate: &StandardGate) -> Option<f64> {
    match *gate {
        StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) | StandardGate::P(a) => {
            Some(a)
        }
        _ => None,
    }
}

fn is_zero(gate: &StandardGate, angle: f64) -> bool {
    match gate {
        StandardGate::P(_) => {
            let reduced = angle.rem_euclid(2.0 * PI);
            reduced < EPSILON || 2.0 * PI - reduced < EPSILON
        }
        _ => angle.abs() < EPSILON,
    }
}

fn merge(first: &StandardGate, second: &StandardGate) -> Option<StandardGate> {
    match (*first, *second) {
        (StandardGate::Rx(a), StandardGate::Rx(b)) => Some(StandardGate::Rx(a + b)),
        (StandardGate::Ry(a), StandardGate::Ry(b)) => Some(StandardGate::Ry(a + b)),
        (StandardGate::Rz(a), StandardGate::Rz(b)) => Some(StandardGate::Rz(a + b)),
        (StandardGate::P(a), StandardGate::P(b)) => Some(StandardGate::P(a + b)),
        _ => None,
    }
}
