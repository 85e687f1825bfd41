//! Gate-set verification.

use hamsynth_ir::CircuitDag;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{GateSet, PropertySet};

/// Result of gate-set verification, stored in the property set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether every gate was allowed.
    pub passed: bool,
    /// Number of gates checked.
    pub gates_checked: usize,
}

/// Analysis pass that rejects any gate outside the allowed gate set.
///
/// Uses [`PropertySet::gate_set`], falling back to single-qubit gates plus
/// CNOT. Barriers carry no operation and are not checked. Runs after all
/// optimization passes, so a rewrite that introduced a forbidden gate is
/// caught before the circuit is written out.
pub struct GateSetVerification;

impl Pass for GateSetVerification {
    fn name(&self) -> &'static str {
        "GateSetVerification"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let gate_set = properties.gate_set.clone().unwrap_or_default();
        let checked = check(dag, &gate_set)?;
        debug!("Gate-set verification passed: {checked} gates");
        properties.insert(VerificationResult {
            passed: true,
            gates_checked: checked,
        });
        Ok(())
    }
}

/// Check every gate in `dag`, returning how many were checked.
pub(crate) fn check(dag: &CircuitDag, gate_set: &GateSet) -> CompileResult<usize> {
    let mut checked = 0;
    for (_, inst) in dag.topological_ops() {
        if let Some(gate) = inst.as_gate() {
            if !gate_set.allows(gate.name(), inst.qubits.len()) {
                return Err(CompileError::GateNotAllowed {
                    gate: gate.name().to_string(),
                    qubits: inst.qubits.len(),
                });
            }
            checked += 1;
        }
    }
    Ok(checked)
}
