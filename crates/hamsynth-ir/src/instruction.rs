//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(StandardGate),
    /// Barrier (synchronization point, no operator).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Get the gate if this is a gate instruction.
    #[inline]
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Barrier => None,
        }
    }

    /// Check if this is a barrier.
    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Name of the instruction as written in OpenQASM.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Barrier => "barrier",
        }
    }

    /// The adjoint instruction. Barriers are their own adjoint.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match &self.kind {
            InstructionKind::Gate(g) => Self::gate(g.inverse(), self.qubits.iter().copied()),
            InstructionKind::Barrier => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(inst.name(), "cx");
        assert_eq!(inst.as_gate(), Some(&StandardGate::CX));
    }

    #[test]
    fn test_inverse_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::Sdg, QubitId(2));
        let inv = inst.inverse();
        assert_eq!(inv.as_gate(), Some(&StandardGate::S));
        assert_eq!(inv.qubits, vec![QubitId(2)]);

        let barrier = Instruction::barrier([QubitId(0), QubitId(1)]);
        assert!(barrier.inverse().is_barrier());
    }

    #[test]
    fn test_instruction_serde() {
        let inst = Instruction::single_qubit_gate(StandardGate::Rz(0.25), QubitId(3));
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
