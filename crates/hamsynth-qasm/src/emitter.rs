//! OpenQASM emitter for serializing circuits.

use std::fmt::Write as _;

use hamsynth_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};
use serde::{Deserialize, Serialize};

use crate::error::ParseResult;

/// Output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QasmVersion {
    /// `OPENQASM 2.0` with `qelib1.inc`.
    Qasm2,
    /// `OPENQASM 3.0` with `stdgates.inc`.
    #[default]
    Qasm3,
}

/// Emit a circuit as OpenQASM 3.0 source code.
///
/// A non-zero global phase is written as a `gphase` statement.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    emit_version(circuit, QasmVersion::Qasm3)
}

/// Emit a circuit as OpenQASM 2.0 source code.
///
/// Uses `qelib1.inc` gate names (`u1`, `u3` for phase and universal gates).
/// OpenQASM 2.0 has no global phase statement, so a non-zero phase `φ` is
/// realised on `q[0]` as `u1(φ) · x · u1(φ) · x = e^{iφ}·I`, appended after
/// the circuit. The file then holds up to four gates more than the circuit.
pub fn emit_qasm2(circuit: &Circuit) -> ParseResult<String> {
    emit_version(circuit, QasmVersion::Qasm2)
}

/// Emit a circuit in the requested dialect.
pub fn emit_version(circuit: &Circuit, version: QasmVersion) -> ParseResult<String> {
    let mut emitter = Emitter::new(version);
    emitter.emit_circuit(circuit);
    Ok(emitter.output)
}

struct Emitter {
    version: QasmVersion,
    output: String,
}

impl Emitter {
    fn new(version: QasmVersion) -> Self {
        Self {
            version,
            output: String::new(),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        let num_qubits = circuit.num_qubits();
        let phase = circuit.global_phase();

        match self.version {
            QasmVersion::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
                self.writeln(&format!("qreg q[{num_qubits}];"));
            }
            QasmVersion::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
                self.writeln(&format!("qubit[{num_qubits}] q;"));
                if phase != 0.0 {
                    self.writeln(&format!("gphase({});", format_number(phase)));
                }
            }
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }

        if self.version == QasmVersion::Qasm2 && phase != 0.0 && num_qubits > 0 {
            let angle = format_angle(phase);
            for _ in 0..2 {
                self.writeln(&format!("u1({angle}) q[0];"));
                self.writeln("x q[0];");
            }
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        let qubits = emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = self.gate_name(gate);
                let params = gate.parameters();
                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    let params: Vec<_> = params.into_iter().map(format_angle).collect();
                    self.writeln(&format!("{name}({}) {qubits};", params.join(", ")));
                }
            }
            InstructionKind::Barrier => {
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
    }

    fn gate_name(&self, gate: &StandardGate) -> &'static str {
        match (self.version, gate) {
            (QasmVersion::Qasm2, StandardGate::P(_)) => "u1",
            (QasmVersion::Qasm2, StandardGate::U(..)) => "u3",
            _ => gate.name(),
        }
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    let mut out = String::new();
    for (i, q) in qubits.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "q[{}]", q.0);
    }
    out
}

/// Shortest decimal that parses back to the same `f64`.
fn format_number(v: f64) -> String {
    let s = format!("{v}");
    if s == "-0" { "0".into() } else { s }
}

/// Format an angle, writing small multiples of π/8 symbolically.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_angle(v: f64) -> String {
    let eighths = v / (std::f64::consts::PI / 8.0);
    let k = eighths.round();
    if k != 0.0 && k.abs() <= 64.0 && (eighths - k).abs() < 1e-12 {
        let k = k as i64;
        let mut denom = 8i64;
        let mut num = k;
        while num % 2 == 0 && denom > 1 {
            num /= 2;
            denom /= 2;
        }
        let head = match num {
            1 => "pi".to_string(),
            -1 => "-pi".to_string(),
            n => format!("{n}*pi"),
        };
        return if denom == 1 {
            head
        } else {
            format!("{head}/{denom}")
        };
    }
    format_number(v)
}
