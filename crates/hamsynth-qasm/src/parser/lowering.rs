//! Syntax tree to Circuit lowering.

use std::f64::consts::FRAC_PI_2;

use hamsynth_ir::{Circuit, Instruction, QubitId, StandardGate};
use rustc_hash::FxHashMap;

use crate::ast::{GateCall, Program, QubitRef, Statement};
use crate::error::{ParseError, ParseResult};

/// Lower a parsed program to a Circuit.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<Circuit> {
    let mut lowerer = Lowerer::default();
    lowerer.lower(program)
}

#[derive(Default)]
struct Lowerer {
    /// Register name -> qubit ids in index order.
    qregs: FxHashMap<String, Vec<QubitId>>,
    cregs: FxHashMap<String, u32>,
}

impl Lowerer {
    fn lower(&mut self, program: &Program) -> ParseResult<Circuit> {
        let mut circuit = Circuit::new("qasm");

        for (line, stmt) in &program.statements {
            let line = *line;
            match stmt {
                Statement::Include(_) => {}
                Statement::QubitDecl { name, size } => {
                    if self.qregs.contains_key(name) || self.cregs.contains_key(name) {
                        return Err(ParseError::DuplicateDeclaration {
                            line,
                            name: name.clone(),
                        });
                    }
                    let ids = circuit.add_qreg(name.clone(), *size);
                    self.qregs.insert(name.clone(), ids);
                }
                Statement::BitDecl { name, size } => {
                    if self.qregs.contains_key(name) || self.cregs.contains_key(name) {
                        return Err(ParseError::DuplicateDeclaration {
                            line,
                            name: name.clone(),
                        });
                    }
                    self.cregs.insert(name.clone(), *size);
                }
                Statement::Gate(call) => self.lower_gate_call(&mut circuit, call, line)?,
                Statement::Barrier { qubits } => {
                    let ids = if qubits.is_empty() {
                        circuit.qubits().iter().map(|q| q.id).collect()
                    } else {
                        let mut ids = Vec::new();
                        for r in qubits {
                            ids.extend(self.resolve(r, line)?);
                        }
                        ids.sort_unstable();
                        ids.dedup();
                        ids
                    };
                    circuit.push(Instruction::barrier(ids))?;
                }
                Statement::GlobalPhase(theta) => circuit.add_global_phase(theta.eval()),
                Statement::Unsupported(statement) => {
                    return Err(ParseError::Unsupported {
                        line,
                        statement: statement.clone(),
                    });
                }
            }
        }

        Ok(circuit)
    }

    fn lower_gate_call(
        &self,
        circuit: &mut Circuit,
        call: &GateCall,
        line: usize,
    ) -> ParseResult<()> {
        let params: Vec<f64> = call.params.iter().map(|p| p.eval()).collect();
        let gate = resolve_gate(&call.name, &params, line)?;

        let expected = gate.num_qubits() as usize;
        if call.qubits.len() != expected {
            return Err(ParseError::WrongQubitCount {
                gate: call.name.clone(),
                expected,
                got: call.qubits.len(),
            });
        }

        let operands: Vec<Vec<QubitId>> = call
            .qubits
            .iter()
            .map(|r| self.resolve(r, line))
            .collect::<ParseResult<_>>()?;

        // Register operands broadcast; single qubits repeat.
        let width = operands.iter().map(Vec::len).max().unwrap_or(1);
        if operands.iter().any(|o| o.len() != 1 && o.len() != width) {
            return Err(ParseError::BroadcastMismatch {
                gate: call.name.clone(),
            });
        }
        for i in 0..width {
            let qubits = operands
                .iter()
                .map(|o| if o.len() == 1 { o[0] } else { o[i] });
            circuit.gate(gate, qubits)?;
        }
        Ok(())
    }

    fn resolve(&self, r: &QubitRef, line: usize) -> ParseResult<Vec<QubitId>> {
        let ids = self
            .qregs
            .get(&r.register)
            .ok_or_else(|| ParseError::UndefinedIdentifier {
                line,
                name: r.register.clone(),
            })?;
        match r.index {
            None => Ok(ids.clone()),
            Some(index) => ids
                .get(index as usize)
                .map(|&id| vec![id])
                .ok_or_else(|| ParseError::IndexOutOfBounds {
                    register: r.register.clone(),
                    index: index as usize,
                    size: ids.len(),
                }),
        }
    }
}

/// Map an OpenQASM gate name (qelib1 or stdgates) to a standard gate.
fn resolve_gate(name: &str, params: &[f64], line: usize) -> ParseResult<StandardGate> {
    let arity = |expected: usize| -> ParseResult<()> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected,
                got: params.len(),
            })
        }
    };

    let gate = match name {
        "id" | "i" => (0, StandardGate::I),
        "x" => (0, StandardGate::X),
        "y" => (0, StandardGate::Y),
        "z" => (0, StandardGate::Z),
        "h" => (0, StandardGate::H),
        "s" => (0, StandardGate::S),
        "sdg" => (0, StandardGate::Sdg),
        "t" => (0, StandardGate::T),
        "tdg" => (0, StandardGate::Tdg),
        "sx" => (0, StandardGate::SX),
        "sxdg" => (0, StandardGate::SXdg),
        "cx" | "CX" | "cnot" => (0, StandardGate::CX),
        "cz" => (0, StandardGate::CZ),
        "swap" => (0, StandardGate::Swap),
        "rx" => {
            arity(1)?;
            (1, StandardGate::Rx(params[0]))
        }
        "ry" => {
            arity(1)?;
            (1, StandardGate::Ry(params[0]))
        }
        "rz" => {
            arity(1)?;
            (1, StandardGate::Rz(params[0]))
        }
        "p" | "u1" | "phase" => {
            arity(1)?;
            (1, StandardGate::P(params[0]))
        }
        "u2" => {
            arity(2)?;
            (2, StandardGate::U(FRAC_PI_2, params[0], params[1]))
        }
        "u" | "u3" | "U" => {
            arity(3)?;
            (3, StandardGate::U(params[0], params[1], params[2]))
        }
        _ => {
            return Err(ParseError::UnknownGate {
                line,
                name: name.to_string(),
            });
        }
    };
    arity(gate.0)?;
    Ok(gate.1)
}
