//! Syntax tree for the OpenQASM subset.

use serde::{Deserialize, Serialize};

/// A parsed program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Version string from the header, e.g. `"2.0"`.
    pub version: String,
    /// Statements with the line they start on.
    pub statements: Vec<(usize, Statement)>,
}

/// A statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// `include "file";`
    Include(String),
    /// `qreg q[n];` or `qubit[n] q;`
    QubitDecl { name: String, size: u32 },
    /// `creg c[n];` or `bit[n] c;`
    BitDecl { name: String, size: u32 },
    /// Gate application.
    Gate(GateCall),
    /// `barrier q;`
    Barrier { qubits: Vec<QubitRef> },
    /// `gphase(θ);`
    GlobalPhase(Expression),
    /// A statement the reader recognizes but cannot represent unitarily.
    Unsupported(String),
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written.
    pub name: String,
    /// Angle expressions.
    pub params: Vec<Expression>,
    /// Operands.
    pub qubits: Vec<QubitRef>,
}

/// Reference to a whole register or one of its elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRef {
    pub register: String,
    pub index: Option<u32>,
}

impl QubitRef {
    /// Reference to `register[index]`.
    pub fn single(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: Some(index),
        }
    }

    /// Reference to an entire register.
    pub fn register(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            index: None,
        }
    }
}

/// An angle expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Number(f64),
    Pi,
    Tau,
    Euler,
    Neg(Box<Expression>),
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Expression {
    /// Evaluate to radians.
    pub fn eval(&self) -> f64 {
        match self {
            Expression::Number(v) => *v,
            Expression::Pi => std::f64::consts::PI,
            Expression::Tau => std::f64::consts::TAU,
            Expression::Euler => std::f64::consts::E,
            Expression::Neg(e) => -e.eval(),
            Expression::BinOp { left, op, right } => {
                let (l, r) = (left.eval(), right.eval());
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval() {
        let expr = Expression::BinOp {
            left: Box::new(Expression::Neg(Box::new(Expression::Pi))),
            op: BinOp::Div,
            right: Box::new(Expression::Number(4.0)),
        };
        assert!((expr.eval() + std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    }
}
