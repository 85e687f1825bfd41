//! Reading Hamiltonians from text.
//!
//! One term per line: an optional sign, a real coefficient and a Pauli label,
//! optionally joined by `*`:
//!
//! ```text
//! # transverse-field Ising, 3 sites
//! + 1.0 * ZZI
//! -1.0 IZZ
//! 0.5*XII
//! ```
//!
//! Blank lines and `#` comments are skipped. All labels must have the same
//! length, which becomes the declared register width.

use std::str::FromStr;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliString, QubitOrder};

/// Parse a Hamiltonian file.
pub fn parse_hamiltonian(text: &str, order: QubitOrder) -> SimResult<Hamiltonian> {
    let mut terms = Vec::new();
    let mut width: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let (coeff, label) =
            split_term(content).map_err(|message| SimError::Parse { line, message })?;
        let len = label.chars().count();
        match width {
            None => width = Some(len),
            Some(w) if w != len => {
                return Err(SimError::Parse {
                    line,
                    message: format!("label '{label}' has {len} qubits, expected {w}"),
                });
            }
            Some(_) => {}
        }

        let pauli = PauliString::from_label(&label, order).map_err(|_| SimError::Parse {
            line,
            message: format!("invalid Pauli label '{label}'"),
        })?;
        terms.push(HamiltonianTerm::new(coeff, pauli));
    }

    let hamiltonian = Hamiltonian::from_terms(terms);
    Ok(match width {
        Some(w) => {
            let w = u32::try_from(w).map_err(|_| SimError::Parse {
                line: 1,
                message: format!("label width {w} is too large"),
            })?;
            hamiltonian.with_num_qubits(w)
        }
        None => hamiltonian,
    })
}

/// Split `"+ 0.25 * XIZ"` into the signed coefficient and the label.
fn split_term(content: &str) -> Result<(f64, String), String> {
    let spaced = content.replace('*', " ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    let Some((last, head)) = tokens.split_last() else {
        return Err("empty term".into());
    };
    if head.is_empty() {
        return Err(format!("missing coefficient before '{last}'"));
    }

    let number: String = head.concat();
    let coeff: f64 = number
        .parse()
        .map_err(|_| format!("invalid coefficient '{}'", head.join(" ")))?;
    if !coeff.is_finite() {
        return Err(format!("coefficient '{number}' is not finite"));
    }
    Ok((coeff, (*last).to_string()))
}

impl FromStr for Hamiltonian {
    type Err = SimError;

    /// Parse with qubit 0 as the rightmost label character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hamiltonian(s, QubitOrder::LittleEndian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::PauliOp;

    #[test]
    fn test_accepted_shapes() {
        let text = "\
# comment line
+ 0.25 * XIZY
-0.5 ZZII   # trailing comment

0.125*IIIX
- 2 YYYY
+1e-3 IIII
";
        let h = parse_hamiltonian(text, QubitOrder::LittleEndian).unwrap();
        assert_eq!(h.n_terms(), 5);
        assert_eq!(h.num_qubits(), 4);
        let coeffs: Vec<f64> = h.terms().iter().map(|t| t.coeff).collect();
        assert_eq!(coeffs, vec![0.25, -0.5, 0.125, -2.0, 1e-3]);
        assert_eq!(h.terms()[0].pauli.get(0), PauliOp::Y);
        assert_eq!(h.terms()[0].pauli.get(3), PauliOp::X);
        assert!(h.terms()[4].pauli.is_identity());
    }

    #[test]
    fn test_width_is_declared_even_for_identity_columns() {
        let h: Hamiltonian = "1.0 IIZ\n".parse().unwrap();
        assert_eq!(h.min_qubits(), 1);
        assert_eq!(h.num_qubits(), 3);
    }

    #[test]
    fn test_big_endian() {
        let h = parse_hamiltonian("1.0 XII", QubitOrder::BigEndian).unwrap();
        assert_eq!(h.terms()[0].pauli.ops(), &[(0, PauliOp::X)]);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_hamiltonian("1.0 XX\n\n0.5 XXX\n", QubitOrder::LittleEndian).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 3, .. }));

        let err = parse_hamiltonian("1.0 XA\n", QubitOrder::LittleEndian).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 1, .. }));

        let err = parse_hamiltonian("XX\n", QubitOrder::LittleEndian).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 1, ref message } if message.contains("missing")));

        let err = parse_hamiltonian("# x\nabc XX\n", QubitOrder::LittleEndian).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 2, .. }));

        let err = parse_hamiltonian("inf XX\n", QubitOrder::LittleEndian).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        let h = parse_hamiltonian("# nothing\n\n", QubitOrder::LittleEndian).unwrap();
        assert_eq!(h.n_terms(), 0);
        assert_eq!(h.num_qubits(), 0);
    }
}
