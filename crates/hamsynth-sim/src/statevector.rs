//! Dense statevector simulation of IR circuits.
//!
//! Amplitude `b` belongs to the computational basis state whose bit `k` is
//! the value of qubit `k`. The circuit's global phase is applied, so two
//! circuits compare as operators, not just up to phase.

use hamsynth_compile::Unitary2x2;
use hamsynth_ir::{Circuit, QubitId, StandardGate};
use num_complex::Complex64;
use rand::Rng;

use crate::error::{SimError, SimResult};

/// Widest register the dense simulator accepts.
pub const MAX_SIM_QUBITS: u32 = 20;

/// A state of `n_qubits` qubits as `2^n` complex amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    n_qubits: u32,
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// `|0…0⟩` on `n_qubits` qubits.
    pub fn zero(n_qubits: u32) -> SimResult<Self> {
        check_width(n_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << n_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            n_qubits,
            amplitudes,
        })
    }

    /// Wrap raw amplitudes; the length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(SimError::InvalidConfig(format!(
                "statevector length {len} is not a power of two"
            )));
        }
        let n_qubits = len.trailing_zeros();
        check_width(n_qubits)?;
        Ok(Self {
            n_qubits,
            amplitudes,
        })
    }

    /// A normalized state with uniformly random real and imaginary parts.
    pub fn random(n_qubits: u32, rng: &mut impl Rng) -> SimResult<Self> {
        check_width(n_qubits)?;
        let amplitudes = (0..1usize << n_qubits)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let mut state = Self {
            n_qubits,
            amplitudes,
        };
        state.normalize();
        Ok(state)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// The amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable amplitudes.
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Consume and return the amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        norm(&self.amplitudes)
    }

    /// Scale to unit norm; the zero vector is left alone.
    pub fn normalize(&mut self) {
        let n = self.norm();
        if n > 0.0 {
            for a in &mut self.amplitudes {
                *a /= n;
            }
        }
    }

    /// `⟨self|other⟩`.
    pub fn inner(&self, other: &Statevector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * *b)
            .sum()
    }

    /// Apply one gate.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[QubitId]) -> SimResult<()> {
        for q in qubits {
            if q.0 >= self.n_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit: q.0,
                    n_qubits: self.n_qubits,
                });
            }
        }
        if let Some(u) = Unitary2x2::from_gate(gate) {
            self.apply_1q(&u, qubits[0].0);
            return Ok(());
        }
        match gate {
            StandardGate::CX => self.apply_cx(qubits[0].0, qubits[1].0),
            StandardGate::CZ => self.apply_cz(qubits[0].0, qubits[1].0),
            StandardGate::Swap => self.apply_swap(qubits[0].0, qubits[1].0),
            _ => {}
        }
        Ok(())
    }

    /// Apply the circuit's operator, global phase included.
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> SimResult<()> {
        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                self.apply_gate(gate, &inst.qubits)?;
            }
        }
        self.apply_phase(circuit.global_phase());
        Ok(())
    }

    /// Apply the adjoint of the circuit's operator.
    pub fn apply_circuit_adjoint(&mut self, circuit: &Circuit) -> SimResult<()> {
        let ops: Vec<_> = circuit.instructions().collect();
        for inst in ops.into_iter().rev() {
            if let Some(gate) = inst.as_gate() {
                self.apply_gate(&gate.inverse(), &inst.qubits)?;
            }
        }
        self.apply_phase(-circuit.global_phase());
        Ok(())
    }

    /// Multiply every amplitude by `e^{iφ}`.
    pub fn apply_phase(&mut self, phi: f64) {
        if phi != 0.0 {
            let factor = Complex64::from_polar(1.0, phi);
            for a in &mut self.amplitudes {
                *a *= factor;
            }
        }
    }

    fn apply_1q(&mut self, u: &Unitary2x2, q: u32) {
        let [a, b, c, d] = u.data;
        let bit = 1usize << q;
        for i in 0..self.amplitudes.len() {
            if i & bit == 0 {
                let j = i | bit;
                let (v0, v1) = (self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a * v0 + b * v1;
                self.amplitudes[j] = c * v0 + d * v1;
            }
        }
    }

    fn apply_cx(&mut self, control: u32, target: u32) {
        let (c, t) = (1usize << control, 1usize << target);
        for i in 0..self.amplitudes.len() {
            if i & c != 0 && i & t == 0 {
                self.amplitudes.swap(i, i | t);
            }
        }
    }

    fn apply_cz(&mut self, a: u32, b: u32) {
        let mask = (1usize << a) | (1usize << b);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, a: u32, b: u32) {
        let (ba, bb) = (1usize << a, 1usize << b);
        for i in 0..self.amplitudes.len() {
            if i & ba != 0 && i & bb == 0 {
                self.amplitudes.swap(i, (i & !ba) | bb);
            }
        }
    }
}

/// Euclidean norm of a slice.
pub(crate) fn norm(v: &[Complex64]) -> f64 {
    v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}

fn check_width(n_qubits: u32) -> SimResult<()> {
    if n_qubits > MAX_SIM_QUBITS {
        return Err(SimError::TooManyQubits {
            n_qubits,
            max: MAX_SIM_QUBITS,
        });
    }
    Ok(())
}
