//! Approximation error of a synthesized circuit.
//!
//! The error is the spectral norm `‖exp(-itH) − U‖₂`. Since both operators
//! are unitary this equals `‖A‖₂` for the normal operator
//! `A = U†·exp(-itH) − I`, whose largest eigenvalue modulus power iteration
//! finds from a seeded random start vector.

use hamsynth_ir::Circuit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{SimError, SimResult};
use crate::evolution::ExactEvolution;
use crate::hamiltonian::Hamiltonian;
use crate::statevector::{MAX_SIM_QUBITS, Statevector, norm};

/// Below this the circuit is taken to be exact.
const EXACT_THRESHOLD: f64 = 1e-13;

/// Power-iteration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorOptions {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Stop once successive estimates agree to this relative tolerance.
    pub tolerance: f64,
    /// Seed for the start vector.
    pub seed: u64,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-6,
            seed: 0,
        }
    }
}

/// Outcome of [`approximation_error`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorEstimate {
    /// Estimated `‖exp(-itH) − U‖₂`, a lower bound that tightens with
    /// iterations.
    pub norm: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the relative tolerance was reached.
    pub converged: bool,
}

/// Estimate `‖exp(-itH) − U‖₂` where `U` is the operator of `circuit`.
///
/// The register is as wide as the wider of `h` and `circuit`, at most
/// [`MAX_SIM_QUBITS`].
#[instrument(skip_all, fields(t = t, n_ops = circuit.num_ops()))]
pub fn approximation_error(
    h: &Hamiltonian,
    t: f64,
    circuit: &Circuit,
    options: &ErrorOptions,
) -> SimResult<ErrorEstimate> {
    let circuit_width = u32::try_from(circuit.num_qubits()).unwrap_or(u32::MAX);
    let n_qubits = h.num_qubits().max(circuit_width);
    if n_qubits > MAX_SIM_QUBITS {
        return Err(SimError::TooManyQubits {
            n_qubits,
            max: MAX_SIM_QUBITS,
        });
    }

    let exact = ExactEvolution::new(h)?;
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut x = Statevector::random(n_qubits, &mut rng)?;

    let mut estimate = 0.0f64;
    let mut iterations = 0;
    let mut converged = false;
    while iterations < options.max_iterations.max(1) {
        iterations += 1;

        // y = U† exp(-itH) x − x
        let evolved = exact.apply(x.amplitudes(), t);
        let mut y = Statevector::from_amplitudes(evolved)?;
        y.apply_circuit_adjoint(circuit)?;
        for (a, b) in y.amplitudes_mut().iter_mut().zip(x.amplitudes()) {
            *a -= *b;
        }

        let next = norm(y.amplitudes());
        if next < EXACT_THRESHOLD {
            estimate = estimate.max(next);
            converged = true;
            break;
        }
        let change = (next - estimate).abs();
        estimate = estimate.max(next);
        if change <= options.tolerance * next {
            converged = true;
            break;
        }
        y.normalize();
        x = y;
    }

    debug!(norm = estimate, iterations, converged, "approximation error");
    Ok(ErrorEstimate {
        norm: estimate,
        iterations,
        converged,
    })
}
