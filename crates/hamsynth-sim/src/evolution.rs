//! Exact time evolution `exp(-i t H)|ψ⟩` by Chebyshev expansion.
//!
//! With `H = c_I·I + λ·H'` and the spectrum of `H'` inside `[-1, 1]`
//! (`λ = Σ|c_k|` over the non-identity terms):
//!
//!   exp(-i a x) = J₀(a) + 2 Σ_{k≥1} (-i)^k J_k(a) T_k(x),   a = λ t
//!
//! The Bessel coefficients come from Miller's backward recurrence and the
//! vectors `T_k(H')|ψ⟩` from the three-term Chebyshev recurrence, so only
//! products `H'|φ⟩` are needed. Terms are applied straight from their
//! symplectic form without building a matrix.

use num_complex::Complex64;
use tracing::trace;

use crate::error::SimResult;
use crate::hamiltonian::Hamiltonian;
use crate::pauli::Pauli;

/// Coefficients below this are dropped once the series is past its peak.
const BESSEL_CUTOFF: f64 = 1e-16;

/// Backward recurrence rescaling threshold.
const RESCALE: f64 = 1e250;

/// A Pauli term ready for matrix-free application.
#[derive(Debug, Clone, Copy)]
struct SparseTerm {
    x: u64,
    z: u64,
    /// `coeff · (-1)^negative · i^{|x ∧ z|}`.
    factor: Complex64,
}

/// Matrix-free `exp(-i t H)` for a fixed Hamiltonian.
#[derive(Debug, Clone)]
pub struct ExactEvolution {
    terms: Vec<SparseTerm>,
    /// Σ|c| over the non-identity terms.
    lambda: f64,
    identity_coeff: f64,
}

impl ExactEvolution {
    /// Prepare `h` for evolution.
    pub fn new(h: &Hamiltonian) -> SimResult<Self> {
        let mut terms = Vec::with_capacity(h.n_terms());
        let mut lambda = 0.0;
        for term in h.terms() {
            if term.pauli.is_identity() {
                continue;
            }
            let p = Pauli::from_string(&term.pauli)?;
            let y_count = (p.x & p.z).count_ones();
            let mut factor = Complex64::new(term.coeff, 0.0) * i_pow(y_count);
            if p.negative {
                factor = -factor;
            }
            terms.push(SparseTerm {
                x: p.x,
                z: p.z,
                factor,
            });
            lambda += term.coeff.abs();
        }
        Ok(Self {
            terms,
            lambda,
            identity_coeff: h.identity_coeff(),
        })
    }

    /// `out = H_nonidentity · v / scale`.
    fn apply_scaled(&self, v: &[Complex64], scale: f64, out: &mut [Complex64]) {
        out.fill(Complex64::new(0.0, 0.0));
        for term in &self.terms {
            let f = term.factor / scale;
            for (b, amp) in v.iter().enumerate() {
                // b < 2^20, so the cast round-trips
                let parity = ((b as u64) & term.z).count_ones() & 1;
                let value = if parity == 1 { -f * *amp } else { f * *amp };
                out[b ^ term.x as usize] += value;
            }
        }
    }

    /// `H · v`, identity terms included.
    pub fn apply_hamiltonian(&self, v: &[Complex64]) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); v.len()];
        self.apply_scaled(v, 1.0, &mut out);
        for (o, a) in out.iter_mut().zip(v) {
            *o += *a * self.identity_coeff;
        }
        out
    }

    /// `exp(-i t H) · v`.
    pub fn apply(&self, v: &[Complex64], t: f64) -> Vec<Complex64> {
        let phase = Complex64::from_polar(1.0, -self.identity_coeff * t);
        let a = self.lambda * t.abs();
        if a < f64::MIN_POSITIVE || self.terms.is_empty() {
            return v.iter().map(|x| phase * *x).collect();
        }

        let coeffs = bessel_series(a);
        // (-i)^k for forward time, i^k backwards.
        let step = if t >= 0.0 {
            Complex64::new(0.0, -1.0)
        } else {
            Complex64::new(0.0, 1.0)
        };

        let mut result: Vec<Complex64> = v.iter().map(|x| *x * coeffs[0]).collect();
        let mut prev = v.to_vec();
        let mut curr = vec![Complex64::new(0.0, 0.0); v.len()];
        self.apply_scaled(v, self.lambda, &mut curr);
        let mut next = vec![Complex64::new(0.0, 0.0); v.len()];
        let mut weight = step;

        for (k, &jk) in coeffs.iter().enumerate().skip(1) {
            let c = 2.0 * jk * weight;
            for (r, x) in result.iter_mut().zip(&curr) {
                *r += c * *x;
            }
            if k + 1 == coeffs.len() {
                break;
            }
            self.apply_scaled(&curr, self.lambda, &mut next);
            for (n, p) in next.iter_mut().zip(&prev) {
                *n = 2.0 * *n - *p;
            }
            std::mem::swap(&mut prev, &mut curr);
            std::mem::swap(&mut curr, &mut next);
            weight *= step;
        }

        trace!(a, terms = coeffs.len(), "chebyshev evolution");
        for r in &mut result {
            *r *= phase;
        }
        result
    }
}

fn i_pow(k: u32) -> Complex64 {
    match k % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// `J_0(a), J_1(a), …` up to where the series has converged, for `a > 0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn bessel_series(a: f64) -> Vec<f64> {
    if a < 1e-6 {
        // J_3 and beyond are below 1e-19.
        return vec![1.0 - a * a / 4.0, a / 2.0, a * a / 8.0];
    }
    let k_max = (1.5 * a + 50.0).ceil() as usize;
    // Start high enough above k_max for the backward recurrence to settle.
    let mut start = k_max + (160.0 * k_max as f64).sqrt() as usize;
    start += start % 2;

    let mut j = vec![0.0f64; k_max + 1];
    let (mut above, mut current) = (0.0f64, 1e-30f64);
    let mut even_sum = 0.0f64;
    for k in (1..=start).rev() {
        // current = J_k, above = J_{k+1}
        let below = (2.0 * k as f64 / a) * current - above;
        above = current;
        current = below;
        if k - 1 <= k_max {
            j[k - 1] = current;
        }
        if (k - 1) % 2 == 0 && k > 1 {
            even_sum += current;
        }
        if current.abs() > RESCALE {
            above /= RESCALE;
            current /= RESCALE;
            even_sum /= RESCALE;
            for v in &mut j {
                *v /= RESCALE;
            }
        }
    }
    // J_0 + 2 Σ J_{2k} = 1
    let norm = current + 2.0 * even_sum;
    for v in &mut j {
        *v /= norm;
    }

    let keep = (0..k_max + 1)
        .rposition(|k| k as f64 <= a || j[k].abs() >= BESSEL_CUTOFF)
        .map_or(1, |k| k + 1);
    j.truncate(keep);
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::{HamiltonianTerm, PauliString};

    #[test]
    fn test_bessel_known_values() {
        let j = bessel_series(1.0);
        assert!((j[0] - 0.765_197_686_557_966_6).abs() < 1e-14);
        assert!((j[1] - 0.440_050_585_744_933_5).abs() < 1e-14);
        assert!((j[2] - 0.114_903_484_931_900_5).abs() < 1e-14);

        let j = bessel_series(10.0);
        assert!((j[0] + 0.245_935_764_451_348_3).abs() < 1e-13);
        assert!((j[5] + 0.234_061_528_186_793_8).abs() < 1e-13);
    }

    #[test]
    fn test_bessel_large_argument_sum_rule() {
        let j = bessel_series(200.0);
        let total: f64 = j[0] + 2.0 * j.iter().skip(2).step_by(2).sum::<f64>();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(j.len() > 200);
    }

    #[test]
    fn test_single_x_closed_form() {
        // exp(-i t X)|0⟩ = cos t |0⟩ - i sin t |1⟩
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::x(0, 1.0)]);
        let evo = ExactEvolution::new(&h).unwrap();
        let t = 0.7;
        let out = evo.apply(&[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)], t);
        assert!((out[0] - Complex64::new(t.cos(), 0.0)).norm() < 1e-14);
        assert!((out[1] - Complex64::new(0.0, -t.sin())).norm() < 1e-14);
    }

    #[test]
    fn test_y_sign_and_identity_phase() {
        // H = 0.5·I + Y: exp(-itY)|0⟩ = cos t |0⟩ + sin t |1⟩
        let h = Hamiltonian::from_terms(vec![
            HamiltonianTerm::new(0.5, PauliString::identity()),
            HamiltonianTerm::y(0, 1.0),
        ]);
        let evo = ExactEvolution::new(&h).unwrap();
        let t = 1.3;
        let out = evo.apply(&[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)], t);
        let phase = Complex64::from_polar(1.0, -0.5 * t);
        assert!((out[0] - phase * t.cos()).norm() < 1e-13);
        assert!((out[1] - phase * t.sin()).norm() < 1e-13);
    }

    #[test]
    fn test_backward_evolution_inverts() {
        let h = Hamiltonian::from_terms(vec![
            HamiltonianTerm::zz(0, 1, 0.8),
            HamiltonianTerm::x(0, -0.3),
            HamiltonianTerm::y(1, 0.45),
        ]);
        let evo = ExactEvolution::new(&h).unwrap();
        let v: Vec<Complex64> = (0..4).map(|k| Complex64::new(k as f64, 1.0)).collect();
        let back = evo.apply(&evo.apply(&v, 2.5), -2.5);
        for (a, b) in back.iter().zip(&v) {
            assert!((*a - *b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_apply_hamiltonian_matches_zz() {
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 1, 2.0)]);
        let evo = ExactEvolution::new(&h).unwrap();
        let v = vec![Complex64::new(1.0, 0.0); 4];
        let out = evo.apply_hamiltonian(&v);
        let expected = [2.0, -2.0, -2.0, 2.0];
        for (o, e) in out.iter().zip(expected) {
            assert!((o.re - e).abs() < 1e-15 && o.im.abs() < 1e-15);
        }
    }
}
