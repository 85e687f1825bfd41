//! 2x2 unitary matrices for single-qubit gates.
//!
//! Used by the single-qubit fusion pass and by the statevector simulator,
//! so the two always agree on gate semantics. Conventions follow OpenQASM:
//! `Rz(θ) = exp(-iθZ/2)`, `P(λ) = diag(1, e^{iλ})` and
//! `U(θ, φ, λ) = [[cos θ/2, -e^{iλ} sin θ/2], [e^{iφ} sin θ/2, e^{i(φ+λ)} cos θ/2]]`.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, PI};

use hamsynth_ir::StandardGate;
use num_complex::Complex64;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub const fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Diagonal matrix `diag(1, e^{iλ})`.
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// `exp(-iθX/2)`.
    pub fn rx(theta: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        let c = Complex64::new(c, 0.0);
        let s = Complex64::new(0.0, -s);
        Self::new(c, s, s, c)
    }

    /// `exp(-iθY/2)`.
    pub fn ry(theta: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// `exp(-iθZ/2)`.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// The OpenQASM `U(θ, φ, λ)` gate.
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Matrix of a single-qubit gate, `None` for multi-qubit gates.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        let m = match *gate {
            StandardGate::I => Self::identity(),
            StandardGate::X => Self::new(ZERO, ONE, ONE, ZERO),
            StandardGate::Y => Self::new(ZERO, -I, I, ZERO),
            StandardGate::Z => Self::new(ONE, ZERO, ZERO, -ONE),
            StandardGate::H => Self::new(h, h, h, -h),
            StandardGate::S => Self::new(ONE, ZERO, ZERO, I),
            StandardGate::Sdg => Self::new(ONE, ZERO, ZERO, -I),
            StandardGate::T => Self::p(FRAC_PI_4),
            StandardGate::Tdg => Self::p(-FRAC_PI_4),
            StandardGate::SX => Self::new(half + half_i, half - half_i, half - half_i, half + half_i),
            StandardGate::SXdg => {
                Self::new(half - half_i, half + half_i, half + half_i, half - half_i)
            }
            StandardGate::Rx(t) => Self::rx(t),
            StandardGate::Ry(t) => Self::ry(t),
            StandardGate::Rz(t) => Self::rz(t),
            StandardGate::P(l) => Self::p(l),
            StandardGate::U(t, p, l) => Self::u(t, p, l),
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => return None,
        };
        Some(m)
    }

    /// Matrix product `self * other`.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// True if this is the identity up to a global phase.
    pub fn is_identity_up_to_phase(&self) -> bool {
        let [a, b, c, d] = self.data;
        b.norm() < EPSILON && c.norm() < EPSILON && (a - d).norm() < EPSILON
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(x, y)| (x - y).norm() < tol)
    }

    /// Decompose as `e^{iγ} · U(θ, φ, λ)`.
    ///
    /// Returns `(θ, φ, λ, γ)` with `θ ∈ [0, π]`. The phase is exact, so a
    /// circuit that replaces this matrix with the `U` gate must add `γ` to its
    /// global phase.
    pub fn to_u3(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;
        let theta = 2.0 * c.norm().atan2(a.norm());
        if a.norm() > EPSILON {
            let gamma = a.arg();
            if c.norm() > EPSILON {
                let phi = c.arg() - gamma;
                let lambda = (-b).arg() - gamma;
                (theta, phi, lambda, gamma)
            } else {
                (theta, 0.0, d.arg() - gamma, gamma)
            }
        } else {
            // θ = π leaves one of φ, λ free; fix λ = 0.
            let gamma = (-b).arg();
            (PI, c.arg() - gamma, 0.0, gamma)
        }
    }

    /// Normalize an angle to `(-π, π]`.
    pub fn normalize_angle(angle: f64) -> f64 {
        if !angle.is_finite() {
            return 0.0;
        }
        let a = angle.rem_euclid(2.0 * PI);
        if a > PI { a - 2.0 * PI } else { a }
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(g: StandardGate) -> Unitary2x2 {
        Unitary2x2::from_gate(&g).unwrap()
    }

    #[test]
    fn test_self_inverse_gates() {
        for g in [StandardGate::X, StandardGate::Y, StandardGate::Z, StandardGate::H] {
            let m = gate(g);
            assert!((m * m).approx_eq(&Unitary2x2::identity(), 1e-12), "{g:?}");
        }
    }

    #[test]
    fn test_inverse_matches_dagger() {
        let gates = [
            StandardGate::S,
            StandardGate::T,
            StandardGate::SX,
            StandardGate::Rx(0.3),
            StandardGate::Ry(-1.1),
            StandardGate::Rz(2.5),
            StandardGate::P(0.7),
            StandardGate::U(0.4, 1.3, -2.2),
        ];
        for g in gates {
            let m = gate(g);
            let inv = gate(g.inverse());
            assert!(inv.approx_eq(&m.dagger(), 1e-12), "{g:?}");
        }
    }

    #[test]
    fn test_s_squared_is_z() {
        let s = gate(StandardGate::S);
        assert!((s * s).approx_eq(&gate(StandardGate::Z), 1e-12));
    }

    #[test]
    fn test_sx_squared_is_x() {
        let sx = gate(StandardGate::SX);
        assert!((sx * sx).approx_eq(&gate(StandardGate::X), 1e-12));
    }

    #[test]
    fn test_rz_is_phase_up_to_global_phase() {
        let rz = Unitary2x2::rz(0.9);
        let p = Unitary2x2::p(0.9);
        let phase = Complex64::from_polar(1.0, -0.45);
        for i in 0..4 {
            assert!((rz.data[i] - p.data[i] * phase).norm() < 1e-12);
        }
    }

    #[test]
    fn test_to_u3_reconstructs_exactly() {
        let cases = [
            gate(StandardGate::H),
            gate(StandardGate::X),
            gate(StandardGate::Y),
            gate(StandardGate::S) * gate(StandardGate::H) * gate(StandardGate::Sdg),
            Unitary2x2::rz(1.3),
            Unitary2x2::rx(-0.4) * Unitary2x2::ry(2.0),
            Unitary2x2::u(0.3, -1.0, 2.0),
            Unitary2x2::identity(),
        ];
        for m in cases {
            let (theta, phi, lambda, gamma) = m.to_u3();
            let u = Unitary2x2::u(theta, phi, lambda);
            let phase = Complex64::from_polar(1.0, gamma);
            for i in 0..4 {
                assert!(
                    (m.data[i] - u.data[i] * phase).norm() < 1e-10,
                    "mismatch for {m:?}"
                );
            }
        }
    }

    #[test]
    fn test_identity_up_to_phase() {
        assert!(Unitary2x2::rz(2.0 * PI).is_identity_up_to_phase());
        assert!(!Unitary2x2::rz(0.1).is_identity_up_to_phase());
    }

    #[test]
    fn test_normalize_angle() {
        assert!((Unitary2x2::normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((Unitary2x2::normalize_angle(-0.5) + 0.5).abs() < 1e-12);
        assert_eq!(Unitary2x2::normalize_angle(f64::NAN), 0.0);
    }
}
