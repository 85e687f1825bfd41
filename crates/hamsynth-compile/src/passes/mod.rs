//! Built-in compilation passes.
//!
//! - [`CancelInversePairs`], [`MergeRotations`], [`Optimize1qGates`]: peephole
//!   optimizations on adjacent gates.
//! - [`FixedPoint`]: repeats a pass sequence until the circuit stops shrinking.
//! - [`GateSetVerification`]: checks the result against the allowed gate set.

mod cancel;
mod fixed_point;
mod merge;
mod optimize_1q;
mod verification;

#[cfg(test)]
mod tests;

pub use cancel::CancelInversePairs;
pub use fixed_point::FixedPoint;
pub use merge::MergeRotations;
pub use optimize_1q::Optimize1qGates;
pub use verification::{GateSetVerification, VerificationResult};

/// Tolerance for angle comparisons.
pub(crate) const EPSILON: f64 = crate::unitary::EPSILON;

/// Upper bound on rewrite rounds inside a single pass.
pub(crate) const MAX_ITERATIONS: usize = 100;
