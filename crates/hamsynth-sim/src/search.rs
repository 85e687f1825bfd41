//! Random search over group orders.
//!
//! The order in which commuting groups are visited inside a Trotter step
//! changes both the error (through which commutators appear) and the depth
//! (through which basis changes cancel at block boundaries). This module
//! samples random permutations, always including the creation order, and
//! keeps the best one by `(error, depth)`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::approximation::approximation_error;
use crate::config::SynthesisConfig;
use crate::error::{SimError, SimResult};
use crate::grouping::group_commuting;
use crate::hamiltonian::Hamiltonian;
use crate::pipeline::Synthesizer;
use crate::trotter::GroupOrder;

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSearch {
    /// Random permutations to evaluate besides the creation order.
    pub trials: usize,
    /// RNG seed for the permutations.
    pub seed: u64,
    /// Trotter steps used for every candidate.
    pub steps: usize,
}

/// One evaluated order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// The order.
    pub order: GroupOrder,
    /// Estimated approximation error.
    pub error: f64,
    /// Optimized circuit depth.
    pub depth: usize,
}

/// Outcome of [`OrderSearch::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Best candidate by `(error, depth)`.
    pub best: Candidate,
    /// Number of orders evaluated.
    pub evaluated: usize,
}

impl OrderSearch {
    /// Search with `trials` random orders at `steps` Trotter steps.
    pub fn new(trials: usize, seed: u64, steps: usize) -> Self {
        Self {
            trials,
            seed,
            steps,
        }
    }

    /// Run the search using the other settings of `config`.
    pub fn run(&self, h: &Hamiltonian, config: &SynthesisConfig) -> SimResult<SearchResult> {
        self.run_with_observer(h, config, |_| {})
    }

    /// Like [`Self::run`], calling `observer` after each evaluated order.
    #[instrument(skip_all, fields(trials = self.trials, steps = self.steps))]
    pub fn run_with_observer(
        &self,
        h: &Hamiltonian,
        config: &SynthesisConfig,
        mut observer: impl FnMut(&Candidate),
    ) -> SimResult<SearchResult> {
        if self.steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        let synthesizer = Synthesizer::new(config.clone())?;
        let grouping = group_commuting(h, config.grouping)?;
        let options = config.error_options();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let evaluate = |order: GroupOrder| -> SimResult<Candidate> {
            let circuit = synthesizer.build(&grouping, &order, self.steps)?;
            let error = approximation_error(h, config.time, &circuit, &options)?.norm;
            debug!(%order, error, depth = circuit.depth(), "evaluated order");
            Ok(Candidate {
                order,
                error,
                depth: circuit.depth(),
            })
        };

        let mut best = evaluate(GroupOrder::identity(grouping.len()))?;
        observer(&best);
        let mut indices: Vec<usize> = (0..grouping.len()).collect();
        for _ in 0..self.trials {
            indices.shuffle(&mut rng);
            let candidate = evaluate(GroupOrder::new(indices.clone()))?;
            observer(&candidate);
            if (candidate.error, candidate.depth) < (best.error, best.depth) {
                best = candidate;
            }
        }

        info!(order = %best.order, error = best.error, depth = best.depth, "best order");
        Ok(SearchResult {
            best,
            evaluated: self.trials + 1,
        })
    }
}
