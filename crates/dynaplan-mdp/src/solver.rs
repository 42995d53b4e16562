use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dynaplan_core::{
    ActionId, Policy, PolicyIterationReport, SolveConfig, SolveError, ValueFunction,
    ValueIterationReport, evaluate_policy, policy_iteration_with, value_iteration,
};

use crate::CompiledMdp;

#[derive(Debug, Clone)]
/// Solver front end over a compiled MDP with an owned RNG for initial
/// policies. Only policy iteration's starting point is random; the converged
/// results are the same for every seed.
pub struct MdpSolver {
    mdp: CompiledMdp,
    rng: ChaCha8Rng,
}

impl MdpSolver {
    /// Create a solver with deterministic RNG seed.
    pub fn new(mdp: CompiledMdp, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a solver seeded from system randomness.
    pub fn from_entropy(mdp: CompiledMdp) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Borrow the underlying compiled MDP.
    pub fn mdp(&self) -> &CompiledMdp {
        &self.mdp
    }

    /// Run policy iteration from a uniformly random initial policy.
    pub fn policy_iteration(
        &mut self,
        config: &SolveConfig,
    ) -> Result<PolicyIterationReport, SolveError> {
        let Self { mdp, rng } = self;
        policy_iteration_with(mdp, config, |_state, num_actions| {
            ActionId::from(rng.gen_range(0..num_actions))
        })
    }

    /// Run value iteration. Deterministic, no RNG involved.
    pub fn value_iteration(&self, config: &SolveConfig) -> Result<ValueIterationReport, SolveError> {
        value_iteration(&self.mdp, config)
    }

    /// Evaluate a fixed policy against the compiled model.
    pub fn evaluate(
        &self,
        policy: &Policy,
        config: &SolveConfig,
    ) -> Result<ValueFunction, SolveError> {
        evaluate_policy(&self.mdp, policy, config)
    }
}
