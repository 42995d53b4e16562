use crate::solve::ids::{ActionId, StateId};

/// One probabilistic outcome of taking an action in a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Probability of this outcome. All outcomes of a pair must sum to 1.
    pub probability: f64,
    /// State the process lands in.
    pub next: StateId,
    /// Reward collected on this transition.
    pub reward: f64,
    /// Whether `next` is terminal. Terminal continuations contribute no value.
    pub terminal: bool,
}

/// Read-only interface over a dense, fully-known tabular MDP.
///
/// The solvers only need:
/// - `state_count()` and `action_count()` for the sweep bounds
/// - `transitions(state, action)` for the outcome distribution of a pair
///
/// Implementations must be rectangular: every state exposes exactly
/// `action_count()` actions. The model is never mutated by any solver.
pub trait TabularModel {
    /// Return the number of states, `0..state_count()`.
    fn state_count(&self) -> usize;

    /// Return the number of actions available in every state.
    fn action_count(&self) -> usize;

    /// Return the outcome distribution for `(state, action)`.
    /// Out-of-range pairs must return an empty slice.
    fn transitions(&self, state: StateId, action: ActionId) -> &[Transition];
}
