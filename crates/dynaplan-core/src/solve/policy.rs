use crate::solve::ids::{ActionId, StateId};

/// Deterministic policy: one action per state, indexed by state.
/// Improvement steps replace the whole policy rather than mutating it, so
/// equality comparison against the previous round is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    actions: Vec<ActionId>,
}

impl Policy {
    /// Build a policy from one action per state.
    pub fn from_actions(actions: Vec<ActionId>) -> Self {
        Policy { actions }
    }

    /// Return the action selected in `state`.
    pub fn action(&self, state: StateId) -> Option<ActionId> {
        self.actions.get(state.index()).copied()
    }

    /// Return all selected actions, indexed by state.
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    /// Return how many states the policy covers.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Count states where `self` and `other` disagree.
    pub fn disagreements(&self, other: &Policy) -> usize {
        self.actions
            .iter()
            .zip(other.actions.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl From<Vec<usize>> for Policy {
    fn from(actions: Vec<usize>) -> Self {
        Policy {
            actions: actions.into_iter().map(ActionId::from).collect(),
        }
    }
}

/// State-indexed expected discounted returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFunction {
    values: Vec<f64>,
}

impl ValueFunction {
    /// Return the all-zero value function over `state_count` states.
    pub fn zeros(state_count: usize) -> Self {
        ValueFunction {
            values: vec![0.0; state_count],
        }
    }

    /// Build a value function from one value per state.
    pub fn from_values(values: Vec<f64>) -> Self {
        ValueFunction { values }
    }

    /// Return the value of `state`.
    pub fn value(&self, state: StateId) -> Option<f64> {
        self.values.get(state.index()).copied()
    }

    /// Return all values, indexed by state.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Maximum absolute per-state difference against `other`.
    /// This is the residual the fixed-point loops compare with theta.
    pub fn max_abs_diff(&self, other: &ValueFunction) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// Dense `(state, action)` action-value table produced by one Bellman backup.
/// Recomputed from scratch every sweep, never updated incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    action_count: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Return an all-zero table of shape `(state_count, action_count)`.
    pub fn zeros(state_count: usize, action_count: usize) -> Self {
        QTable {
            action_count,
            values: vec![0.0; state_count * action_count],
        }
    }

    /// Return the number of state rows.
    pub fn state_count(&self) -> usize {
        if self.action_count == 0 {
            0
        } else {
            self.values.len() / self.action_count
        }
    }

    /// Return the number of action columns.
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Return the entry for `(state, action)`.
    pub fn get(&self, state: StateId, action: ActionId) -> Option<f64> {
        if action.index() >= self.action_count {
            return None;
        }
        self.values
            .get(state.index() * self.action_count + action.index())
            .copied()
    }

    /// Return the action row of `state`.
    pub fn row(&self, state: StateId) -> Option<&[f64]> {
        let start = state.index().checked_mul(self.action_count)?;
        self.values.get(start..start + self.action_count)
    }

    pub(crate) fn set(&mut self, state: StateId, action: ActionId, value: f64) {
        self.values[state.index() * self.action_count + action.index()] = value;
    }

    /// Greedy action for `state`: first-max scan, so ties resolve to the
    /// lowest action index.
    pub fn greedy_action(&self, state: StateId) -> Option<ActionId> {
        let row = self.row(state)?;
        let mut best: Option<(usize, f64)> = None;
        for (idx, value) in row.iter().copied().enumerate() {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((idx, value)),
            }
        }
        best.map(|(idx, _)| ActionId::from(idx))
    }

    /// Maximum entry in the action row of `state`.
    pub fn row_max(&self, state: StateId) -> Option<f64> {
        let row = self.row(state)?;
        row.iter().copied().reduce(f64::max)
    }
}
