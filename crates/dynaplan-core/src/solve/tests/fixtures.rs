use crate::solve::ids::{ActionId, StateId};
use crate::solve::model::{TabularModel, Transition};

/// Dense in-memory model backing the unit tests.
#[derive(Debug, Clone)]
pub struct TableModel {
    action_count: usize,
    transitions: Vec<Vec<Vec<Transition>>>,
}

impl TableModel {
    pub fn new(transitions: Vec<Vec<Vec<Transition>>>) -> Self {
        let action_count = transitions.first().map(|actions| actions.len()).unwrap_or(0);
        TableModel {
            action_count,
            transitions,
        }
    }
}

impl TabularModel for TableModel {
    fn state_count(&self) -> usize {
        self.transitions.len()
    }

    fn action_count(&self) -> usize {
        self.action_count
    }

    fn transitions(&self, state: StateId, action: ActionId) -> &[Transition] {
        self.transitions
            .get(state.index())
            .and_then(|actions| actions.get(action.index()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub fn transition(probability: f64, next: usize, reward: f64, terminal: bool) -> Transition {
    Transition {
        probability,
        next: StateId::from(next),
        reward,
        terminal,
    }
}

/// Five-state walk with terminal edges at states 0 and 4. Interior moves go
/// the intended way with probability 0.8 and slip backwards with 0.2;
/// entering state 4 pays reward 1, everything else pays 0.
///
/// Optimal policy is "right" (action 1) in every interior state with values
/// `[0, 64/85, 16/17, 84/85, 0]`.
pub fn slippery_walk() -> TableModel {
    let absorbing = |state: usize| {
        vec![
            vec![transition(1.0, state, 0.0, true)],
            vec![transition(1.0, state, 0.0, true)],
        ]
    };

    let interior = |state: usize| {
        let left = state - 1;
        let right = state + 1;
        let reward = |next: usize| if next == 4 { 1.0 } else { 0.0 };
        let edge = |next: usize| next == 0 || next == 4;
        vec![
            // action 0: left
            vec![
                transition(0.8, left, reward(left), edge(left)),
                transition(0.2, right, reward(right), edge(right)),
            ],
            // action 1: right
            vec![
                transition(0.8, right, reward(right), edge(right)),
                transition(0.2, left, reward(left), edge(left)),
            ],
        ]
    };

    TableModel::new(vec![
        absorbing(0),
        interior(1),
        interior(2),
        interior(3),
        absorbing(4),
    ])
}

/// Expected optimal values of `slippery_walk` under gamma 1.
pub fn slippery_walk_optimal_values() -> [f64; 5] {
    [0.0, 64.0 / 85.0, 16.0 / 17.0, 84.0 / 85.0, 0.0]
}

/// One absorbing terminal state with a single self-loop action.
pub fn single_absorbing() -> TableModel {
    TableModel::new(vec![vec![vec![transition(1.0, 0, 0.0, true)]]])
}

/// Two states that deterministically swap forever, paying 1 per step.
/// Never terminates, so evaluation under gamma 1 cannot converge.
pub fn endless_swap() -> TableModel {
    TableModel::new(vec![
        vec![vec![transition(1.0, 1, 1.0, false)]],
        vec![vec![transition(1.0, 0, 1.0, false)]],
    ])
}
