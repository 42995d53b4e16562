use std::collections::HashMap;

use dynaplan_core::{ActionId, StateId, TabularModel, Transition};

use crate::{MdpError, MdpSpec};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
/// Runtime form of an MDP with resolved state references and a rectangular
/// transition table ready for the dynamic-programming solvers.
pub struct CompiledMdp {
    action_count: usize,
    states: Vec<StateRec>,
    state_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateId>,
}

#[derive(Debug, Clone)]
struct StateRec {
    terminal: bool,
    actions: Vec<Vec<Transition>>,
}

impl CompiledMdp {
    /// Compile and validate a spec into a fast runtime representation.
    ///
    /// Terminal states declare no actions in the schema; here they receive
    /// `action_count` absorbing self-loops so the compiled table stays
    /// rectangular and terminal states are absorbing under every action.
    pub(crate) fn from_spec(spec: &MdpSpec) -> Result<Self, MdpError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let mut state_id_to_key = HashMap::with_capacity(spec.states.len());
        let mut state_ids = Vec::with_capacity(spec.states.len());
        let mut terminal_flags = Vec::with_capacity(spec.states.len());

        for (idx, state) in spec.states.iter().enumerate() {
            let key = StateId::from(idx);
            state_id_to_key.insert(state.id.clone(), key);
            state_ids.push(state.id.clone());
            terminal_flags.push(state.terminal.unwrap_or(false));
        }

        let action_count = spec.declared_action_count();

        let mut states = Vec::with_capacity(spec.states.len());
        for (idx, state) in spec.states.iter().enumerate() {
            let terminal = terminal_flags[idx];

            if terminal {
                let self_loop = vec![Transition {
                    probability: 1.0,
                    next: StateId::from(idx),
                    reward: 0.0,
                    terminal: true,
                }];
                states.push(StateRec {
                    terminal,
                    actions: vec![self_loop; action_count],
                });
                continue;
            }

            let mut actions = Vec::with_capacity(action_count);
            for action in state.actions.as_deref().unwrap_or(&[]) {
                let mut transitions = Vec::with_capacity(action.outcomes.len());

                for outcome in &action.outcomes {
                    let next = state_id_to_key.get(&outcome.next).copied().ok_or_else(|| {
                        MdpError::UnknownNextState {
                            state: state.id.clone(),
                            action: action.id.clone(),
                            next: outcome.next.clone(),
                        }
                    })?;

                    transitions.push(Transition {
                        probability: outcome.prob,
                        next,
                        reward: outcome.reward,
                        terminal: terminal_flags[next.index()],
                    });
                }

                actions.push(transitions);
            }

            states.push(StateRec { terminal, actions });
        }

        Ok(Self {
            action_count,
            states,
            state_ids,
            state_id_to_key,
        })
    }

    /// Check whether a state is terminal.
    pub fn is_terminal(&self, key: StateId) -> Option<bool> {
        self.states.get(key.index()).map(|state| state.terminal)
    }

    /// Convert a state key back to its original string id.
    pub fn state_id(&self, key: StateId) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    /// Convert a string id into a compiled state key.
    pub fn state_key(&self, id: &str) -> Option<StateId> {
        self.state_id_to_key.get(id).copied()
    }
}

impl TabularModel for CompiledMdp {
    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn action_count(&self) -> usize {
        self.action_count
    }

    fn transitions(&self, state: StateId, action: ActionId) -> &[Transition] {
        self.states
            .get(state.index())
            .and_then(|rec| rec.actions.get(action.index()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
