use crate::{ActionSpec, CompiledMdp, MdpError, MdpSpec, OutcomeSpec, StateSpec};

#[derive(Debug, Clone, Default)]
/// Incrementally assembles an `MdpSpec` in code, deferring validation to
/// `build_spec` / `compile`.
pub struct MdpBuilder {
    states: Vec<StateSpec>,
}

impl MdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Terminal states take no actions and compile to
    /// absorbing self-loops.
    pub fn add_state(&mut self, id: impl Into<String>, terminal: bool) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into(),
            terminal: Some(terminal),
            actions: Some(Vec::new()),
        });
        self
    }

    /// Declare an action on a previously added state.
    pub fn add_action(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl Into<String>,
    ) -> Result<&mut Self, MdpError> {
        let state = self.state_mut(state_id.as_ref())?;
        state.actions.get_or_insert_with(Vec::new).push(ActionSpec {
            id: action_id.into(),
            outcomes: Vec::new(),
        });
        Ok(self)
    }

    /// Append one stochastic outcome to a previously declared action.
    pub fn add_outcome(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        next: impl Into<String>,
        prob: f64,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let state_id = state_id.as_ref();
        let action_id = action_id.as_ref();

        let state = self.state_mut(state_id)?;
        let action = state
            .actions
            .get_or_insert_with(Vec::new)
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| MdpError::BuilderUnknownAction {
                state: state_id.to_string(),
                action: action_id.to_string(),
            })?;

        action.outcomes.push(OutcomeSpec {
            next: next.into(),
            prob,
            reward,
        });

        Ok(self)
    }

    pub fn build_spec(self) -> Result<MdpSpec, MdpError> {
        let states = self
            .states
            .into_iter()
            .map(|state| {
                let StateSpec {
                    id,
                    terminal,
                    actions,
                } = state;
                // Terminal states keep `actions` unset so validation accepts them.
                let actions = actions.filter(|actions| !actions.is_empty());
                StateSpec {
                    id,
                    terminal,
                    actions,
                }
            })
            .collect();

        let spec = MdpSpec {
            version: Some(1),
            states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledMdp, MdpError> {
        self.build_spec()?.compile()
    }

    fn state_mut(&mut self, id: &str) -> Result<&mut StateSpec, MdpError> {
        self.states
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| MdpError::BuilderUnknownState {
                state: id.to_string(),
            })
    }
}
