/// Dense index of a state in a tabular model, `0..state_count`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Return the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    fn from(value: usize) -> Self {
        StateId(value)
    }
}

/// Dense index of an action within a state's action list, `0..action_count`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

impl ActionId {
    /// Return the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}
