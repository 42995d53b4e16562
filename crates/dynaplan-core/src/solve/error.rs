use std::fmt;

use crate::solve::ids::{ActionId, StateId};

/// Error type for solver parameter checks and sweep execution.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Discount factor outside `[0, 1]` or not finite.
    InvalidGamma { value: f64 },
    /// Convergence threshold not finite or not strictly positive.
    InvalidTheta { value: f64 },
    /// Policy length does not match the model's state count.
    PolicyLength { expected: usize, actual: usize },
    /// Value function length does not match the model's state count.
    ValueLength { expected: usize, actual: usize },
    /// Policy selected an action outside `[0, action_count)`.
    ActionOutOfRange {
        state: StateId,
        action: ActionId,
        action_count: usize,
    },
    /// A transition referenced a next state outside `[0, state_count)`.
    NextStateOutOfRange {
        state: StateId,
        action: ActionId,
        next: StateId,
        state_count: usize,
    },
    /// A state-action pair exposed an empty outcome distribution.
    EmptyTransitions { state: StateId, action: ActionId },
    /// The model exposes states but no actions to choose between.
    NoActions,
    /// Fixed-point iteration hit the sweep cap with the residual still at or
    /// above theta.
    DidNotConverge { sweeps: usize, residual: f64 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidGamma { value } => {
                write!(f, "gamma must be finite and within [0, 1], got {value}")
            }
            SolveError::InvalidTheta { value } => {
                write!(f, "theta must be finite and strictly positive, got {value}")
            }
            SolveError::PolicyLength { expected, actual } => {
                write!(f, "policy covers {actual} states but model has {expected}")
            }
            SolveError::ValueLength { expected, actual } => write!(
                f,
                "value function covers {actual} states but model has {expected}"
            ),
            SolveError::ActionOutOfRange {
                state,
                action,
                action_count,
            } => write!(
                f,
                "action {} is out of range for state {} with {} actions",
                action.index(),
                state.index(),
                action_count
            ),
            SolveError::NextStateOutOfRange {
                state,
                action,
                next,
                state_count,
            } => write!(
                f,
                "transition for state {} action {} references next state {} but model has {} states",
                state.index(),
                action.index(),
                next.index(),
                state_count
            ),
            SolveError::EmptyTransitions { state, action } => write!(
                f,
                "state {} action {} has no outcomes",
                state.index(),
                action.index()
            ),
            SolveError::NoActions => write!(f, "model exposes no actions"),
            SolveError::DidNotConverge { sweeps, residual } => write!(
                f,
                "did not converge after {sweeps} sweeps, residual {residual}"
            ),
        }
    }
}

impl std::error::Error for SolveError {}
