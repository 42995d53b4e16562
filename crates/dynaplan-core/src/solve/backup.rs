use crate::solve::error::SolveError;
use crate::solve::ids::{ActionId, StateId};
use crate::solve::model::TabularModel;
use crate::solve::policy::{Policy, QTable, ValueFunction};

/// Apply the one-step Bellman backup to every `(state, action)` pair.
///
/// `Q[s][a] = sum over outcomes of p * (r + gamma * V[next])`, with the
/// continuation zeroed on transitions into terminal states. A single full
/// sweep with no iteration and no convergence check.
pub fn action_values<M: TabularModel>(
    model: &M,
    values: &ValueFunction,
    gamma: f64,
) -> Result<QTable, SolveError> {
    check_gamma(gamma)?;

    let state_count = model.state_count();
    let action_count = model.action_count();

    if values.len() != state_count {
        return Err(SolveError::ValueLength {
            expected: state_count,
            actual: values.len(),
        });
    }

    if state_count > 0 && action_count == 0 {
        return Err(SolveError::NoActions);
    }

    let mut q = QTable::zeros(state_count, action_count);
    for state_idx in 0..state_count {
        let state = StateId::from(state_idx);
        for action_idx in 0..action_count {
            let action = ActionId::from(action_idx);
            let backup = pair_backup(model, values, state, action, gamma)?;
            q.set(state, action, backup);
        }
    }

    Ok(q)
}

/// Derive the greedy policy for `values`: compute the action-value table and
/// pick the maximizing action per state, lowest index winning ties.
pub fn improve_policy<M: TabularModel>(
    model: &M,
    values: &ValueFunction,
    gamma: f64,
) -> Result<Policy, SolveError> {
    let q = action_values(model, values, gamma)?;
    Ok(greedy_policy(&q))
}

/// Greedy argmax over every row of a fully-populated action-value table.
pub(crate) fn greedy_policy(q: &QTable) -> Policy {
    let actions = (0..q.state_count())
        .map(|state_idx| {
            q.greedy_action(StateId::from(state_idx))
                .unwrap_or_else(|| ActionId::from(0))
        })
        .collect();
    Policy::from_actions(actions)
}

/// Expected one-step return of `(state, action)` against `values`.
pub(crate) fn pair_backup<M: TabularModel>(
    model: &M,
    values: &ValueFunction,
    state: StateId,
    action: ActionId,
    gamma: f64,
) -> Result<f64, SolveError> {
    let transitions = model.transitions(state, action);
    if transitions.is_empty() {
        return Err(SolveError::EmptyTransitions { state, action });
    }

    let state_count = model.state_count();
    let mut total = 0.0;
    for transition in transitions {
        let next_value = values.value(transition.next).ok_or({
            SolveError::NextStateOutOfRange {
                state,
                action,
                next: transition.next,
                state_count,
            }
        })?;

        let continuation = if transition.terminal {
            0.0
        } else {
            gamma * next_value
        };
        total += transition.probability * (transition.reward + continuation);
    }

    Ok(total)
}

pub(crate) fn check_gamma(gamma: f64) -> Result<(), SolveError> {
    if !gamma.is_finite() || !(0.0..=1.0).contains(&gamma) {
        return Err(SolveError::InvalidGamma { value: gamma });
    }
    Ok(())
}
