use crate::solve::backup::{check_gamma, pair_backup};
use crate::solve::config::SolveConfig;
use crate::solve::error::SolveError;
use crate::solve::ids::StateId;
use crate::solve::model::TabularModel;
use crate::solve::policy::{Policy, ValueFunction};

/// One synchronous Bellman expectation sweep over every state.
///
/// Every new value is computed against the previous `values` (Jacobi-style),
/// never against values already updated in the same sweep.
pub fn expectation_sweep<M: TabularModel>(
    model: &M,
    policy: &Policy,
    values: &ValueFunction,
    gamma: f64,
) -> Result<ValueFunction, SolveError> {
    check_gamma(gamma)?;

    let state_count = model.state_count();
    let action_count = model.action_count();

    if policy.len() != state_count {
        return Err(SolveError::PolicyLength {
            expected: state_count,
            actual: policy.len(),
        });
    }
    if values.len() != state_count {
        return Err(SolveError::ValueLength {
            expected: state_count,
            actual: values.len(),
        });
    }

    let mut new_values = Vec::with_capacity(state_count);
    for state_idx in 0..state_count {
        let state = StateId::from(state_idx);
        let action = policy.action(state).ok_or(SolveError::PolicyLength {
            expected: state_count,
            actual: policy.len(),
        })?;

        if action.index() >= action_count {
            return Err(SolveError::ActionOutOfRange {
                state,
                action,
                action_count,
            });
        }

        new_values.push(pair_backup(model, values, state, action, gamma)?);
    }

    Ok(ValueFunction::from_values(new_values))
}

/// Compute the value function of a fixed policy by iterating the expectation
/// sweep from all zeros until the residual drops strictly below theta.
///
/// With `max_sweeps` unset this loops forever on inputs that never converge,
/// such as `gamma = 1` under a policy that never reaches a terminal state.
pub fn evaluate_policy<M: TabularModel>(
    model: &M,
    policy: &Policy,
    config: &SolveConfig,
) -> Result<ValueFunction, SolveError> {
    evaluate_policy_counted(model, policy, config).map(|(values, _)| values)
}

/// Evaluation loop that also reports how many sweeps it ran.
pub(crate) fn evaluate_policy_counted<M: TabularModel>(
    model: &M,
    policy: &Policy,
    config: &SolveConfig,
) -> Result<(ValueFunction, usize), SolveError> {
    config.validate()?;

    let mut values = ValueFunction::zeros(model.state_count());
    let mut sweeps = 0usize;

    loop {
        let new_values = expectation_sweep(model, policy, &values, config.gamma)?;
        sweeps += 1;

        let residual = new_values.max_abs_diff(&values);
        if residual < config.theta {
            return Ok((new_values, sweeps));
        }
        if config.cap_reached(sweeps) {
            return Err(SolveError::DidNotConverge { sweeps, residual });
        }

        values = new_values;
    }
}
