use crate::solve::backup::{action_values, greedy_policy};
use crate::solve::config::SolveConfig;
use crate::solve::error::SolveError;
use crate::solve::ids::StateId;
use crate::solve::model::TabularModel;
use crate::solve::policy::{Policy, ValueFunction};

/// Result of a complete value iteration run.
#[derive(Debug, Clone)]
pub struct ValueIterationReport {
    /// Greedy policy over the final sweep's action-value table.
    pub policy: Policy,
    /// Value function produced by the final sweep.
    pub values: ValueFunction,
    /// Optimality sweeps until convergence.
    pub sweeps: usize,
    /// Residual of the final sweep.
    pub residual: f64,
}

/// Compute the optimal value function by iterating the Bellman optimality
/// backup from all zeros, then derive the greedy policy once at termination.
///
/// The returned policy comes from the action-value table of the final sweep,
/// the same table that produced the returned values.
pub fn value_iteration<M: TabularModel>(
    model: &M,
    config: &SolveConfig,
) -> Result<ValueIterationReport, SolveError> {
    config.validate()?;

    let state_count = model.state_count();
    if state_count > 0 && model.action_count() == 0 {
        return Err(SolveError::NoActions);
    }

    let mut values = ValueFunction::zeros(state_count);
    let mut sweeps = 0usize;

    loop {
        let q = action_values(model, &values, config.gamma)?;

        let new_values = ValueFunction::from_values(
            (0..state_count)
                .map(|state_idx| q.row_max(StateId::from(state_idx)).unwrap_or(0.0))
                .collect(),
        );
        sweeps += 1;

        let residual = new_values.max_abs_diff(&values);
        if residual < config.theta {
            let policy = greedy_policy(&q);
            return Ok(ValueIterationReport {
                policy,
                values: new_values,
                sweeps,
                residual,
            });
        }
        if config.cap_reached(sweeps) {
            return Err(SolveError::DidNotConverge { sweeps, residual });
        }

        values = new_values;
    }
}
