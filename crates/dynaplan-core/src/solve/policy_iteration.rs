use crate::solve::backup::improve_policy;
use crate::solve::config::SolveConfig;
use crate::solve::error::SolveError;
use crate::solve::evaluate::evaluate_policy_counted;
use crate::solve::ids::{ActionId, StateId};
use crate::solve::model::TabularModel;
use crate::solve::policy::{Policy, ValueFunction};

/// Per-round metrics emitted by policy iteration.
#[derive(Debug, Clone, Copy)]
pub struct RoundMetrics {
    /// 1-based improvement round.
    pub round: usize,
    /// Evaluation sweeps spent on this round's policy.
    pub evaluation_sweeps: usize,
    /// States where the improved policy disagrees with the evaluated one.
    pub changed_states: usize,
}

/// Result of a complete policy iteration run.
#[derive(Debug, Clone)]
pub struct PolicyIterationReport {
    /// The converged (optimal) policy.
    pub policy: Policy,
    /// Value function of the final evaluated policy.
    pub values: ValueFunction,
    /// Improvement rounds until the policy stabilized.
    pub rounds: usize,
    /// Total evaluation sweeps across all rounds.
    pub evaluation_sweeps: usize,
}

/// Run policy iteration with an injected initial-action source.
///
/// `init` is called once per state with the action count and supplies the
/// arbitrary starting policy. The choice only affects the convergence path,
/// not the converged result, so callers wanting reproducible traces inject a
/// seeded source here.
pub fn policy_iteration_with<M, FInit>(
    model: &M,
    config: &SolveConfig,
    init: FInit,
) -> Result<PolicyIterationReport, SolveError>
where
    M: TabularModel,
    FInit: FnMut(StateId, usize) -> ActionId,
{
    policy_iteration_with_hook(model, config, init, |_| {})
}

/// Run policy iteration and invoke a callback after each improvement round.
pub fn policy_iteration_with_hook<M, FInit, FHook>(
    model: &M,
    config: &SolveConfig,
    mut init: FInit,
    mut on_round: FHook,
) -> Result<PolicyIterationReport, SolveError>
where
    M: TabularModel,
    FInit: FnMut(StateId, usize) -> ActionId,
    FHook: FnMut(&RoundMetrics),
{
    config.validate()?;

    let state_count = model.state_count();
    let action_count = model.action_count();
    if state_count > 0 && action_count == 0 {
        return Err(SolveError::NoActions);
    }

    let mut actions = Vec::with_capacity(state_count);
    for state_idx in 0..state_count {
        let state = StateId::from(state_idx);
        let action = init(state, action_count);
        if action.index() >= action_count {
            return Err(SolveError::ActionOutOfRange {
                state,
                action,
                action_count,
            });
        }
        actions.push(action);
    }
    let mut policy = Policy::from_actions(actions);

    let mut rounds = 0usize;
    let mut total_sweeps = 0usize;

    // Evaluate, improve, and stop once improvement returns the same policy.
    // Termination is guaranteed on convergent evaluations: the number of
    // deterministic policies is finite and no improving step revisits one.
    loop {
        let (values, sweeps) = evaluate_policy_counted(model, &policy, config)?;
        total_sweeps += sweeps;

        let candidate = improve_policy(model, &values, config.gamma)?;
        rounds += 1;

        let changed_states = candidate.disagreements(&policy);
        on_round(&RoundMetrics {
            round: rounds,
            evaluation_sweeps: sweeps,
            changed_states,
        });

        if candidate == policy {
            return Ok(PolicyIterationReport {
                policy: candidate,
                values,
                rounds,
                evaluation_sweeps: total_sweeps,
            });
        }

        policy = candidate;
    }
}
