mod solve;

pub use solve::backup::{action_values, improve_policy};
pub use solve::config::{SolveConfig, SolveConfigError};
pub use solve::error::SolveError;
pub use solve::evaluate::{evaluate_policy, expectation_sweep};
pub use solve::ids::{ActionId, StateId};
pub use solve::model::{TabularModel, Transition};
pub use solve::policy::{Policy, QTable, ValueFunction};
pub use solve::policy_iteration::{
    PolicyIterationReport, RoundMetrics, policy_iteration_with, policy_iteration_with_hook,
};
pub use solve::value_iteration::{ValueIterationReport, value_iteration};
