use std::path::PathBuf;
use std::time::Instant;

use dynaplan_core::{SolveConfig, StateId, TabularModel};
use dynaplan_mdp::{MdpSolver, compile_yaml};

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/dynaplan-mdp/examples/slippery_walk.mdp.yaml"));

    let compiled = compile_yaml(&path).expect("failed to compile MDP YAML");
    let config = SolveConfig::default();

    let mut solver = MdpSolver::new(compiled, 12345);

    let started = Instant::now();
    let pi = solver
        .policy_iteration(&config)
        .expect("policy iteration failed");
    let pi_elapsed = started.elapsed();

    let started = Instant::now();
    let vi = solver
        .value_iteration(&config)
        .expect("value iteration failed");
    let vi_elapsed = started.elapsed();

    println!(
        "policy iteration: rounds={} sweeps={} elapsed={pi_elapsed:?}",
        pi.rounds, pi.evaluation_sweeps
    );
    println!("value iteration:  sweeps={} elapsed={vi_elapsed:?}", vi.sweeps);
    println!();

    let mdp = solver.mdp();
    for state_idx in 0..mdp.state_count() {
        let state = StateId::from(state_idx);
        let id = mdp.state_id(state).unwrap_or("?");
        let action = vi.policy.action(state).map(|a| a.index()).unwrap_or(0);
        let value = vi.values.value(state).unwrap_or(0.0);
        println!("{id:>6}: action={action} value={value:.6}");
    }

    let agreement = pi.values.max_abs_diff(&vi.values);
    println!();
    println!("max value disagreement between algorithms: {agreement:.2e}");
}
