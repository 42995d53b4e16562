use dynaplan_core::{ActionId, SolveConfig, StateId, TabularModel};
use dynaplan_mdp::{MdpBuilder, MdpError, MdpSolver, MdpSpec};

const WALK_MDP_YAML: &str = r#"
version: 1
states:
  - id: hole
    terminal: true
  - id: s1
    actions:
      - id: left
        outcomes:
          - next: hole
            prob: 0.8
            reward: 0.0
          - next: s2
            prob: 0.2
            reward: 0.0
      - id: right
        outcomes:
          - next: s2
            prob: 0.8
            reward: 0.0
          - next: hole
            prob: 0.2
            reward: 0.0
  - id: s2
    actions:
      - id: left
        outcomes:
          - next: s1
            prob: 0.8
            reward: 0.0
          - next: s3
            prob: 0.2
            reward: 0.0
      - id: right
        outcomes:
          - next: s3
            prob: 0.8
            reward: 0.0
          - next: s1
            prob: 0.2
            reward: 0.0
  - id: s3
    actions:
      - id: left
        outcomes:
          - next: s2
            prob: 0.8
            reward: 0.0
          - next: goal
            prob: 0.2
            reward: 1.0
      - id: right
        outcomes:
          - next: goal
            prob: 0.8
            reward: 1.0
          - next: s2
            prob: 0.2
            reward: 0.0
  - id: goal
    terminal: true
"#;

#[test]
fn yaml_parse_and_compile_success() {
    let spec: MdpSpec = serde_yaml::from_str(WALK_MDP_YAML).expect("valid yaml");
    let compiled = spec.compile().expect("compile should succeed");

    assert_eq!(compiled.state_count(), 5);
    assert_eq!(compiled.action_count(), 2);
    assert_eq!(compiled.state_id(StateId::from(0)), Some("hole"));
    assert_eq!(compiled.state_key("goal"), Some(StateId::from(4)));
    assert_eq!(compiled.is_terminal(StateId::from(4)), Some(true));
    assert_eq!(compiled.is_terminal(StateId::from(2)), Some(false));
}

#[test]
fn terminal_states_compile_to_absorbing_self_loops() {
    let spec: MdpSpec = serde_yaml::from_str(WALK_MDP_YAML).expect("valid yaml");
    let compiled = spec.compile().expect("compile should succeed");

    for action in 0..compiled.action_count() {
        let transitions = compiled.transitions(StateId::from(0), ActionId::from(action));
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].next, StateId::from(0));
        assert_eq!(transitions[0].probability, 1.0);
        assert!(transitions[0].terminal);
    }
}

#[test]
fn validation_fails_for_probability_sum() {
    let yaml = r#"
states:
  - id: s0
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 0.5
            reward: 1.0
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, MdpError::ProbabilitySum { .. }));
}

#[test]
fn validation_fails_for_unknown_state_reference() {
    let yaml = r#"
states:
  - id: s0
    actions:
      - id: a0
        outcomes:
          - next: missing
            prob: 1.0
            reward: 1.0
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, MdpError::UnknownNextState { .. }));
}

#[test]
fn validation_fails_for_ragged_action_counts() {
    let yaml = r#"
states:
  - id: s0
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 1.0
            reward: 0.0
      - id: a1
        outcomes:
          - next: s1
            prob: 1.0
            reward: 0.0
  - id: s1
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 1.0
            reward: 0.0
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(
        err,
        MdpError::RaggedActions {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn validation_fails_for_terminal_state_with_actions() {
    let yaml = r#"
states:
  - id: s0
    terminal: true
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 1.0
            reward: 0.0
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, MdpError::TerminalStateHasActions { .. }));
}

fn build_walk() -> MdpBuilder {
    let mut builder = MdpBuilder::new();
    builder.add_state("hole", true);
    for state in ["s1", "s2", "s3"] {
        builder.add_state(state, false);
    }
    builder.add_state("goal", true);

    let neighbors = [("s1", "hole", "s2"), ("s2", "s1", "s3"), ("s3", "s2", "goal")];
    for (state, left, right) in neighbors {
        let reward = |next: &str| if next == "goal" { 1.0 } else { 0.0 };
        builder
            .add_action(state, "left")
            .expect("state exists")
            .add_outcome(state, "left", left, 0.8, reward(left))
            .expect("action exists")
            .add_outcome(state, "left", right, 0.2, reward(right))
            .expect("action exists")
            .add_action(state, "right")
            .expect("state exists")
            .add_outcome(state, "right", right, 0.8, reward(right))
            .expect("action exists")
            .add_outcome(state, "right", left, 0.2, reward(left))
            .expect("action exists");
    }

    builder
}

#[test]
fn builder_walk_solves_to_known_policy_and_values() {
    let compiled = build_walk().compile().expect("compile should succeed");
    let config = SolveConfig::default();

    let mut solver = MdpSolver::new(compiled, 42);
    let report = solver
        .policy_iteration(&config)
        .expect("policy iteration should converge");

    let expected_policy: Vec<ActionId> =
        vec![0, 1, 1, 1, 0].into_iter().map(ActionId::from).collect();
    assert_eq!(report.policy.actions(), expected_policy.as_slice());

    let expected_values = [0.0, 64.0 / 85.0, 16.0 / 17.0, 84.0 / 85.0, 0.0];
    for (actual, expected) in report.values.as_slice().iter().zip(expected_values.iter()) {
        assert!((actual - expected).abs() < 1e-6);
    }
}

#[test]
fn policy_and_value_iteration_agree_on_the_walk() {
    let compiled = build_walk().compile().expect("compile should succeed");
    let config = SolveConfig::default();

    let mut solver = MdpSolver::new(compiled, 7);
    let pi = solver
        .policy_iteration(&config)
        .expect("policy iteration should converge");
    let vi = solver
        .value_iteration(&config)
        .expect("value iteration should converge");

    assert_eq!(pi.policy, vi.policy);
    assert!(pi.values.max_abs_diff(&vi.values) < 1e-6);
}

#[test]
fn seeded_solver_runs_are_reproducible() {
    let compiled = build_walk().compile().expect("compile should succeed");
    let config = SolveConfig::default();

    let mut solver_a = MdpSolver::new(compiled.clone(), 42);
    let mut solver_b = MdpSolver::new(compiled, 42);

    let report_a = solver_a
        .policy_iteration(&config)
        .expect("policy iteration should converge");
    let report_b = solver_b
        .policy_iteration(&config)
        .expect("policy iteration should converge");

    assert_eq!(report_a.policy, report_b.policy);
    assert_eq!(report_a.rounds, report_b.rounds);
    assert_eq!(report_a.evaluation_sweeps, report_b.evaluation_sweeps);
}

#[test]
fn spec_yaml_round_trip_preserves_the_model() {
    let spec = build_walk().build_spec().expect("spec should validate");

    let yaml = spec.to_yaml_string().expect("serialize should succeed");
    let parsed = MdpSpec::from_yaml_str(&yaml).expect("parse should succeed");
    let compiled = parsed.compile().expect("compile should succeed");

    assert_eq!(compiled.state_count(), 5);
    assert_eq!(compiled.action_count(), 2);
}

#[test]
fn spec_file_round_trip_compiles_from_disk() {
    let spec = build_walk().build_spec().expect("spec should validate");

    let path = std::env::temp_dir().join(format!("dynaplan-walk-{}.mdp.yaml", std::process::id()));
    spec.to_yaml_file(&path).expect("write should succeed");

    let reloaded = MdpSpec::from_yaml_path(&path).expect("read should succeed");
    assert_eq!(reloaded.states.len(), spec.states.len());

    let compiled = dynaplan_mdp::compile_yaml(&path).expect("compile should succeed");
    assert_eq!(compiled.state_count(), 5);
    assert_eq!(compiled.action_count(), 2);

    std::fs::remove_file(&path).expect("cleanup should succeed");
}

#[test]
fn builder_rejects_unknown_states_and_actions() {
    let mut builder = MdpBuilder::new();
    builder.add_state("s0", false);

    let err = builder
        .add_action("missing", "a0")
        .expect_err("unknown state should fail");
    assert!(matches!(err, MdpError::BuilderUnknownState { .. }));

    builder.add_action("s0", "a0").expect("state exists");
    let err = builder
        .add_outcome("s0", "missing", "s0", 1.0, 0.0)
        .expect_err("unknown action should fail");
    assert!(matches!(err, MdpError::BuilderUnknownAction { .. }));
}
