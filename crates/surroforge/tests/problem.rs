//! Problem wiring over the shared fixtures.

use std::collections::HashMap;

use surroforge::prelude::*;
use surroforge::ConfigError;
use surroforge_test::feature::continuous;
use surroforge_test::scenario::two_model_scenario;

const CONFIG: &str = r#"
    [validation]
    tolerance = 1e-3

    [[constraints]]
    type = "linear_inequality"
    features = ["f1", "f3"]
    coefficients = [1.0, 1.0]
    rhs = 1.0

    [[constraints]]
    type = "interpoint_equality"
    feature = "f1"
    multiplicity = 2
"#;

#[test]
fn test_problem_from_config() {
    let scenario = two_model_scenario();
    let ensemble = scenario.compose().unwrap();
    let config = ProblemConfig::from_toml_str(CONFIG).unwrap();

    let problem =
        Problem::from_config(scenario.inputs, scenario.outputs, ensemble, &config).unwrap();
    assert_eq!(problem.constraints().len(), 2);
    assert_eq!(problem.tolerance(), 1e-3);

    let mut candidate = HashMap::new();
    candidate.insert("f1".to_string(), 0.4);
    candidate.insert("f3".to_string(), 0.6005);
    assert!(problem.is_feasible(&candidate).unwrap());

    candidate.insert("f3".to_string(), 0.7);
    assert!(!problem.is_feasible(&candidate).unwrap());
}

#[test]
fn test_problem_rejects_orphan_input() {
    let scenario = two_model_scenario().with_extra_input(continuous("f4", 0.0, 1.0));
    let ensemble = scenario.compose().unwrap();

    let err = Problem::try_new(
        scenario.inputs,
        scenario.outputs,
        ensemble,
        Constraints::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::UnusedInput);
}

#[test]
fn test_problem_rejects_constraint_on_unknown_feature() {
    let scenario = two_model_scenario();
    let ensemble = scenario.compose().unwrap();
    let constraints = Constraints::new(vec![Constraint::n_choose_k(
        vec!["f1".into(), "f9".into()],
        0,
        1,
        true,
    )
    .unwrap()]);

    let err = Problem::try_new(scenario.inputs, scenario.outputs, ensemble, constraints)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownConstraintFeature {
            constraint: 0,
            key: "f9".into(),
        }
    );
}

#[test]
fn test_problem_from_invalid_config() {
    let scenario = two_model_scenario();
    let ensemble = scenario.compose().unwrap();
    let config = ProblemConfig::from_toml_str(
        r#"
        [[constraints]]
        type = "n_choose_k"
        features = ["f1", "f3"]
        min_count = 2
        max_count = 1
        "#,
    )
    .unwrap();

    let err = Problem::from_config(scenario.inputs, scenario.outputs, ensemble, &config)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Constraint { index: 0, .. }));
}
