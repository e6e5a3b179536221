use crate::config::SimulationConfig;
use crate::error::OrbitError;

#[test]
fn test_defaults() {
    let config = SimulationConfig::default();
    assert_eq!(config.gravitational_constant, 0.1);
    assert_eq!(config.physics_time_step, 0.01);
    assert_eq!(config.tracer_time_step, 0.5);
    assert_eq!(config.max_prediction_steps, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_gives_defaults() {
    let config = SimulationConfig::from_toml_str("").unwrap();
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_partial_toml_overrides() {
    let config = SimulationConfig::from_toml_str(
        r#"
        gravitational_constant = 1.0
        max_prediction_steps = 50
        "#,
    )
    .unwrap();

    assert_eq!(config.gravitational_constant, 1.0);
    assert_eq!(config.max_prediction_steps, 50);
    assert_eq!(config.physics_time_step, 0.01);
}

#[test]
fn test_defaults_survive_toml_round_trip() {
    let text = toml::to_string(&SimulationConfig::default()).unwrap();
    let parsed = SimulationConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, SimulationConfig::default());
}

#[test]
fn test_rejects_non_positive_constants() {
    let result = SimulationConfig::from_toml_str("physics_time_step = 0.0");
    assert!(matches!(
        result,
        Err(OrbitError::InvalidConstant {
            name: "physics_time_step",
            ..
        })
    ));

    let config = SimulationConfig {
        gravitational_constant: -1.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = SimulationConfig {
        max_prediction_steps: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_toml() {
    let result = SimulationConfig::from_toml_str("tracer_time_step = \"fast\"");
    assert!(matches!(result, Err(OrbitError::Config(_))));
}
