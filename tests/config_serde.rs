//! Tests of loading configurations with serde.
#![cfg(feature = "serde")]

use segment_traffic::{GeneratorConfig, LightState, VehicleConfig};

#[test]
fn missing_fields_take_defaults() {
    let config: VehicleConfig =
        serde_json::from_str(r#"{ "path": [2, 0], "max_vel": 25.0 }"#).unwrap();
    assert_eq!(config.path, vec![2, 0]);
    assert_eq!(config.max_vel, 25.0);
    assert_eq!(config.min_gap, 4.0);
    assert_eq!(config.comf_dec, 4.61);
    assert!(config.validate().is_ok());
}

#[test]
fn generator_config() {
    let json = r#"{
        "vehicle_rate": 12.0,
        "vehicles": [[3, { "path": [0] }], [1, { "path": [1], "length": 10.0 }]],
        "seed": 5
    }"#;
    let config: GeneratorConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.vehicle_rate, 12.0);
    assert_eq!(config.vehicles.len(), 2);
    assert_eq!(config.vehicles[1].0, 1);
    assert_eq!(config.vehicles[1].1.length, 10.0);
    assert_eq!(config.seed, Some(5));

    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<GeneratorConfig>(&text).unwrap(), config);
}

#[test]
fn light_state_names() {
    assert_eq!(serde_json::to_string(&LightState::Red).unwrap(), r#""Red""#);
}
