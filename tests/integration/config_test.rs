use pc_emo::core::config::{Config, Position};
use pc_emo::core::expression::ExpressionPolicy;
use pc_emo::core::render::ViewMode;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.position, Position { x: 100, y: 100 });
    assert_eq!(config.view, ViewMode::Face);
    assert_eq!(config.policy, ExpressionPolicy::AxisPriority);
    assert!(!config.show_network);
}

#[test]
fn test_config_load_missing_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config {
        view: ViewMode::Gauges,
        policy: ExpressionPolicy::CombinedSeverity,
        show_network: true,
        metric_interval_ms: 2000,
        ..Default::default()
    };
    config.set_position(12, 7);
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, b"").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_corrupt_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, b"{ not json").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_load_clamps_intervals() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, br#"{"metric_interval_ms": 1, "frame_interval_ms": 1}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.metric_interval_ms, 100);
    assert_eq!(config.frame_interval_ms, 10);
}
