use pc_emo::commands::overlay::OverlayOverrides;
use pc_emo::core::config::Config;
use pc_emo::core::expression::ExpressionPolicy;
use pc_emo::core::render::ViewMode;

#[test]
fn test_no_overrides_keeps_config() {
    let config = Config {
        view: ViewMode::Gauges,
        ..Default::default()
    };

    assert_eq!(OverlayOverrides::default().apply(config.clone()), config);
}

#[test]
fn test_overrides_replace_values() {
    let overrides = OverlayOverrides {
        view: Some(ViewMode::Gauges),
        policy: Some(ExpressionPolicy::CombinedSeverity),
        show_network: true,
        metric_interval_ms: Some(250),
        frame_interval_ms: Some(30),
    };

    let config = overrides.apply(Config::default());
    assert_eq!(config.view, ViewMode::Gauges);
    assert_eq!(config.policy, ExpressionPolicy::CombinedSeverity);
    assert!(config.show_network);
    assert_eq!(config.metric_interval_ms, 250);
    assert_eq!(config.frame_interval_ms, 30);
}

#[test]
fn test_overrides_are_clamped() {
    let overrides = OverlayOverrides {
        metric_interval_ms: Some(1),
        ..Default::default()
    };

    assert_eq!(overrides.apply(Config::default()).metric_interval_ms, 100);
}

#[test]
fn test_network_flag_never_disables() {
    let config = Config {
        show_network: true,
        ..Default::default()
    };

    assert!(OverlayOverrides::default().apply(config).show_network);
}
