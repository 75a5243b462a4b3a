//! Tests for router configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = RouterConfig::default();
    assert_eq!(config.stop_boundary, None);
    assert!(!config.type_hint_routing);
    assert!(!config.declared_key_routing);
    assert!(config.broadcast_leftovers);
    assert!(config.backfill_missing);
    assert!(!config.direct_fallback);
    assert_eq!(config.log.level, "info");
    assert!(config.log.categories.is_empty());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        stop_boundary = "Mixin"
        declared_key_routing = true
        broadcast_leftovers = false
        direct_fallback = true

        [log]
        level = "warn"
        categories = ["backfill"]
    "#;

    let config = RouterConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.stop_boundary.as_deref(), Some("Mixin"));
    assert!(config.declared_key_routing);
    assert!(!config.broadcast_leftovers);
    assert!(config.backfill_missing);
    assert!(config.direct_fallback);
    assert_eq!(config.log.level, "warn");
    assert!(config.log.allows("backfill"));
    assert!(!config.log.allows("split"));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        type_hint_routing: true
        debug_prints: true
        log:
          level: error
    "#;

    let config = RouterConfig::from_yaml_str(yaml).unwrap();
    assert!(config.type_hint_routing);
    assert!(config.debug_prints);
    assert_eq!(config.effective_log_level(), "debug");
}

#[test]
fn test_empty_toml_is_default() {
    let config = RouterConfig::from_toml_str("").unwrap();
    assert_eq!(config, RouterConfig::default());
}

#[test]
fn test_invalid_log_level() {
    let err = RouterConfig::from_toml_str("[log]\nlevel = \"loud\"").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_empty_stop_boundary_rejected() {
    let err = RouterConfig::from_yaml_str("stop_boundary: \"\"").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_missing_file() {
    let err = RouterConfig::load("/nonexistent/splitinit.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = RouterConfig::new()
        .with_stop_boundary("Base")
        .with_type_hint_routing(true)
        .with_backfill_missing(false)
        .with_log(LogConfig::new("debug").with_category("chain"));

    assert_eq!(config.stop_boundary.as_deref(), Some("Base"));
    assert!(config.type_hint_routing);
    assert!(!config.backfill_missing);
    assert!(config.log.allows("chain"));
    assert!(config.validate().is_ok());
}
