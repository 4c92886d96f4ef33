use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.browser.endpoint, "http://localhost:9222");
    assert!(config.browser.target_url_contains.is_none());
    assert_eq!(config.profile.path, "data.json");
    assert_eq!(config.logging.level, "info");
    assert!(!config.actuator.dropdown_fallback);
    assert!(config.resolver.extra_keywords.is_empty());
}

#[test]
fn test_timing_default_ranges() {
    let timing = TimingConfig::default();
    assert!(timing.settle_min_ms <= timing.settle_max_ms);
    assert_eq!(timing.keystroke_min_ms, 30);
    assert_eq!(timing.keystroke_max_ms, 80);
}

#[test]
fn test_timing_zero() {
    let timing = TimingConfig::zero();
    assert_eq!(timing.settle_max_ms, 0);
    assert_eq!(timing.keystroke_max_ms, 0);
    assert_eq!(timing.submit_wait_ms, 0);
}

#[test]
fn test_wizard_default() {
    let wizard = WizardConfig::default();
    assert_eq!(wizard.max_attempts, 10);
    assert_eq!(wizard.empty_cycle_limit, 3);
    assert_eq!(wizard.completion_timeout_secs, 30);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config: Config = toml::from_str("[timing]\nsettle_min_ms = 10").unwrap();
    assert_eq!(config.timing.settle_min_ms, 10);
    assert_eq!(config.timing.settle_max_ms, 700);
}

#[test]
fn test_log_dir_explicit() {
    let logging = LoggingConfig {
        level: "debug".to_string(),
        dir: Some("/var/log/autoapply".to_string()),
    };
    assert_eq!(logging.log_dir(), std::path::PathBuf::from("/var/log/autoapply"));
}

#[test]
fn test_log_dir_default_under_home() {
    let dir = LoggingConfig::default().log_dir();
    assert!(dir.ends_with(".autoapply/logs"));
}

#[test]
fn test_config_serialization_roundtrip_keeps_keywords() {
    let mut config = Config::default();
    config
        .resolver
        .extra_keywords
        .insert("portfolio".to_string(), "documentsAndLinks.portfolio".to_string());
    let text = toml::to_string(&config).unwrap();
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.resolver.extra_keywords.len(), 1);
}
