// Configuration module unit tests

use imgveil::config::*;

const KEY: &str = "8f1c2a3b4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8";

#[test]
fn test_can_deserialize_minimal_valid_yaml_config() {
    let yaml = r#"
proxy:
  worker_url: "https://img.example.com/"
  secret_key: "8f1c2a3b4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8"
"#;
    let config: Config = serde_yaml::from_str(yaml).expect("Failed to deserialize YAML");
    assert!(config.proxy.is_enabled());
    assert_eq!(config.proxy.max_width, 1024);
    assert_eq!(config.proxy.max_height, 0);
    assert_eq!(config.proxy.quality, 80);
    assert_eq!(config.proxy.effective_thumbnail_quality(), 80);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_disables_proxy() {
    let config = Config::from_yaml_with_env("{}").unwrap();
    assert!(!config.proxy.is_enabled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_thumbnail_quality_override() {
    let yaml = r#"
proxy:
  quality: 90
  thumbnail_quality: 50
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.proxy.quality, 90);
    assert_eq!(config.proxy.effective_thumbnail_quality(), 50);
}

#[test]
fn test_negative_bounds_are_rejected_at_parse_time() {
    let yaml = r#"
proxy:
  max_width: -1
"#;
    assert!(Config::from_yaml_with_env(yaml).is_err());
}

#[test]
fn test_unknown_log_format_is_rejected() {
    let yaml = r#"
logging:
  format: xml
"#;
    assert!(Config::from_yaml_with_env(yaml).is_err());
}

#[test]
fn test_validation_error_never_contains_key() {
    let bad_key = KEY.to_uppercase();
    let config = ProxyConfig::new("https://img.example.com/", bad_key.clone());
    let err = config.validate().unwrap_err();
    assert!(!err.contains(&bad_key));
}

#[test]
fn test_config_round_trips_through_yaml() {
    let config = Config {
        proxy: ProxyConfig::new("https://img.example.com/", KEY)
            .with_bounds(800, 600)
            .with_quality(85, Some(70)),
        logging: LoggingConfig {
            level: "imgveil=debug".to_string(),
            format: LogFormat::Pretty,
        },
    };

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed = Config::from_yaml_with_env(&yaml).unwrap();
    assert_eq!(parsed.proxy, config.proxy);
    assert_eq!(parsed.logging, config.logging);
}
