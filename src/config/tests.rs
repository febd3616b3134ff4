//! Configuration tests
//!
//! The round-trip tests guard the handwritten TOML template: every field the
//! template emits must parse back through `FileConfig`, so adding a config
//! field without updating the serializer fails here.

use super::*;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_with_public_key() {
    let mut config = Config::default();
    config.checkout.public_key = Some("pk_test_abc".to_string());
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml();
    let parsed: FileConfig = toml::from_str(&toml_str).expect("round-trip");

    let checkout = parsed.checkout.expect("checkout section");
    assert_eq!(checkout.public_key.as_deref(), Some("pk_test_abc"));

    let logging = parsed.logging.expect("logging section");
    assert_eq!(logging.file_enabled, Some(true));
    assert_eq!(logging.file_rotation.as_deref(), Some("hourly"));
}

#[test]
fn test_roundtrip_preserves_scalars() {
    let mut config = Config::default();
    config.base_url = "https://stats.example.com".to_string();
    config.poll_interval_secs = 5;
    config.theme = "light".to_string();

    let parsed: FileConfig = toml::from_str(&config.to_toml()).expect("round-trip");
    assert_eq!(parsed.base_url.as_deref(), Some("https://stats.example.com"));
    assert_eq!(parsed.poll_interval_secs, Some(5));
    assert_eq!(parsed.theme.as_deref(), Some("light"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Section merging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_sections_use_defaults() {
    let logging = LoggingConfig::from_file(None);
    assert_eq!(logging.level, "info");
    assert!(!logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Daily);

    let checkout = CheckoutConfig::from_file(None, None);
    assert!(checkout.public_key.is_none());
    assert_eq!(checkout.currency, "NGN");
}

#[test]
fn test_partial_logging_section_keeps_other_defaults() {
    let logging = LoggingConfig::from_file(Some(FileLogging {
        level: Some("debug".to_string()),
        ..Default::default()
    }));
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.file_prefix, "reqlytics");
}

#[test]
fn test_env_public_key_wins_over_file() {
    let checkout = CheckoutConfig::from_file(
        Some(FileCheckout {
            public_key: Some("pk_file".to_string()),
            currency: Some("USD".to_string()),
        }),
        Some("pk_env".to_string()),
    );
    assert_eq!(checkout.public_key.as_deref(), Some("pk_env"));
    assert_eq!(checkout.currency, "USD");
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
}
