//! Loading of the sigval YAML config.

use crate::config::types::SigvalConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::path::Path;

/// Read `path` and parse it with [`load_config_from_str`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SigvalConfig, ConfigError> {
    let path = path.as_ref();
    let source_name = path.display().to_string();

    match std::fs::read_to_string(path) {
        Ok(content) => load_config_from_str(&content, &source_name),
        Err(source) => Err(ConfigError::FileRead {
            path: source_name,
            source,
        }),
    }
}

/// Parse a sigval config and reject it unless every setting is in range.
///
/// `source_name` only labels errors.
pub fn load_config_from_str(content: &str, source_name: &str) -> Result<SigvalConfig, ConfigError> {
    let config = serde_yaml::from_str::<SigvalConfig>(content).map_err(|source| {
        ConfigError::Parse {
            path: source_name.to_string(),
            source,
        }
    })?;
    validate_config(&config)?;

    tracing::debug!(
        source = source_name,
        grace_period_secs = config.validator.grace_period_secs,
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use std::io::Write;

    const VALID_CONFIG: &str = r#"
validator:
  grace_period_secs: 12
  authority: "0x1111111111111111111111111111111111111111"

observability:
  log_level: "debug"
  log_format: "json"
"#;

    #[test]
    fn test_load_valid_config() {
        let config = load_config_from_str(VALID_CONFIG, "sigval.yaml").unwrap();
        assert_eq!(config.validator.grace_period_secs, 12);
        assert_eq!(
            config.validator.authority,
            Some(Address::repeat_byte(0x11))
        );
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_defaults_applied() {
        let config = load_config_from_str("validator: {}\n", "sigval.yaml").unwrap();
        assert_eq!(config.validator.grace_period_secs, 8);
        assert!(config.validator.authority.is_none());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let config_with_unknown = r#"
validator:
  grace_period_secs: 8
  entry_point: "0x00"
"#;
        let err = load_config_from_str(config_with_unknown, "sigval.yaml").unwrap_err();
        assert!(err.to_string().starts_with("invalid sigval config 'sigval.yaml'"));
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, "sigval.yaml"),
            e => panic!("Expected Parse error, got {:?}", e),
        }
    }

    #[test]
    fn test_invalid_authority_rejected_at_parse() {
        let bad_address = "validator:\n  authority: \"0x1234\"\n";
        let result = load_config_from_str(bad_address, "sigval.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let result = load_config_from_str("validator:\n  grace_period_secs: 0\n", "sigval.yaml");
        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.validator.grace_period_secs, 12);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
        assert!(err.to_string().starts_with("cannot read sigval config"));
    }
}
