//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `upstream.nasa_api_key`.
pub const NASA_API_KEY_ENV: &str = "NASA_API_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a configuration from a TOML file, apply environment overrides,
/// and validate it.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ProxyConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    finalize(config)
}

/// Build the default configuration with environment overrides applied.
///
/// Used when the server starts without a `--config` path.
pub fn default_config() -> Result<ProxyConfig, ConfigError> {
    finalize(ProxyConfig::default())
}

fn finalize(mut config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides. A set-but-blank variable is ignored so it
/// cannot silently blank out the configured credential.
fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(key) = std::env::var(NASA_API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.upstream.nasa_api_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp_config(
            "space-data-proxy-test-valid.toml",
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            timeout_secs = 5
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.timeout_secs, 5);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = write_temp_config(
            "space-data-proxy-test-invalid.toml",
            r#"
            [upstream]
            timeout_secs = 0
            "#,
        );
        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let path = write_temp_config("space-data-proxy-test-malformed.toml", "[listener\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("space-data-proxy-test-missing.toml");
        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_override_applies() {
        std::env::set_var(NASA_API_KEY_ENV, "from-env");
        let config = default_config().unwrap();
        assert_eq!(config.upstream.nasa_api_key, "from-env");
        std::env::remove_var(NASA_API_KEY_ENV);
    }
}
