//! Configuration file reading and parsing.
//!
//! Locates and parses an INI-format configuration file and applies
//! `name=value` overrides on top. Every setting has a default, so running
//! without any config file at all is fine.

use std::env;
use std::path::PathBuf;

use configparser::ini::Ini;
use thiserror::Error;

use super::{Config, DiscoveryConfig};

// =============================================================================
// Constants - Default Values
// =============================================================================

const DEFAULT_DETAILS_URL: &str = "https://discovery.nationalarchives.gov.uk/API/records/v1/details";
const DEFAULT_CHILDREN_URL: &str =
    "https://discovery.nationalarchives.gov.uk/API/records/v1/children";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

const ENV_CONFIG_FILE: &str = "TNA_RANGE_CONFIG_FILE";

const SECTION_DISCOVERY: &str = "discovery";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid integer '{value}' for key '{key}'")]
    InvalidInteger { key: String, value: String },

    #[error("invalid value '{value}' for key '{key}': {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: &'static str,
    },

    #[error("unknown override key '{0}'")]
    UnknownOverrideKey(String),
}

/// Result type for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// ConfigSource
// =============================================================================

/// Specifies how to locate and layer configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Explicit config file path from the CLI. If specified and missing,
    /// error. If None, fall back to the TNA_RANGE_CONFIG_FILE env var;
    /// if that is unset too, built-in defaults apply.
    pub config_file: Option<PathBuf>,

    /// Individual key=value overrides, applied last.
    /// Keys use dot-notation: "discovery.page_size".
    pub overrides: Vec<(String, String)>,
}

// =============================================================================
// Reading
// =============================================================================

/// Read configuration from the given source.
pub fn read_config(source: &ConfigSource) -> ConfigResult<Config> {
    let mut config = Config {
        discovery: DiscoveryConfig {
            details_url: DEFAULT_DETAILS_URL.to_string(),
            children_url: DEFAULT_CHILDREN_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        },
    };

    if let Some(path) = locate_config_file(source)? {
        let mut ini = Ini::new();
        ini.load(&path).map_err(|message| ConfigError::ParseError {
            path: path.clone(),
            message,
        })?;
        apply_ini(&ini, &mut config)?;
    }

    for (key, value) in &source.overrides {
        apply_override(&mut config, key, value)?;
    }

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> ConfigResult<()> {
    // Pagination cannot make progress with an empty page.
    if config.discovery.page_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: "discovery.page_size".to_string(),
            value: config.discovery.page_size.to_string(),
            message: "must be at least 1",
        });
    }
    Ok(())
}

fn locate_config_file(source: &ConfigSource) -> ConfigResult<Option<PathBuf>> {
    if let Some(path) = &source.config_file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.clone()));
        }
        return Ok(Some(path.clone()));
    }

    if let Ok(env_path) = env::var(ENV_CONFIG_FILE) {
        let path = PathBuf::from(env_path);
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path));
        }
        return Ok(Some(path));
    }

    Ok(None)
}

fn apply_ini(ini: &Ini, config: &mut Config) -> ConfigResult<()> {
    if let Some(value) = ini.get(SECTION_DISCOVERY, "details_url") {
        config.discovery.details_url = value;
    }
    if let Some(value) = ini.get(SECTION_DISCOVERY, "children_url") {
        config.discovery.children_url = value;
    }
    if let Some(value) = ini.get(SECTION_DISCOVERY, "page_size") {
        config.discovery.page_size = parse_integer("discovery.page_size", &value)?;
    }
    if let Some(value) = ini.get(SECTION_DISCOVERY, "request_timeout_secs") {
        config.discovery.request_timeout_secs =
            parse_integer("discovery.request_timeout_secs", &value)?;
    }
    if let Some(value) = ini.get(SECTION_DISCOVERY, "max_retries") {
        config.discovery.max_retries = parse_integer("discovery.max_retries", &value)?;
    }
    Ok(())
}

fn apply_override(config: &mut Config, key: &str, value: &str) -> ConfigResult<()> {
    match key {
        "discovery.details_url" => config.discovery.details_url = value.to_string(),
        "discovery.children_url" => config.discovery.children_url = value.to_string(),
        "discovery.page_size" => config.discovery.page_size = parse_integer(key, value)?,
        "discovery.request_timeout_secs" => {
            config.discovery.request_timeout_secs = parse_integer(key, value)?
        }
        "discovery.max_retries" => config.discovery.max_retries = parse_integer(key, value)?,
        _ => return Err(ConfigError::UnknownOverrideKey(key.to_string())),
    }
    Ok(())
}

fn parse_integer<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = read_config(&ConfigSource::default()).unwrap();
        assert_eq!(config.discovery.page_size, 100);
        assert_eq!(config.discovery.max_retries, 3);
        assert!(config.discovery.details_url.ends_with("/details"));
        assert!(config.discovery.children_url.ends_with("/children"));
    }

    #[test]
    fn test_ini_values_applied() {
        let mut ini = Ini::new();
        ini.read(
            "[discovery]\n\
             details_url = https://example.test/details\n\
             page_size = 25\n"
                .to_string(),
        )
        .unwrap();

        let mut config = read_config(&ConfigSource::default()).unwrap();
        apply_ini(&ini, &mut config).unwrap();
        assert_eq!(config.discovery.details_url, "https://example.test/details");
        assert_eq!(config.discovery.page_size, 25);
        // Untouched keys keep their defaults.
        assert_eq!(config.discovery.max_retries, 3);
    }

    #[test]
    fn test_invalid_integer_in_ini() {
        let mut ini = Ini::new();
        ini.read("[discovery]\npage_size = lots\n".to_string()).unwrap();

        let mut config = read_config(&ConfigSource::default()).unwrap();
        let result = apply_ini(&ini, &mut config);
        assert!(matches!(result, Err(ConfigError::InvalidInteger { .. })));
    }

    #[test]
    fn test_overrides_applied_last() {
        let source = ConfigSource {
            config_file: None,
            overrides: vec![
                ("discovery.page_size".to_string(), "10".to_string()),
                ("discovery.max_retries".to_string(), "0".to_string()),
            ],
        };
        let config = read_config(&source).unwrap();
        assert_eq!(config.discovery.page_size, 10);
        assert_eq!(config.discovery.max_retries, 0);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let source = ConfigSource {
            config_file: None,
            overrides: vec![("discovery.page_size".to_string(), "0".to_string())],
        };
        let result = read_config(&source);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key, .. }) if key == "discovery.page_size"
        ));
    }

    #[test]
    fn test_unknown_override_key() {
        let source = ConfigSource {
            config_file: None,
            overrides: vec![("discovery.nope".to_string(), "1".to_string())],
        };
        let result = read_config(&source);
        assert!(matches!(result, Err(ConfigError::UnknownOverrideKey(_))));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let source = ConfigSource {
            config_file: Some(PathBuf::from("/definitely/not/here.ini")),
            overrides: vec![],
        };
        let result = read_config(&source);
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
