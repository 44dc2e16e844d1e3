//! User configuration (~/.userstats/config.json)
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. Command-line flags are applied on top by the CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::types::{Result, UserStatsError};

/// randomuser.me API endpoint
pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";

/// Batch size requested per fetch
pub const DEFAULT_RESULTS: u32 = 25;

/// Largest batch the API serves in one request
pub const MAX_RESULTS: u32 = 5000;

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub results: u32,
    /// Nationality filter (e.g. ["br", "us"]); empty = any
    pub nationalities: Vec<String>,
    /// Fixed seed for reproducible batches
    pub seed: Option<String>,
    pub timeout_secs: u64,
    /// tracing filter directive used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            results: DEFAULT_RESULTS,
            nationalities: Vec::new(),
            seed: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_at(Self::default_path().as_deref())
    }

    /// No resolvable home directory means no config file, so defaults apply
    fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            UserStatsError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config path (~/.userstats/config.json)
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::UserDirs::new()?;
        Some(dirs.home_dir().join(".userstats").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.results == 0 || self.results > MAX_RESULTS {
            return Err(UserStatsError::Config(format!(
                "results must be between 1 and {}, got {}",
                MAX_RESULTS, self.results
            )));
        }
        if self.timeout_secs == 0 {
            return Err(UserStatsError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        reqwest::Url::parse(&self.api_url).map_err(|e| {
            UserStatsError::Config(format!("invalid api_url {:?}: {}", self.api_url, e))
        })?;
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            UserStatsError::Config(format!("invalid log_level {:?}: {}", self.log_level, e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://randomuser.me/api/");
        assert_eq!(config.results, 25);
        assert!(config.nationalities.is_empty());
        assert!(config.seed.is_none());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"results": 100, "nationalities": ["br", "es"]}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.results, 100);
        assert_eq!(config.nationalities, vec!["br", "es"]);
        // Untouched fields keep defaults
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ results: ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, UserStatsError::Config(_)));
    }

    #[test]
    fn test_validate_results_range() {
        let mut config = Config {
            results: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.results = MAX_RESULTS + 1;
        assert!(config.validate().is_err());

        config.results = MAX_RESULTS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_home_dir_gives_defaults() {
        let config = Config::load_at(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_log_level() {
        for level in ["error", "debug", "userstats=trace,warn", "off"] {
            let config = Config {
                log_level: level.into(),
                ..Config::default()
            };
            assert!(config.validate().is_ok(), "{} should be accepted", level);
        }

        let config = Config {
            log_level: "userstats=loud".into(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_load_rejects_bad_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "userstats=loud"}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, UserStatsError::Config(_)));
    }

    #[test]
    fn test_validate_timeout_and_url() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
