//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::table::DEFAULT_EXPORT_FILENAME;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Full URL of the query endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout. Unset means wait as long as the server takes.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    "http://localhost:3001/api/query".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: None,
        }
    }
}

/// Where exported files go
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: String,

    #[serde(default = "default_export_filename")]
    pub filename: String,
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
            filename: default_export_filename(),
        }
    }
}

impl ExportConfig {
    /// Default destination for CSV exports
    pub fn csv_path(&self) -> PathBuf {
        PathBuf::from(&self.directory).join(&self.filename)
    }

    /// Resolve a file name inside the export directory
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.directory).join(file_name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Files searched, in order, when no config path is given
    pub fn default_paths() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("data-agent").join("config.toml"))
            .into_iter()
            .chain(Some(PathBuf::from("./data-agent.toml")))
            .collect()
    }

    /// Search the default locations without logging anything.
    ///
    /// Callers that set up logging from the result report
    /// [`Discovered::failures`] themselves once a subscriber exists.
    pub fn discover() -> Discovered {
        Self::discover_in(&Self::default_paths())
    }

    /// Use the first of `paths` that exists and loads, else env-only defaults
    pub fn discover_in(paths: &[PathBuf]) -> Discovered {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return Discovered {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        Discovered {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let discovered = Self::discover();
        discovered.log();
        discovered.config
    }

    /// Command-line endpoint, which wins over the file and the environment
    pub fn override_endpoint(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.agent.endpoint = endpoint;
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("DATA_AGENT_ENDPOINT") {
            self.agent.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("DATA_AGENT_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.agent.request_timeout_secs = Some(secs);
            }
        }

        if let Ok(dir) = std::env::var("DATA_AGENT_EXPORT_DIR") {
            self.export.directory = dir;
        }

        if let Ok(level) = std::env::var("DATA_AGENT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DATA_AGENT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching for a config file
#[derive(Debug)]
pub struct Discovered {
    pub config: Config,
    /// File the config was loaded from, if any
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub failures: Vec<ConfigError>,
}

impl Discovered {
    /// Report where the config came from and which files were skipped
    pub fn log(&self) {
        for failure in &self.failures {
            tracing::warn!("Skipped config file: {}", failure);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Data Agent Configuration
#
# Environment variables override these settings:
# - DATA_AGENT_ENDPOINT
# - DATA_AGENT_TIMEOUT_SECS
# - DATA_AGENT_EXPORT_DIR
# - DATA_AGENT_LOG_LEVEL
# - DATA_AGENT_LOG_FORMAT

[agent]
# Analytics API query endpoint (POST { query, history })
endpoint = "http://localhost:3001/api/query"

# Request timeout in seconds (omit to wait indefinitely)
# request_timeout_secs = 60

[export]
# Directory for CSV exports and saved transcripts
directory = "."

# File name for CSV exports of result tables
filename = "query_results.csv"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that read or write `DATA_AGENT_*` variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 5] = [
        "DATA_AGENT_ENDPOINT",
        "DATA_AGENT_TIMEOUT_SECS",
        "DATA_AGENT_EXPORT_DIR",
        "DATA_AGENT_LOG_LEVEL",
        "DATA_AGENT_LOG_FORMAT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.endpoint, "http://localhost:3001/api/query");
        assert_eq!(config.agent.request_timeout_secs, None);
        assert_eq!(config.export.csv_path(), PathBuf::from("./query_results.csv"));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.agent.endpoint, default_endpoint());
        assert_eq!(config.export.filename, DEFAULT_EXPORT_FILENAME);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[agent]\nendpoint = \"https://analytics.example.com/api/query\"\nrequest_timeout_secs = 30\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.agent.endpoint, "https://analytics.example.com/api/query");
        assert_eq!(config.agent.request_timeout_secs, Some(30));
        assert_eq!(config.export.filename, "query_results.csv");
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[agent\nendpoint = ").unwrap();
        match Config::load(&broken) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[agent]\nendpoint = \"http://file.example/api/query\"\nrequest_timeout_secs = 5\n\n\
             [export]\ndirectory = \"from-file\"\n\n\
             [logging]\nlevel = \"info\"\nformat = \"pretty\"\n",
        )
        .unwrap();

        std::env::set_var("DATA_AGENT_ENDPOINT", "http://env.example/api/query");
        std::env::set_var("DATA_AGENT_TIMEOUT_SECS", "45");
        std::env::set_var("DATA_AGENT_EXPORT_DIR", "/tmp/exports");
        std::env::set_var("DATA_AGENT_LOG_LEVEL", "debug");
        std::env::set_var("DATA_AGENT_LOG_FORMAT", "json");
        let loaded = Config::load_with_env(&path);
        clear_env();

        let mut config = loaded.unwrap();
        assert_eq!(config.agent.endpoint, "http://env.example/api/query");
        assert_eq!(config.agent.request_timeout_secs, Some(45));
        assert_eq!(config.export.csv_path(), PathBuf::from("/tmp/exports/query_results.csv"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");

        config.override_endpoint(Some("http://cli.example/api/query".to_string()));
        assert_eq!(config.agent.endpoint, "http://cli.example/api/query");
        config.override_endpoint(None);
        assert_eq!(config.agent.endpoint, "http://cli.example/api/query");
    }

    #[test]
    fn test_bad_timeout_env_is_ignored() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("DATA_AGENT_TIMEOUT_SECS", "soon");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.agent.request_timeout_secs, None);
    }

    #[test]
    fn test_discover_reports_broken_file_and_falls_through() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempfile::tempdir().unwrap();

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[agent\nendpoint = ").unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[agent]\nendpoint = \"http://good.example/api/query\"\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let discovered = Config::discover_in(&[missing.clone(), broken.clone(), good.clone()]);
        assert_eq!(discovered.source, Some(good));
        assert_eq!(discovered.config.agent.endpoint, "http://good.example/api/query");
        assert_eq!(discovered.failures.len(), 1);
        assert!(matches!(&discovered.failures[0], ConfigError::Parse { path, .. } if *path == broken));

        let discovered = Config::discover_in(&[missing, broken]);
        assert_eq!(discovered.source, None);
        assert_eq!(discovered.failures.len(), 1);
        assert_eq!(discovered.config.agent.endpoint, default_endpoint());
    }
}
