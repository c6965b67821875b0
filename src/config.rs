use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default location of the YAML config file
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/castweb/config.yml";

/// Application configuration (config.yml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Root of the .strm/.nfo hierarchy
    #[serde(default)]
    pub library_path: PathBuf,

    /// Directory holding state.json (pairing code)
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// ytcast device to cast to when no pairing code has been stored
    #[serde(default)]
    pub ytcast_device: Option<String>,

    /// ytcast executable (looked up on PATH unless absolute)
    #[serde(default = "default_ytcast_binary")]
    pub ytcast_binary: String,

    /// Upper bound for a single ytcast invocation
    #[serde(default = "default_cast_timeout")]
    pub cast_timeout_seconds: u64,

    /// Endpoint that SVT Play URLs are forwarded to (GET ?url=...)
    #[serde(default)]
    pub svtplay_endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_state_path() -> PathBuf { PathBuf::from("/var/lib/castweb") }
fn default_ytcast_binary() -> String { "ytcast".to_string() }
fn default_cast_timeout() -> u64 { 15 }
fn default_log_level() -> String { "info".to_string() }

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            library_path: PathBuf::new(),
            state_path: default_state_path(),
            ytcast_device: None,
            ytcast_binary: default_ytcast_binary(),
            cast_timeout_seconds: default_cast_timeout(),
            svtplay_endpoint: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file, with fallback to defaults.
    /// Environment variables override file values; call `validate` once
    /// command-line overrides have been applied.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let expanded_path = expand_home(config_path);

        let mut config = if expanded_path.exists() {
            tracing::info!("Loading config from: {}", expanded_path.display());
            Self::from_file(&expanded_path)?
        } else {
            if path.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    expanded_path.display()
                )));
            }
            tracing::debug!("No config file at {}, using defaults", expanded_path.display());
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.expand_paths();

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Config>(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment variable overrides.
    /// Takes a lookup function so tests don't have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("CASTWEB_HOST") {
            self.host = val;
        }
        if let Some(val) = var("PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", val),
            }
        }
        if let Some(val) = var("CASTWEB_ROOT") {
            self.library_path = PathBuf::from(val);
        }
        if let Some(val) = var("CASTWEB_STATE") {
            self.state_path = PathBuf::from(val);
        }
        if let Some(val) = var("YTCAST_DEVICE").filter(|v| !v.is_empty()) {
            self.ytcast_device = Some(val);
        }
        if let Some(val) = var("SVTPLAY_ENDPOINT").filter(|v| !v.is_empty()) {
            self.svtplay_endpoint = Some(val);
        }
        if let Some(val) = var("CASTWEB_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    /// Expand ~ in all path fields
    pub fn expand_paths(&mut self) {
        self.library_path = expand_home_path(&self.library_path);
        self.state_path = expand_home_path(&self.state_path);
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library_path.as_os_str().is_empty() {
            return Err(Error::Config(
                "missing root directory: pass --root PATH or positional PATH".to_string(),
            ));
        }

        if !self.library_path.is_dir() {
            return Err(Error::Config(format!(
                "invalid root directory: {}",
                self.library_path.display()
            )));
        }

        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }

        if let Some(endpoint) = &self.svtplay_endpoint {
            url::Url::parse(endpoint).map_err(|e| {
                Error::Config(format!("invalid svtplay_endpoint {}: {}", endpoint, e))
            })?;
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "log_level must be one of {:?}, got: {}",
                LOG_LEVELS, self.log_level
            )));
        }

        Ok(())
    }

    /// Location of the persisted state file
    pub fn state_file(&self) -> PathBuf {
        self.state_path.join("state.json")
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Expand ~ to home directory in a string path
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Expand ~ in a PathBuf
fn expand_home_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(path_str) => expand_home(path_str),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_uses_field_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        fs::write(&path, "library_path: /srv/videos\nport: 9090\n").unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.library_path, PathBuf::from("/srv/videos"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.ytcast_binary, "ytcast");
        assert_eq!(config.cast_timeout_seconds, 15);
        assert!(config.ytcast_device.is_none());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.yml");
        assert!(matches!(
            Config::load(path.to_str()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9999"),
            ("CASTWEB_ROOT", "/media/strm"),
            ("YTCAST_DEVICE", "living-room"),
            ("SVTPLAY_ENDPOINT", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 9999);
        assert_eq!(config.library_path, PathBuf::from("/media/strm"));
        assert_eq!(config.ytcast_device.as_deref(), Some("living-room"));
        assert!(config.svtplay_endpoint.is_none());
    }

    #[test]
    fn test_invalid_port_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_validate() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::default();
        assert!(config.validate().is_err(), "root is required");

        config.library_path = temp_dir.path().join("missing");
        assert!(config.validate().is_err(), "root must exist");

        config.library_path = temp_dir.path().to_path_buf();
        config.validate().unwrap();

        config.svtplay_endpoint = Some("not a url".to_string());
        assert!(config.validate().is_err());
        config.svtplay_endpoint = Some("http://127.0.0.1:8000/play".to_string());
        config.validate().unwrap();

        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_state_file_location() {
        let config = Config {
            state_path: PathBuf::from("/var/lib/castweb"),
            ..Config::default()
        };
        assert_eq!(config.state_file(), PathBuf::from("/var/lib/castweb/state.json"));
    }
}
