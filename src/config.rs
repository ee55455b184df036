//! Configuration
//!
//! `config.toml` is optional; every key has a default. `MEDSPACE_*`
//! environment variables win over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Where bookings are persisted
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Nothing survives a restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|p| p.join("medspace").to_string_lossy().into_owned())
            .unwrap_or_else(|| "./medspace_data".to_string());
        Self {
            data_dir,
            backend: StorageBackend::File,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive for this level
    pub fn filter_directive(&self) -> String {
        format!("medspace={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Candidate config files, most specific first
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("medspace").join("config.toml"));
    }
    paths.push(PathBuf::from("/etc/medspace/config.toml"));
    paths.push(PathBuf::from("./config.toml"));
    paths
}

impl Config {
    /// Parse one file, without environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First readable file from [`search_paths`], or defaults, then the environment.
    ///
    /// Nothing is logged here; the caller logs the returned notes once a
    /// subscriber is installed.
    pub fn load_default() -> (Self, Vec<LoadNote>) {
        let mut notes = Vec::new();
        let mut config = None;
        for path in search_paths().into_iter().filter(|path| path.exists()) {
            match Self::load(&path) {
                Ok(loaded) => {
                    notes.push(LoadNote::Loaded(path));
                    config = Some(loaded);
                    break;
                }
                Err(e) => notes.push(LoadNote::SkippedFile(e)),
            }
        }
        let mut config = config.unwrap_or_else(|| {
            notes.push(LoadNote::Defaults);
            Config::default()
        });

        notes.extend(config.apply_overrides(|name| std::env::var(name).ok()));
        (config, notes)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<LoadNote> {
        let mut ignored = Vec::new();
        if let Some(dir) = lookup("MEDSPACE_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(backend) = lookup("MEDSPACE_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(b) => self.storage.backend = b,
                Err(e) => ignored.push(LoadNote::IgnoredOverride {
                    var: "MEDSPACE_STORAGE_BACKEND",
                    value: backend,
                    reason: e,
                }),
            }
        }
        if let Some(host) = lookup("MEDSPACE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("MEDSPACE_API_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.api.port = p,
                Err(e) => ignored.push(LoadNote::IgnoredOverride {
                    var: "MEDSPACE_API_PORT",
                    value: port,
                    reason: e.to_string(),
                }),
            }
        }
        if let Some(origins) = lookup("MEDSPACE_CORS_ORIGINS") {
            self.api.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(level) = lookup("MEDSPACE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MEDSPACE_LOG_FORMAT") {
            self.logging.format = format;
        }
        ignored
    }
}

/// How the config was assembled, for logging after tracing starts
#[derive(Debug)]
pub enum LoadNote {
    Loaded(PathBuf),
    Defaults,
    SkippedFile(ConfigError),
    IgnoredOverride {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl LoadNote {
    pub fn log(&self) {
        match self {
            LoadNote::Loaded(path) => tracing::info!(path = %path.display(), "Loaded config"),
            LoadNote::Defaults => tracing::info!("No config file found, using defaults"),
            LoadNote::SkippedFile(e) => tracing::warn!(error = %e, "Skipping config file"),
            LoadNote::IgnoredOverride { var, value, reason } => {
                tracing::warn!(value = %value, reason = %reason, "Ignoring invalid {}", var)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Text written by `medspace-cli config`
pub fn generate_default_config() -> String {
    r#"# MedSpace Configuration
#
# Environment variables override these settings:
# - MEDSPACE_DATA_DIR
# - MEDSPACE_STORAGE_BACKEND
# - MEDSPACE_API_HOST
# - MEDSPACE_API_PORT
# - MEDSPACE_CORS_ORIGINS (comma separated)
# - MEDSPACE_LOG_LEVEL
# - MEDSPACE_LOG_FORMAT

[storage]
# Directory holding medspaceBookings.json
data_dir = "~/.local/share/medspace"

# Backend: file (persistent) or memory (lost on restart)
backend = "file"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty list allows any origin)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.api.cors_origins.len(), 2);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            port = 9000

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("MEDSPACE_DATA_DIR", "/tmp/medspace"),
            ("MEDSPACE_API_PORT", "7000"),
            ("MEDSPACE_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/medspace");
        assert_eq!(config.api.port, 7000);
        assert!(config.logging.is_json());
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_backend_and_cors_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            "MEDSPACE_STORAGE_BACKEND" => Some("Memory".to_string()),
            "MEDSPACE_CORS_ORIGINS" => Some("https://a.example, ,https://b.example".to_string()),
            _ => None,
        });

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.api.cors_origins, vec!["https://a.example", "https://b.example"]);

        let notes = config
            .apply_overrides(|name| (name == "MEDSPACE_STORAGE_BACKEND").then(|| "s3".to_string()));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(matches!(
            notes.as_slice(),
            [LoadNote::IgnoredOverride { var: "MEDSPACE_STORAGE_BACKEND", .. }]
        ));
    }

    #[test]
    fn test_search_paths_end_with_working_directory() {
        let paths = search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("./config.toml")));
        assert!(paths.contains(&PathBuf::from("/etc/medspace/config.toml")));
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        let notes =
            config.apply_overrides(|name| (name == "MEDSPACE_API_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8082);
        assert!(matches!(
            notes.as_slice(),
            [LoadNote::IgnoredOverride { var: "MEDSPACE_API_PORT", value, .. }] if value == "http"
        ));
    }

    #[test]
    fn test_valid_overrides_leave_no_notes() {
        let mut config = Config::default();
        let notes = config.apply_overrides(|name| match name {
            "MEDSPACE_API_PORT" => Some("9000".to_string()),
            "MEDSPACE_STORAGE_BACKEND" => Some("file".to_string()),
            _ => None,
        });
        assert!(notes.is_empty());
        assert_eq!(config.api.port, 9000);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nport = ").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_filter_directive() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(logging.filter_directive(), "medspace=debug,tower_http=debug");
    }
}
