// Configuration loading and parsing (dashboard.toml plus environment).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "LEADERBOARD_API_URL";

/// File name looked up in `./config/` and the platform config directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub competition: CompetitionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the leaderboard backend, without a trailing path.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Fixed competition identities. Not editable at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Heading shown in the status bar.
    pub title: String,
    /// Substring that marks the user's own submission title.
    pub your_article_marker: String,
    /// Exact author name of the organizing host.
    pub host_author: String,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        CompetitionConfig {
            title: "AIdeas 2025 Leaderboard".to_string(),
            your_article_marker: "ASET".to_string(),
            host_author: "Ben Fowler".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "leaderboard_core=info,leaderboard_tui=info,warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration relative to `base_dir`.
///
/// Reads `base_dir/config/dashboard.toml` when it exists, falling back to
/// `fallback` (the platform config file) and then to built-in defaults.
/// `api_url_override` replaces `api.base_url` when set. The result is
/// validated before it is returned.
pub fn load_config_from(
    base_dir: &Path,
    fallback: Option<&Path>,
    api_url_override: Option<String>,
) -> Result<Config, ConfigError> {
    let local = base_dir.join("config").join(CONFIG_FILE_NAME);

    let mut config = if local.exists() {
        read_config_file(&local)?
    } else {
        match fallback {
            Some(path) if path.exists() => read_config_file(path)?,
            _ => Config::default(),
        }
    };

    if let Some(url) = api_url_override.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url;
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, the platform config directory, and `LEADERBOARD_API_URL`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Read {
        path: PathBuf::from("."),
        source: e,
    })?;
    let platform = platform_config_path();
    load_config_from(&cwd, platform.as_deref(), std::env::var(API_URL_ENV).ok())
}

/// `dashboard.toml` inside the platform config directory, if one exists.
pub fn platform_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "leaderboard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Parse a config document from a TOML string.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text, path)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(&config.api.base_url).map_err(|e| {
        ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("not a valid URL ({e}): {}", config.api.base_url),
        }
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("scheme must be http or https, got {}", url.scheme()),
        });
    }

    let competition = &config.competition;
    let required: &[(&str, &str)] = &[
        ("competition.title", &competition.title),
        ("competition.your_article_marker", &competition.your_article_marker),
        ("competition.host_author", &competition.host_author),
    ];
    for (name, val) in required {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
