// Configuration loading and parsing (draft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::draft::order::DraftOrder;

/// The one config file this app reads, under `config/`.
pub const CONFIG_FILE: &str = "draft.toml";

/// Upper bound for `draft.total_rounds`. Real leagues stay well under this.
pub const MAX_TOTAL_ROUNDS: u32 = 50;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub draft: DraftConfig,
    pub display: DisplayConfig,
    pub ws_port: u16,
    pub db_path: String,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftConfig,
    #[serde(default)]
    display: DisplayConfig,
    feed: FeedSection,
    database: DatabaseSection,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    pub name: String,
    pub total_rounds: u32,
    #[serde(default)]
    pub order: DraftOrder,
    /// Display name of the user's seat. When omitted, exposure is shown for
    /// the whole room.
    #[serde(default)]
    pub my_name: Option<String>,
}

/// Picks bar geometry, in terminal cells.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub card_width: u16,
    pub card_gap: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            card_width: 14,
            card_gap: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FeedSection {
    port: u16,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draft.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: path.clone(),
            source,
        },
        other => other,
    })?;
    Ok(config)
}

/// Parse and validate draft.toml contents.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let file: DraftFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from("draft.toml"),
        source: e,
    })?;

    let config = Config {
        draft: file.draft,
        display: file.display,
        ws_port: file.feed.port,
        db_path: file.database.path,
        data_paths: file.data_paths,
    };

    validate(&config)?;
    Ok(config)
}

/// Make sure `config/draft.toml` exists, seeding it from
/// `defaults/draft.toml` on first run.
///
/// Returns the path written, or `None` when a config is already in place.
/// An existing file is never touched, and a default that would not load is
/// never seeded.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let defaults = std::fs::read_to_string(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "{} is missing and {} could not be read: {e}",
            target.display(),
            source.display()
        ),
    })?;
    parse_config(&defaults)?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::write(&target, defaults).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    info!("Seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

/// Directory for log files: `logs/` under `base_dir` when it can be created,
/// otherwise the per-user data directory.
pub fn log_dir(base_dir: &Path) -> Option<PathBuf> {
    let local = base_dir.join("logs");
    if std::fs::create_dir_all(&local).is_ok() {
        return Some(local);
    }
    let dirs = directories::ProjectDirs::from("", "", "draftroom")?;
    let fallback = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&fallback).ok()?;
    Some(fallback)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.draft.total_rounds == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.total_rounds".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.draft.total_rounds > MAX_TOTAL_ROUNDS {
        return Err(ConfigError::ValidationError {
            field: "draft.total_rounds".into(),
            message: format!(
                "must be at most {MAX_TOTAL_ROUNDS}, got {}",
                config.draft.total_rounds
            ),
        });
    }

    if config.display.card_width < 4 {
        return Err(ConfigError::ValidationError {
            field: "display.card_width".into(),
            message: format!("must be at least 4, got {}", config.display.card_width),
        });
    }

    if config.ws_port == 0 {
        return Err(ConfigError::ValidationError {
            field: "feed.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(name) = &config.draft.my_name {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "draft.my_name".into(),
                message: "must not be blank when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
