// Configuration loading and parsing (league.toml).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use matchgrid_core::{DuplicatePolicy, LeagueOptions, ScoreParsing};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// The shipped default, also used when no league.toml exists anywhere.
pub const DEFAULT_LEAGUE_TOML: &str = include_str!("../defaults/league.toml");

const CONFIG_FILE_NAME: &str = "league.toml";

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
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub ui: UiConfig,
}

/// Raw deserialization target for league.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    league: LeagueConfig,
    #[serde(default)]
    ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub title: String,
    /// Players present when the editor starts, in row order.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub duplicate_names: DuplicatePolicy,
    #[serde(default)]
    pub score_parsing: ScoreParsing,
    /// Results present when the editor starts.
    #[serde(default)]
    pub results: Vec<SeedResult>,
}

impl LeagueConfig {
    pub fn options(&self) -> LeagueOptions {
        LeagueOptions {
            duplicate_names: self.duplicate_names,
            score_parsing: self.score_parsing,
        }
    }
}

/// A `[[league.results]]` entry: `home` against `away` scored `score`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedResult {
    pub home: String,
    pub away: String,
    pub score: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            render_interval_ms: default_render_interval_ms(),
        }
    }
}

fn default_render_interval_ms() -> u64 {
    33
}

impl Config {
    /// The configuration compiled into the binary.
    pub fn builtin() -> Result<Config, ConfigError> {
        parse_config(DEFAULT_LEAGUE_TOML, Path::new("<built-in defaults>"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// Does not copy defaults; see `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_file(&base_dir.join("config").join(CONFIG_FILE_NAME))
}

/// Load and validate a single league.toml file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = Config {
        league: file.league,
        ui: file.ui,
    };
    validate(&config)?;
    Ok(config)
}

/// Copy files missing from `config/` out of `defaults/`, never overwriting.
/// Returns the files that were copied. `.example` templates are skipped.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        return Ok(vec![]);
    }

    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("failed to create {}: {e}", config_dir.display())))?;

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("failed to read {}: {e}", defaults_dir.display())))?;

    let mut copied = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| copy_err(format!("failed to read defaults entry: {e}")))?
            .path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&path, &target).map_err(|e| {
            copy_err(format!(
                "failed to copy {} to {}: {e}",
                path.display(),
                target.display()
            ))
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Locate and load the configuration.
///
/// Lookup order:
/// 1. `./config/league.toml`, after seeding it from `./defaults/` when the
///    current directory has either directory.
/// 2. `league.toml` in the per-user config directory.
/// 3. The built-in defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        for copied in ensure_config_files(&cwd)? {
            info!("Initialized {} from defaults", copied.display());
        }
        return load_config_from(&cwd);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "matchgrid") {
        let user_file = dirs.config_dir().join(CONFIG_FILE_NAME);
        if user_file.is_file() {
            info!("Using config {}", user_file.display());
            return load_config_file(&user_file);
        }
    }

    info!("No league.toml found, using built-in defaults");
    Config::builtin()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.ui.render_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.render_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    let league = &config.league;

    if league.duplicate_names == DuplicatePolicy::Reject {
        for (i, name) in league.players.iter().enumerate() {
            if league.players[..i].contains(name) {
                return Err(ConfigError::ValidationError {
                    field: "league.players".into(),
                    message: format!("duplicate player `{name}` with duplicate_names = \"reject\""),
                });
            }
        }
    }

    for (i, seed) in league.results.iter().enumerate() {
        for (side, name) in [("home", &seed.home), ("away", &seed.away)] {
            if !league.players.contains(name) {
                return Err(ConfigError::ValidationError {
                    field: format!("league.results[{i}].{side}"),
                    message: format!("`{name}` is not listed in league.players"),
                });
            }
        }
        if seed.home == seed.away {
            return Err(ConfigError::ValidationError {
                field: format!("league.results[{i}]"),
                message: format!("`{}` cannot play against themselves", seed.home),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
