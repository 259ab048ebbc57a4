//! Configuration system for raid-roster
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (RAID_ROSTER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog;
use crate::error::{Error, Result};

/// Main planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Where snapshots are kept
    pub storage: StorageSettings,

    /// Logging configuration
    pub logging: LoggingSettings,

    /// Defaults for new characters and rosters
    pub defaults: DefaultSettings,

    /// Terminal output
    pub display: DisplaySettings,
}

/// Storage path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the JSON snapshots
    pub data_dir: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

/// Values used when a command leaves them out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Class for `character add` without `--class`
    pub class: String,

    /// Icon for `roster create` without `--icon`
    pub boss_icon: String,
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Color character names by class
    pub color: bool,
}

// Default implementations

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.raid-roster".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            class: "Warrior".to_string(),
            boss_icon: "💀".to_string(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl PlannerConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            config = Self::from_file(&path)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::config_parse(format!("{}: {}", path.display(), e.message()), Some(e))
        })
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            // Current directory
            Some(PathBuf::from("raid-roster.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("raid-roster").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".raid-roster").join("config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RAID_ROSTER_DATA_DIR") {
            self.storage.data_dir = val;
        }

        if let Ok(val) = std::env::var("RAID_ROSTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("RAID_ROSTER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("RAID_ROSTER_LOG_JSON") {
            self.logging.json_format = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("RAID_ROSTER_DEFAULT_CLASS") {
            self.defaults.class = val;
        }
        if let Ok(val) = std::env::var("RAID_ROSTER_DEFAULT_ICON") {
            self.defaults.boss_icon = val;
        }

        if let Ok(val) = std::env::var("RAID_ROSTER_COLOR") {
            self.display.color = parse_flag(&val);
        }
        // https://no-color.org
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.display.color = false;
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_dir",
                "data_dir cannot be empty",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        if catalog::class(&self.defaults.class).is_none() {
            let known: Vec<&str> = catalog::classes().iter().map(|c| c.name).collect();
            return Err(Error::config_field_invalid(
                "defaults.class",
                format!(
                    "Unknown class '{}'. Must be one of: {}",
                    self.defaults.class,
                    known.join(", ")
                ),
            ));
        }

        if self.defaults.boss_icon.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "defaults.boss_icon",
                "boss_icon cannot be empty",
            ));
        }

        Ok(())
    }

    /// Get the data directory as a PathBuf
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Point storage at another directory (from `--data-dir`)
    pub fn set_data_dir(&mut self, dir: &str) {
        self.storage.data_dir = expand_path(dir);
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".raid-roster")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# raid-roster configuration

[storage]
# Directory holding characters.json, rosters.json and selected.json
data_dir = "~/.raid-roster"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.raid-roster/logs/raid-roster.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false

[defaults]
# Class used by 'character add' when --class is omitted
class = "Warrior"

# Icon used by 'roster create' when --icon is omitted
# Stock icons: 💀 🅰️ 🅱️ 1️⃣ 2️⃣ 3️⃣ 👑 ❤️ 🍆
boss_icon = "💀"

[display]
# Color character names by class (NO_COLOR also disables this)
color = true
"#
    .to_string()
}
