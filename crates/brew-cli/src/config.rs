//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use brew_core::WeekStart;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// First day of the week for the `week` interval.
    #[serde(default)]
    pub week_start: WeekStart,

    /// Countdown length for `brew` when `--minutes` is not given.
    #[serde(default = "default_minutes")]
    pub default_minutes: i64,
}

const fn default_minutes() -> i64 {
    25
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("week_start", &self.week_start)
            .field("default_minutes", &self.default_minutes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("brew.db"),
            week_start: WeekStart::default(),
            default_minutes: default_minutes(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BREW_*)
        figment = figment.merge(Env::prefixed("BREW_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for brew.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("brew"))
}

/// Returns the platform-specific data directory for brew.
///
/// On Linux: `~/.local/share/brew`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("brew"))
}
