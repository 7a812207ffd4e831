//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment (`NOVA_*`)

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::desktop::DEFAULT_Z_BASELINE;
use crate::error::{ConfigError, Error, Result};
use crate::preview::{PreviewOptions, DEFAULT_HEAD_SCRIPT};
use crate::split::{
    SplitBounds, SplitPaneController, DEFAULT_MAX_RATIO, DEFAULT_MIN_RATIO, DEFAULT_RATIO,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the account store (defaults to the data directory)
    pub store_file: Option<PathBuf>,

    /// UI refresh rate in FPS (drives the taskbar clock)
    pub ui_refresh_fps: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path for TUI mode
    pub log_file: Option<PathBuf>,

    /// Window manager settings
    pub desktop: DesktopSettings,

    /// Editor/preview split settings
    pub split: SplitSettings,

    /// Preview compositor settings
    pub preview: PreviewSettings,
}

/// Window manager settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopSettings {
    /// Initial z-index shared by every window
    pub z_baseline: u64,

    /// Open the editor right after login
    pub auto_open_editor: bool,
}

/// Editor/preview split settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Ratio at session start, in percent
    pub default_ratio: f64,

    /// Smallest editor share, in percent
    pub min: f64,

    /// Largest editor share, in percent
    pub max: f64,
}

/// Preview compositor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// External scripts injected into every preview's `<head>`
    pub head_scripts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: None,
            ui_refresh_fps: 4,
            debug: false,
            log_file: None,
            desktop: DesktopSettings::default(),
            split: SplitSettings::default(),
            preview: PreviewSettings::default(),
        }
    }
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            z_baseline: DEFAULT_Z_BASELINE,
            auto_open_editor: true,
        }
    }
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            default_ratio: DEFAULT_RATIO,
            min: DEFAULT_MIN_RATIO,
            max: DEFAULT_MAX_RATIO,
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            head_scripts: vec![DEFAULT_HEAD_SCRIPT.to_string()],
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration with a specific config file
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables (NOVA_SPLIT__MIN, NOVA_DEBUG, etc.)
            .merge(Env::prefixed("NOVA_").split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the components cannot honour
    pub fn validate(&self) -> Result<()> {
        self.split_bounds()?;

        if self.ui_refresh_fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ui_refresh_fps".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Validated split bounds
    pub fn split_bounds(&self) -> Result<SplitBounds> {
        SplitBounds::new(self.split.min, self.split.max).map_err(|e| {
            Error::Config(ConfigError::InvalidValue {
                key: "split".to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Split controller configured from these settings
    pub fn split_controller(&self) -> Result<SplitPaneController> {
        Ok(SplitPaneController::new(
            self.split.default_ratio,
            self.split_bounds()?,
        ))
    }

    /// Compositor options configured from these settings
    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            head_scripts: self.preview.head_scripts.clone(),
        }
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the account store path
    pub fn store_file_path(&self) -> Result<PathBuf> {
        match &self.store_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("accounts.json")),
        }
    }

    /// Get the log file path for TUI mode
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("nova-desk.log")),
        }
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        let dirs = Self::project_dirs()?;

        std::fs::create_dir_all(dirs.config_dir()).map_err(|_e| {
            Error::Config(ConfigError::DirectoryCreationFailed(
                dirs.config_dir().to_path_buf(),
            ))
        })?;

        std::fs::create_dir_all(dirs.data_dir()).map_err(|_e| {
            Error::Config(ConfigError::DirectoryCreationFailed(
                dirs.data_dir().to_path_buf(),
            ))
        })?;

        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(&config_path, toml)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "nova-desk", "nova-desk").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.desktop.z_baseline, 10);
        assert!(config.desktop.auto_open_editor);
        assert_eq!(config.split.default_ratio, 50.0);
        assert_eq!(config.split.min, 10.0);
        assert_eq!(config.split.max, 90.0);
        assert_eq!(config.preview.head_scripts, vec![DEFAULT_HEAD_SCRIPT.to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[split]"));
        assert!(toml.contains("z_baseline"));
        assert!(toml.contains("cdn.tailwindcss.com"));
    }

    #[test]
    fn test_load_from_file_layers_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[split]\nmin = 20.0\n\n[preview]\nhead_scripts = []\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.split.min, 20.0);
        assert_eq!(config.split.max, 90.0);
        assert!(config.preview.head_scripts.is_empty());
        assert!(config.preview_options().head_scripts.is_empty());
    }

    #[test]
    fn test_invalid_split_bounds_rejected() {
        let mut config = Config::default();
        config.split.min = 95.0;
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_split_controller_from_config() {
        let mut config = Config::default();
        config.split.default_ratio = 5.0;
        let split = config.split_controller().unwrap();
        assert_eq!(split.ratio(), 10.0);
    }
}
