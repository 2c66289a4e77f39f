//! Configuration management for studyflow

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::transition::TransitionTimings;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Animation speed multiplier (1.0 = normal, 0.0 = instant)
    pub animation_speed: f32,

    /// Vim mode enabled
    pub vim_mode: bool,

    /// Section fade durations
    #[serde(default)]
    pub transitions: TransitionConfig,
}

/// Fade durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub exit_ms: u64,
    pub entry_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { exit_ms: 400, entry_ms: 500 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            animation_speed: 1.0,
            vim_mode: true,
            transitions: TransitionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config {:?}", path))
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "studyflow")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the active theme: custom overrides win, then the named built-in
    pub fn active_theme(&self) -> Theme {
        if let Some(custom) = &self.custom_theme {
            return custom.clone();
        }
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "Unknown theme, using the default");
            Theme::default()
        })
    }

    /// Fade durations with the animation speed applied
    pub fn timings(&self) -> TransitionTimings {
        TransitionTimings {
            exit: Duration::from_millis(self.transitions.exit_ms),
            entry: Duration::from_millis(self.transitions.entry_ms),
        }
        .scaled(self.animation_speed)
    }
}
