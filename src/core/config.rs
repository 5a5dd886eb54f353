use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::expression::ExpressionPolicy;
use super::render::ViewMode;

/// Shortest allowed metric sampling interval.
pub const MIN_METRIC_INTERVAL_MS: u64 = 100;
/// Shortest allowed animation frame interval.
pub const MIN_FRAME_INTERVAL_MS: u64 = 10;

/// Top-left corner of the overlay on the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Last overlay position, saved on close
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default)]
    pub policy: ExpressionPolicy,
    #[serde(default)]
    pub show_network: bool,
    #[serde(default = "default_metric_interval_ms")]
    pub metric_interval_ms: u64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_metric_interval_ms() -> u64 {
    1000
}

fn default_frame_interval_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            position: Position::default(),
            view: ViewMode::default(),
            policy: ExpressionPolicy::default(),
            show_network: false,
            metric_interval_ms: default_metric_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from `path`, falling back to defaults when the file is missing,
    /// empty or unreadable as JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.is_empty() {
            return Ok(Config::default());
        }

        let config = serde_json::from_slice::<Config>(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config file {:?}: {}", path, e);
            Config::default()
        });

        Ok(config.normalized())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("pc-emo").join("config.json"))
    }

    /// Clamp intervals to their minimums.
    pub fn normalized(mut self) -> Self {
        self.metric_interval_ms = self.metric_interval_ms.max(MIN_METRIC_INTERVAL_MS);
        self.frame_interval_ms = self.frame_interval_ms.max(MIN_FRAME_INTERVAL_MS);
        self
    }

    pub fn metric_interval(&self) -> Duration {
        Duration::from_millis(self.metric_interval_ms.max(MIN_METRIC_INTERVAL_MS))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(MIN_FRAME_INTERVAL_MS))
    }

    pub fn set_position(&mut self, x: u16, y: u16) {
        self.position = Position { x, y };
    }

    /// Reset everything except the saved position.
    pub fn reset_to_defaults(&mut self) {
        let position = self.position;
        *self = Config {
            position,
            ..Config::default()
        };
    }
}
