//! Run configuration
//!
//! Read from a JSON file; every field is optional and a missing or broken
//! file falls back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window/log title
    pub title: String,
    /// Target frame rate
    pub fps: u32,
    /// Level files, played in order
    pub levels: Vec<PathBuf>,
    /// Draw the tile grid (render hint only)
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Side Scroller".to_string(),
            fps: TARGET_FPS,
            levels: vec![PathBuf::from("assets/levels/level_1.json"); 3],
            show_grid: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when there is none
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring settings in {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.fps == 0 {
            log::warn!("fps must be positive, using {}", TARGET_FPS);
            settings.fps = TARGET_FPS;
        }
        log::info!("Loaded settings ({} levels @ {} fps)", settings.levels.len(), settings.fps);
        Ok(settings)
    }

    /// Wall-clock length of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
