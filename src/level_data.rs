//! Level document shape
//!
//! Levels are JSON documents laid out on a grid. Every coordinate below is in
//! grid units; `layout.scale` converts them to pixels when the level is built.
//!
//! ```json
//! {
//!   "layout": { "scale": 64, "size": [40, 9], "start": [2, 5], "goal": 37 },
//!   "physics": { "gravity": 1, "terminal_velocity": 32 },
//!   "tiles": { "midground": [], "main": [[0, 8, "Grass"]], "foreground": [] },
//!   "items": [[5, 5, "Gem"]],
//!   "enemies": [[9, 7, "BasicEnemy"]]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::sim::{EnemyKind, ItemKind, TileKind};

/// `[x, y, kind]` triple
pub type Placement<K> = (i32, i32, K);

/// Goal region: a column (everything to its right) or an explicit rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalSpec {
    Column(i32),
    Rect([i32; 4]),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Pixels per grid unit
    pub scale: i32,
    /// `[width, height]`
    pub size: [i32; 2],
    /// Player spawn `[x, y]`
    pub start: [i32; 2],
    pub goal: GoalSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Physics {
    /// Added to vertical velocity every frame
    pub gravity: i32,
    /// Maximum downward velocity
    pub terminal_velocity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayers {
    /// Decor drawn behind the actors
    pub midground: Vec<Placement<TileKind>>,
    /// Solid tiles
    pub main: Vec<Placement<TileKind>>,
    /// Decor drawn in front of the actors
    pub foreground: Vec<Placement<TileKind>>,
}

/// Presentation-only background settings, passed through to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub color: [u8; 3],
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub parallax_speed1: f32,
    #[serde(default)]
    pub parallax_speed2: f32,
}

/// A complete level document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub layout: Layout,
    pub physics: Physics,
    pub tiles: TileLayers,
    pub items: Vec<Placement<ItemKind>>,
    pub enemies: Vec<Placement<EnemyKind>>,
    /// Music track for the audio collaborator
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub background: Option<Background>,
}

impl LevelData {
    /// Parse a level document; `level` names it in errors
    pub fn from_json(json: &str, level: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|source| LoadError::Malformed {
            level: level.to_string(),
            source,
        })
    }

    /// Read and parse a level file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let level = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            level: level.clone(),
            source,
        })?;
        let data = Self::from_json(&json, &level)?;
        log::info!(
            "Loaded {}: {}x{} cells, {} solid tiles, {} items, {} enemies",
            level,
            data.layout.size[0],
            data.layout.size[1],
            data.tiles.main.len(),
            data.items.len(),
            data.enemies.len()
        );
        Ok(data)
    }
}
