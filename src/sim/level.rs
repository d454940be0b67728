//! Level world: static tiles, pickups, enemies, goal and physics constants
//!
//! A `Level` is built once from `LevelData` and replaced wholesale on level
//! change or restart. During play only its item and enemy collections change.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::enemy::{Enemy, EnemyKind};
use super::item::{Item, ItemKind};
use crate::error::LoadError;
use crate::level_data::{Background, GoalSpec, LevelData, Placement};

/// Visual tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Platform,
    Plant,
    FlagTop,
    FlagPole,
}

/// Render layer a tile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    /// Drawn behind the actors, never collides
    Midground,
    /// Solid, participates in collision
    Main,
    /// Drawn in front of the actors, never collides
    Foreground,
}

/// An immutable grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub rect: Rect,
    pub kind: TileKind,
}

/// One playable level
#[derive(Debug, Clone)]
pub struct Level {
    /// Identifier used in logs and errors (usually the file path)
    pub id: String,
    /// Pixels per grid unit
    pub scale: i32,
    /// World size in pixels
    pub width: i32,
    pub height: i32,
    /// Player spawn in pixels
    pub spawn: IVec2,
    pub gravity: i32,
    pub terminal_velocity: i32,
    pub midground: Vec<Tile>,
    pub solid: Vec<Tile>,
    pub foreground: Vec<Tile>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub goal: Rect,
    pub music: Option<String>,
    pub background: Option<Background>,
}

/// Grid-to-pixel conversion that refuses to overflow
fn to_pixels(value: i32, scale: i32, level: &str, field: &'static str) -> Result<i32, LoadError> {
    value
        .checked_mul(scale)
        .ok_or_else(|| LoadError::invalid(level, field, format!("{value} x {scale} overflows")))
}

impl Level {
    /// Build a level from its document, validating every field the
    /// simulation depends on
    pub fn from_data(data: &LevelData, id: &str) -> Result<Self, LoadError> {
        let layout = &data.layout;
        let scale = layout.scale;
        if scale <= 0 {
            return Err(LoadError::invalid(id, "layout.scale", format!("must be positive, got {scale}")));
        }

        let [cols, rows] = layout.size;
        if cols <= 0 || rows <= 0 {
            return Err(LoadError::invalid(
                id,
                "layout.size",
                format!("must be positive, got [{cols}, {rows}]"),
            ));
        }
        let width = to_pixels(cols, scale, id, "layout.size")?;
        let height = to_pixels(rows, scale, id, "layout.size")?;

        let [sx, sy] = layout.start;
        if !(0..cols).contains(&sx) || !(0..rows).contains(&sy) {
            return Err(LoadError::invalid(
                id,
                "layout.start",
                format!("[{sx}, {sy}] lies outside the {cols}x{rows} world"),
            ));
        }
        let spawn = IVec2::new(sx * scale, sy * scale);

        let physics = &data.physics;
        if physics.gravity < 0 {
            return Err(LoadError::invalid(id, "physics.gravity", "must not be negative"));
        }
        if physics.terminal_velocity < 0 {
            return Err(LoadError::invalid(id, "physics.terminal_velocity", "must not be negative"));
        }

        let goal = match layout.goal {
            GoalSpec::Column(col) => {
                if !(0..cols).contains(&col) {
                    return Err(LoadError::invalid(
                        id,
                        "layout.goal",
                        format!("column {col} lies outside the world"),
                    ));
                }
                let x = col * scale;
                Rect::new(x, 0, width - x, height)
            }
            GoalSpec::Rect([x, y, w, h]) => {
                if w <= 0 || h <= 0 {
                    return Err(LoadError::invalid(
                        id,
                        "layout.goal",
                        format!("rectangle size must be positive, got [{w}, {h}]"),
                    ));
                }
                let fits = |start: i32, len: i32, limit: i32| {
                    start >= 0 && start.checked_add(len).is_some_and(|end| end <= limit)
                };
                if !fits(x, w, cols) || !fits(y, h, rows) {
                    return Err(LoadError::invalid(
                        id,
                        "layout.goal",
                        format!("[{x}, {y}, {w}, {h}] lies outside the {cols}x{rows} world"),
                    ));
                }
                Rect::new(x * scale, y * scale, w * scale, h * scale)
            }
        };

        // Every placement is one cell inside the grid, so pixel edges never
        // exceed `width`/`height`
        let cell = |x: i32, y: i32, field: &'static str| -> Result<Rect, LoadError> {
            if !(0..cols).contains(&x) || !(0..rows).contains(&y) {
                return Err(LoadError::invalid(
                    id,
                    field,
                    format!("[{x}, {y}] lies outside the {cols}x{rows} world"),
                ));
            }
            Ok(Rect::new(x * scale, y * scale, scale, scale))
        };

        let build_layer = |placements: &[Placement<TileKind>], field: &'static str| {
            placements
                .iter()
                .map(|&(x, y, kind)| -> Result<Tile, LoadError> {
                    Ok(Tile { rect: cell(x, y, field)?, kind })
                })
                .collect::<Result<Vec<_>, LoadError>>()
        };

        let items = data
            .items
            .iter()
            .map(|&(x, y, kind): &Placement<ItemKind>| -> Result<Item, LoadError> {
                Ok(Item::new(cell(x, y, "items")?, kind))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let enemies = data
            .enemies
            .iter()
            .map(|&(x, y, kind): &Placement<EnemyKind>| -> Result<Enemy, LoadError> {
                Ok(Enemy::new(cell(x, y, "enemies")?, kind))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(Self {
            id: id.to_string(),
            scale,
            width,
            height,
            spawn,
            gravity: physics.gravity,
            terminal_velocity: physics.terminal_velocity,
            midground: build_layer(&data.tiles.midground, "tiles.midground")?,
            solid: build_layer(&data.tiles.main, "tiles.main")?,
            foreground: build_layer(&data.tiles.foreground, "tiles.foreground")?,
            items,
            enemies,
            goal,
            music: data.music.clone(),
            background: data.background.clone(),
        })
    }

    /// Tiles of one render layer
    pub fn layer(&self, layer: Layer) -> &[Tile] {
        match layer {
            Layer::Midground => &self.midground,
            Layer::Main => &self.solid,
            Layer::Foreground => &self.foreground,
        }
    }

    /// Remove and return every item overlapping `rect`
    ///
    /// Removal is what makes pickup at-most-once.
    pub fn take_items_overlapping(&mut self, rect: &Rect) -> Vec<Item> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].body.rect.overlaps(rect) {
                taken.push(self.items.remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    /// True if any enemy overlaps `rect`
    pub fn enemy_overlaps(&self, rect: &Rect) -> bool {
        self.enemies.iter().any(|e| e.body.rect.overlaps(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../assets/levels/level_1.json");

    fn data(json: &str) -> LevelData {
        LevelData::from_json(json, "test").unwrap()
    }

    fn minimal(layout: &str, physics: &str) -> String {
        format!(
            r#"{{
                "layout": {layout},
                "physics": {physics},
                "tiles": {{
                    "midground": [[0, 0, "Plant"]],
                    "main": [[0, 4, "Grass"], [1, 4, "Dirt"]],
                    "foreground": []
                }},
                "items": [[2, 2, "Gem"]],
                "enemies": [[3, 3, "BasicEnemy"], [1, 3, "PlatformEnemy"]]
            }}"#
        )
    }

    #[test]
    fn test_scaled_geometry() {
        let json = minimal(
            r#"{ "scale": 32, "size": [10, 5], "start": [2, 2], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let level = Level::from_data(&data(&json), "test").unwrap();

        assert_eq!(level.width, 320);
        assert_eq!(level.height, 160);
        assert_eq!(level.spawn, IVec2::new(64, 64));
        assert_eq!(level.goal, Rect::new(256, 0, 64, 160));
        assert_eq!(level.solid[1].rect, Rect::new(32, 128, 32, 32));
        assert_eq!(level.layer(Layer::Midground).len(), 1);
        assert_eq!(level.layer(Layer::Main).len(), 2);
        assert!(level.layer(Layer::Foreground).is_empty());
        assert_eq!(level.items.len(), 1);
        assert_eq!(level.enemies.len(), 2);
        assert_eq!(level.enemies[1].kind, EnemyKind::LedgeAware);
    }

    #[test]
    fn test_goal_rectangle() {
        let json = minimal(
            r#"{ "scale": 10, "size": [10, 5], "start": [0, 0], "goal": [7, 1, 2, 3] }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let level = Level::from_data(&data(&json), "test").unwrap();
        assert_eq!(level.goal, Rect::new(70, 10, 20, 30));
    }

    #[test]
    fn test_invalid_scale() {
        let json = minimal(
            r#"{ "scale": 0, "size": [10, 5], "start": [0, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let err = Level::from_data(&data(&json), "lvl-3").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { field: "layout.scale", .. }));
        assert_eq!(err.level(), Some("lvl-3"));
    }

    #[test]
    fn test_spawn_outside_world() {
        let json = minimal(
            r#"{ "scale": 32, "size": [10, 5], "start": [12, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let err = Level::from_data(&data(&json), "test").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { field: "layout.start", .. }));
    }

    #[test]
    fn test_negative_terminal_velocity() {
        let json = minimal(
            r#"{ "scale": 32, "size": [10, 5], "start": [0, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": -2 }"#,
        );
        let err = Level::from_data(&data(&json), "test").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { field: "physics.terminal_velocity", .. }));
    }

    #[test]
    fn test_overflowing_coordinates() {
        let json = minimal(
            r#"{ "scale": 1000000, "size": [10000, 5], "start": [0, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let err = Level::from_data(&data(&json), "test").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { field: "layout.size", .. }));
    }

    #[test]
    fn test_goal_must_fit_in_world() {
        for goal in ["[1, 0, 2147483647, 5]", "[8, 0, 3, 5]", "[0, -1, 2, 2]", "[0, 4, 1, 2]"] {
            let json = minimal(
                &format!(r#"{{ "scale": 1, "size": [10, 5], "start": [0, 0], "goal": {goal} }}"#),
                r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
            );
            let err = Level::from_data(&data(&json), "test").unwrap_err();
            assert!(
                matches!(err, LoadError::Invalid { field: "layout.goal", .. }),
                "goal {goal}: {err:?}"
            );
        }

        // Flush with the far corner is fine
        let json = minimal(
            r#"{ "scale": 1, "size": [10, 5], "start": [0, 0], "goal": [8, 3, 2, 2] }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let level = Level::from_data(&data(&json), "test").unwrap();
        assert_eq!(level.goal.right(), level.width);
        assert_eq!(level.goal.bottom(), level.height);
    }

    #[test]
    fn test_placement_outside_world() {
        let json = minimal(
            r#"{ "scale": 32, "size": [10, 5], "start": [0, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        )
        .replace(r#"[[2, 2, "Gem"]]"#, r#"[[2, 2, "Gem"], [2147483647, 0, "Gem"]]"#);
        let err = Level::from_data(&data(&json), "test").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { field: "items", .. }));
    }

    #[test]
    fn test_take_items_once() {
        let json = minimal(
            r#"{ "scale": 32, "size": [10, 5], "start": [0, 0], "goal": 8 }"#,
            r#"{ "gravity": 1, "terminal_velocity": 16 }"#,
        );
        let mut level = Level::from_data(&data(&json), "test").unwrap();
        let probe = Rect::new(70, 70, 32, 32);

        assert_eq!(level.take_items_overlapping(&probe).len(), 1);
        assert!(level.take_items_overlapping(&probe).is_empty());
        assert!(level.items.is_empty());
    }

    #[test]
    fn test_sample_level_builds() {
        let level = Level::from_data(&data(SAMPLE), "level_1").unwrap();
        assert_eq!(level.width, 40 * 64);
        assert!(level.music.is_some());
        assert!(level.background.is_some());
    }
}
