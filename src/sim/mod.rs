//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Integer pixel geometry
//! - Stable update order (player, then enemies in level order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod enemy;
pub mod item;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{Rect, SpatialBody};
pub use collision::{
    Blocked, LedgeCheck, is_grounded, resolve_horizontal, resolve_movement, resolve_vertical,
    resolve_vertical_ledge_aware,
};
pub use enemy::{Enemy, EnemyKind, WorldView};
pub use item::{Item, ItemKind};
pub use level::{Layer, Level, Tile, TileKind};
pub use player::{Facing, Player, Pose};
pub use state::{Game, GameEvent, GameState, Hud, Stage};
pub use tick::{Movement, TickInput, advance, restart, start_level, tick};
