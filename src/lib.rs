//! Side Scroller - a tile-based 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, entities, game stages)
//! - `level_data`: Level document shape and file loading
//! - `settings`: Run configuration
//! - `audio`: Sound/music cue mapping from simulation events
//! - `driver`: Fixed-rate frame loop (input -> simulate -> present)

pub mod audio;
pub mod driver;
pub mod error;
pub mod level_data;
pub mod settings;
pub mod sim;

pub use error::LoadError;
pub use level_data::LevelData;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default simulation frame rate
    pub const TARGET_FPS: u32 = 30;

    /// Player horizontal speed (pixels/frame)
    pub const PLAYER_SPEED: i32 = 12;
    /// Instantaneous upward velocity granted by a jump
    pub const PLAYER_JUMP_POWER: i32 = 26;
    /// Frames between walk-cycle advances for the player
    pub const PLAYER_STEP_RATE: u32 = 4;
    /// Hearts at the start of a session
    pub const PLAYER_HEARTS: u32 = 3;
    /// Frames of invulnerability after taking damage
    pub const HURT_COOLDOWN_FRAMES: u32 = 30;

    /// Enemy horizontal speed; enemies start walking left
    pub const ENEMY_SPEED: i32 = 4;
    /// Frames between walk-cycle advances for enemies
    pub const ENEMY_STEP_RATE: u32 = 6;

    /// Number of frames in every walk cycle
    pub const WALK_FRAMES: usize = 2;

    /// Points awarded for a gem
    pub const GEM_VALUE: u64 = 10;

    /// Distance of the downward support probe (pixels)
    pub const PROBE_DISTANCE: i32 = 2;

    /// Frames spent on the cleared screen before the next level
    pub const LEVEL_CHANGE_DELAY: u32 = 90;
}
