//! Walking enemies
//!
//! Both kinds walk at a fixed speed, fall under gravity, and turn around on
//! hitting a tile or a world edge. They differ only in the vertical step:
//! - `Patrol` falls off platform ends
//! - `LedgeAware` turns around when its leading edge passes the end of the
//!   tile it is standing on

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Rect, SpatialBody};
use super::collision::{resolve_horizontal, resolve_vertical, resolve_vertical_ledge_aware};
use super::level::Tile;
use crate::consts::{ENEMY_SPEED, ENEMY_STEP_RATE, WALK_FRAMES};

/// Enemy kinds, named as they appear in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    #[serde(rename = "BasicEnemy")]
    Patrol,
    #[serde(rename = "PlatformEnemy")]
    LedgeAware,
}

/// Static world facts an enemy needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub solid: &'a [Tile],
    pub width: i32,
    pub gravity: i32,
    pub terminal_velocity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: SpatialBody,
    pub kind: EnemyKind,
    /// Signed horizontal speed; the sign is the walking direction
    pub speed: i32,
    steps: u32,
    step_rate: u32,
    walk_index: usize,
}

impl Enemy {
    pub fn new(rect: Rect, kind: EnemyKind) -> Self {
        Self {
            body: SpatialBody::new(rect),
            kind,
            speed: -ENEMY_SPEED,
            steps: 0,
            step_rate: ENEMY_STEP_RATE,
            walk_index: 0,
        }
    }

    /// Current walk-cycle frame
    pub fn walk_index(&self) -> usize {
        self.walk_index
    }

    /// Advance one frame
    pub fn update(&mut self, world: &WorldView<'_>) {
        self.body.apply_gravity(world.gravity, world.terminal_velocity);
        self.body.vel.x = self.speed;

        let mut should_reverse = resolve_horizontal(&mut self.body, world.solid);

        match self.kind {
            EnemyKind::Patrol => {
                resolve_vertical(&mut self.body, world.solid);
            }
            EnemyKind::LedgeAware => {
                let check =
                    resolve_vertical_ledge_aware(&mut self.body, world.solid, self.speed.signum());
                should_reverse |= check.at_ledge;
            }
        }

        should_reverse |= self.check_world_edges(world.width);

        if should_reverse {
            self.speed = -self.speed;
        }
        self.body.vel.x = self.speed;

        self.step();
    }

    /// Clamp into the world; true if an edge was touched
    fn check_world_edges(&mut self, width: i32) -> bool {
        let rect = &mut self.body.rect;
        if rect.left() < 0 {
            rect.set_left(0);
            true
        } else if rect.right() > width {
            rect.set_right(width);
            true
        } else {
            false
        }
    }

    fn step(&mut self) {
        self.steps = (self.steps + 1) % self.step_rate;
        if self.steps == 0 {
            self.walk_index = (self.walk_index + 1) % WALK_FRAMES;
        }
    }

    /// Direction of travel as a unit vector on x
    pub fn heading(&self) -> IVec2 {
        IVec2::new(self.speed.signum(), 0)
    }
}
