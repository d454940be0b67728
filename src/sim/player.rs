//! The player character
//!
//! Created once per session; hearts and score carry across levels.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Rect, SpatialBody};
use super::collision::{is_grounded, resolve_movement};
use super::level::{Level, Tile};
use super::state::GameEvent;
use crate::consts::*;

/// Horizontal facing, used to mirror sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Which sprite the renderer should draw this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    /// Walk-cycle frame index
    Walk(usize),
    Jump,
    Hurt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: SpatialBody,
    pub facing: Facing,
    pub speed: i32,
    pub jump_power: i32,
    pub hearts: u32,
    /// Frames left during which damage cannot reapply
    pub hurt_timer: u32,
    pub score: u64,
    /// Recomputed every frame from goal containment
    pub reached_goal: bool,
    steps: u32,
    step_rate: u32,
    walk_index: usize,
    pub pose: Pose,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: SpatialBody::new(Rect::new(0, 0, 0, 0)),
            facing: Facing::Right,
            speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            hearts: PLAYER_HEARTS,
            hurt_timer: 0,
            score: 0,
            reached_goal: false,
            steps: 0,
            step_rate: PLAYER_STEP_RATE,
            walk_index: 0,
            pose: Pose::Idle,
        }
    }

    /// Place the player at a level's spawn point, sized to one grid cell.
    /// Only hearts, score and facing survive a respawn.
    pub fn spawn(&mut self, level: &Level) {
        self.body = SpatialBody::new(Rect {
            pos: level.spawn,
            size: IVec2::splat(level.scale),
        });
        self.hurt_timer = 0;
        self.reached_goal = false;
        self.steps = 0;
        self.walk_index = 0;
        self.pose = Pose::Idle;
    }

    pub fn walk_index(&self) -> usize {
        self.walk_index
    }

    fn step(&mut self) {
        self.steps = (self.steps + 1) % self.step_rate;
        if self.steps == 0 {
            self.walk_index = (self.walk_index + 1) % WALK_FRAMES;
        }
    }

    pub fn move_left(&mut self) {
        self.body.vel.x = -self.speed;
        self.facing = Facing::Left;
        self.step();
    }

    pub fn move_right(&mut self) {
        self.body.vel.x = self.speed;
        self.facing = Facing::Right;
        self.step();
    }

    /// Stop horizontal motion; the walk cycle keeps its place
    pub fn stop(&mut self) {
        self.body.vel.x = 0;
    }

    pub fn can_jump(&self, tiles: &[Tile]) -> bool {
        is_grounded(&self.body.rect, tiles)
    }

    /// Jump if standing on something; returns whether the jump happened
    pub fn jump(&mut self, tiles: &[Tile]) -> bool {
        if !self.can_jump(tiles) {
            return false;
        }
        self.body.vel.y = -self.jump_power;
        true
    }

    /// Advance one frame. The step order is fixed.
    pub fn update(&mut self, level: &mut Level, events: &mut Vec<GameEvent>) {
        self.body.apply_gravity(level.gravity, level.terminal_velocity);
        resolve_movement(&mut self.body, &level.solid);
        self.check_world_edges(level);
        self.process_items(level, events);
        self.process_enemies(level, events);
        self.reached_goal = level.goal.contains(&self.body.rect);
        self.pose = self.select_pose();
    }

    fn check_world_edges(&mut self, level: &Level) {
        let rect = &mut self.body.rect;
        if rect.left() < 0 {
            rect.set_left(0);
        } else if rect.right() > level.width {
            rect.set_right(level.width);
        }
    }

    fn process_items(&mut self, level: &mut Level, events: &mut Vec<GameEvent>) {
        for item in level.take_items_overlapping(&self.body.rect) {
            item.apply(self);
            log::debug!("Collected {:?} (+{}), score {}", item.kind, item.value, self.score);
            events.push(GameEvent::ItemCollected {
                kind: item.kind,
                value: item.value,
                score: self.score,
            });
        }
    }

    fn process_enemies(&mut self, level: &Level, events: &mut Vec<GameEvent>) {
        if self.hurt_timer > 0 {
            self.hurt_timer -= 1;
            return;
        }
        if level.enemy_overlaps(&self.body.rect) {
            self.hearts = self.hearts.saturating_sub(1);
            self.hurt_timer = HURT_COOLDOWN_FRAMES;
            log::debug!("Player hurt, {} hearts left", self.hearts);
            events.push(GameEvent::PlayerHurt { hearts: self.hearts });
        }
    }

    fn select_pose(&self) -> Pose {
        if self.hurt_timer > 0 {
            Pose::Hurt
        } else if self.body.vel.y != 0 {
            Pose::Jump
        } else if self.body.vel.x == 0 {
            Pose::Idle
        } else {
            Pose::Walk(self.walk_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_data::LevelData;

    /// 10x5 world at scale 32 with a floor on row 4 and spawn at (2, 2)
    fn level_with(extra_items: &str, enemies: &str, goal: &str) -> Level {
        let json = format!(
            r#"{{
                "layout": {{ "scale": 32, "size": [10, 5], "start": [2, 2], "goal": {goal} }},
                "physics": {{ "gravity": 1, "terminal_velocity": 16 }},
                "tiles": {{
                    "midground": [],
                    "main": [[0, 4, "Grass"], [1, 4, "Grass"], [2, 4, "Grass"], [3, 4, "Grass"],
                             [4, 4, "Grass"], [5, 4, "Grass"], [6, 4, "Grass"], [7, 4, "Grass"],
                             [8, 4, "Grass"], [9, 4, "Grass"]],
                    "foreground": []
                }},
                "items": [{extra_items}],
                "enemies": [{enemies}]
            }}"#
        );
        let data = LevelData::from_json(&json, "test").unwrap();
        Level::from_data(&data, "test").unwrap()
    }

    fn spawned(level: &Level) -> Player {
        let mut player = Player::new();
        player.spawn(level);
        player
    }

    /// Drop the player onto the floor
    fn settle(player: &mut Player, level: &mut Level) {
        let mut events = Vec::new();
        for _ in 0..30 {
            player.update(level, &mut events);
        }
        assert_eq!(player.body.rect.bottom(), 128);
    }

    #[test]
    fn test_falls_and_lands() {
        let mut level = level_with("", "", "8");
        let mut player = spawned(&level);
        assert!(!player.can_jump(&level.solid));

        settle(&mut player, &mut level);
        assert_eq!(player.body.vel.y, 0);
        assert_eq!(player.pose, Pose::Idle);
        assert!(player.can_jump(&level.solid));
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut level = level_with("", "", "8");
        let mut player = spawned(&level);
        assert!(!player.jump(&level.solid));
        assert_eq!(player.body.vel.y, 0);

        settle(&mut player, &mut level);
        assert!(player.jump(&level.solid));
        assert_eq!(player.body.vel.y, -PLAYER_JUMP_POWER);

        let mut events = Vec::new();
        player.update(&mut level, &mut events);
        assert_eq!(player.pose, Pose::Jump);
        assert!(player.body.rect.bottom() < 128);
    }

    #[test]
    fn test_walk_cycle_and_facing() {
        let mut level = level_with("", "", "8");
        let mut player = spawned(&level);
        settle(&mut player, &mut level);
        let mut events = Vec::new();

        for _ in 0..PLAYER_STEP_RATE {
            player.move_right();
            player.update(&mut level, &mut events);
        }
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(player.pose, Pose::Walk(1));

        player.move_left();
        player.stop();
        player.update(&mut level, &mut events);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.pose, Pose::Idle);
        // Stopping keeps the cycle position
        assert_eq!(player.walk_index(), 1);
    }

    #[test]
    fn test_world_edges_clamp() {
        let mut level = level_with("", "", "8");
        let mut player = spawned(&level);
        settle(&mut player, &mut level);
        let mut events = Vec::new();

        for _ in 0..20 {
            player.move_left();
            player.update(&mut level, &mut events);
        }
        assert_eq!(player.body.rect.left(), 0);

        for _ in 0..40 {
            player.move_right();
            player.update(&mut level, &mut events);
        }
        assert_eq!(player.body.rect.right(), level.width);
    }

    #[test]
    fn test_item_picked_up_once() {
        let mut level = level_with("[2, 3, \"Gem\"]", "", "8");
        let mut player = spawned(&level);
        let mut events = Vec::new();

        for _ in 0..30 {
            player.update(&mut level, &mut events);
        }
        assert_eq!(player.score, 10);
        assert!(level.items.is_empty());
        let pickups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ItemCollected { .. }))
            .count();
        assert_eq!(pickups, 1);
    }

    #[test]
    fn test_hurt_cooldown_blocks_repeat_damage() {
        // Enemy sits on the spawn column; it never moves in this test
        let mut level = level_with("", "[2, 3, \"BasicEnemy\"]", "8");
        let mut player = spawned(&level);
        let mut events = Vec::new();

        // Fall until the first hit
        while player.hearts == PLAYER_HEARTS {
            player.update(&mut level, &mut events);
        }
        assert_eq!(player.hearts, PLAYER_HEARTS - 1);
        assert_eq!(player.hurt_timer, HURT_COOLDOWN_FRAMES);
        assert_eq!(player.pose, Pose::Hurt);

        for _ in 0..HURT_COOLDOWN_FRAMES - 1 {
            player.update(&mut level, &mut events);
            assert!(level.enemy_overlaps(&player.body.rect));
            assert_eq!(player.hearts, PLAYER_HEARTS - 1);
        }

        // Cooldown runs out, then continued contact hurts again
        player.update(&mut level, &mut events);
        player.update(&mut level, &mut events);
        assert_eq!(player.hearts, PLAYER_HEARTS - 2);
    }

    #[test]
    fn test_goal_containment() {
        let mut level = level_with("", "", "[2, 0, 2, 4]");
        let mut player = spawned(&level);
        let mut events = Vec::new();

        player.update(&mut level, &mut events);
        assert!(player.reached_goal);

        player.move_left();
        player.update(&mut level, &mut events);
        // Partially outside the goal
        assert!(!player.reached_goal);
    }

    #[test]
    fn test_free_fall_is_clamped_each_frame() {
        // No floor under the spawn column: use an empty tile set
        let json = r#"{
            "layout": { "scale": 32, "size": [10, 5], "start": [2, 2], "goal": 8 },
            "physics": { "gravity": 1, "terminal_velocity": 16 },
            "tiles": { "midground": [], "main": [], "foreground": [] },
            "items": [],
            "enemies": []
        }"#;
        let data = LevelData::from_json(json, "fall").unwrap();
        let mut level = Level::from_data(&data, "fall").unwrap();
        let mut player = spawned(&level);
        assert_eq!(player.body.rect.pos, IVec2::new(64, 64));

        let mut events = Vec::new();
        let mut expected_y = 64;
        for frame in 1..=20 {
            player.update(&mut level, &mut events);
            expected_y += frame.min(16);
        }
        assert_eq!(player.body.vel.y, 16);
        assert_eq!(player.body.rect.top(), expected_y);
        assert_eq!(expected_y, 64 + 136 + 64);
    }
}
