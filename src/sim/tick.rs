//! Fixed timestep simulation tick
//!
//! One call per frame: apply input for the current stage, simulate the
//! active entities, then run stage transitions.

use serde::{Deserialize, Serialize};

use super::enemy::WorldView;
use super::state::{Game, GameEvent, Stage};
use crate::consts::LEVEL_CHANGE_DELAY;

/// Held horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    None,
    Left,
    Right,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: Movement,
    /// Jump (edge-triggered)
    pub jump: bool,
    /// Begin on the title screen, restart after win/lose (edge-triggered)
    pub confirm: bool,
    /// Quit the game; handled by the frame driver
    pub quit: bool,
}

/// Advance the game by one frame
pub fn tick(game: &mut Game, input: &TickInput) {
    process_input(game, input);
    update(game);
}

fn process_input(game: &mut Game, input: &TickInput) {
    match game.state.stage {
        Stage::Start => {
            if input.confirm {
                start_level(game);
            }
        }
        Stage::Playing => {
            if input.jump && game.player.jump(&game.level.solid) {
                log::debug!("Jump");
                game.push_event(GameEvent::Jumped);
            }
        }
        Stage::Win | Stage::Lose => {
            if input.confirm {
                restart(game);
            }
        }
        Stage::Cleared => {}
    }

    if game.state.stage == Stage::Playing {
        match input.movement {
            Movement::Left => game.player.move_left(),
            Movement::Right => game.player.move_right(),
            Movement::None => game.player.stop(),
        }
    }
}

fn update(game: &mut Game) {
    match game.state.stage {
        Stage::Playing => {
            game.state.time_ticks += 1;
            simulate(game);

            if game.player.reached_goal {
                let level = game.state.current_level;
                log::info!("Level {} cleared, score {}", level, game.player.score);
                game.state.stage = Stage::Cleared;
                game.state.cleared_ticks = LEVEL_CHANGE_DELAY;
                game.push_event(GameEvent::MusicStopped);
                game.push_event(GameEvent::LevelCleared { level });
            } else if game.player.hearts == 0 {
                log::info!("Out of hearts on level {}", game.state.current_level);
                game.state.stage = Stage::Lose;
                game.push_event(GameEvent::MusicStopped);
                game.push_event(GameEvent::GameLost {
                    score: game.player.score,
                });
            }
        }
        Stage::Cleared => {
            game.state.cleared_ticks = game.state.cleared_ticks.saturating_sub(1);
            if game.state.cleared_ticks == 0 {
                advance(game);
            }
        }
        Stage::Start | Stage::Win | Stage::Lose => {}
    }
}

/// Update every active entity in order: player, then enemies.
/// Items have no per-frame behavior.
fn simulate(game: &mut Game) {
    let Game {
        player,
        level,
        events,
        ..
    } = game;

    player.update(level, events);

    let view = WorldView {
        solid: &level.solid,
        width: level.width,
        gravity: level.gravity,
        terminal_velocity: level.terminal_velocity,
    };
    for enemy in &mut level.enemies {
        enemy.update(&view);
    }
}

/// Enter play on the current level
pub fn start_level(game: &mut Game) {
    game.state.stage = Stage::Playing;
    game.push_event(GameEvent::MusicStarted);
    game.push_event(GameEvent::LevelStarted {
        level: game.state.current_level,
    });
}

/// Move to the next level, or win if the last one was cleared
pub fn advance(game: &mut Game) {
    if game.state.current_level < game.level_count() {
        game.state.current_level += 1;
        game.load_level();
        start_level(game);
    } else {
        log::info!("All levels cleared, final score {}", game.player.score);
        game.state.stage = Stage::Win;
        game.push_event(GameEvent::GameWon {
            score: game.player.score,
        });
    }
}

/// Full reset back to the title screen
pub fn restart(game: &mut Game) {
    log::info!("Restarting");
    game.setup();
}
