//! Game session state
//!
//! One `Game` lives for the whole process. It owns the player, the level
//! being played, and a pristine copy of every level in the sequence.

use serde::{Deserialize, Serialize};

use super::item::ItemKind;
use super::level::Level;
use super::player::Player;
use crate::error::LoadError;
use crate::level_data::LevelData;

/// Current screen/stage of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Title screen, waiting for the begin input
    Start,
    /// Active gameplay
    Playing,
    /// Level finished, counting down to the next one
    Cleared,
    /// Final level cleared
    Win,
    /// Out of hearts
    Lose,
}

/// Stage bookkeeping; only stage transitions mutate it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub stage: Stage,
    /// 1-based index into the level sequence
    pub current_level: usize,
    /// Frames left on the cleared screen
    pub cleared_ticks: u32,
    /// Frames simulated this session
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            stage: Stage::Start,
            current_level: 1,
            cleared_ticks: 0,
            time_ticks: 0,
        }
    }
}

/// Things that happened during a frame, for audio and UI cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    ItemCollected { kind: ItemKind, value: u64, score: u64 },
    PlayerHurt { hearts: u32 },
    LevelStarted { level: usize },
    LevelCleared { level: usize },
    GameWon { score: u64 },
    GameLost { score: u64 },
    MusicStarted,
    MusicStopped,
}

/// Values shown on the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub level: usize,
    pub score: u64,
    pub hearts: u32,
    pub stage: Stage,
}

/// The whole game session
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub player: Player,
    /// Level being played; rebuilt from `levels` on every load
    pub level: Level,
    levels: Vec<Level>,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// Build a session from already-validated levels
    pub fn new(levels: Vec<Level>) -> Result<Self, LoadError> {
        let first = levels.first().cloned().ok_or(LoadError::NoLevels)?;
        let mut game = Self {
            state: GameState::default(),
            player: Player::new(),
            level: first,
            levels,
            events: Vec::new(),
        };
        game.setup();
        Ok(game)
    }

    /// Validate every level document up front, then build the session
    pub fn from_data<I, S>(documents: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (S, LevelData)>,
        S: AsRef<str>,
    {
        let levels = documents
            .into_iter()
            .map(|(id, data)| Level::from_data(&data, id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }

    /// Fresh player, title stage, first level loaded
    pub fn setup(&mut self) {
        self.player = Player::new();
        self.state.stage = Stage::Start;
        self.state.current_level = 1;
        self.state.cleared_ticks = 0;
        self.load_level();
    }

    /// Replace the current level with a fresh copy and respawn the player
    pub fn load_level(&mut self) {
        let index = self.state.current_level - 1;
        self.level = self.levels[index].clone();
        self.player.spawn(&self.level);
        log::info!(
            "Level {}/{} loaded ({})",
            self.state.current_level,
            self.levels.len(),
            self.level.id
        );
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_final_level(&self) -> bool {
        self.state.current_level >= self.levels.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.state.current_level,
            score: self.player.score,
            hearts: self.player.hearts,
            stage: self.state.stage,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../assets/levels/level_1.json");

    fn sample(n: usize) -> Game {
        let docs = (1..=n).map(|i| {
            let id = format!("level_{i}");
            let data = LevelData::from_json(SAMPLE, &id).unwrap();
            (id, data)
        });
        Game::from_data(docs).unwrap()
    }

    #[test]
    fn test_new_game_waits_on_title() {
        let game = sample(3);
        assert_eq!(game.state.stage, Stage::Start);
        assert_eq!(game.state.current_level, 1);
        assert_eq!(game.level_count(), 3);
        assert!(!game.is_final_level());
        assert_eq!(game.player.body.rect.pos, game.level.spawn);
        assert_eq!(
            game.hud(),
            Hud { level: 1, score: 0, hearts: 3, stage: Stage::Start }
        );
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let err = Game::new(Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::NoLevels));
    }

    #[test]
    fn test_invalid_level_fails_before_play() {
        let good = LevelData::from_json(SAMPLE, "good").unwrap();
        let mut bad = good.clone();
        bad.layout.scale = -4;

        let err = Game::from_data([("good", good), ("bad", bad)]).unwrap_err();
        assert_eq!(err.level(), Some("bad"));
    }

    #[test]
    fn test_load_level_restores_pristine_copy() {
        let mut game = sample(1);
        let items = game.level.items.len();
        game.level.items.clear();
        game.player.body.rect.pos.x += 500;

        game.load_level();
        assert_eq!(game.level.items.len(), items);
        assert_eq!(game.player.body.rect.pos, game.level.spawn);
    }

    #[test]
    fn test_take_events_drains() {
        let mut game = sample(1);
        game.push_event(GameEvent::Jumped);
        assert_eq!(game.take_events(), vec![GameEvent::Jumped]);
        assert!(game.take_events().is_empty());
    }
}
