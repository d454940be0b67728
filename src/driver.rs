//! Frame driver
//!
//! A plain synchronous loop: poll input, tick the simulation once, hand the
//! frame to the presenter. Quit is checked once per frame, before the tick.

use std::time::{Duration, Instant};

use glam::IVec2;

use crate::sim::{Game, GameEvent, Movement, Stage, TickInput, tick};

/// Supplies one frame of input
pub trait InputSource {
    fn poll(&mut self, game: &Game) -> TickInput;
}

/// Consumes a simulated frame (rendering, audio, HUD)
pub trait Presenter {
    fn present(&mut self, game: &Game, events: &[GameEvent]);
}

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _game: &Game) -> TickInput {
        let input = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Frames the autopilot may go without passing its furthest x before it
/// gives up (ten seconds at the default rate)
pub const AUTOPILOT_STALL_FRAMES: u32 = 300;

/// Hands-off player: begins the game, holds right, jumps when a wall stops
/// it, and quits once the game is won or lost. It also quits when the player
/// drops out of the world or stops making progress.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last_pos: Option<IVec2>,
    best_x: Option<i32>,
    stalled: u32,
}

impl Autopilot {
    fn reset(&mut self) {
        self.last_pos = None;
        self.best_x = None;
        self.stalled = 0;
    }

    fn quit() -> TickInput {
        TickInput {
            quit: true,
            ..Default::default()
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, game: &Game) -> TickInput {
        match game.state.stage {
            Stage::Start => {
                self.reset();
                TickInput {
                    confirm: true,
                    ..Default::default()
                }
            }
            Stage::Playing => {
                let pos = game.player.body.rect.pos;
                if game.player.body.rect.top() > game.level.height {
                    log::warn!("Autopilot fell out of level {}", game.state.current_level);
                    return Self::quit();
                }

                if self.best_x.is_none_or(|best| pos.x > best) {
                    self.best_x = Some(pos.x);
                    self.stalled = 0;
                } else {
                    self.stalled += 1;
                    if self.stalled >= AUTOPILOT_STALL_FRAMES {
                        log::warn!("Autopilot stuck at x {} on level {}", pos.x, game.state.current_level);
                        return Self::quit();
                    }
                }

                let stuck = self.last_pos.is_some_and(|last| last.x == pos.x);
                self.last_pos = Some(pos);
                TickInput {
                    movement: Movement::Right,
                    jump: stuck,
                    ..Default::default()
                }
            }
            Stage::Cleared => {
                self.reset();
                TickInput::default()
            }
            Stage::Win | Stage::Lose => Self::quit(),
        }
    }
}

/// Presenter that ignores everything
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _game: &Game, _events: &[GameEvent]) {}
}

/// Owns the session and runs frames against an input source and presenter
pub struct FrameDriver<I, P> {
    game: Game,
    input: I,
    presenter: P,
    /// Wall-clock pacing; `None` runs as fast as possible
    frame_duration: Option<Duration>,
    frames: u64,
    running: bool,
}

impl<I: InputSource, P: Presenter> FrameDriver<I, P> {
    pub fn new(game: Game, input: I, presenter: P) -> Self {
        Self {
            game,
            input,
            presenter,
            frame_duration: None,
            frames: 0,
            running: true,
        }
    }

    /// Pace frames to a fixed wall-clock rate
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = Some(frame_duration);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Frames simulated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run a single frame; returns false once quit was requested
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let input = self.input.poll(&self.game);
        if input.quit {
            log::info!("Quit after {} frames", self.frames);
            self.running = false;
            return false;
        }

        tick(&mut self.game, &input);
        let events = self.game.take_events();
        self.presenter.present(&self.game, &events);
        self.frames += 1;
        true
    }

    /// Run until quit or until `max_frames` more frames have run.
    /// Returns the number of frames run by this call.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let start = self.frames;
        let mut deadline = Instant::now();

        while max_frames.is_none_or(|max| self.frames - start < max) {
            if !self.step() {
                break;
            }

            if let Some(frame) = self.frame_duration {
                deadline += frame;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                } else {
                    // Fell behind; don't try to catch up
                    deadline = now;
                }
            }
        }

        self.frames - start
    }

    pub fn into_game(self) -> Game {
        self.game
    }
}
