//! Side Scroller headless runner
//!
//! Plays the configured level sequence with an autopilot and logs the HUD.
//!
//! Usage:
//!   side-scroller                               # default settings, run until won, lost or stuck
//!   side-scroller --level a.json --level b.json # explicit level sequence
//!   side-scroller --frames 600 --realtime       # 20 seconds at 30 fps, paced

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use side_scroller::audio::{AudioManager, LogSink};
use side_scroller::driver::{Autopilot, FrameDriver, Presenter};
use side_scroller::sim::{Game, GameEvent, Stage};
use side_scroller::{LevelData, Settings};

#[derive(Parser)]
#[command(name = "side-scroller")]
#[command(about = "Headless runner for the side-scrolling platformer")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Level file; repeat to build the sequence (overrides settings)
    #[arg(long = "level")]
    levels: Vec<PathBuf>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Pace frames to the configured fps instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Logs the HUD once per simulated second and routes audio cues
struct LogPresenter {
    audio: AudioManager<LogSink>,
    hud_every: u64,
    frame: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, game: &Game, events: &[GameEvent]) {
        self.audio.handle(events, game.level.music.as_deref());

        for event in events {
            match event {
                GameEvent::LevelStarted { level } => log::info!("Level {} started", level),
                GameEvent::GameWon { score } => log::info!("You win! Score {}", score),
                GameEvent::GameLost { score } => log::info!("Game over. Score {}", score),
                _ => {}
            }
        }

        self.frame += 1;
        if self.frame % self.hud_every == 0 && game.state.stage == Stage::Playing {
            let hud = game.hud();
            log::info!(
                "level {} | score {} | hearts {} | x {}",
                hud.level,
                hud.score,
                hud.hearts,
                game.player.body.rect.left()
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.settings.as_deref());
    if !cli.levels.is_empty() {
        settings.levels = cli.levels;
    }
    log::info!("{} starting...", settings.title);

    let documents = settings
        .levels
        .iter()
        .map(|path| -> Result<(String, LevelData)> {
            let data = LevelData::load(path)?;
            Ok((path.display().to_string(), data))
        })
        .collect::<Result<Vec<_>>>()
        .context("Failed to load levels")?;
    let game = Game::from_data(documents).context("Invalid level sequence")?;

    let presenter = LogPresenter {
        audio: AudioManager::new(LogSink),
        hud_every: u64::from(settings.fps.max(1)),
        frame: 0,
    };
    let mut driver = FrameDriver::new(game, Autopilot::default(), presenter);
    if cli.realtime {
        driver = driver.with_frame_duration(settings.frame_duration());
    }

    let frames = driver.run(cli.frames);
    let game = driver.into_game();
    let hud = game.hud();
    log::info!(
        "Stopped after {} frames: {:?} on level {}/{}, score {}, hearts {}",
        frames,
        hud.stage,
        hud.level,
        game.level_count(),
        hud.score,
        hud.hearts
    );
    Ok(())
}
