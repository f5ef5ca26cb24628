//! Session loop: a gravity clock and an input queue driving one engine.
//!
//! Both sources feed the engine from a single task, so commands never
//! interleave. The clock starts after a new game, is suspended while paused,
//! and stops at game over.

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;

use crate::config::SessionConfig;
use crate::core::GameEngine;
use crate::types::{Command, GameStatus};

/// Something the session can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    NewGame,
    Quit,
}

/// What happened during one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games: u32,
    /// Clock steps delivered to the engine
    pub ticks: u64,
    /// Commands delivered to the engine
    pub commands: u64,
    /// Commands dropped because the game was paused or over
    pub dropped: u64,
    pub final_status: GameStatus,
}

/// Whether a command may reach the engine in `status`.
///
/// While paused only `Resume` gets through; after game over nothing does.
pub fn accepts(status: GameStatus, command: Command) -> bool {
    match status {
        GameStatus::Running => command != Command::Resume,
        GameStatus::Paused => command == Command::Resume,
        GameStatus::NotStarted | GameStatus::GameOver => false,
    }
}

fn start_game(engine: &mut GameEngine, config: &SessionConfig) -> Result<()> {
    engine.set_source(config.piece_source()?);
    engine
        .new_game(config.width as usize, config.height as usize, None)
        .map_err(|e| anyhow!("session: {}", e))
}

/// Run games on `engine` until `Quit`, or until the input queue closes while
/// no game is running.
///
/// A first game starts immediately. Events reach whoever subscribed to the
/// engine beforehand. The returned future is not `Send` (observers need not
/// be), so await it on the current task rather than spawning it.
pub async fn run_session(
    engine: &mut GameEngine,
    config: &SessionConfig,
    mut inputs: mpsc::Receiver<Input>,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    start_game(engine, config)?;
    summary.games += 1;
    let mut clock = config.clock.interval();
    let mut inputs_open = true;

    loop {
        let ticking = engine.status().is_running();
        if !inputs_open && !ticking {
            break;
        }

        tokio::select! {
            _ = clock.tick(), if ticking => {
                engine.step();
                summary.ticks += 1;
            }
            input = inputs.recv(), if inputs_open => match input {
                None => inputs_open = false,
                Some(Input::Quit) => break,
                Some(Input::NewGame) => {
                    start_game(engine, config)?;
                    summary.games += 1;
                    clock = config.clock.interval();
                }
                Some(Input::Command(command)) => {
                    if !accepts(engine.status(), command) {
                        summary.dropped += 1;
                        continue;
                    }
                    engine.apply(command);
                    summary.commands += 1;
                    if command == Command::Resume {
                        // Full period after resuming.
                        clock.reset();
                    }
                }
            },
        }
    }

    summary.final_status = engine.status();
    Ok(summary)
}
