//! Session configuration: clock timing, grid size, piece policy.
//!
//! Values come from defaults, then environment variables, then command-line
//! flags, each layer overriding the previous one.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::core::{PieceSource, Randomizer};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_STEP_MS, DEFAULT_WIDTH, INITIAL_DELAY_MS};

/// Gravity clock timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Delay before the first step of a game
    pub initial_delay: Duration,
    /// Interval between steps
    pub period: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(INITIAL_DELAY_MS as u64),
            period: Duration::from_millis(DEFAULT_STEP_MS as u64),
        }
    }
}

impl ClockConfig {
    /// Read `TETRIS_STEP_MS` and `TETRIS_INITIAL_DELAY_MS`, falling back to
    /// the defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let period = env::var("TETRIS_STEP_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.period);
        let initial_delay = env::var("TETRIS_INITIAL_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_delay);

        Self {
            initial_delay,
            period,
        }
    }

    /// A fresh step interval whose first tick fires after `initial_delay`.
    ///
    /// Missed ticks are delayed rather than bunched, so a stalled session
    /// never fires a burst of steps.
    pub fn interval(&self) -> Interval {
        let mut interval = interval_at(Instant::now() + self.initial_delay, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}

/// Everything a session needs to start games
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u8,
    pub height: u8,
    /// Fixed seed; `None` picks one from the system clock
    pub seed: Option<u32>,
    pub randomizer: Randomizer,
    pub clock: ClockConfig,
    /// Capacity of the input queue
    pub max_pending: usize,
    /// Emit every state change, not just locks, clears, and lifecycle events
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            randomizer: Randomizer::Bag,
            clock: ClockConfig::default(),
            max_pending: 64,
            verbose: false,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `TETRIS_WIDTH`, `TETRIS_HEIGHT`, `TETRIS_SEED`,
    /// `TETRIS_RANDOMIZER`, and the clock variables.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let width = env::var("TETRIS_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.width);
        let height = env::var("TETRIS_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.height);
        let seed = env::var("TETRIS_SEED").ok().and_then(|s| s.parse().ok());
        let randomizer = env::var("TETRIS_RANDOMIZER")
            .ok()
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);

        Self {
            width,
            height,
            seed,
            randomizer,
            clock: ClockConfig::from_env(),
            ..defaults
        }
    }

    /// The configured seed, or one derived from the system clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Piece source for this configuration.
    pub fn piece_source(&self) -> Result<PieceSource> {
        PieceSource::new(self.randomizer.clone(), self.resolved_seed())
            .map_err(|e| anyhow!("config: {}", e))
    }
}

/// Apply command-line flags on top of `base`.
///
/// Accepts `--width N`, `--height N`, `--seed N`, `--step-ms N`,
/// `--initial-delay-ms N`, `--randomizer bag|uniform`, and `--verbose`.
pub fn parse_args(args: &[String], base: SessionConfig) -> Result<SessionConfig> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--verbose" || flag == "-v" {
            config.verbose = true;
            i += 1;
            continue;
        }

        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| anyhow!("args: missing value for {}", flag))?;
        match flag {
            "--width" => config.width = parse_number(flag, value)?,
            "--height" => config.height = parse_number(flag, value)?,
            "--seed" => config.seed = Some(parse_number(flag, value)?),
            "--step-ms" => {
                let ms: u64 = parse_number(flag, value)?;
                if ms == 0 {
                    return Err(anyhow!("args: --step-ms must be positive"));
                }
                config.clock.period = Duration::from_millis(ms);
            }
            "--initial-delay-ms" => {
                config.clock.initial_delay = Duration::from_millis(parse_number(flag, value)?);
            }
            "--randomizer" => {
                config.randomizer = Randomizer::from_str(value)
                    .ok_or_else(|| anyhow!("args: unknown randomizer: {}", value))?;
            }
            other => return Err(anyhow!("args: unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("args: invalid {} value: {}", flag, value))
}
