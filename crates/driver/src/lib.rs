//! Async driver for the game engine
//!
//! Runs a [`GameEngine`](crate::core::GameEngine) against a gravity clock and
//! a queue of text commands, using tokio for timing and I/O.
//!
//! - [`config`]: clock and session settings from defaults, env, and flags
//! - [`session`]: the select loop that owns the engine
//! - [`input`]: line parsing and the async line reader
//! - [`stats`]: event-derived counters
//! - [`record`]: JSON line records for events, snapshots, and summaries

pub mod config;
pub mod input;
pub mod record;
pub mod session;
pub mod stats;

pub use tetris_board_core as core;
pub use tetris_board_types as types;

pub use config::{parse_args, ClockConfig, SessionConfig};
pub use input::{parse_line, read_inputs, ParsedLine};
pub use record::{Record, RecordBody, RecordWriter};
pub use session::{run_session, Input, SessionSummary};
pub use stats::StatTracker;
