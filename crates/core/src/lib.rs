//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the simulation behind a falling-block game: the grid of
//! locked cells, tetromino shapes, the piece stream, collision queries, line
//! clearing, and the [`GameEngine`] state machine that ties them together and
//! notifies observers.
//!
//! It has **no dependencies** on UI, timers, networking, or I/O:
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Synchronous**: every command runs to completion before returning
//! - **Single writer**: only [`GameEngine`] mutates the grid or active piece
//!
//! # Module Structure
//!
//! - [`grid`]: cell matrix with locking and row compaction
//! - [`piece`]: static shape table and the [`Piece`] value
//! - [`rng`]: seeded piece stream (7-bag by default)
//! - [`collision`]: placement, move, and rotation queries
//! - [`line_clear`]: full-row detection and clearing
//! - [`engine`]: the game state machine and command surface
//! - [`notify`]: observer registration and event delivery
//! - [`snapshot`]: read-only state copies for collaborators
//!
//! # Rules
//!
//! - **7-Bag Randomizer** unless another policy is chosen
//! - **Rotation in place**: clockwise only, no wall kicks; a blocked rotation
//!   does nothing
//! - **Immediate lock**: a piece locks as soon as a downward move is blocked
//! - **Game over** when a freshly spawned piece overlaps locked cells
//! - **No scoring**: clears are reported, points are up to observers
//!
//! # Example
//!
//! ```
//! use tetris_board_core::{GameEngine, GameEvent, PieceSource, StepResult};
//!
//! let mut engine = GameEngine::new(PieceSource::bag(12345));
//! engine.subscribe(|event: &GameEvent| {
//!     if let GameEvent::LinesCleared(clear) = event {
//!         println!("cleared {} lines", clear.lines());
//!     }
//! });
//!
//! engine.new_game(10, 20, None).unwrap();
//! engine.move_right();
//! engine.rotate();
//! assert!(matches!(engine.hard_drop(), StepResult::Locked(_)));
//! assert_eq!(engine.pieces_locked(), 1);
//! ```

pub mod collision;
pub mod engine;
pub mod error;
pub mod grid;
pub mod line_clear;
pub mod notify;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tetris_board_types as types;

// Re-export commonly used types for convenience
pub use collision::{can_place, drop_distance, try_move, try_rotate};
pub use engine::{GameEngine, StepResult};
pub use error::{CoreError, GridError};
pub use grid::Grid;
pub use line_clear::{apply_clear, detect_full_rows, ClearEvent};
pub use notify::{Change, GameEvent, Observer, SubscriptionId};
pub use piece::{get_shape, Piece};
pub use rng::{PieceSource, Randomizer, SimpleRng};
pub use snapshot::GameSnapshot;
