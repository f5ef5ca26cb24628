//! Tetris board (workspace facade crate).
//!
//! Exposes `tetris_board::{core,driver,types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use tetris_board_core as core;
pub use tetris_board_driver as driver;
pub use tetris_board_types as types;
