//! Error types for recoverable failures.
//!
//! Rejected moves are not errors (they return `false`/`None`), and breaking a
//! grid invariant such as locking onto an occupied cell panics instead.

use thiserror::Error;

use crate::types::{MAX_DIMENSION, MIN_DIMENSION};

/// Grid indexing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i16, y: i16, width: u8, height: u8 },
}

/// Failures when setting up a game or a piece source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(
        "invalid grid size {width}x{height}: both dimensions must be within {}..={}",
        MIN_DIMENSION,
        MAX_DIMENSION
    )]
    InvalidDimensions { width: usize, height: usize },

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("unknown cell character {ch:?} in grid row {row}")]
    BadCell { row: usize, ch: char },

    #[error("starting grid already has full rows: {rows:?}")]
    FullRows { rows: Vec<usize> },

    #[error("piece sequence must contain at least one piece")]
    EmptySequence,
}
