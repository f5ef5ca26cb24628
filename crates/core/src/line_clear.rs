//! Line clearing - full-row detection and compaction

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{ClearKind, MAX_CLEAR};

/// Outcome of clearing rows after a lock.
///
/// `rows` holds the cleared row indices in ascending order (top to bottom),
/// as they were numbered before the grid was compacted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClearEvent {
    pub rows: ArrayVec<u8, MAX_CLEAR>,
}

impl ClearEvent {
    /// Number of rows removed (0 to 4).
    pub fn lines(&self) -> u8 {
        self.rows.len() as u8
    }

    pub fn kind(&self) -> ClearKind {
        ClearKind::from_lines(self.lines())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Indices of every full row, ascending (top to bottom).
pub fn detect_full_rows(grid: &Grid) -> Vec<usize> {
    (0..grid.height() as usize)
        .filter(|&y| grid.is_row_full(y))
        .collect()
}

/// Full rows within `top..=bottom`, ascending.
///
/// A lock can only complete rows the piece touched, so the engine scans just
/// that span instead of the whole grid.
pub fn detect_full_rows_in(grid: &Grid, top: i8, bottom: i8) -> ArrayVec<u8, MAX_CLEAR> {
    let mut rows = ArrayVec::new();
    let top = top.max(0) as usize;
    let bottom = (bottom.max(0) as usize).min(grid.height() as usize - 1);
    for y in top..=bottom {
        if grid.is_row_full(y) && !rows.is_full() {
            rows.push(y as u8);
        }
    }
    rows
}

/// Remove `rows` from the grid and report what was cleared.
///
/// An empty list leaves the grid untouched and reports zero lines.
///
/// # Panics
///
/// Panics if more than four distinct in-bounds rows are given.
pub fn apply_clear(grid: &mut Grid, rows: &[usize]) -> ClearEvent {
    if rows.is_empty() {
        return ClearEvent::default();
    }

    let mut ordered: Vec<usize> = rows
        .iter()
        .copied()
        .filter(|&y| y < grid.height() as usize)
        .collect();
    ordered.sort_unstable();
    ordered.dedup();
    assert!(
        ordered.len() <= MAX_CLEAR,
        "cannot clear {} rows in one event (max {})",
        ordered.len(),
        MAX_CLEAR
    );

    grid.clear_rows(&ordered);
    ClearEvent {
        rows: ordered.iter().map(|&y| y as u8).collect(),
    }
}
