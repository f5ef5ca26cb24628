//! Collision queries - pure functions over a grid and a candidate piece
//!
//! Nothing here mutates. A `None` result is a rejected move, which callers
//! treat as a normal outcome rather than an error.

use crate::grid::Grid;
use crate::piece::Piece;

/// True iff every mino is inside the grid and on an empty cell.
#[inline]
pub fn can_place(grid: &Grid, piece: &Piece) -> bool {
    piece.cells().iter().all(|&(x, y)| grid.is_free(x, y))
}

/// The piece translated by (dx, dy), if it fits there.
pub fn try_move(grid: &Grid, piece: &Piece, dx: i8, dy: i8) -> Option<Piece> {
    let moved = piece.shifted(dx, dy);
    can_place(grid, &moved).then_some(moved)
}

/// The piece rotated clockwise at the same anchor, if it fits there.
///
/// There is no wall kick search: a blocked rotation simply fails and the
/// caller keeps the piece it already holds.
pub fn try_rotate(grid: &Grid, piece: &Piece) -> Option<Piece> {
    let rotated = piece.rotated();
    can_place(grid, &rotated).then_some(rotated)
}

/// How many rows the piece can fall before it would collide.
pub fn drop_distance(grid: &Grid, piece: &Piece) -> u8 {
    let mut distance: u8 = 0;
    while can_place(grid, &piece.shifted(0, distance as i8 + 1)) {
        distance += 1;
    }
    distance
}
