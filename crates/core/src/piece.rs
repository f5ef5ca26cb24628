//! Piece module - tetromino shapes and the active piece value
//!
//! Every shape is four mino offsets inside a 4x4 box, laid out per rotation.
//! The table is a `static` built at compile time and never mutated. Offsets
//! are `(dx, dy)` from the piece anchor (the box's top-left corner).

use crate::types::{PieceKind, Rotation, SHAPE_BOX};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shape table indexed by `[kind.index()][rotation.index()]`.
static SHAPES: [[PieceShape; 4]; 7] = [
    // I: horizontal on row 1 / vertical on column 2 / row 2 / column 1
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O: same footprint in every rotation
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
#[inline]
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index() as usize]
}

/// Spawn anchor for a kind on a grid `width` columns wide.
///
/// The shape box is centered horizontally, and the anchor row is chosen so
/// the topmost mino of the North orientation sits on row 0.
pub fn spawn_position(kind: PieceKind, width: u8) -> (i8, i8) {
    let x = (width.saturating_sub(SHAPE_BOX) / 2) as i8;
    let top = get_shape(kind, Rotation::North)
        .iter()
        .map(|&(_, dy)| dy)
        .min()
        .unwrap_or(0);
    (x, -top)
}

/// A tetromino placed on (or about to be placed on) the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// A North-facing piece at its spawn position on a grid `width` wide
    pub fn spawn(kind: PieceKind, width: u8) -> Self {
        let (x, y) = spawn_position(kind, width);
        Self::new(kind, Rotation::North, x, y)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece, same anchor, next rotation clockwise
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// Lowest and highest rows the piece covers
    pub fn row_span(&self) -> (i8, i8) {
        let cells = self.cells();
        let top = cells.iter().map(|&(_, y)| y).min().unwrap_or(self.y);
        let bottom = cells.iter().map(|&(_, y)| y).max().unwrap_or(self.y);
        (top, bottom)
    }
}
