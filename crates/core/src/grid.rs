//! Grid module - the matrix of locked cells
//!
//! The grid is `width x height` cells, each empty or holding the kind of the
//! piece that locked there. Storage is a flat row-major vector, allocated once
//! per game; dimensions never change afterwards.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom).

use crate::error::{CoreError, GridError};
use crate::types::{Cell, PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, MIN_DIMENSION};

/// The locked-cell matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Fails when either dimension is outside `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        let range = MIN_DIMENSION as usize..=MAX_DIMENSION as usize;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells: vec![None; width * height],
        })
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `'.'` is an empty cell, a piece letter (`I O T S Z J L`, any case) is a
    /// locked cell of that kind, and `'#'` is a locked cell with no particular
    /// kind (stored as `O`).
    ///
    /// ```
    /// use tetris_board_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[
    ///     "....",
    ///     "....",
    ///     "....",
    ///     "II.#",
    /// ]).unwrap();
    /// assert_eq!(grid.is_occupied(0, 3), Ok(true));
    /// assert_eq!(grid.is_occupied(2, 3), Ok(false));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, CoreError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(CoreError::RaggedRow {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(PieceKind::O),
                    _ => Some(PieceKind::from_char(ch).ok_or(CoreError::BadCell { row: y, ch })?),
                };
                grid.cells[y * width + x] = cell;
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether the cell at (x, y) holds a locked block.
    pub fn is_occupied(&self, x: i8, y: i8) -> Result<bool, GridError> {
        self.get(x, y)
            .map(|cell| cell.is_some())
            .ok_or(GridError::OutOfBounds {
                x: x as i16,
                y: y as i16,
                width: self.width,
                height: self.height,
            })
    }

    /// Check if position is within bounds and empty
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Lock cells into the grid with the given kind.
    ///
    /// # Panics
    ///
    /// Every cell must be in bounds and empty. Callers check placement with
    /// [`crate::collision::can_place`] first, so a violation is a bug.
    pub fn lock(&mut self, cells: &[(i8, i8)], kind: PieceKind) {
        for &(x, y) in cells {
            assert!(
                self.is_free(x, y),
                "lock onto cell ({x}, {y}) which is out of bounds or occupied"
            );
        }
        for &(x, y) in cells {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(kind);
            }
        }
    }

    /// Remove the given rows and shift everything above them down.
    ///
    /// Rows may be given in any order; duplicates and out-of-range indices are
    /// ignored. The top of the grid is refilled with empty rows. Returns the
    /// number of rows removed.
    ///
    /// Uses a single bottom-up two-pointer pass with `copy_within`, so no
    /// row buffer is allocated.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut removed = 0usize;

        for read_y in (0..height).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Number of locked cells on the whole grid.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Render the grid as text rows in the `from_rows` format.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|k| k.as_char()).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    /// Empty grid of the reference 10x20 size
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![None; DEFAULT_WIDTH as usize * DEFAULT_HEIGHT as usize],
        }
    }
}
