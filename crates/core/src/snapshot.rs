use crate::piece::Piece;
use crate::types::{Cell, GameStatus, PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Read-only copy of the engine state for renderers and previews.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cells, `width * height` long
    pub cells: Vec<Cell>,
    pub active: Option<Piece>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub status: GameStatus,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub games_played: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: u8, y: u8) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Grid as 0/1-7 codes per cell, top row first (0 = empty, else kind index + 1).
    pub fn board_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|k| k.index() as u8 + 1).unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![None; DEFAULT_WIDTH as usize * DEFAULT_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            status: GameStatus::NotStarted,
            lines_cleared: 0,
            pieces_locked: 0,
            games_played: 0,
            seed: 0,
        }
    }
}
