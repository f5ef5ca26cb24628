//! Record module - line-delimited JSON for engine events and snapshots
//!
//! Every line is a JSON object with a `type` field and a `seq` number that
//! increases across the whole session.

use serde::{Deserialize, Serialize};

use crate::core::{GameEvent, GameSnapshot, Piece};
use crate::stats::StatTracker;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: String,
    pub rotation: String,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for PieceRecord {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            rotation: piece.rotation.as_str().to_string(),
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Payload of one output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordBody {
    StateChanged {
        change: String,
    },
    Locked {
        piece: PieceRecord,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        rows: Vec<u8>,
    },
    LinesCleared {
        lines: u8,
        clear: String,
        rows: Vec<u8>,
    },
    GameOver,
    Snapshot {
        status: String,
        width: u8,
        height: u8,
        /// 0 = empty, 1-7 = piece kind, top row first
        board: Vec<Vec<u8>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<PieceRecord>,
        #[serde(skip_serializing_if = "Option::is_none")]
        next: Option<String>,
        lines_cleared: u32,
        pieces_locked: u32,
    },
    Summary {
        games: u32,
        pieces: u32,
        lines: u32,
        singles: u32,
        doubles: u32,
        triples: u32,
        tetrises: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub seq: u64,
    #[serde(flatten)]
    pub body: RecordBody,
}

impl Record {
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

impl From<&GameEvent> for RecordBody {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::StateChanged(change) => RecordBody::StateChanged {
                change: change.as_str().to_string(),
            },
            GameEvent::Locked { piece, cleared } => RecordBody::Locked {
                piece: PieceRecord::from(piece),
                rows: cleared.rows.to_vec(),
            },
            GameEvent::LinesCleared(clear) => RecordBody::LinesCleared {
                lines: clear.lines(),
                clear: clear.kind().as_str().to_string(),
                rows: clear.rows.to_vec(),
            },
            GameEvent::GameOver => RecordBody::GameOver,
        }
    }
}

impl From<&GameSnapshot> for RecordBody {
    fn from(snap: &GameSnapshot) -> Self {
        RecordBody::Snapshot {
            status: snap.status.as_str().to_string(),
            width: snap.width,
            height: snap.height,
            board: snap.board_codes(),
            active: snap.active.as_ref().map(PieceRecord::from),
            next: snap.next.map(|k| k.as_str().to_string()),
            lines_cleared: snap.lines_cleared,
            pieces_locked: snap.pieces_locked,
        }
    }
}

impl From<&StatTracker> for RecordBody {
    fn from(stats: &StatTracker) -> Self {
        RecordBody::Summary {
            games: stats.games,
            pieces: stats.pieces,
            lines: stats.lines,
            singles: stats.singles,
            doubles: stats.doubles,
            triples: stats.triples,
            tetrises: stats.tetrises,
        }
    }
}

/// Numbers records in the order they are written
#[derive(Debug, Default)]
pub struct RecordWriter {
    seq: u64,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, body: impl Into<RecordBody>) -> Record {
        self.seq += 1;
        Record {
            seq: self.seq,
            body: body.into(),
        }
    }
}
