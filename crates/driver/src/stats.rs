use crate::core::{Change, GameEvent, Observer};
use crate::types::ClearKind;

/// Running totals derived purely from engine events.
///
/// Per-game counters reset on every new game; `games` keeps counting.
/// No points are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTracker {
    pub games: u32,
    pub pieces: u32,
    pub lines: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetrises: u32,
    pub game_over: bool,
}

impl StatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StateChanged(Change::NewGame) => {
                *self = Self {
                    games: self.games + 1,
                    ..Self::default()
                };
            }
            GameEvent::Locked { .. } => self.pieces += 1,
            GameEvent::LinesCleared(clear) => {
                self.lines += clear.lines() as u32;
                match clear.kind() {
                    ClearKind::Single => self.singles += 1,
                    ClearKind::Double => self.doubles += 1,
                    ClearKind::Triple => self.triples += 1,
                    ClearKind::Tetris => self.tetrises += 1,
                    ClearKind::None => {}
                }
            }
            GameEvent::GameOver => self.game_over = true,
            GameEvent::StateChanged(_) => {}
        }
    }
}

impl Observer for StatTracker {
    fn notify(&mut self, event: &GameEvent) {
        self.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClearEvent, Piece};
    use crate::types::PieceKind;

    fn cleared(rows: &[u8]) -> ClearEvent {
        let mut clear = ClearEvent::default();
        for &row in rows {
            clear.rows.push(row);
        }
        clear
    }

    #[test]
    fn counts_locks_and_clears() {
        let mut stats = StatTracker::new();
        stats.record(&GameEvent::StateChanged(Change::NewGame));
        stats.record(&GameEvent::Locked {
            piece: Piece::spawn(PieceKind::I, 10),
            cleared: cleared(&[16, 17, 18, 19]),
        });
        stats.record(&GameEvent::LinesCleared(cleared(&[16, 17, 18, 19])));
        stats.record(&GameEvent::LinesCleared(cleared(&[19])));
        stats.record(&GameEvent::StateChanged(Change::Moved));

        assert_eq!(stats.games, 1);
        assert_eq!(stats.pieces, 1);
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.tetrises, 1);
        assert_eq!(stats.singles, 1);
        assert!(!stats.game_over);
    }

    #[test]
    fn new_game_resets_per_game_counters() {
        let mut stats = StatTracker::new();
        stats.record(&GameEvent::StateChanged(Change::NewGame));
        stats.record(&GameEvent::LinesCleared(cleared(&[19])));
        stats.record(&GameEvent::GameOver);
        stats.record(&GameEvent::StateChanged(Change::NewGame));

        assert_eq!(
            stats,
            StatTracker {
                games: 2,
                ..StatTracker::default()
            }
        );
    }
}
