//! Game engine - owns the grid and the active piece and runs the game
//!
//! Every mutation of the grid or the active piece goes through
//! [`GameEngine`]. Commands resolve synchronously, including the whole
//! lock → clear → spawn cascade, and publish their notifications before they
//! return.
//!
//! # Notification order
//!
//! - side move / down move: `StateChanged(Moved)`
//! - rotate: `StateChanged(Rotated)`
//! - hard drop: one `StateChanged(Dropped)` per row descended, then the lock
//!   sequence below
//! - lock (blocked down move, blocked step, or end of hard drop):
//!   `Locked`, then `LinesCleared` if rows were cleared, then either
//!   `StateChanged(Spawned)` or `GameOver`
//! - new game: `StateChanged(NewGame)`, followed by `GameOver` if the first
//!   piece cannot spawn. The first spawn is attempted before `NewGame` is
//!   published, so `status()` may already read `GameOver` when observers
//!   receive it.
//!
//! Rejected moves and commands issued while the game is not running publish
//! nothing.

use arrayvec::ArrayVec;

use crate::collision::{can_place, drop_distance, try_move, try_rotate};
use crate::error::CoreError;
use crate::grid::Grid;
use crate::line_clear::{apply_clear, detect_full_rows, detect_full_rows_in, ClearEvent};
use crate::notify::{Change, GameEvent, Observer, SubscriptionId, Subscribers};
use crate::piece::Piece;
use crate::rng::PieceSource;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Result of a downward command (`move_down`, `step`, `hard_drop`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The piece moved down one row
    Moved,
    /// The piece locked; carries the rows it cleared (possibly none)
    Locked(ClearEvent),
    /// Nothing happened: no game is running
    Idle,
}

impl StepResult {
    pub fn is_idle(&self) -> bool {
        matches!(self, StepResult::Idle)
    }
}

/// The board: grid, active piece, lookahead, and game lifecycle
#[derive(Debug)]
pub struct GameEngine {
    grid: Grid,
    active: Option<Piece>,
    /// Lookahead shown by next-piece previews
    next: Option<PieceKind>,
    source: PieceSource,
    status: GameStatus,
    subscribers: Subscribers,
    /// Rows cleared during the current game
    lines_cleared: u32,
    /// Pieces locked during the current game
    pieces_locked: u32,
    /// Games started on this engine (increments on every new game)
    games_played: u32,
}

impl GameEngine {
    /// Create an engine drawing pieces from `source`.
    ///
    /// The engine starts in `NotStarted` with an empty reference-size grid;
    /// call [`GameEngine::new_game`] to begin.
    pub fn new(source: PieceSource) -> Self {
        Self {
            grid: Grid::default(),
            active: None,
            next: None,
            source,
            status: GameStatus::NotStarted,
            subscribers: Subscribers::new(),
            lines_cleared: 0,
            pieces_locked: 0,
            games_played: 0,
        }
    }

    // ---- lifecycle ----

    /// Start a new game on an empty `width x height` grid.
    ///
    /// With `Some(seed)` the piece source restarts from that seed; with `None`
    /// it keeps drawing from where it is.
    pub fn new_game(
        &mut self,
        width: usize,
        height: usize,
        seed: Option<u32>,
    ) -> Result<(), CoreError> {
        let grid = Grid::new(width, height)?;
        self.start(grid, seed);
        Ok(())
    }

    /// Start a new game on a prepared grid (garbage rows, puzzles, tests).
    ///
    /// The grid must not already contain full rows.
    pub fn new_game_on(&mut self, grid: Grid, seed: Option<u32>) -> Result<(), CoreError> {
        let rows = detect_full_rows(&grid);
        if !rows.is_empty() {
            return Err(CoreError::FullRows { rows });
        }
        self.start(grid, seed);
        Ok(())
    }

    fn start(&mut self, grid: Grid, seed: Option<u32>) {
        if let Some(seed) = seed {
            self.source.reseed(seed);
        }

        self.grid = grid;
        self.active = None;
        self.next = Some(self.source.next());
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.games_played = self.games_played.wrapping_add(1);
        self.status = GameStatus::Running;

        let spawned = self.spawn_next();
        self.publish(GameEvent::StateChanged(Change::NewGame));
        if !spawned {
            self.publish(GameEvent::GameOver);
        }
    }

    /// Replace the piece source. Takes effect from the next spawn.
    pub fn set_source(&mut self, source: PieceSource) {
        self.source = source;
    }

    /// Suspend a running game. Returns false if the game was not running.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        self.publish(GameEvent::StateChanged(Change::Paused));
        true
    }

    /// Continue a paused game. Returns false if the game was not paused.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        self.publish(GameEvent::StateChanged(Change::Resumed));
        true
    }

    // ---- commands ----

    /// Move the active piece one column left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    /// Move the active piece one column right. Returns whether it moved.
    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };
        match try_move(&self.grid, &active, dx, 0) {
            Some(moved) => {
                self.active = Some(moved);
                self.publish(GameEvent::StateChanged(Change::Moved));
                true
            }
            None => false,
        }
    }

    /// Rotate the active piece clockwise in place. Returns whether it rotated.
    ///
    /// A blocked rotation leaves the piece exactly as it was.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };
        match try_rotate(&self.grid, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.publish(GameEvent::StateChanged(Change::Rotated));
                true
            }
            None => false,
        }
    }

    /// Move the active piece one row down, or lock it if it has landed.
    pub fn move_down(&mut self) -> StepResult {
        let Some(active) = self.playable_piece() else {
            return StepResult::Idle;
        };
        match try_move(&self.grid, &active, 0, 1) {
            Some(moved) => {
                self.active = Some(moved);
                self.publish(GameEvent::StateChanged(Change::Moved));
                StepResult::Moved
            }
            None => StepResult::Locked(self.land(active)),
        }
    }

    /// One gravity tick from the external clock. Same as [`Self::move_down`].
    pub fn step(&mut self) -> StepResult {
        self.move_down()
    }

    /// Drop the active piece to the lowest legal row and lock it.
    pub fn hard_drop(&mut self) -> StepResult {
        let Some(mut active) = self.playable_piece() else {
            return StepResult::Idle;
        };
        while let Some(lower) = try_move(&self.grid, &active, 0, 1) {
            active = lower;
            self.active = Some(active);
            self.publish(GameEvent::StateChanged(Change::Dropped));
        }
        StepResult::Locked(self.land(active))
    }

    /// Dispatch a command value. Returns whether the game state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => !self.move_down().is_idle(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => !self.hard_drop().is_idle(),
            Command::Step => !self.step().is_idle(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
    }

    // ---- internals ----

    /// The active piece, if commands may act on it right now
    fn playable_piece(&self) -> Option<Piece> {
        if self.status != GameStatus::Running {
            return None;
        }
        self.active
    }

    /// Lock `piece`, clear rows it completed, and spawn the next piece.
    fn land(&mut self, piece: Piece) -> ClearEvent {
        self.grid.lock(&piece.cells(), piece.kind);
        self.active = None;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let (top, bottom) = piece.row_span();
        let rows: ArrayVec<usize, MAX_CLEAR> = detect_full_rows_in(&self.grid, top, bottom)
            .iter()
            .map(|&y| y as usize)
            .collect();
        let cleared = apply_clear(&mut self.grid, &rows);
        self.lines_cleared = self.lines_cleared.wrapping_add(cleared.lines() as u32);

        self.publish(GameEvent::Locked {
            piece,
            cleared: cleared.clone(),
        });
        if !cleared.is_empty() {
            self.publish(GameEvent::LinesCleared(cleared.clone()));
        }

        if self.spawn_next() {
            self.publish(GameEvent::StateChanged(Change::Spawned));
        } else {
            self.publish(GameEvent::GameOver);
        }
        cleared
    }

    /// Promote the lookahead to the active piece and draw a new lookahead.
    ///
    /// If the new piece collides, the game is over and the grid is left as it
    /// was. Returns whether a piece was spawned.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next(),
        };
        self.next = Some(self.source.next());

        let piece = Piece::spawn(kind, self.grid.width());
        if can_place(&self.grid, &piece) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            self.status = GameStatus::GameOver;
            false
        }
    }

    fn publish(&mut self, event: GameEvent) {
        self.subscribers.publish(&event);
    }

    // ---- subscription ----

    /// Register an observer. Events are delivered synchronously, in
    /// registration order.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ---- queries ----

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Kind of the piece that spawns after the active one
    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    /// Row the active piece's anchor would land on after a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + drop_distance(&self.grid, &active) as i8)
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Fill `out` with the current state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.status = self.status;
        out.lines_cleared = self.lines_cleared;
        out.pieces_locked = self.pieces_locked;
        out.games_played = self.games_played;
        out.seed = self.source.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(PieceSource::default())
    }
}
