//! Notification bus - synchronous publish/subscribe for engine events
//!
//! Observers are owned by the engine and called in registration order, on the
//! caller's thread, before the mutating command returns. An observer only ever
//! sees a `&GameEvent`, never the engine, so it cannot re-enter the engine
//! from inside a notification.

use std::sync::mpsc;

use crate::line_clear::ClearEvent;
use crate::piece::Piece;

/// Why a generic state change was published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// A new game started; counters kept by observers should reset
    NewGame,
    /// The active piece moved sideways or down
    Moved,
    /// The active piece rotated
    Rotated,
    /// The active piece descended one row as part of a hard drop
    Dropped,
    /// A new active piece entered the grid after a lock
    Spawned,
    Paused,
    Resumed,
}

impl Change {
    pub fn as_str(&self) -> &'static str {
        match self {
            Change::NewGame => "new_game",
            Change::Moved => "moved",
            Change::Rotated => "rotated",
            Change::Dropped => "dropped",
            Change::Spawned => "spawned",
            Change::Paused => "paused",
            Change::Resumed => "resumed",
        }
    }
}

/// Event published by the engine after a state change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Generic state change
    StateChanged(Change),
    /// The active piece was locked into the grid. `cleared` is empty when the
    /// lock completed no rows.
    Locked { piece: Piece, cleared: ClearEvent },
    /// One or more rows were cleared (only published when rows > 0)
    LinesCleared(ClearEvent),
    /// A spawned piece collided; the game is over
    GameOver,
}

impl GameEvent {
    /// Whether this event ends a burst of notifications for one command
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::GameOver | GameEvent::StateChanged(Change::Spawned)
        )
    }
}

/// Receives engine events.
///
/// Implemented for closures and for `mpsc::Sender<GameEvent>`, so most callers
/// never implement it by hand.
pub trait Observer {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> Observer for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

impl Observer for mpsc::Sender<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.send(event.clone());
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

/// Ordered list of observers
#[derive(Default)]
pub struct Subscribers {
    next_id: u32,
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for (_, observer) in &mut self.observers {
            observer.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.observers.len())
            .finish()
    }
}
