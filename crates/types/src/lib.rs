//! Shared types module - data structures and constants used by every crate
//!
//! All types here are plain data with no external dependencies, so they can be
//! used by the engine, the driver, and any external collaborator (renderers,
//! stat trackers, input mappers) without pulling in the engine itself.
//!
//! # Grid Dimensions
//!
//! The reference playfield is 10 columns by 20 rows. Any size between
//! [`MIN_DIMENSION`] and [`MAX_DIMENSION`] is accepted per game.
//!
//! Coordinates are `(x, y)`: `x` is the column (left to right), `y` is the row
//! (top to bottom). Row 0 is the top row where pieces spawn.
//!
//! # Clock Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_STEP_MS` | 800 | Interval between gravity steps |
//! | `INITIAL_DELAY_MS` | 1000 | Delay before the first step of a game |
//!
//! # Examples
//!
//! ```
//! use tetris_board_types::{Command, PieceKind, Rotation, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.index(), 3);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, DEFAULT_WIDTH * 2);
//! ```

/// Reference grid width in cells (10 columns)
pub const DEFAULT_WIDTH: u8 = 10;

/// Reference grid height in cells (twice the width)
pub const DEFAULT_HEIGHT: u8 = 20;

/// Smallest accepted grid dimension (a horizontal I piece needs 4 columns)
pub const MIN_DIMENSION: u8 = 4;

/// Largest accepted grid dimension
pub const MAX_DIMENSION: u8 = 64;

/// Width of the box every shape table is laid out in
pub const SHAPE_BOX: u8 = 4;

/// Gravity step interval in milliseconds
pub const DEFAULT_STEP_MS: u32 = 800;

/// Delay before the first gravity step of a game in milliseconds
pub const INITIAL_DELAY_MS: u32 = 1000;

/// Most rows a single lock can complete (the height of a vertical I)
pub const MAX_CLEAR: usize = 4;


/// The seven tetromino kinds
///
/// - **I**: straight bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position in [`PieceKind::ALL`] (row index into the shape table)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_board_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse from a single grid-fixture character (`'I'`, `'t'`, ...)
    pub fn from_char(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        Self::from_str(c.encode_utf8(&mut buf))
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Uppercase letter used by grid fixtures and text dumps
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Rotation states, clockwise from the spawn orientation
///
/// The cycle goes North → East → South → West → North, which is the rotation
/// index sequence 0 → 1 → 2 → 3 → 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_board_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken mod 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands accepted by the game engine
///
/// Clock collaborators issue `Step`; input collaborators issue the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// One gravity tick (same effect as `MoveDown`)
    Step,
    /// Suspend a running game
    Pause,
    /// Continue a paused game
    Resume,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveDown,
        Command::Rotate,
        Command::HardDrop,
        Command::Step,
        Command::Pause,
        Command::Resume,
    ];

    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_board_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "step" => Some(Command::Step),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Step => "step",
            Command::Pause => "pause",
            Command::Resume => "resume",
        }
    }
}

/// Lifecycle of one game
///
/// `NotStarted → Running` on a new game, `Running ↔ Paused` on pause/resume,
/// `Running → GameOver` when a spawned piece collides. `GameOver` only leaves
/// through a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not_started",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Classification of a line clear by number of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearKind {
    None,
    Single,
    Double,
    Triple,
    /// Four rows at once, the maximal clear
    Tetris,
}

impl ClearKind {
    pub fn from_lines(lines: u8) -> Self {
        match lines {
            0 => ClearKind::None,
            1 => ClearKind::Single,
            2 => ClearKind::Double,
            3 => ClearKind::Triple,
            _ => ClearKind::Tetris,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearKind::None => "none",
            ClearKind::Single => "single",
            ClearKind::Double => "double",
            ClearKind::Triple => "triple",
            ClearKind::Tetris => "tetris",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind
pub type Cell = Option<PieceKind>;
