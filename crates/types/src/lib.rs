//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, assist engine, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Gravity
//!
//! `level = lines / 10 + 1` and the drop interval is
//! `max(200, 800 - (level - 1) * 60)` milliseconds per row:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 800ms |
//! | 2 | 740ms |
//! | 5 | 560ms |
//! | 10 | 260ms |
//! | 11+ | 200ms |
//!
//! # Assist Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `AUTO_DELAY_MS` | 2200 | Idle time before timed assist places the top suggestion |
//! | `AUTO_STREAK_LIMIT` | 3 | Consecutive unattended placements before timed assist pauses |
//!
//! # Examples
//!
//! ```
//! use tetris_assist_types::{AssistMode, GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! let action = GameAction::from_str("mode:timed").unwrap();
//! assert_eq!(action, GameAction::SelectMode(AssistMode::Timed));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of rows as a `usize`, for array lengths.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Number of columns as a `usize`, for array lengths.
pub const BOARD_COLS: usize = BOARD_WIDTH as usize;

/// Anchor position of a freshly spawned piece (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Fixed frame interval used by the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 800;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 60;

/// Gravity never gets faster than this
pub const DROP_FLOOR_MS: u32 = 200;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// The queue is topped up with fresh bags whenever it holds fewer pieces than this.
pub const QUEUE_LOW_WATER: usize = 5;

/// Number of upcoming pieces exposed to the renderer
pub const NEXT_QUEUE_LEN: usize = 5;

/// Timed assist: idle time before the top suggestion is placed automatically
pub const AUTO_DELAY_MS: u64 = 2200;

/// Timed assist: consecutive automatic placements allowed without a human action
pub const AUTO_STREAK_LIMIT: u32 = 3;

/// Number of ranked placements shown to the player
pub const SUGGESTION_COUNT: usize = 3;

/// Maximum number of retained event-log lines
pub const EVENT_LOG_CAPACITY: usize = 30;

/// Risk ratios below this are classified as safe
pub const RISK_SAFE_BELOW: f64 = 0.35;

/// Risk ratios below this (and not safe) are classified as neutral
pub const RISK_NEUTRAL_BELOW: f64 = 0.6;

/// Line clear scoring table, multiplied by the current level.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4+ lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    /// All kinds in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_assist_types::PieceKind;
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

    /// Uppercase letter used by the side panel and the event log.
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Board cell code (1..=7); 0 is reserved for empty cells.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation states, indexed 0..=3 clockwise from spawn.
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 270° clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotations in ascending index order.
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation for an arbitrary index, taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_assist_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// The four operating modes of the assist layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssistMode {
    /// Suggestions are shown, nothing is placed automatically.
    #[default]
    Advise,
    /// The top suggestion is placed after a period without human input.
    Timed,
    /// The top suggestion is placed on a single accept action.
    Autopilot,
    /// One-shot placement of the top suggestion.
    Emergency,
}

impl AssistMode {
    pub const ALL: [AssistMode; 4] = [
        AssistMode::Advise,
        AssistMode::Timed,
        AssistMode::Autopilot,
        AssistMode::Emergency,
    ];

    /// Parse a mode name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "advise" => Some(AssistMode::Advise),
            "timed" => Some(AssistMode::Timed),
            "autopilot" => Some(AssistMode::Autopilot),
            "emergency" => Some(AssistMode::Emergency),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistMode::Advise => "advise",
            AssistMode::Timed => "timed",
            AssistMode::Autopilot => "autopilot",
            AssistMode::Emergency => "emergency",
        }
    }

    /// Human-readable label for the side panel and the event log.
    pub fn label(&self) -> &'static str {
        match self {
            AssistMode::Advise => "Advise-only",
            AssistMode::Timed => "Timed assist",
            AssistMode::Autopilot => "Autopilot",
            AssistMode::Emergency => "Emergency drop",
        }
    }
}

/// Risk classification of a candidate placement, derived from its height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskClass {
    Safe,
    Neutral,
    Risky,
}

impl RiskClass {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < RISK_SAFE_BELOW {
            RiskClass::Safe
        } else if ratio < RISK_NEUTRAL_BELOW {
            RiskClass::Neutral
        } else {
            RiskClass::Risky
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Safe => "safe",
            RiskClass::Neutral => "neutral",
            RiskClass::Risky => "risky",
        }
    }
}

/// Discrete input actions delivered to the session.
///
/// Every action corresponds to one physical key press; held keys never
/// produce a stream of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece one cell, locking it if it cannot fall
    SoftDrop,
    /// Drop piece to its landing row and lock
    HardDrop,
    /// Commit the top-ranked suggestion (autopilot)
    AcceptSuggestion,
    /// Switch the assist layer to a mode
    SelectMode(AssistMode),
    /// One-shot emergency placement of the top suggestion
    Emergency,
    /// Reinitialize board, queue, score and assist state
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Mode selection is written `mode:<name>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_assist_types::{AssistMode, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(
    ///     GameAction::from_str("mode:autopilot"),
    ///     Some(GameAction::SelectMode(AssistMode::Autopilot))
    /// );
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(mode) = lower.strip_prefix("mode:") {
            return AssistMode::from_str(mode).map(GameAction::SelectMode);
        }
        match lower.as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "accept" => Some(GameAction::AcceptSuggestion),
            "emergency" => Some(GameAction::Emergency),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
