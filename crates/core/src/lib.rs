//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the board rules, the piece controller and the lock pipeline.
//! It has **zero dependencies** on UI, timing sources or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Runs headless, in the terminal, or under the assist engine
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merge and line clearing
//! - [`pieces`]: static shape table (7 kinds x 4 rotations x 4 cells)
//! - [`rng`]: bag-refilled piece queue and a seeded LCG
//! - [`scoring`]: line-clear points, level and gravity formulas
//! - [`game_state`]: active piece, locking, spawning and gravity
//! - [`snapshot`]: copyable per-frame view for renderers
//!
//! # Game Rules
//!
//! - **No wall kicks**: a rotation that collides is rejected
//! - **Soft drop locks**: a soft drop onto the stack locks immediately
//! - **Top out**: a spawned piece that collides ends the game
//! - **Scoring**: 100/300/500/800 x level for 1/2/3/4 lines
//!
//! # Example
//!
//! ```
//! use tetris_assist_core::GameState;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.move_piece(1);
//! game.rotate();
//! game.hard_drop();
//!
//! assert_eq!(game.piece_id(), 2);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! milliseconds. Once the accumulated time exceeds the level's drop interval the piece
//! soft drops one row.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_assist_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, LockEvent, Tetromino};
pub use pieces::{get_shape, shape_columns, PieceShape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
