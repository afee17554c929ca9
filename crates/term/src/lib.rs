//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws into a plain
//! framebuffer and the renderer flushes only the cells that changed.
//! No widget toolkit is involved.
//!
//! Goals:
//! - Keep `core` and `engine` deterministic and testable
//! - Exact control over aspect ratio (2 chars wide per board cell)
//! - No per-frame heap allocation on the render path

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_assist_core as core;
pub use tetris_assist_engine as engine;
pub use tetris_assist_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
