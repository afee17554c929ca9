//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and filters
//! them so that each physical key press yields at most one action, including on
//! terminals that never report key releases.

pub mod edge;
pub mod map;

pub use tetris_assist_types as types;

pub use edge::EdgeTrigger;
pub use map::{handle_key_event, should_quit};
