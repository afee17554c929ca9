//! Assisted terminal falling-block game (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tetris_assist::{types,core,engine,input,term}`.

pub use tetris_assist_core as core;
pub use tetris_assist_engine as engine;
pub use tetris_assist_input as input;
pub use tetris_assist_term as term;
pub use tetris_assist_types as types;
