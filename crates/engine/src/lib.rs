//! Assist engine - placement search, assist modes and the game session
//!
//! Builds on `tetris-assist-core`:
//!
//! - [`search`]: enumerate every resting placement of a piece and rank it with
//!   a linear board-quality heuristic
//! - [`assist`]: the advise / timed / autopilot / emergency state machine
//! - [`clock`]: injectable time source
//! - [`events`]: bounded event log mirrored to `tracing`
//! - [`config`]: JSON-loadable assist tuning
//! - [`session`]: [`GameSession`], the single owner of game state driven by
//!   the frame loop and the input handler
//!
//! # Example
//!
//! ```
//! use tetris_assist_engine::{AssistConfig, GameSession, ManualClock};
//! use tetris_assist_core::types::{AssistMode, GameAction, AUTO_DELAY_MS};
//! use tetris_assist_core::GameState;
//!
//! let clock = ManualClock::new(0);
//! let mut session = GameSession::assisted(
//!     GameState::new(7),
//!     AssistConfig::default(),
//!     AssistMode::Timed,
//!     clock.clone(),
//! );
//! assert_eq!(session.suggestions().len(), 3);
//!
//! clock.advance(AUTO_DELAY_MS);
//! session.frame();
//! assert_eq!(session.game().piece_id(), 2);
//!
//! session.apply_action(GameAction::SelectMode(AssistMode::Advise));
//! ```

pub mod assist;
pub mod clock;
pub mod config;
pub mod events;
pub mod search;
pub mod session;

pub use assist::{AssistState, Countdown};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{AssistConfig, ConfigError};
pub use events::{EventLog, LogChannel, LogEntry};
pub use search::{
    drop_to_rest, enumerate_placements, rank_placements, BoardFeatures, HeuristicWeights,
    Placement, Suggestions,
};
pub use session::{GameSession, SessionSnapshot};
