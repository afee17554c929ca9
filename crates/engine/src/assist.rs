//! Assist mode state machine
//!
//! Tracks the selected [`AssistMode`], the timed-assist deadline and the
//! streak of unattended placements. All methods take the current time
//! explicitly so the machine stays independent of any clock.
//!
//! # Timed assist
//!
//! - Every spawn arms a deadline `delay_ms` ahead.
//! - A human move, rotate or hard drop resets the streak and re-arms.
//! - When the deadline passes the session places the top suggestion and
//!   calls [`AssistState::record_auto`].
//! - Once the streak reaches `streak_limit` the deadline no longer fires
//!   until a human action resets the streak.
//!
//! Other modes never hold a deadline.

use tetris_assist_core::types::{AssistMode, AUTO_DELAY_MS, AUTO_STREAK_LIMIT};

/// Timed-assist countdown as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Countdown {
    /// No deadline pending.
    #[default]
    Idle,
    /// Milliseconds until the next automatic placement.
    Remaining(u64),
    /// Streak cap reached; waiting for a human action.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistState {
    mode: AssistMode,
    auto_deadline: Option<u64>,
    auto_streak: u32,
    delay_ms: u64,
    streak_limit: u32,
}

impl AssistState {
    pub fn new(mode: AssistMode) -> Self {
        Self::with_timing(mode, AUTO_DELAY_MS, AUTO_STREAK_LIMIT)
    }

    pub fn with_timing(mode: AssistMode, delay_ms: u64, streak_limit: u32) -> Self {
        Self {
            mode,
            auto_deadline: None,
            auto_streak: 0,
            delay_ms,
            streak_limit,
        }
    }

    pub fn mode(&self) -> AssistMode {
        self.mode
    }

    pub fn deadline(&self) -> Option<u64> {
        self.auto_deadline
    }

    pub fn streak(&self) -> u32 {
        self.auto_streak
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn streak_limit(&self) -> u32 {
        self.streak_limit
    }

    pub fn streak_capped(&self) -> bool {
        self.auto_streak >= self.streak_limit
    }

    /// Switch modes. Clears the deadline and the streak, then re-arms if the
    /// new mode is timed.
    pub fn select_mode(&mut self, mode: AssistMode, now_ms: u64) {
        self.mode = mode;
        self.auto_streak = 0;
        self.rearm(now_ms);
    }

    /// Arm the deadline in timed mode, clear it otherwise.
    pub fn rearm(&mut self, now_ms: u64) {
        self.auto_deadline = match self.mode {
            AssistMode::Timed => Some(now_ms.saturating_add(self.delay_ms)),
            _ => None,
        };
    }

    /// A new active piece appeared.
    pub fn on_spawn(&mut self, now_ms: u64) {
        self.rearm(now_ms);
    }

    /// The player moved, rotated or hard dropped.
    pub fn human_action(&mut self, now_ms: u64) {
        self.auto_streak = 0;
        self.rearm(now_ms);
    }

    pub fn clear_deadline(&mut self) {
        self.auto_deadline = None;
    }

    /// Whether a timed placement should run now.
    pub fn due(&self, now_ms: u64) -> bool {
        self.mode == AssistMode::Timed
            && !self.streak_capped()
            && self.auto_deadline.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Count an automatic placement and consume the deadline.
    ///
    /// Returns the new streak.
    pub fn record_auto(&mut self) -> u32 {
        self.auto_streak = self.auto_streak.saturating_add(1);
        self.auto_deadline = None;
        self.auto_streak
    }

    pub fn countdown(&self, now_ms: u64) -> Countdown {
        if self.mode != AssistMode::Timed {
            return Countdown::Idle;
        }
        if self.streak_capped() {
            return Countdown::Manual;
        }
        match self.auto_deadline {
            Some(deadline) => Countdown::Remaining(deadline.saturating_sub(now_ms)),
            None => Countdown::Idle,
        }
    }
}

impl Default for AssistState {
    fn default() -> Self {
        Self::new(AssistMode::Advise)
    }
}
