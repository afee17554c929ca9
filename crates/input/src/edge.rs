//! Edge-triggered input filter for terminal environments.
//!
//! Turns a stream of key events into at most one action per physical press.
//! `Repeat` events are dropped. Terminals that report neither repeats nor
//! releases resend `Press` while a key is held; a press of the held key within
//! the release window is treated as auto-repeat. The first window covers the
//! OS initial repeat delay, later ones slide with every repeat.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

// Must exceed the OS auto-repeat interval.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;
// Must exceed the OS delay before the first auto-repeat.
const DEFAULT_INITIAL_REPEAT_DELAY_MS: u32 = 700;

#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    held: Option<KeyCode>,
    /// Whether the held key has produced at least one auto-repeat.
    repeating: bool,
    since_last_key_ms: u32,
    key_release_timeout_ms: u32,
    initial_repeat_delay_ms: u32,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self {
            held: None,
            repeating: false,
            since_last_key_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            initial_repeat_delay_ms: DEFAULT_INITIAL_REPEAT_DELAY_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_initial_repeat_delay_ms(mut self, delay_ms: u32) -> Self {
        self.initial_repeat_delay_ms = delay_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn initial_repeat_delay_ms(&self) -> u32 {
        self.initial_repeat_delay_ms
    }

    pub fn held(&self) -> Option<KeyCode> {
        self.held
    }

    /// Filter one key event; returns the action for a fresh press.
    pub fn handle_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key),
            KeyEventKind::Repeat => {
                if self.held == Some(key.code) {
                    self.mark_repeat();
                }
                None
            }
            KeyEventKind::Release => {
                self.handle_key_release(key.code);
                None
            }
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = handle_key_event(key)?;
        if self.held == Some(key.code) {
            self.mark_repeat();
            return None;
        }
        self.held = Some(key.code);
        self.repeating = false;
        self.since_last_key_ms = 0;
        Some(action)
    }

    fn mark_repeat(&mut self) {
        self.repeating = true;
        self.since_last_key_ms = 0;
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if self.held == Some(code) {
            self.held = None;
            self.repeating = false;
        }
    }

    /// Advance time; a held key with no events past its window is released.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_last_key_ms = self.since_last_key_ms.saturating_add(elapsed_ms);
        let window = if self.repeating {
            self.key_release_timeout_ms
        } else {
            self.initial_repeat_delay_ms
        };
        if self.since_last_key_ms > window {
            self.held = None;
            self.repeating = false;
        }
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.repeating = false;
        self.since_last_key_ms = 0;
    }
}

impl Default for EdgeTrigger {
    fn default() -> Self {
        Self::new()
    }
}
