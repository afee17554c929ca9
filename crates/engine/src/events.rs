//! Bounded, newest-first event log shown beneath the board.

use std::collections::VecDeque;

use tetris_assist_core::types::EVENT_LOG_CAPACITY;

/// Source tag printed before each log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    Game,
    Mode,
    Lines,
    Assist,
    Autopilot,
}

impl LogChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogChannel::Game => "Game",
            LogChannel::Mode => "Mode",
            LogChannel::Lines => "Lines",
            LogChannel::Assist => "Assist",
            LogChannel::Autopilot => "Autopilot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub channel: LogChannel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an entry, dropping the oldest past capacity.
    ///
    /// Every entry is also emitted as a `tracing` event.
    pub fn push(&mut self, channel: LogChannel, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(channel = channel.as_str(), "{message}");
        self.entries.push_front(LogEntry { channel, message });
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut log = EventLog::new();
        log.push(LogChannel::Game, "Started session");
        log.push(LogChannel::Lines, "Cleared 2 lines");
        let channels: Vec<_> = log.iter().map(|e| e.channel).collect();
        assert_eq!(channels, vec![LogChannel::Lines, LogChannel::Game]);
        assert_eq!(log.latest().unwrap().message, "Cleared 2 lines");
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = EventLog::new();
        for i in 0..(EVENT_LOG_CAPACITY + 5) {
            log.push(LogChannel::Assist, format!("entry {i}"));
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(log.latest().unwrap().message, format!("entry {}", EVENT_LOG_CAPACITY + 4));
        assert_eq!(log.iter().last().unwrap().message, "entry 5");
    }
}
