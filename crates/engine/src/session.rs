//! Game session - the single owner of all mutable game state
//!
//! A [`GameSession`] bundles the core [`GameState`], the optional assist layer
//! (suggestions plus [`AssistState`]), the [`EventLog`] and a [`Clock`]. The
//! frame loop and the input handler call into it synchronously; nothing else
//! holds game state.
//!
//! Spawns are detected by comparing the core's monotonic `piece_id`. Each new
//! piece triggers exactly one placement search and re-arms the assist timer.

use tetris_assist_core::types::{AssistMode, GameAction};
use tetris_assist_core::{ActiveSnapshot, GameSnapshot, GameState};

use crate::assist::{AssistState, Countdown};
use crate::clock::{Clock, MonotonicClock};
use crate::config::AssistConfig;
use crate::events::{EventLog, LogChannel};
use crate::search::{rank_placements, HeuristicWeights, Placement, Suggestions};

/// Assist layer: tuning, mode machine and the current piece's suggestions.
#[derive(Debug, Clone)]
struct Assist {
    state: AssistState,
    initial_mode: AssistMode,
    weights: HeuristicWeights,
    suggestions: Suggestions,
}

impl Assist {
    fn new(config: &AssistConfig, mode: AssistMode) -> Self {
        Self {
            state: AssistState::with_timing(mode, config.auto_delay_ms, config.streak_limit),
            initial_mode: mode,
            weights: config.weights,
            suggestions: Suggestions::new(),
        }
    }

    fn best(&self) -> Option<Placement> {
        self.suggestions.first().copied()
    }
}

/// Everything a renderer needs for one frame (log lines are read from
/// [`GameSession::log`]).
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub game: GameSnapshot,
    /// `None` when the assist layer is disabled.
    pub mode: Option<AssistMode>,
    /// Landing preview: straight-down drop or the top suggestion.
    pub ghost: Option<ActiveSnapshot>,
    pub suggestions: Suggestions,
    pub countdown: Countdown,
    pub streak: u32,
}

#[derive(Debug)]
pub struct GameSession<C: Clock = MonotonicClock> {
    game: GameState,
    assist: Option<Assist>,
    log: EventLog,
    clock: C,
    last_frame_ms: u64,
    /// Last piece id the assist layer reacted to.
    seen_piece_id: u32,
}

impl GameSession<MonotonicClock> {
    /// Assisted session on the wall clock with default tuning.
    pub fn new(seed: u32, mode: AssistMode) -> Self {
        Self::assisted(
            GameState::new(seed),
            AssistConfig::default(),
            mode,
            MonotonicClock::new(),
        )
    }

    /// Session without the assist layer.
    pub fn simple(seed: u32) -> Self {
        Self::unassisted(GameState::new(seed), MonotonicClock::new())
    }
}

impl<C: Clock> GameSession<C> {
    pub fn assisted(game: GameState, config: AssistConfig, mode: AssistMode, clock: C) -> Self {
        Self::build(game, Some(Assist::new(&config, mode)), clock)
    }

    pub fn unassisted(game: GameState, clock: C) -> Self {
        Self::build(game, None, clock)
    }

    fn build(game: GameState, assist: Option<Assist>, clock: C) -> Self {
        let now = clock.now_ms();
        let mut session = Self {
            seen_piece_id: game.piece_id(),
            game,
            assist,
            log: EventLog::new(),
            clock,
            last_frame_ms: now,
        };
        // The game may arrive already started; the current piece still
        // needs its search and deadline.
        session.game.start();
        session.seen_piece_id = session.game.piece_id();
        session.sync();
        session.on_spawn();
        if let Some(assist) = &session.assist {
            let mode = assist.state.mode();
            session.log_mode_switch(mode);
        }
        session.log.push(LogChannel::Game, "Started session");
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn assist_enabled(&self) -> bool {
        self.assist.is_some()
    }

    pub fn mode(&self) -> Option<AssistMode> {
        self.assist.as_ref().map(|a| a.state.mode())
    }

    pub fn assist_state(&self) -> Option<&AssistState> {
        self.assist.as_ref().map(|a| &a.state)
    }

    /// Ranked suggestions for the active piece (empty without assist).
    pub fn suggestions(&self) -> &[Placement] {
        self.assist.as_ref().map_or(&[], |a| a.suggestions.as_slice())
    }

    pub fn game_over(&self) -> bool {
        self.game.game_over()
    }

    /// Apply one discrete input action. Returns true if anything changed.
    ///
    /// Actions other than restart are ignored once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let now = self.clock.now_ms();
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        if self.game.game_over() {
            return false;
        }

        let changed = match action {
            GameAction::MoveLeft => self.human_move(now, |g| g.move_piece(-1)),
            GameAction::MoveRight => self.human_move(now, |g| g.move_piece(1)),
            GameAction::Rotate => self.human_move(now, GameState::rotate),
            GameAction::HardDrop => self.human_move(now, GameState::hard_drop),
            GameAction::SoftDrop => {
                if self.autopilot_ready() {
                    self.accept("Placed best move via soft drop")
                } else {
                    let before = self.game.piece_id();
                    self.game.soft_drop() || self.game.piece_id() != before
                }
            }
            GameAction::AcceptSuggestion => {
                self.autopilot_ready() && self.accept("Placed best move")
            }
            GameAction::SelectMode(mode) => self.select_mode(mode, now),
            GameAction::Emergency => self.emergency(now),
            GameAction::Restart => false,
        };
        self.sync();
        changed
    }

    /// Advance one frame: gravity, then the timed-assist deadline.
    ///
    /// Returns true if the board or the active piece changed.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.now_ms();
        let delta = now.saturating_sub(self.last_frame_ms);
        self.last_frame_ms = now;
        if self.game.game_over() {
            return false;
        }

        let before = self.game.piece_id();
        let mut changed = self.game.tick(u32::try_from(delta).unwrap_or(u32::MAX));
        self.sync();

        let due = self
            .assist
            .as_ref()
            .is_some_and(|a| a.state.due(now) && !a.suggestions.is_empty());
        if due {
            let streak = self.assist.as_mut().map_or(0, |a| a.state.record_auto());
            if self.place_best().is_some() {
                self.log.push(
                    LogChannel::Assist,
                    format!("Auto-placed best move (streak {streak})"),
                );
                changed = true;
            }
        }
        changed || self.game.piece_id() != before
    }

    /// Reinitialize the game and the assist state; the log is kept.
    pub fn restart(&mut self) {
        let now = self.clock.now_ms();
        self.game.restart();
        if let Some(assist) = self.assist.as_mut() {
            assist.state.select_mode(assist.initial_mode, now);
            assist.suggestions.clear();
        }
        self.last_frame_ms = now;
        self.log.push(LogChannel::Game, "Restarted session");
        self.sync();
    }

    /// Landing preview for the active piece.
    ///
    /// Advise mode (and a disabled assist) shows the straight-down drop; the
    /// other modes show the top suggestion when one exists.
    pub fn ghost(&self) -> Option<ActiveSnapshot> {
        if self.game.game_over() {
            return None;
        }
        let suggested = self
            .assist
            .as_ref()
            .filter(|a| a.state.mode() != AssistMode::Advise)
            .and_then(Assist::best);
        match suggested {
            Some(best) => Some(ActiveSnapshot {
                kind: best.kind,
                rotation: best.rotation,
                x: best.x,
                y: best.y,
            }),
            None => self.game.ghost().map(ActiveSnapshot::from),
        }
    }

    pub fn countdown(&self) -> Countdown {
        self.assist
            .as_ref()
            .map_or(Countdown::Idle, |a| a.state.countdown(self.clock.now_ms()))
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.game.snapshot_into(&mut out.game);
        out.mode = self.mode();
        out.ghost = self.ghost();
        out.suggestions = self
            .assist
            .as_ref()
            .map_or_else(Suggestions::new, |a| a.suggestions.clone());
        out.countdown = self.countdown();
        out.streak = self.assist.as_ref().map_or(0, |a| a.state.streak());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Run a player move; on success it counts as a human action.
    fn human_move(&mut self, now: u64, op: impl FnOnce(&mut GameState) -> bool) -> bool {
        let applied = op(&mut self.game);
        if applied {
            if let Some(assist) = self.assist.as_mut() {
                assist.state.human_action(now);
            }
            self.sync();
        }
        applied
    }

    fn autopilot_ready(&self) -> bool {
        self.assist
            .as_ref()
            .is_some_and(|a| a.state.mode() == AssistMode::Autopilot && !a.suggestions.is_empty())
    }

    fn accept(&mut self, message: &str) -> bool {
        if self.place_best().is_none() {
            return false;
        }
        self.log.push(LogChannel::Autopilot, message);
        true
    }

    fn select_mode(&mut self, mode: AssistMode, now: u64) -> bool {
        let Some(assist) = self.assist.as_mut() else {
            return false;
        };
        assist.state.select_mode(mode, now);
        self.log_mode_switch(mode);
        true
    }

    fn emergency(&mut self, now: u64) -> bool {
        if self.mode().is_none() {
            return false;
        }
        if self.mode() != Some(AssistMode::Emergency) {
            self.select_mode(AssistMode::Emergency, now);
        }
        let placed = self.place_best().is_some();
        if placed {
            self.log
                .push(LogChannel::Assist, "Emergency drop executed (best survival move)");
        }
        if let Some(assist) = self.assist.as_mut() {
            assist.state.clear_deadline();
        }
        true
    }

    /// Lock the active piece at the top suggestion.
    fn place_best(&mut self) -> Option<Placement> {
        let best = self.assist.as_ref().and_then(Assist::best)?;
        if !self.game.place(best.rotation, best.x, best.y) {
            tracing::warn!(?best, "top suggestion no longer fits");
            return None;
        }
        self.sync();
        Some(best)
    }

    fn log_mode_switch(&mut self, mode: AssistMode) {
        self.log
            .push(LogChannel::Mode, format!("Switched to {}", mode.label()));
    }

    /// React to locks and spawns that happened since the last call.
    fn sync(&mut self) {
        if let Some(event) = self.game.take_last_event() {
            let n = event.lines_cleared;
            if n > 0 {
                let plural = if n > 1 { "s" } else { "" };
                self.log
                    .push(LogChannel::Lines, format!("Cleared {n} line{plural}"));
            }
        }

        let piece_id = self.game.piece_id();
        if piece_id == self.seen_piece_id {
            return;
        }
        self.seen_piece_id = piece_id;
        self.on_spawn();
    }

    fn on_spawn(&mut self) {
        let now = self.clock.now_ms();
        if self.game.game_over() {
            if let Some(assist) = self.assist.as_mut() {
                assist.suggestions.clear();
                assist.state.clear_deadline();
            }
            self.log.push(
                LogChannel::Game,
                format!(
                    "Top out detected (score {}, lines {}), press r to restart",
                    self.game.score(),
                    self.game.lines()
                ),
            );
            return;
        }

        let (Some(assist), Some(active)) = (self.assist.as_mut(), self.game.active()) else {
            return;
        };
        assist.suggestions = rank_placements(self.game.board(), active.kind, &assist.weights);
        assist.state.on_spawn(now);
        tracing::debug!(
            piece_id = self.game.piece_id(),
            kind = active.kind.letter(),
            candidates = assist.suggestions.len(),
            best_score = assist.best().map(|b| b.score),
            deadline = assist.state.deadline(),
            "ranked placements"
        );
    }
}
