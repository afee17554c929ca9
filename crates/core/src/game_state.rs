//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, queue and scoring.
//! It owns the falling piece (the piece controller), the lock pipeline and gravity.
//!
//! Locking always runs, in order: merge, line clear, score/level update,
//! spawn of the next piece (which may top out), drop timer reset.

use crate::board::Board;
use crate::pieces::get_shape;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> [(i8, i8); 4] {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape(), self.x, self.y)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// The piece dropped straight down as far as it can go.
    pub fn landed(&self, board: &Board) -> Self {
        let mut piece = *self;
        while !piece.shifted(0, 1).collides(board) {
            piece.y += 1;
        }
        piece
    }
}

/// Summary of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// The piece spawned after this lock collided immediately.
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    piece_queue: PieceQueue,
    /// Monotonic id of the active piece; increments on every spawn.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_queue(PieceQueue::new(seed))
    }

    /// Create a new game drawing from an existing queue
    pub fn with_queue(piece_queue: PieceQueue) -> Self {
        Self {
            board: Board::new(),
            active: None,
            piece_queue,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: get_drop_interval_ms(1),
            drop_timer_ms: 0,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Reinitialize board, queue and scoring, then start again.
    ///
    /// The new queue continues from the current RNG state with the same bag order.
    pub fn restart(&mut self) {
        let queue =
            PieceQueue::with_shuffle(self.piece_queue.seed(), self.piece_queue.bag_shuffle());
        let piece_id = self.piece_id;
        *self = Self::with_queue(queue);
        // Keep ids monotonic across restarts so observers see a new piece.
        self.piece_id = piece_id;
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the piece controller accepts input
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && self.active.is_some()
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.piece_queue
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost().map(|g| g.y);
        out.next_queue = self.piece_queue.peek_next();
        out.game_over = self.game_over;
        out.seed = self.piece_queue.seed();
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the queue
    ///
    /// Returns false (and ends the game) when the new piece collides at spawn.
    /// The colliding piece stays visible.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        let piece = Tetromino::new(kind);

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if piece.collides(&self.board) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Commit `candidate` if it does not collide.
    fn try_commit(&mut self, candidate: Tetromino) -> bool {
        if candidate.collides(&self.board) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Shift the active piece one column; `dir` is -1 or +1.
    pub fn move_piece(&mut self, dir: i8) -> bool {
        if dir == 0 || !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_commit(active.shifted(dir.signum(), 0))
    }

    /// Rotate clockwise; a colliding rotation is rejected.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_commit(active.rotated())
    }

    /// Move down one row, or lock in place if the row below is blocked.
    ///
    /// Returns true if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if self.try_commit(active.shifted(0, 1)) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Hard drop the active piece to its landing row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.active = Some(active.landed(&self.board));
        self.lock_piece();
        true
    }

    /// Lock the active piece at an explicit final position.
    ///
    /// Used for assist placements. Rejected when the game is not playable
    /// or the target collides.
    pub fn place(&mut self, rotation: Rotation, x: i8, y: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let target = Tetromino {
            rotation,
            x,
            y,
            ..active
        };
        if !self.try_commit(target) {
            return false;
        }
        self.lock_piece();
        true
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .merge(&active.shape(), active.x, active.y, active.kind);

        let lines_cleared = self.board.clear_lines();

        // Score with the level in effect before these lines count.
        let score_gained = calculate_line_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(score_gained);
        self.lines += lines_cleared;
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = get_drop_interval_ms(self.level);

        let spawned = self.spawn_piece();
        self.drop_timer_ms = 0;

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared,
            score_gained,
            topped_out: !spawned,
        });
    }

    /// The active piece dropped straight down (ghost piece)
    pub fn ghost(&self) -> Option<Tetromino> {
        let active = self.active?;
        if self.game_over {
            return None;
        }
        Some(active.landed(&self.board))
    }

    /// Gravity: accumulate elapsed time and soft drop once the interval is exceeded.
    ///
    /// Returns true if a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_interval_ms {
            self.drop_timer_ms = 0;
            self.soft_drop();
            return true;
        }
        false
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::canonical_order;

    fn canonical_game() -> GameState {
        let mut state = GameState::with_queue(PieceQueue::with_shuffle(1, canonical_order));
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, 800);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.started);
        assert!(state.active.is_some());
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_spawn_follows_queue() {
        let mut state = GameState::new(12345);
        state.start();

        let next_kind = state.piece_queue.peek().unwrap();
        state.lock_piece();

        assert_eq!(state.piece_id, 2);
        assert_eq!(state.active.unwrap().kind, next_kind);
    }

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.x, piece.y), (3, 0));
    }

    #[test]
    fn test_move_piece_stops_at_wall() {
        let mut state = canonical_game();
        // Horizontal I spans dx 0..=3, so x can go down to 0.
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_piece(-1) {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotation_rejected_on_collision() {
        let mut state = canonical_game();
        // I at x=3 rotated East occupies column 5, rows 0..=3.
        state.board.set(5, 3, Some(PieceKind::Z));
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap().rotation, Rotation::North);

        state.board.set(5, 3, None);
        assert!(state.rotate());
        assert_eq!(state.active.unwrap().rotation, Rotation::East);
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut state = canonical_game();
        let first_id = state.piece_id;
        // I North sits on row 1; 18 steps reach the floor.
        for _ in 0..18 {
            assert!(state.soft_drop());
        }
        assert!(!state.soft_drop());
        assert_eq!(state.piece_id, first_id + 1);
        assert!(state.board.is_occupied(3, 19));
        assert!(state.board.is_occupied(6, 19));
    }

    #[test]
    fn test_hard_drop_lands_and_spawns() {
        let mut state = canonical_game();
        assert!(state.hard_drop());
        for x in 3..7 {
            assert!(state.board.is_occupied(x, 19));
        }
        assert_eq!(state.active.unwrap().kind, PieceKind::O);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::I);
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.topped_out);
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = canonical_game();
        for x in 0..10 {
            if !(3..7).contains(&x) {
                state.board.set(x, 19, Some(PieceKind::L));
            }
        }
        state.hard_drop();
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.level, 1);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_level_up_speeds_gravity() {
        let mut state = canonical_game();
        state.lines = 9;
        for x in 0..10 {
            if !(3..7).contains(&x) {
                state.board.set(x, 19, Some(PieceKind::L));
            }
        }
        state.hard_drop();
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        // Points use the level before the clear.
        assert_eq!(state.score, 100);
        assert_eq!(state.drop_interval_ms, 740);
    }

    #[test]
    fn test_place_rejects_collision() {
        let mut state = canonical_game();
        state.board.set(0, 19, Some(PieceKind::T));
        assert!(!state.place(Rotation::North, 0, 18));
        assert_eq!(state.piece_id, 1);
        assert!(state.place(Rotation::North, 0, 17));
        assert_eq!(state.piece_id, 2);
        assert!(state.board.is_occupied(3, 18));
    }

    #[test]
    fn test_tick_gravity_requires_exceeding_interval() {
        let mut state = canonical_game();
        let y0 = state.active.unwrap().y;
        assert!(!state.tick(800));
        assert_eq!(state.active.unwrap().y, y0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, y0 + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_top_out_on_spawn() {
        let mut state = GameState::with_queue(PieceQueue::with_shuffle(1, canonical_order));
        state.board.set(4, 1, Some(PieceKind::J));
        state.start();
        assert!(state.game_over);
        assert!(!state.playable());
        assert!(!state.move_piece(1));
        assert!(!state.hard_drop());
        assert!(!state.tick(10_000));
        assert!(state.ghost().is_none());
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = canonical_game();
        state.score = 500;
        state.lines = 12;
        state.level = 2;
        state.board.set(0, 19, Some(PieceKind::S));
        let id = state.piece_id;

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert!(!state.board.is_occupied(0, 19));
        assert!(state.started);
        assert!(state.piece_id > id);
    }
}
