//! RNG module - bag-based piece queue
//!
//! The queue holds upcoming piece kinds. Whenever it drops below
//! [`QUEUE_LOW_WATER`] entries it is topped up with whole bags: one of each
//! piece (I, O, T, S, Z, J, L) in shuffled order. Any kind therefore reappears
//! within two bags (14 pieces).
//!
//! Also provides a simple LCG for deterministic testing.

use std::collections::VecDeque;

use crate::types::{PieceKind, NEXT_QUEUE_LEN, QUEUE_LOW_WATER};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Orders one bag in place.
pub type BagShuffle = fn(&mut SimpleRng, &mut [PieceKind]);

/// Default bag order: Fisher-Yates driven by the queue's RNG.
pub fn fisher_yates(rng: &mut SimpleRng, bag: &mut [PieceKind]) {
    rng.shuffle(bag);
}

/// Leaves every bag in canonical `I O T S Z J L` order (tests).
pub fn canonical_order(_rng: &mut SimpleRng, _bag: &mut [PieceKind]) {}

/// Queue of upcoming pieces, refilled with shuffled bags
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pending: VecDeque<PieceKind>,
    rng: SimpleRng,
    shuffle: BagShuffle,
    bags_dealt: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_shuffle(seed, fisher_yates)
    }

    /// Create a queue whose bags are ordered by `shuffle`.
    pub fn with_shuffle(seed: u32, shuffle: BagShuffle) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(QUEUE_LOW_WATER + PieceKind::ALL.len()),
            rng: SimpleRng::new(seed),
            shuffle,
            bags_dealt: 0,
        };
        queue.refill();
        queue
    }

    /// Append whole bags until the low-water mark is met.
    fn refill(&mut self) {
        while self.pending.len() < QUEUE_LOW_WATER {
            let mut bag = PieceKind::ALL;
            (self.shuffle)(&mut self.rng, &mut bag);
            self.pending.extend(bag);
            self.bags_dealt += 1;
        }
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        // `refill` keeps at least QUEUE_LOW_WATER entries queued.
        let piece = self.pending.pop_front().unwrap_or(PieceKind::I);
        self.refill();
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.pending.front().copied()
    }

    /// Upcoming pieces, front first.
    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pending.iter().copied()
    }

    /// The next [`NEXT_QUEUE_LEN`] pieces for the preview panel.
    pub fn peek_next(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        let mut out = [PieceKind::I; NEXT_QUEUE_LEN];
        for (slot, kind) in out.iter_mut().zip(self.pending.iter()) {
            *slot = *kind;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of bags appended since creation
    pub fn bags_dealt(&self) -> u32 {
        self.bags_dealt
    }

    /// Get the current RNG state (for restarting game with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    pub fn bag_shuffle(&self) -> BagShuffle {
        self.shuffle
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
