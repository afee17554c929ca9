//! Placement search - enumerate, simulate and rank final resting positions
//!
//! For each rotation and each in-bounds anchor column the piece is dropped from
//! above the board to its resting row. Every resulting placement is simulated on
//! a cloned board (merge + line clear) and scored with a linear heuristic:
//!
//! ```text
//! score = 8*lines - 4*holes - 0.5*aggregate_height - 0.6*bumpiness - 0.3*max_height
//! ```
//!
//! Ranking is a stable descending sort, so equal scores keep enumeration order
//! (rotation ascending, then x ascending).

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use tetris_assist_core::pieces::{get_shape, shape_columns};
use tetris_assist_core::types::{
    PieceKind, RiskClass, Rotation, BOARD_COLS, BOARD_HEIGHT, BOARD_ROWS, BOARD_WIDTH,
    SUGGESTION_COUNT,
};
use tetris_assist_core::Board;

/// Row every drop probe starts from (above the visible board).
pub const PROBE_START_Y: i8 = -2;

/// Upper bound on enumerated placements: 4 rotations x 10 columns.
pub const MAX_CANDIDATES: usize = 4 * BOARD_COLS;

/// All simulated placements in enumeration order.
pub type Candidates = ArrayVec<Placement, MAX_CANDIDATES>;

/// The best few placements, best first.
pub type Suggestions = ArrayVec<Placement, SUGGESTION_COUNT>;

/// Linear heuristic weights. Penalty weights are positive and subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub lines: f64,
    pub holes: f64,
    pub aggregate_height: f64,
    pub bumpiness: f64,
    pub max_height: f64,
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        lines: 8.0,
        holes: 4.0,
        aggregate_height: 0.5,
        bumpiness: 0.6,
        max_height: 0.3,
    };

    pub fn is_finite(&self) -> bool {
        [
            self.lines,
            self.holes,
            self.aggregate_height,
            self.bumpiness,
            self.max_height,
        ]
        .iter()
        .all(|w| w.is_finite())
    }

    pub fn evaluate(&self, lines_cleared: u32, features: &BoardFeatures) -> f64 {
        self.lines * f64::from(lines_cleared)
            - self.holes * f64::from(features.holes)
            - self.aggregate_height * f64::from(features.aggregate_height)
            - self.bumpiness * f64::from(features.bumpiness)
            - self.max_height * f64::from(features.max_height)
    }
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Board-quality features measured after a simulated placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    /// Empty cells with a filled cell somewhere above them in the same column.
    pub holes: u32,
    pub aggregate_height: u32,
    pub bumpiness: u32,
    pub max_height: u32,
}

impl BoardFeatures {
    pub fn measure(board: &Board) -> Self {
        let heights = board.column_heights();
        let cells = board.cells();

        let mut holes = 0u32;
        for (x, &h) in heights.iter().enumerate() {
            let top = BOARD_ROWS - h as usize;
            holes += (top..BOARD_ROWS)
                .filter(|&y| cells[y * BOARD_COLS + x].is_none())
                .count() as u32;
        }

        let aggregate_height = heights.iter().map(|&h| u32::from(h)).sum();
        let bumpiness = heights
            .windows(2)
            .map(|w| u32::from(w[0].abs_diff(w[1])))
            .sum();
        let max_height = heights.iter().copied().max().map_or(0, u32::from);

        Self {
            holes,
            aggregate_height,
            bumpiness,
            max_height,
        }
    }

    /// `max_height / board height`: 0 is empty, 1 is topped out.
    pub fn risk_ratio(&self) -> f64 {
        f64::from(self.max_height) / f64::from(BOARD_HEIGHT)
    }
}

/// One simulated final resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    /// Resting anchor row.
    pub y: i8,
    pub score: f64,
    pub lines_cleared: u32,
    pub risk_ratio: f64,
    pub features: BoardFeatures,
}

impl Placement {
    pub fn risk_class(&self) -> RiskClass {
        RiskClass::from_ratio(self.risk_ratio)
    }

    /// Absolute board coordinates of the four cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        get_shape(self.kind, self.rotation).map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Resting row for `kind` at `(rotation, x)`, dropped from [`PROBE_START_Y`].
///
/// Returns `None` when the piece cannot exist at the probe row or would rest
/// partly above the visible board.
pub fn drop_to_rest(board: &Board, kind: PieceKind, rotation: Rotation, x: i8) -> Option<i8> {
    let shape = get_shape(kind, rotation);
    let mut y = PROBE_START_Y;
    if board.collides(&shape, x, y) {
        return None;
    }
    while !board.collides(&shape, x, y + 1) {
        y += 1;
    }
    (y >= 0).then_some(y)
}

/// Simulate every reachable placement of `kind`, in enumeration order.
pub fn enumerate_placements(
    board: &Board,
    kind: PieceKind,
    weights: &HeuristicWeights,
) -> Candidates {
    let mut out = Candidates::new();
    for rotation in Rotation::ALL {
        let shape = get_shape(kind, rotation);
        let (min_dx, max_dx) = shape_columns(&shape);
        for x in -min_dx..=(BOARD_WIDTH as i8 - 1 - max_dx) {
            let Some(y) = drop_to_rest(board, kind, rotation, x) else {
                continue;
            };

            let mut sim = board.clone();
            sim.merge(&shape, x, y, kind);
            let lines_cleared = sim.clear_lines();
            let features = BoardFeatures::measure(&sim);

            // At most 4 rotations x 10 columns, which is exactly the capacity.
            out.push(Placement {
                kind,
                rotation,
                x,
                y,
                score: weights.evaluate(lines_cleared, &features),
                lines_cleared,
                risk_ratio: features.risk_ratio(),
                features,
            });
        }
    }
    out
}

/// Rank all placements of `kind` and keep the best [`SUGGESTION_COUNT`].
pub fn rank_placements(board: &Board, kind: PieceKind, weights: &HeuristicWeights) -> Suggestions {
    let mut all = enumerate_placements(board, kind, weights);
    all.sort_by(|a, b| b.score.total_cmp(&a.score));
    all.into_iter().take(SUGGESTION_COUNT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_default_to_policy_constants() {
        let w = HeuristicWeights::default();
        assert_eq!(w.lines, 8.0);
        assert_eq!(w.holes, 4.0);
        assert_eq!(w.aggregate_height, 0.5);
        assert_eq!(w.bumpiness, 0.6);
        assert_eq!(w.max_height, 0.3);
    }

    #[test]
    fn features_of_empty_board_are_zero() {
        let f = BoardFeatures::measure(&Board::new());
        assert_eq!(f, BoardFeatures::default());
        assert_eq!(f.risk_ratio(), 0.0);
    }

    #[test]
    fn features_count_holes_and_heights() {
        let board = Board::from_rows(&[
            "T.........",
            "..........",
            "T.S.......",
            "TSS......Z",
        ]);
        let f = BoardFeatures::measure(&board);
        // Column 0 has one empty cell under its top.
        assert_eq!(f.holes, 1);
        assert_eq!(f.max_height, 4);
        // Heights: 4,1,2,0,0,0,0,0,0,1
        assert_eq!(f.aggregate_height, 8);
        assert_eq!(f.bumpiness, 3 + 1 + 2 + 1);
    }

    #[test]
    fn evaluate_matches_formula() {
        let f = BoardFeatures {
            holes: 1,
            aggregate_height: 10,
            bumpiness: 5,
            max_height: 4,
        };
        let score = HeuristicWeights::default().evaluate(2, &f);
        let expected = 16.0 - 4.0 - 5.0 - 3.0 - 1.2;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn drop_rejects_rest_above_board() {
        let mut board = Board::new();
        for y in 0..20 {
            board.set(0, y, Some(PieceKind::J));
        }
        // Vertical I in column 0 (rotation West, dx = 1 so x = -1).
        assert_eq!(drop_to_rest(&board, PieceKind::I, Rotation::West, -1), None);
        assert_eq!(drop_to_rest(&board, PieceKind::I, Rotation::West, 0), Some(16));
    }

    #[test]
    fn o_piece_candidates_cover_nine_columns_per_rotation() {
        let all = enumerate_placements(&Board::new(), PieceKind::O, &HeuristicWeights::DEFAULT);
        // O offsets span dx 1..=2, so x ranges -1..=7.
        assert_eq!(all.len(), 36);
        for p in &all {
            for (cx, cy) in p.cells() {
                assert!((0..10).contains(&cx));
                assert!((0..20).contains(&cy));
            }
        }
    }

    #[test]
    fn ranking_is_capped_and_sorted() {
        let top = rank_placements(&Board::new(), PieceKind::T, &HeuristicWeights::DEFAULT);
        assert_eq!(top.len(), SUGGESTION_COUNT);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let top = rank_placements(&Board::new(), PieceKind::O, &HeuristicWeights::DEFAULT);
        // Against a wall the O adds less bumpiness; both walls tie, and
        // rotations of the same column tie too.
        let order: Vec<(Rotation, i8)> = top.iter().map(|p| (p.rotation, p.x)).collect();
        assert_eq!(
            order,
            vec![
                (Rotation::North, -1),
                (Rotation::North, 7),
                (Rotation::East, -1)
            ]
        );
        assert_eq!(top[0].score, top[2].score);
    }

    #[test]
    fn full_board_yields_no_candidates() {
        let rows = ["IIIII.IIII"; 20];
        let board = Board::from_rows(&rows);
        assert!(enumerate_placements(&board, PieceKind::O, &HeuristicWeights::DEFAULT).is_empty());
    }
}
