//! Board tests - collision, merge and line clearing through the public API

use tetris_assist::core::{get_shape, Board, GameState, SimpleRng, Tetromino};
use tetris_assist::engine::{rank_placements, HeuristicWeights};
use tetris_assist::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(10, 0, Some(PieceKind::I)));
}

#[test]
fn test_collides_iff_a_cell_is_out_of_bounds_or_on_a_locked_cell() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceKind::S));

    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let shape = get_shape(kind, rotation);
            for y in -4..22i8 {
                for x in -4..12i8 {
                    let expected = shape.iter().any(|&(dx, dy)| {
                        let (cx, cy) = (x + dx, y + dy);
                        cx < 0
                            || cx >= BOARD_WIDTH as i8
                            || cy >= BOARD_HEIGHT as i8
                            || (cy >= 0 && board.is_occupied(cx, cy))
                    });
                    assert_eq!(board.collides(&shape, x, y), expected);
                }
            }
        }
    }
}

#[test]
fn test_merge_writes_kind_into_piece_cells() {
    let mut board = Board::new();
    let shape = get_shape(PieceKind::T, Rotation::North);
    board.merge(&shape, 3, 18, PieceKind::T);
    for (dx, dy) in shape {
        assert_eq!(board.get(3 + dx, 18 + dy), Some(Some(PieceKind::T)));
    }
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn test_clear_lines_is_idempotent_without_full_rows() {
    let mut board = Board::from_rows(&["..T.......", ".TTT..ZZ.."]);
    let before = board.clone();
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_lines_rechecks_shifted_rows() {
    // Three stacked full rows with a partial row on top.
    let mut board = Board::from_rows(&["S.........", "IIIIIIIIII", "JJJJJJJJJJ", "LLLLLLLLLL"]);
    assert_eq!(board.clear_lines(), 3);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_clear_lines_is_not_capped_at_four() {
    let rows = ["ZZZZZZZZZZ"; 6];
    let mut board = Board::from_rows(&rows);
    assert_eq!(board.clear_lines(), 6);
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_board_clear() {
    let mut board = Board::from_rows(&["OO........"]);
    board.clear();
    assert_eq!(board, Board::new());
}

#[test]
fn test_spawn_cells_blocked() {
    let mut board = Board::new();
    board.set(4, 0, Some(PieceKind::I));
    let shape = get_shape(PieceKind::T, Rotation::North);
    assert!(board.collides(&shape, 3, 0));
}

fn filled(board: &Board) -> usize {
    board.cells().iter().filter(|c| c.is_some()).count()
}

#[test]
fn every_lock_adds_its_visible_cells_or_clears_rows() {
    let weights = HeuristicWeights::DEFAULT;
    let mut total_lines = 0;

    for seed in 1..=20u32 {
        let mut rng = SimpleRng::new(seed);
        let mut game = GameState::new(seed);
        game.start();

        for _ in 0..200 {
            if game.game_over() {
                break;
            }
            let Some(active) = game.active() else {
                break;
            };
            let before = filled(game.board());

            // Mostly searched placements, with some scattered drops mixed in.
            let target = if rng.next_range(4) == 0 {
                for _ in 0..rng.next_range(4) {
                    game.rotate();
                }
                let dx = rng.next_range(9) as i8 - 4;
                for _ in 0..dx.abs() {
                    game.move_piece(dx.signum());
                }
                let piece = game.active().unwrap_or(active).landed(game.board());
                assert!(game.hard_drop());
                piece
            } else {
                let best = rank_placements(game.board(), active.kind, &weights)[0];
                let piece = Tetromino {
                    rotation: best.rotation,
                    x: best.x,
                    y: best.y,
                    ..active
                };
                assert!(game.place(best.rotation, best.x, best.y));
                piece
            };

            let event = game.take_last_event().unwrap();
            assert!(event.lines_cleared <= 4);
            total_lines += event.lines_cleared;

            let visible = target.cells().iter().filter(|&&(_, y)| y >= 0).count();
            let after = filled(game.board());
            assert_eq!(
                after as i64,
                before as i64 + visible as i64 - 10 * i64::from(event.lines_cleared),
                "seed {seed}"
            );
            if event.lines_cleared == 0 {
                assert!(after > before || visible == 0);
            }
        }
    }

    assert!(total_lines > 0);
}
