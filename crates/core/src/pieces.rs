//! Pieces module - the static shape table
//!
//! Every piece kind has four rotation states, each a fixed set of four
//! occupied cell offsets from the piece anchor. The table is a read-only
//! constant; rotation indices are taken modulo 4. There are no wall kicks.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// `SHAPES[kind][rotation]`, kinds in `PieceKind::ALL` order.
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation.index() as usize]
}

/// Horizontal extent of a shape as `(min_dx, max_dx)`.
pub fn shape_columns(shape: &PieceShape) -> (i8, i8) {
    let mut min_dx = i8::MAX;
    let mut max_dx = i8::MIN;
    for &(dx, _) in shape {
        min_dx = min_dx.min(dx);
        max_dx = max_dx.max(dx);
    }
    (min_dx, max_dx)
}

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rotation_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let shape = get_shape(kind, rotation);
                for (i, a) in shape.iter().enumerate() {
                    for b in &shape[i + 1..] {
                        assert_ne!(a, b, "{:?} {:?} repeats a cell", kind, rotation);
                    }
                }
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_symmetric() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for rotation in Rotation::ALL {
            assert_eq!(get_shape(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn shape_columns_of_vertical_i() {
        let shape = get_shape(PieceKind::I, Rotation::East);
        assert_eq!(shape_columns(&shape), (2, 2));
        let shape = get_shape(PieceKind::I, Rotation::North);
        assert_eq!(shape_columns(&shape), (0, 3));
    }
}
