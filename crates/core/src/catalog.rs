//! Piece catalog - immutable 4x4 occupancy masks
//!
//! Every shape has four rotation states. Rotation 0 is the spawn orientation
//! and sits in mask rows 1-2, so a piece spawned at y = -1 shows up on board
//! row 0. Rotation index + 1 is one clockwise step.
//!
//! Three-wide pieces are bottom-aligned in a 3x3 box; T, L and J spawn with
//! their flat side up.

use crate::types::{PieceKind, Rotation, Tile, EMPTY_TILE, PIECE_SIZE};

type Mask = [[u8; PIECE_SIZE]; PIECE_SIZE];

const I_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
];

const O_MASK: Mask = [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]];
const O_MASKS: [Mask; 4] = [O_MASK, O_MASK, O_MASK, O_MASK];

const T_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const S_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const Z_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const J_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const L_MASKS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
];

/// Occupancy mask for a shape in a rotation state
pub fn mask(kind: PieceKind, rotation: Rotation) -> &'static Mask {
    let masks = match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::Z => &Z_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
    };
    &masks[rotation.index()]
}

/// Tile id at (col, row) of the mask, or 0 when the cell is empty or outside the mask
#[inline]
pub fn tile_at(kind: PieceKind, rotation: Rotation, col: usize, row: usize) -> Tile {
    if col >= PIECE_SIZE || row >= PIECE_SIZE {
        return EMPTY_TILE;
    }
    if mask(kind, rotation)[row][col] != 0 {
        kind.tile()
    } else {
        EMPTY_TILE
    }
}

/// Occupied (col, row) offsets in row-major order.
///
/// Every shape has exactly four cells in every rotation.
pub fn cells(kind: PieceKind, rotation: Rotation) -> [(i8, i8); 4] {
    let m = mask(kind, rotation);
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0usize;
    for (row, line) in m.iter().enumerate() {
        for (col, &v) in line.iter().enumerate() {
            if v != 0 && n < out.len() {
                out[n] = (col as i8, row as i8);
                n += 1;
            }
        }
    }
    out
}
