//! Collision and kick engine
//!
//! Fit tests for a piece against the board, single-row drops, sideways shifts
//! and rotation with ceiling and wall kicks. Every operation either succeeds or
//! leaves the piece exactly as it was.

use crate::board::Board;
use crate::catalog;
use crate::piece::Piece;
use crate::types::{PieceKind, RotateDirection, SPAWN_Y};

/// True when no occupied cell of the piece overlaps the board or its walls
#[inline]
pub fn fits(piece: &Piece, board: &Board) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(x, y)| !board.is_occupied(x, y))
}

/// True when some cell of the piece has something directly below it
#[inline]
pub fn rests(piece: &Piece, board: &Board) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(x, y)| board.is_occupied(x, y + 1))
}

/// Center column rule for L, J and T.
///
/// Looks at the first overlapping cell in row-major order; when it lies in mask
/// column 1 a sideways kick would not help, so none is attempted. Other shapes
/// can always kick.
pub fn can_kick(piece: &Piece, board: &Board) -> bool {
    if !matches!(piece.kind, PieceKind::L | PieceKind::J | PieceKind::T) {
        return true;
    }
    for (col, row) in catalog::cells(piece.kind, piece.rotation) {
        if board.is_occupied(piece.x + col, piece.y + row) {
            return col != 1;
        }
    }
    true
}

/// Rotate one step, trying in order: in place, one row down when still at the
/// spawn row and unsupported, then x + 1 and x - 1 when kicks are allowed.
///
/// Returns false and restores position and rotation when nothing fits.
pub fn rotate(piece: &mut Piece, board: &Board, direction: RotateDirection) -> bool {
    let original = *piece;
    piece.rotation = piece.rotation.rotated(direction);
    if fits(piece, board) {
        return true;
    }

    // ceiling kick
    if piece.y == SPAWN_Y && !rests(piece, board) {
        piece.y += 1;
        if fits(piece, board) {
            return true;
        }
    }

    if can_kick(piece, board) {
        piece.x += 1;
        if fits(piece, board) {
            return true;
        }

        piece.x -= 2;
        if fits(piece, board) {
            return true;
        }
    }

    *piece = original;
    false
}

/// Move down one row if nothing is below. Returns whether the piece moved.
pub fn drop(piece: &mut Piece, board: &Board) -> bool {
    if rests(piece, board) {
        return false;
    }
    piece.y += 1;
    true
}

/// Move sideways by `dx`, undoing the move if it does not fit
pub fn shift(piece: &mut Piece, board: &Board, dx: i8) -> bool {
    piece.x += dx;
    if fits(piece, board) {
        true
    } else {
        piece.x -= dx;
        false
    }
}
