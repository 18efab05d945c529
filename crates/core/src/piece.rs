//! The piece value shared by the active slot and the preview slot.

use crate::catalog;
use crate::types::{PieceKind, Rotation, PREVIEW_X, PREVIEW_Y, SPAWN_X, SPAWN_Y};

/// Lifecycle of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePhase {
    /// Nothing directly below
    Falling,
    /// Supported, lock delay running
    Resting,
    /// Merged into the board (or about to be replaced)
    Locked,
}

/// A shape at a position on the board.
///
/// `(x, y)` is the top-left corner of the 4x4 bounding box; `y` may be
/// negative while the piece sits above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub phase: PiecePhase,
}

impl Piece {
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
            phase: PiecePhase::Falling,
        }
    }

    /// A fresh piece at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y)
    }

    /// A piece parked in the preview slot
    pub fn preview(kind: PieceKind) -> Self {
        Self::new(kind, PREVIEW_X, PREVIEW_Y)
    }

    /// Board coordinates of the occupied cells, row-major
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut out = catalog::cells(self.kind, self.rotation);
        for cell in &mut out {
            cell.0 += self.x;
            cell.1 += self.y;
        }
        out
    }

    /// Same piece moved by (dx, dy)
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Position and rotation, ignoring the lifecycle phase
    pub fn placement(&self) -> (i8, i8, Rotation) {
        (self.x, self.y, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_piece_is_visible_on_row_zero() {
        let piece = Piece::spawn(PieceKind::I);
        assert_eq!(piece.cells(), [(3, 0), (4, 0), (5, 0), (6, 0)]);
        assert_eq!(piece.phase, PiecePhase::Falling);
    }

    #[test]
    fn preview_piece_sits_above_the_field() {
        let piece = Piece::preview(PieceKind::O);
        assert!(piece.cells().iter().all(|&(_, y)| y < 0));
    }

    #[test]
    fn offset_keeps_rotation() {
        let mut piece = Piece::spawn(PieceKind::T);
        piece.rotation = Rotation::South;
        let moved = piece.offset(-1, 2);
        assert_eq!(moved.placement(), (2, 1, Rotation::South));
    }
}
