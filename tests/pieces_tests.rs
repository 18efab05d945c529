//! Piece catalog and collision tests

use blockfall::core::{catalog, collision, Board, Piece};
use blockfall::types::{PieceKind, RotateDirection, Rotation, SPAWN_X, SPAWN_Y};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        catalog::cells(PieceKind::I, Rotation::North),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        catalog::cells(PieceKind::I, Rotation::East),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    // two-state piece: south repeats north
    assert_eq!(
        catalog::cells(PieceKind::I, Rotation::South),
        catalog::cells(PieceKind::I, Rotation::North)
    );
}

#[test]
fn test_o_piece_never_changes() {
    let north = catalog::cells(PieceKind::O, Rotation::North);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(catalog::cells(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_tile_at_uses_piece_tile() {
    assert_eq!(catalog::tile_at(PieceKind::L, Rotation::North, 0, 2), PieceKind::L.tile());
    assert_eq!(catalog::tile_at(PieceKind::L, Rotation::North, 2, 2), 0);
    assert_eq!(catalog::tile_at(PieceKind::L, Rotation::North, 9, 9), 0);
}

#[test]
fn test_rotation_cycles() {
    let mut r = Rotation::North;
    for _ in 0..4 {
        r = r.rotated(RotateDirection::Clockwise);
    }
    assert_eq!(r, Rotation::North);
    assert_eq!(
        Rotation::North.rotated(RotateDirection::CounterClockwise),
        Rotation::West
    );
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_shows_on_top_row() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        let top = piece.cells().iter().map(|&(_, y)| y).min().unwrap();
        assert_eq!(top, 0, "{:?}", kind);
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_in_open_space() {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::T, 4, 8);
    assert!(collision::rotate(&mut piece, &board, RotateDirection::Clockwise));
    assert_eq!(piece.placement(), (4, 8, Rotation::East));
    assert!(collision::rotate(&mut piece, &board, RotateDirection::CounterClockwise));
    assert_eq!(piece.placement(), (4, 8, Rotation::North));
}

#[test]
fn test_wall_kick_right_off_left_wall() {
    let board = Board::new();
    // I east at x = -1 occupies column 1; flat it would stick out of the wall
    let mut piece = Piece::new(PieceKind::I, -1, 8);
    piece.rotation = Rotation::East;
    assert!(collision::rotate(&mut piece, &board, RotateDirection::Clockwise));
    assert_eq!(piece.placement(), (0, 8, Rotation::South));
    assert!(collision::fits(&piece, &board));
}

#[test]
fn test_wall_kick_left_off_right_wall() {
    let board = Board::new();
    // I east at x = 7 occupies column 9
    let mut piece = Piece::new(PieceKind::I, 7, 8);
    piece.rotation = Rotation::East;
    assert!(collision::rotate(&mut piece, &board, RotateDirection::Clockwise));
    // x + 1 still sticks out, x - 1 fits
    assert_eq!(piece.placement(), (6, 8, Rotation::South));
}

#[test]
fn test_failed_rotation_restores_piece() {
    let mut board = Board::new();
    // wall in every column except the ones the vertical I uses
    for y in 0..20 {
        for x in 0..10 {
            if x != 5 {
                board.set(x, y, 1);
            }
        }
    }
    let mut piece = Piece::new(PieceKind::I, 3, 10);
    piece.rotation = Rotation::East;
    let before = piece;
    assert!(collision::fits(&piece, &board));
    assert!(!collision::rotate(&mut piece, &board, RotateDirection::Clockwise));
    assert_eq!(piece, before);
}

#[test]
fn test_center_column_blocks_kick_for_t() {
    let mut board = Board::new();
    // T at (3, 5) going east would need mask cell (1, 0) = board (4, 5)
    board.set(4, 5, 1);
    let piece = {
        let mut p = Piece::new(PieceKind::T, 3, 5);
        p.rotation = Rotation::East;
        p
    };
    assert!(!collision::can_kick(&piece, &board));

    let mut t = Piece::new(PieceKind::T, 3, 5);
    assert!(!collision::rotate(&mut t, &board, RotateDirection::Clockwise));
    assert_eq!(t.placement(), (3, 5, Rotation::North));
}

#[test]
fn test_off_center_overlap_allows_kick_for_t() {
    let mut board = Board::new();
    // T east at (3, 5): cells (4,5) (3,6) (4,6) (4,7); first overlap is in column 0
    board.set(3, 6, 1);
    let mut east = Piece::new(PieceKind::T, 3, 5);
    east.rotation = Rotation::East;
    assert!(collision::can_kick(&east, &board));

    // other shapes always may kick
    let mut s = Piece::new(PieceKind::S, 3, 5);
    s.rotation = Rotation::East;
    board.set(4, 5, 1);
    assert!(collision::can_kick(&s, &board));
}

#[test]
fn test_ceiling_kick_at_spawn() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    assert!(collision::rotate(&mut piece, &board, RotateDirection::Clockwise));
    assert_eq!(piece.placement(), (SPAWN_X, SPAWN_Y + 1, Rotation::East));
}

// ============== Movement Tests ==============

#[test]
fn test_drop_until_floor() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::O);
    let mut rows = 0;
    while collision::drop(&mut piece, &board) {
        rows += 1;
    }
    // O occupies mask rows 1-2, so it rests with y = 17
    assert_eq!(piece.y, 17);
    assert_eq!(rows, 18);
    assert!(collision::rests(&piece, &board));
}

#[test]
fn test_shift_blocked_by_stack() {
    let mut board = Board::new();
    board.set(2, 10, 1);
    let mut piece = Piece::new(PieceKind::O, 2, 9);
    // O cells at x = 3, 4 rows 10, 11; moving left hits (2, 10)
    assert!(!collision::shift(&mut piece, &board, -1));
    assert_eq!(piece.x, 2);
    assert!(collision::shift(&mut piece, &board, 1));
    assert_eq!(piece.x, 3);
}
