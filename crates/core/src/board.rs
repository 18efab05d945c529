//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell holds a tile id (0 = empty).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Everything outside the grid counts as occupied: the walls and the floor are
//! implicit, and so is the space above row 0. Pieces may still hang above the
//! field; their off-grid cells are simply never stored.

use crate::piece::Piece;
use crate::types::{Tile, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_TILE};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Rows flagged by the last line check.
///
/// Bit `y` of `mask` is set when row `y` was full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearedLines {
    mask: u32,
    count: u8,
}

impl ClearedLines {
    pub fn count(&self) -> u32 {
        self.count as u32
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, row: usize) -> bool {
        row < HEIGHT && self.mask & (1 << row) != 0
    }

    /// Flagged rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HEIGHT).filter(move |&row| self.contains(row))
    }

    fn flag(&mut self, row: usize) {
        self.mask |= 1 << row;
        self.count += 1;
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of tile ids, row-major order (y * WIDTH + x)
    cells: [Tile; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_TILE; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Tile at (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Tile> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the tile at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, tile: Tile) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Occupancy query: out-of-range positions are always occupied
    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx] != EMPTY_TILE,
            None => true,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&tile| tile != EMPTY_TILE)
    }

    /// Tiles of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Tile] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Tile] {
        let start = y * WIDTH;
        &mut self.cells[start..start + WIDTH]
    }

    /// Zero every full row and report which rows were full.
    ///
    /// The rows above are left in place; [`Board::collapse`] closes the gaps later.
    pub fn check_lines(&mut self) -> ClearedLines {
        let mut cleared = ClearedLines::default();
        for y in 0..HEIGHT {
            if self.is_row_full(y) {
                self.row_mut(y).fill(EMPTY_TILE);
                cleared.flag(y);
            }
        }
        cleared
    }

    /// Shift everything above row `y` down by one, emptying row 0
    fn move_down(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.row_mut(0).fill(EMPTY_TILE);
    }

    /// Remove the flagged rows, processing them top to bottom
    pub fn collapse(&mut self, cleared: &ClearedLines) {
        for y in 0..HEIGHT {
            if cleared.contains(y) {
                self.move_down(y);
            }
        }
    }

    /// Copy the piece's tiles into the grid, skipping cells above or left of it
    pub fn merge(&mut self, piece: &Piece) {
        let tile = piece.kind.tile();
        for (x, y) in piece.cells() {
            if x >= 0 && y >= 0 {
                self.set(x, y, tile);
            }
        }
    }

    /// Repaint every non-empty cell of row `y` with `tile`
    pub fn recolor_row(&mut self, y: usize, tile: Tile) {
        if y >= HEIGHT {
            return;
        }
        for cell in self.row_mut(y) {
            if *cell != EMPTY_TILE {
                *cell = tile;
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_TILE);
    }

    /// Copy the grid into a row-major 2D array (used by snapshots)
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&t| t != EMPTY_TILE).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
