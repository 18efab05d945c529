//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data (the button mask comes from `bitflags`), so they can
//! be used by the gameplay core, the terminal renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, -1); pieces spawn one row above the field so the
//!   spawn orientation is visible on row 0
//!
//! # Frame Timing
//!
//! The engine is frame-stepped: every timer below counts frames, not
//! milliseconds.
//!
//! | Constant | Frames | Description |
//! |----------|--------|-------------|
//! | `MOVE_FRAMES` | 14 | Delay before a held direction starts repeating |
//! | `REPEAT_FRAMES` | 2 | Auto-repeat interval once shifting |
//! | `DOWN_FRAMES` | 3 | Soft-drop repeat interval |
//! | `LOCK_FRAMES` | 30 | Lock delay below the fast level |
//! | `FAST_LOCK_FRAMES` | 22 | Lock delay at or above the fast level |
//! | `LINE_CLEAR_FRAMES` | 41 | Line clear animation |
//! | `ARE_FRAMES` | 30 | Spawn delay |
//! | `GAME_OVER_ROW_FRAMES` | 5 | Interval between game-over row wipes |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Buttons, PieceKind, Rotation, RotateDirection, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.tile(), 3);
//!
//! let rotation = Rotation::North.rotated(RotateDirection::Clockwise);
//! assert_eq!(rotation, Rotation::East);
//!
//! let held = Buttons::LEFT | Buttons::DOWN;
//! assert!(held.contains(Buttons::LEFT));
//! assert!(held.intersects(Buttons::SOFT_DROP));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use bitflags::bitflags;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of a piece mask in the catalog
pub const PIECE_SIZE: usize = 4;

/// Number of rotation states per piece
pub const ROTATION_COUNT: u8 = 4;

/// Spawn column of a piece's bounding box
pub const SPAWN_X: i8 = 3;

/// Spawn row of a piece's bounding box (above the visible field)
pub const SPAWN_Y: i8 = -1;

/// Where the preview piece sits, board-relative (above the field)
pub const PREVIEW_X: i8 = 3;

/// Where the preview piece sits, board-relative (above the field)
pub const PREVIEW_Y: i8 = -4;

/// Frame interval used by the binary (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Delay after a fresh press before a held direction auto-repeats
pub const MOVE_FRAMES: u32 = 14;

/// Auto-repeat interval for a held direction
pub const REPEAT_FRAMES: u32 = 2;

/// Soft drop repeat interval
pub const DOWN_FRAMES: u32 = 3;

/// Lock delay below the fast level
pub const LOCK_FRAMES: u32 = 30;

/// Lock delay at or above the fast level
pub const FAST_LOCK_FRAMES: u32 = 22;

/// Line clear animation length
pub const LINE_CLEAR_FRAMES: u32 = 41;

/// Spawn delay (ARE)
pub const ARE_FRAMES: u32 = 30;

/// Frames between each row of the game-over wipe
pub const GAME_OVER_ROW_FRAMES: u32 = 5;

/// Level where timers start running at double speed
pub const FAST_LEVEL: u32 = 800;

/// Highest supported level; passing it ends the session as a win
pub const MAX_LEVEL: u32 = 999;

/// Ranking handed to the ranking table when the maximum level is passed
pub const TOP_RANKING: u8 = 9;

/// Levels added per lock by the debug level-skip button
pub const DEBUG_LEVEL_STEP: u32 = 50;

/// Fixed-point scale of the gravity accumulator (8 fractional bits)
pub const GRAVITY_ONE_ROW: u32 = 256;

/// First music track used during play
pub const GAME_TRACK: u8 = 3;

/// Music volume used on both channels during play
pub const MUSIC_VOLUME: u8 = 6;

/// Music fades out this many levels before a song change
pub const SONG_FADE_LEVELS: u32 = 10;

/// Level thresholds that advance the gravity cursor
pub const LEVEL_THRESHOLDS: [u32; 30] = [
    0, 30, 35, 40, 50, 60, 70, 80, 90, 100, 120, 140, 160, 170, 200, 220, 230, 233, 236, 239,
    243, 247, 251, 300, 330, 360, 400, 420, 450, 500,
];

/// Gravity increment per frame, in 1/256 rows, indexed by the gravity cursor
pub const GRAVITY_TABLE: [u32; 30] = [
    4, 6, 8, 10, 12, 16, 32, 48, 64, 80, 96, 112, 128, 144, 4, 32, 64, 96, 128, 160, 192, 224,
    256, 512, 768, 1024, 1280, 1024, 768, 5120,
];

/// Score needed to reach each ranking index
pub const RANK_THRESHOLDS: [u32; 10] = [
    0, 400, 800, 1400, 2000, 3500, 5500, 8000, 12000, 16000,
];

/// Level at which each music cue starts
pub const SONG_THRESHOLDS: [u32; 4] = [0, 500, 700, 900];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_timing_defaults() {
        assert_eq!(MOVE_FRAMES, 14);
        assert_eq!(REPEAT_FRAMES, 2);
        assert_eq!(DOWN_FRAMES, 3);
        assert_eq!(LOCK_FRAMES, 30);
        assert_eq!(FAST_LOCK_FRAMES, 22);
        assert_eq!(LINE_CLEAR_FRAMES, 41);
        assert_eq!(ARE_FRAMES, 30);
        assert_eq!(GAME_OVER_ROW_FRAMES, 5);
    }

    #[test]
    fn progression_tables_are_monotonic() {
        assert!(LEVEL_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
        assert!(RANK_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
        assert!(SONG_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(LEVEL_THRESHOLDS.len(), GRAVITY_TABLE.len());
        assert_eq!(RANK_THRESHOLDS.len(), TOP_RANKING as usize + 1);
    }

    #[test]
    fn buttons_bit_operations() {
        let mut b = Buttons::NONE;
        assert!(b.is_empty());
        b.insert(Buttons::ROTATE_CW);
        b |= Buttons::LEFT;
        assert!(b.contains(Buttons::ROTATE_CW | Buttons::LEFT));
        assert!(!b.contains(Buttons::RIGHT));
        b.remove(Buttons::LEFT);
        assert_eq!(b, Buttons::ROTATE_CW);
        assert_eq!((b & Buttons::ROTATE_CW), Buttons::ROTATE_CW);
    }

    #[test]
    fn each_lists_single_bits_in_order() {
        for (i, button) in Buttons::EACH.iter().enumerate() {
            assert_eq!(button.bits(), 1 << i);
        }
        let all = Buttons::EACH.iter().fold(Buttons::NONE, |acc, &b| acc | b);
        assert_eq!(all, Buttons::all());
        assert!(Buttons::SOFT_DROP.contains(Buttons::DOWN | Buttons::ALT_DOWN));
        assert_eq!(Buttons::default(), Buttons::NONE);
    }

    #[test]
    fn exit_combo_requires_exact_mask() {
        assert!(Buttons::EXIT_COMBO.is_exit_combo());
        assert!(!(Buttons::EXIT_COMBO | Buttons::LEFT).is_exit_combo());
        assert!(!Buttons::PAUSE.is_exit_combo());
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(5), Rotation::East);
        assert_eq!(Rotation::West.rotated(RotateDirection::Clockwise), Rotation::North);
        assert_eq!(
            Rotation::North.rotated(RotateDirection::CounterClockwise),
            Rotation::West
        );
    }
}

/// A tile id on the board: 0 is empty, 1..=7 are piece tiles.
pub type Tile = u8;

/// Empty board cell
pub const EMPTY_TILE: Tile = 0;

/// Grey tile written over the stack during the game-over wipe
pub const LOCKED_OUT_TILE: Tile = 8;

/// The seven piece shapes
///
/// Each shape owns a tile id (1-based, in declaration order):
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All shapes in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index (0-based)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shape for a catalog index, wrapping modulo 7
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Tile id this shape leaves on the board
    pub fn tile(self) -> Tile {
        self as Tile + 1
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation state of a piece
///
/// - **North**: spawn orientation (index 0)
/// - **East**: one clockwise step (index 1)
/// - **South**: two steps (index 2)
/// - **West**: one counter-clockwise step (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in `[0, 4)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation for an index, taken modulo the rotation count
    pub fn from_index(index: usize) -> Self {
        match index % ROTATION_COUNT as usize {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate one step in the given direction
    ///
    /// ```
    /// use blockfall_types::{Rotation, RotateDirection};
    ///
    /// assert_eq!(Rotation::North.rotated(RotateDirection::Clockwise), Rotation::East);
    /// assert_eq!(Rotation::North.rotated(RotateDirection::CounterClockwise), Rotation::West);
    /// ```
    pub fn rotated(self, direction: RotateDirection) -> Self {
        let step = match direction {
            RotateDirection::Clockwise => 1,
            RotateDirection::CounterClockwise => ROTATION_COUNT as usize - 1,
        };
        Self::from_index(self.index() + step)
    }
}

bitflags! {
    /// Bitmask over the logical buttons the engine understands.
    ///
    /// The engine receives two of these per frame: the buttons currently held
    /// and the buttons pressed this frame (edge-triggered).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const ALT_DOWN = 1 << 3;
        const ROTATE_CW = 1 << 4;
        const ROTATE_CCW = 1 << 5;
        const HARD_DROP = 1 << 6;
        const PAUSE = 1 << 7;
        /// Clears the board (only honoured with debug enabled)
        const DEBUG_CLEAR = 1 << 8;
        /// Adds levels on lock while held (only honoured with debug enabled)
        const DEBUG_LEVEL = 1 << 9;

        /// Either soft drop button
        const SOFT_DROP = Self::DOWN.bits() | Self::ALT_DOWN.bits();
        /// Held mask that asks the front end to leave the session
        const EXIT_COMBO = Self::ALT_DOWN.bits()
            | Self::ROTATE_CCW.bits()
            | Self::ROTATE_CW.bits()
            | Self::PAUSE.bits();
    }
}

impl Buttons {
    pub const NONE: Buttons = Buttons::empty();

    /// Every single-bit button, in bit order
    pub const EACH: [Buttons; 10] = [
        Buttons::LEFT,
        Buttons::RIGHT,
        Buttons::DOWN,
        Buttons::ALT_DOWN,
        Buttons::ROTATE_CW,
        Buttons::ROTATE_CCW,
        Buttons::HARD_DROP,
        Buttons::PAUSE,
        Buttons::DEBUG_CLEAR,
        Buttons::DEBUG_LEVEL,
    ];

    /// Exactly the exit combination, nothing more
    pub fn is_exit_combo(self) -> bool {
        self == Self::EXIT_COMBO
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::NONE
    }
}

/// Input for one frame: what is held, and what went down this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub held: Buttons,
    pub pressed: Buttons,
}

impl FrameInput {
    pub fn new(held: Buttons, pressed: Buttons) -> Self {
        Self { held, pressed }
    }

    /// A frame with nothing held or pressed
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame where `buttons` went down (and are therefore held)
    pub fn press(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            pressed: buttons,
        }
    }

    /// A frame where `buttons` stay down without a new edge
    pub fn hold(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            pressed: Buttons::NONE,
        }
    }
}
