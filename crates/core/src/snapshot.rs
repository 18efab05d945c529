//! Snapshot module - render-facing copy of the engine state
//!
//! Renderers fill a [`GameSnapshot`] once per frame with
//! `GameState::snapshot_into` and never touch the engine directly. The
//! snapshot is plain data and can be reused across frames without allocating.

use crate::piece::Piece;
use crate::types::{PieceKind, Rotation, Tile, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Normal,
    LineClear,
    SpawnDelay,
    GameOver,
    GameOverDone,
    Paused,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Normal => "normal",
            PhaseKind::LineClear => "line_clear",
            PhaseKind::SpawnDelay => "spawn_delay",
            PhaseKind::GameOver => "game_over",
            PhaseKind::GameOverDone => "game_over_done",
            PhaseKind::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        Piece {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
            phase: crate::piece::PiecePhase::Falling,
        }
        .cells()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimersSnapshot {
    /// None while the piece is unsupported
    pub lock: Option<u32>,
    pub left: u32,
    pub right: u32,
    pub soft_drop: u32,
    pub gravity_accumulator: u32,
    /// Line clear, spawn delay or game-over row timer of the current phase
    pub phase: u32,
    /// Next row of the game-over wipe
    pub game_over_row: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Tile ids, all zero while paused
    pub board: [[Tile; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Present only while a piece is in play
    pub active: Option<ActiveSnapshot>,
    pub preview: ActiveSnapshot,
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub ranking: u8,
    pub song: u8,
    pub phase: PhaseKind,
    pub timers: TimersSnapshot,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            preview: ActiveSnapshot {
                kind: PieceKind::I,
                rotation: Rotation::North,
                x: 0,
                y: 0,
            },
            score: 0,
            level: 0,
            combo: 1,
            ranking: 0,
            song: 0,
            phase: PhaseKind::Normal,
            timers: TimersSnapshot::default(),
        }
    }
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == PhaseKind::Paused
    }

    pub fn finished(&self) -> bool {
        self.phase == PhaseKind::GameOverDone
    }
}
