//! Gravity accumulator and lock delay.

use crate::config::LockMode;
use crate::types::{
    FAST_LEVEL, FAST_LOCK_FRAMES, GRAVITY_ONE_ROW, GRAVITY_TABLE, LEVEL_THRESHOLDS, LOCK_FRAMES,
};

/// Fixed-point fall accumulator (8 fractional bits) and the level cursor
/// selecting the per-frame increment.
///
/// The accumulator carries over from piece to piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gravity {
    accumulator: u32,
    cursor: usize,
}

impl Gravity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame at `level` and return how many rows to drop
    pub fn step(&mut self, level: u32) -> u32 {
        self.sync_cursor(level);
        self.accumulate(GRAVITY_TABLE[self.cursor])
    }

    /// Move the cursor forward while `level` reaches the next threshold
    pub fn sync_cursor(&mut self, level: u32) {
        while self.cursor + 1 < LEVEL_THRESHOLDS.len() && level >= LEVEL_THRESHOLDS[self.cursor + 1]
        {
            self.cursor += 1;
        }
    }

    /// Add `increment` (1/256 rows) and take out every whole row
    pub fn accumulate(&mut self, increment: u32) -> u32 {
        self.accumulator = self.accumulator.saturating_add(increment);
        let rows = self.accumulator / GRAVITY_ONE_ROW;
        self.accumulator %= GRAVITY_ONE_ROW;
        rows
    }

    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current per-frame increment
    pub fn increment(&self) -> u32 {
        GRAVITY_TABLE[self.cursor]
    }
}

/// Lock delay for a piece coming to rest at `level`
pub fn lock_frames(level: u32, mode: LockMode) -> u32 {
    match mode {
        LockMode::Immediate => 0,
        LockMode::Countdown if level >= FAST_LEVEL => FAST_LOCK_FRAMES,
        LockMode::Countdown => LOCK_FRAMES,
    }
}

/// Lock timer: `None` while the piece is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockDelay {
    timer: Option<u32>,
    mode: LockMode,
}

impl LockDelay {
    pub fn new(mode: LockMode) -> Self {
        Self { timer: None, mode }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.timer
    }

    /// Start the countdown for `level`, replacing any running one
    pub fn arm(&mut self, level: u32) {
        self.timer = Some(lock_frames(level, self.mode));
    }

    /// Lock on the next evaluation
    pub fn force(&mut self) {
        self.timer = Some(0);
    }

    pub fn disarm(&mut self) {
        self.timer = None;
    }

    /// Zero a running countdown (down held while resting)
    pub fn cut_short(&mut self) {
        if let Some(t) = self.timer.as_mut() {
            *t = 0;
        }
    }

    /// One frame of the countdown. Returns true when the piece must lock now,
    /// in which case the timer is disarmed.
    pub fn count_down(&mut self) -> bool {
        match self.timer {
            Some(0) => {
                self.timer = None;
                true
            }
            Some(t) => {
                self.timer = Some(t - 1);
                false
            }
            None => false,
        }
    }
}
