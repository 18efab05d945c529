//! Delayed auto shift counters.
//!
//! A fresh press fires immediately and loads the initial delay. While the
//! button stays held the counter runs down (two per frame at the fast level);
//! hitting zero fires again and loads the repeat delay. Nothing happens while
//! the button is up.

use crate::types::{DOWN_FRAMES, MOVE_FRAMES, REPEAT_FRAMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTimer {
    initial: u32,
    repeat: u32,
    remaining: u32,
}

impl RepeatTimer {
    pub fn new(initial: u32, repeat: u32) -> Self {
        Self {
            initial,
            repeat,
            remaining: initial,
        }
    }

    /// Horizontal movement: 14 frames before repeating, then every 2
    pub fn horizontal() -> Self {
        Self::new(MOVE_FRAMES, REPEAT_FRAMES)
    }

    /// Soft drop: every 3 frames
    pub fn soft_drop() -> Self {
        Self::new(DOWN_FRAMES, DOWN_FRAMES)
    }

    /// Advance one frame. Returns true when a move should happen.
    pub fn update(&mut self, pressed: bool, held: bool, fast: bool) -> bool {
        if pressed {
            self.remaining = self.initial;
            return true;
        }
        if !held {
            return false;
        }
        if self.remaining == 0 {
            self.remaining = self.repeat;
            return true;
        }
        let step = if fast { 2 } else { 1 };
        self.remaining = self.remaining.saturating_sub(step);
        false
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
