//! Scoring module - score, combo, level, ranking and music progression
//!
//! Scoring on a lock that clears `lines` rows:
//!
//! ```text
//! combo' = combo + 2 * lines - 2
//! level' = level + lines
//! score' = score + (((level' + lines) / 4 + 1) + drop_distance) * lines * combo'
//! ```
//!
//! A lock without clears resets the combo to 1. Every cursor here (ranking,
//! song) only moves forward.

use crate::types::{
    GAME_TRACK, MAX_LEVEL, RANK_THRESHOLDS, SONG_FADE_LEVELS, SONG_THRESHOLDS, TOP_RANKING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    score: u32,
    level: u32,
    combo: u32,
    drop_distance: u32,
    ranking: u8,
    song: u8,
}

impl Progression {
    /// Fresh progression at `start_level`; the song cursor starts at the
    /// song that level belongs to.
    pub fn new(start_level: u32) -> Self {
        let mut progression = Self {
            score: 0,
            level: start_level.min(MAX_LEVEL),
            combo: 1,
            drop_distance: 0,
            ranking: 0,
            song: 0,
        };
        while progression
            .next_song_threshold()
            .is_some_and(|next| progression.level >= next)
        {
            progression.song += 1;
        }
        progression
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn drop_distance(&self) -> u32 {
        self.drop_distance
    }

    pub fn ranking(&self) -> u8 {
        self.ranking
    }

    pub fn song(&self) -> u8 {
        self.song
    }

    /// Music track for the current song
    pub fn track(&self) -> u8 {
        GAME_TRACK + self.song
    }

    /// One row descended by the active piece
    pub fn add_drop(&mut self) {
        self.drop_distance = self.drop_distance.saturating_add(1);
    }

    /// Score a lock. Returns the level before the lock.
    pub fn record_lock(&mut self, lines: u32) -> u32 {
        let old_level = self.level;
        if lines > 0 {
            self.combo = self.combo + 2 * lines - 2;
            self.level = self.level.saturating_add(lines);
            let per_line = (self.level + lines) / 4 + 1 + self.drop_distance;
            self.score = self
                .score
                .saturating_add(per_line.saturating_mul(lines).saturating_mul(self.combo));
            self.sync_ranking();
        } else {
            self.combo = 1;
        }
        self.drop_distance = 0;
        old_level
    }

    /// Add levels outside normal play (debug level skip)
    pub fn add_levels(&mut self, levels: u32) {
        self.level = self.level.saturating_add(levels);
    }

    /// Level bump on a successful spawn, held back just before each century
    pub fn bump_level_on_spawn(&mut self) {
        if self.level % 100 != 99 {
            self.level += 1;
        }
    }

    fn sync_ranking(&mut self) {
        while let Some(&next) = RANK_THRESHOLDS.get(self.ranking as usize + 1) {
            if self.score < next {
                break;
            }
            self.ranking += 1;
        }
    }

    /// Past the last supported level
    pub fn exceeded_max_level(&self) -> bool {
        self.level > MAX_LEVEL
    }

    /// Ranking handed out for finishing the game by passing the last level
    pub fn force_top_ranking(&mut self) {
        self.ranking = TOP_RANKING;
    }

    /// Whether the backdrop should advance after a lock that started at
    /// `old_level`: every century below 600, and the 800s.
    pub fn backdrop_advances(&self, old_level: u32) -> bool {
        let crossed = self.level / 100 > old_level / 100;
        crossed && (self.level < 600 || (800..900).contains(&self.level))
    }

    fn next_song_threshold(&self) -> Option<u32> {
        SONG_THRESHOLDS.get(self.song as usize + 1).copied()
    }

    /// Next song is close enough that the music should fade out
    pub fn song_fade_due(&self) -> bool {
        self.next_song_threshold()
            .is_some_and(|next| self.level + SONG_FADE_LEVELS >= next)
    }

    /// Advance to the next song when the lock from `old_level` crossed its
    /// threshold. Returns the new track to play.
    pub fn advance_song(&mut self, old_level: u32) -> Option<u8> {
        let next = self.next_song_threshold()?;
        if old_level < next && self.level >= next {
            self.song += 1;
            Some(self.track())
        } else {
            None
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0)
    }
}
