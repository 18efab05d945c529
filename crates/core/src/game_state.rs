//! Game state module - the frame-driven state machine
//!
//! One [`GameState::tick`] per frame. Each tick looks at the pause button
//! first, then runs the handler of the current [`Phase`]:
//!
//! ```text
//! Normal ──lock, lines──▶ LineClear ──collapse──▶ SpawnDelay ──spawn──▶ Normal
//!    └────lock, no lines──────────────────────────────▲   └──blocked──▶ GameOver ──▶ GameOverDone
//! ```
//!
//! Pausing wraps the current phase in [`RunState::Paused`] and freezes
//! everything; unpausing puts the same phase back without running it.

use crate::board::{Board, ClearedLines};
use crate::collision;
use crate::config::EngineConfig;
use crate::das::RepeatTimer;
use crate::events::{Cue, Event, Events};
use crate::gravity::{Gravity, LockDelay};
use crate::piece::{Piece, PiecePhase};
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PhaseKind, TimersSnapshot};
use crate::types::{
    Buttons, FrameInput, RotateDirection, ARE_FRAMES, BOARD_HEIGHT, DEBUG_LEVEL_STEP, FAST_LEVEL,
    GAME_OVER_ROW_FRAMES, LINE_CLEAR_FRAMES, LOCKED_OUT_TILE, MUSIC_VOLUME,
};

/// What the engine is doing, with the timer that belongs to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A piece is in play
    Normal,
    /// Full rows were zeroed and wait to be collapsed
    LineClear { timer: u32, cleared: ClearedLines },
    /// Waiting to spawn the next piece
    SpawnDelay { timer: u32 },
    /// Wiping the board one row at a time, top to bottom
    GameOver { timer: u32, row: u8 },
    /// Terminal
    GameOverDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running(Phase),
    Paused { resume_to: Phase },
}

/// Complete engine state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState<S: PieceSource = RandomPieces> {
    config: EngineConfig,
    source: S,
    board: Board,
    active: Piece,
    preview: Piece,
    run: RunState,
    progression: Progression,
    gravity: Gravity,
    lock: LockDelay,
    left: RepeatTimer,
    right: RepeatTimer,
    soft_drop: RepeatTimer,
    ranking_reported: bool,
    events: Events,
}

impl GameState<RandomPieces> {
    /// New session with default settings and random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::from_config(EngineConfig::default().with_seed(seed))
    }

    pub fn from_config(config: EngineConfig) -> Self {
        let source = RandomPieces::new(config.seed);
        Self::with_source(config, source)
    }
}

impl<S: PieceSource> GameState<S> {
    /// New session drawing pieces from `source`.
    ///
    /// The first shape becomes the active piece and the second fills the
    /// preview slot. Music setup and the preview cue are queued as events.
    pub fn with_source(config: EngineConfig, mut source: S) -> Self {
        let first = source.next_piece();
        let second = source.next_piece();
        let progression = Progression::new(config.start_level);

        let mut state = Self {
            config,
            source,
            board: Board::new(),
            active: Piece::spawn(first),
            preview: Piece::preview(second),
            run: RunState::Running(Phase::Normal),
            progression,
            gravity: Gravity::new(),
            lock: LockDelay::new(config.lock_mode),
            left: RepeatTimer::horizontal(),
            right: RepeatTimer::horizontal(),
            soft_drop: RepeatTimer::soft_drop(),
            ranking_reported: false,
            events: Events::new(),
        };
        state.push(Event::Sound(Cue::Preview(second)));
        state.push(Event::MusicVolume {
            left: MUSIC_VOLUME,
            right: MUSIC_VOLUME,
        });
        state.push(Event::SelectTrack(state.progression.track()));
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (tests, replays, tools)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The piece in play; only meaningful while the phase is `Normal`
    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn preview(&self) -> &Piece {
        &self.preview
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn phase(&self) -> PhaseKind {
        match self.run {
            RunState::Paused { .. } => PhaseKind::Paused,
            RunState::Running(Phase::Normal) => PhaseKind::Normal,
            RunState::Running(Phase::LineClear { .. }) => PhaseKind::LineClear,
            RunState::Running(Phase::SpawnDelay { .. }) => PhaseKind::SpawnDelay,
            RunState::Running(Phase::GameOver { .. }) => PhaseKind::GameOver,
            RunState::Running(Phase::GameOverDone) => PhaseKind::GameOverDone,
        }
    }

    pub fn paused(&self) -> bool {
        matches!(self.run, RunState::Paused { .. })
    }

    pub fn finished(&self) -> bool {
        self.run == RunState::Running(Phase::GameOverDone)
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn combo(&self) -> u32 {
        self.progression.combo()
    }

    pub fn ranking(&self) -> u8 {
        self.progression.ranking()
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn lock_timer(&self) -> Option<u32> {
        self.lock.remaining()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drain the notifications recorded since the last call
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    /// Pending notifications, without draining them
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Record a notification; once the buffer is full the oldest one goes.
    fn push(&mut self, event: Event) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn fast(&self) -> bool {
        self.progression.level() >= FAST_LEVEL
    }

    fn phase_countdown(&self, timer: u32) -> u32 {
        timer.saturating_sub(if self.fast() { 2 } else { 1 })
    }

    pub fn tick_input(&mut self, input: FrameInput) -> bool {
        self.tick(input.held, input.pressed)
    }

    /// Advance one frame.
    ///
    /// `held` is every button currently down, `pressed` the ones that went
    /// down this frame. Returns true once the session is over, and on every
    /// call after that.
    pub fn tick(&mut self, held: Buttons, pressed: Buttons) -> bool {
        let phase = match self.run {
            RunState::Running(Phase::GameOverDone) => return true,
            RunState::Paused { resume_to } => {
                if pressed.contains(Buttons::PAUSE) {
                    self.run = RunState::Running(resume_to);
                }
                return false;
            }
            RunState::Running(phase) => {
                if pressed.contains(Buttons::PAUSE) {
                    self.run = RunState::Paused { resume_to: phase };
                    return false;
                }
                phase
            }
        };

        let next = match phase {
            Phase::Normal => self.normal(held, pressed),
            Phase::LineClear { timer, cleared } => self.line_clear(timer, cleared),
            Phase::SpawnDelay { timer } => self.spawn_delay(timer, held, pressed),
            Phase::GameOver { timer, row } => self.game_over(timer, row),
            Phase::GameOverDone => Phase::GameOverDone,
        };
        self.run = RunState::Running(next);
        next == Phase::GameOverDone
    }

    fn drop_active(&mut self) -> bool {
        if collision::drop(&mut self.active, &self.board) {
            self.progression.add_drop();
            true
        } else {
            false
        }
    }

    fn normal(&mut self, held: Buttons, pressed: Buttons) -> Phase {
        let level = self.progression.level();
        let fast = self.fast();
        let soft_held = held.intersects(Buttons::SOFT_DROP);
        let mut lock_cue = true;

        if self.config.debug && pressed.contains(Buttons::DEBUG_CLEAR) {
            self.board.clear();
        }

        if pressed.contains(Buttons::ROTATE_CW) {
            collision::rotate(&mut self.active, &self.board, RotateDirection::Clockwise);
        }
        if pressed.contains(Buttons::ROTATE_CCW) {
            collision::rotate(
                &mut self.active,
                &self.board,
                RotateDirection::CounterClockwise,
            );
        }

        if collision::rests(&self.active, &self.board) {
            if !self.lock.is_armed() {
                self.lock.arm(level);
                if soft_held {
                    // soft-dropped onto the stack: lock right away, quietly
                    self.lock.force();
                    lock_cue = false;
                } else {
                    self.push(Event::Sound(Cue::Land));
                }
            }
            self.active.phase = PiecePhase::Resting;
        } else {
            self.lock.disarm();
            self.active.phase = PiecePhase::Falling;
        }

        if pressed.contains(Buttons::HARD_DROP) && !self.lock.is_armed() {
            while self.drop_active() {}
            self.lock.arm(level);
            self.active.phase = PiecePhase::Resting;
            self.push(Event::Sound(Cue::Land));
        }

        let rows = self.gravity.step(level);
        for _ in 0..rows {
            self.drop_active();
        }

        if self
            .soft_drop
            .update(pressed.intersects(Buttons::SOFT_DROP), soft_held, fast)
        {
            self.drop_active();
        }

        if soft_held {
            self.lock.cut_short();
        }

        let next = if self.lock.count_down() {
            self.lock_active(held, lock_cue)
        } else {
            Phase::Normal
        };

        // The counters keep running on the lock frame; only a live piece moves.
        let move_left = self.left.update(
            pressed.contains(Buttons::LEFT),
            held.contains(Buttons::LEFT),
            fast,
        );
        let move_right = self.right.update(
            pressed.contains(Buttons::RIGHT),
            held.contains(Buttons::RIGHT),
            fast,
        );
        if next == Phase::Normal {
            if move_left {
                collision::shift(&mut self.active, &self.board, -1);
            }
            if move_right {
                collision::shift(&mut self.active, &self.board, 1);
            }
        }

        next
    }

    fn lock_active(&mut self, held: Buttons, lock_cue: bool) -> Phase {
        self.active.phase = PiecePhase::Locked;
        self.board.merge(&self.active);

        let cleared = self.board.check_lines();
        let old_level = self.progression.record_lock(cleared.count());
        let mut next = if cleared.is_empty() {
            Phase::SpawnDelay { timer: ARE_FRAMES }
        } else {
            self.push(Event::Sound(Cue::Clear));
            Phase::LineClear {
                timer: LINE_CLEAR_FRAMES,
                cleared,
            }
        };

        if self.config.debug && held.contains(Buttons::DEBUG_LEVEL) {
            self.progression.add_levels(DEBUG_LEVEL_STEP);
        }

        if self.progression.backdrop_advances(old_level) {
            self.push(Event::BackdropAdvance);
        }

        if self.progression.exceeded_max_level() {
            self.progression.force_top_ranking();
            self.report_ranking();
            next = Phase::GameOverDone;
        }

        if self.progression.song_fade_due() {
            self.push(Event::MusicVolume { left: 0, right: 0 });
        }
        if let Some(track) = self.progression.advance_song(old_level) {
            self.push(Event::SelectTrack(track));
            self.push(Event::MusicVolume {
                left: MUSIC_VOLUME,
                right: MUSIC_VOLUME,
            });
        }

        if lock_cue {
            self.push(Event::Sound(Cue::Lock));
        }
        next
    }

    fn line_clear(&mut self, timer: u32, cleared: ClearedLines) -> Phase {
        if timer > 0 {
            return Phase::LineClear {
                timer: self.phase_countdown(timer),
                cleared,
            };
        }
        self.board.collapse(&cleared);
        self.push(Event::Sound(Cue::Collapse));
        Phase::SpawnDelay { timer: ARE_FRAMES }
    }

    fn spawn_delay(&mut self, timer: u32, held: Buttons, pressed: Buttons) -> Phase {
        let next = if timer > 0 {
            Phase::SpawnDelay {
                timer: self.phase_countdown(timer),
            }
        } else {
            self.spawn_next();
            if !collision::fits(&self.active, &self.board) {
                // leave the blocked piece visible on top of the stack
                self.board.merge(&self.active);
                self.active.phase = PiecePhase::Locked;
                return Phase::GameOver {
                    timer: GAME_OVER_ROW_FRAMES,
                    row: 0,
                };
            }
            self.progression.bump_level_on_spawn();
            self.buffer_rotation(held);
            Phase::Normal
        };

        // charge DAS so a held direction carries over to the next piece
        let fast = self.fast();
        self.left.update(
            pressed.contains(Buttons::LEFT),
            held.contains(Buttons::LEFT),
            fast,
        );
        self.right.update(
            pressed.contains(Buttons::RIGHT),
            held.contains(Buttons::RIGHT),
            fast,
        );
        next
    }

    fn spawn_next(&mut self) {
        self.active = Piece::spawn(self.preview.kind);
        let kind = self.source.next_piece();
        self.preview = Piece::preview(kind);
        self.push(Event::Sound(Cue::Preview(kind)));
    }

    /// Rotation buttons held through the spawn delay apply as the piece appears
    fn buffer_rotation(&mut self, held: Buttons) {
        if held.contains(Buttons::ROTATE_CW) {
            collision::rotate(&mut self.active, &self.board, RotateDirection::Clockwise);
            self.push(Event::Sound(Cue::Rotate));
        }
        if held.contains(Buttons::ROTATE_CCW) {
            collision::rotate(
                &mut self.active,
                &self.board,
                RotateDirection::CounterClockwise,
            );
            self.push(Event::Sound(Cue::Rotate));
        }
    }

    fn game_over(&mut self, timer: u32, row: u8) -> Phase {
        if timer > 0 {
            return Phase::GameOver {
                timer: timer - 1,
                row,
            };
        }
        self.board.recolor_row(row as usize, LOCKED_OUT_TILE);
        let row = row + 1;
        if row >= BOARD_HEIGHT {
            self.report_ranking();
            return Phase::GameOverDone;
        }
        Phase::GameOver {
            timer: GAME_OVER_ROW_FRAMES,
            row,
        }
    }

    fn report_ranking(&mut self) {
        if !self.ranking_reported {
            self.ranking_reported = true;
            self.push(Event::RankingSetup(self.progression.ranking()));
        }
    }

    /// Fill a render snapshot without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        if self.paused() {
            // nothing to peek at while paused
            for row in out.board.iter_mut() {
                row.fill(0);
            }
        } else {
            self.board.write_u8_grid(&mut out.board);
        }

        out.active = match self.run {
            RunState::Running(Phase::Normal) => Some(ActiveSnapshot::from(self.active)),
            _ => None,
        };
        out.preview = ActiveSnapshot::from(self.preview);
        out.score = self.progression.score();
        out.level = self.progression.level();
        out.combo = self.progression.combo();
        out.ranking = self.progression.ranking();
        out.song = self.progression.song();
        out.phase = self.phase();

        let phase = match self.run {
            RunState::Running(phase) | RunState::Paused { resume_to: phase } => phase,
        };
        let (phase_timer, game_over_row) = match phase {
            Phase::LineClear { timer, .. } | Phase::SpawnDelay { timer } => (timer, 0),
            Phase::GameOver { timer, row } => (timer, row),
            Phase::GameOverDone => (0, BOARD_HEIGHT),
            Phase::Normal => (0, 0),
        };
        out.timers = TimersSnapshot {
            lock: self.lock.remaining(),
            left: self.left.remaining(),
            right: self.right.remaining(),
            soft_drop: self.soft_drop.remaining(),
            gravity_accumulator: self.gravity.accumulator(),
            phase: phase_timer,
            game_over_row,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<RandomPieces> {
    fn default() -> Self {
        Self::new(1)
    }
}
