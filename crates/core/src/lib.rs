//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the gameplay engine of the falling-block game: the
//! play-field, the active and preview pieces, movement/rotation/collision
//! rules, line clearing, scoring, level progression and the frame-driven
//! state machine. It has **zero dependencies** on UI, audio, or I/O:
//!
//! - **Deterministic**: same piece source and input trace produce identical games
//! - **Frame-stepped**: one [`GameState::tick`] per frame, every timer counts frames
//! - **Allocation-free ticks**: collaborator notifications go into a fixed-capacity buffer
//!
//! # Module Structure
//!
//! - [`catalog`]: 4x4 shape masks per piece and rotation
//! - [`board`]: 10x20 grid of tile ids, line detection and compaction
//! - [`piece`]: the active/preview piece value
//! - [`collision`]: fit tests, drops, shifts and rotation with kicks
//! - [`das`]: delayed auto shift counters
//! - [`gravity`]: fixed-point gravity accumulator and lock delay
//! - [`scoring`]: score, combo, level, ranking and music progression
//! - [`rng`]: piece sources
//! - [`events`]: notifications for audio, ranking and backdrop collaborators
//! - [`config`]: engine configuration from the environment
//! - [`snapshot`]: read-only view for renderers
//! - [`game_state`]: the state machine tying everything together
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::Buttons;
//!
//! let mut game = GameState::new(12345);
//!
//! // One frame with left pressed, then one with it still held.
//! let done = game.tick(Buttons::LEFT, Buttons::LEFT);
//! assert!(!done);
//! game.tick(Buttons::LEFT, Buttons::NONE);
//!
//! // Collaborator notifications accumulate until drained.
//! let events = game.take_events();
//! assert!(!events.is_empty());
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod das;
pub mod events;
pub mod game_state;
pub mod gravity;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedLines};
pub use config::{ConfigError, EngineConfig, LockMode};
pub use events::{dispatch, AudioSink, BackdropSink, Cue, Event, Events, RankingSink};
pub use game_state::{GameState, Phase, RunState};
pub use piece::{Piece, PiecePhase};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};
pub use scoring::Progression;
pub use snapshot::{ActiveSnapshot, GameSnapshot, PhaseKind, TimersSnapshot};
