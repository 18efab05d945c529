//! Terminal input source.
//!
//! Maps `crossterm` key events onto the engine's logical [`Buttons`] and folds
//! press/repeat/release events into the two masks the engine consumes every
//! frame: what is held, and what went down this frame. Terminals that never
//! report key releases are handled with a release timeout.
//!
//! [`Buttons`]: crate::types::Buttons

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit};
