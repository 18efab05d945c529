//! Terminal render sink.
//!
//! Draws a [`GameSnapshot`](crate::core::GameSnapshot) into a character
//! [`Canvas`] (pure, testable) and flushes canvases to the terminal with
//! `crossterm`, rewriting only the cells that changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Canvas, Glyph, Rgb};
pub use game_view::{tile_color, GameView, Viewport};
pub use renderer::{encode_rows_into, TerminalRenderer};
