//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one roof so binaries, tests and benches
//! can write `blockfall::core::GameState` and friends.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
