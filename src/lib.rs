//! duelgrid - deterministic two-player card-duel combat engine
//!
//! The engine owns all rule semantics: legal-move checking, the
//! suit-powered damage cascade, victory detection and a hash-chained
//! transaction log. It is pure and single-threaded: for a fixed seed and
//! action sequence, any two invocations produce byte-identical states and
//! digests, so a third party holding only {config, actions} can rebuild
//! and audit a match.

pub mod core;
pub mod error;
pub mod game;

pub use crate::core::{Card, PlayerName, Rank, Suit};
pub use error::{EngineError, Result};
pub use game::{GameConfig, GameState};
