//! Core value types: cards, the battlefield grid, and players

pub mod battlefield;
pub mod card;
pub mod player;
pub mod types;

pub use battlefield::{Battlefield, BattlefieldCard, Position, Row, COLUMNS, SLOTS_PER_PLAYER};
pub use card::{standard_deck, Card, Rank, Suit, DECK_SIZE};
pub use player::{PlayerState, STARTING_LIFEPOINTS};
pub use types::PlayerName;
