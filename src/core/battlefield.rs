//! The battlefield grid
//!
//! Each player owns 8 slots: 2 rows (front, back) by 4 columns. The front
//! slot of a column screens the back slot, which screens the player's
//! lifepoints - that ordering is the damage cascade.

use crate::core::Card;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns per battlefield
pub const COLUMNS: usize = 4;

/// Slots per battlefield (2 rows x 4 columns)
pub const SLOTS_PER_PLAYER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Front,
    Back,
}

impl Row {
    fn offset(&self) -> usize {
        match self {
            Row::Front => 0,
            Row::Back => 1,
        }
    }
}

/// A slot address on one player's battlefield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Row,
    pub col: usize,
}

impl Position {
    pub fn new(row: Row, col: usize) -> Self {
        Position { row, col }
    }

    /// Flat slot index: front row 0..4, back row 4..8
    pub fn grid_index(&self) -> usize {
        self.row.offset() * COLUMNS + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}]", self.row, self.col)
    }
}

/// A card placed on the battlefield
///
/// Invariant: a present card always has current_hp > 0. A card whose hp
/// would reach 0 is removed to the discard pile by the resolver (unless
/// Ace invulnerability keeps it on the field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlefieldCard {
    pub card: Card,
    pub position: Position,
    pub current_hp: u32,
    pub face_down: bool,
}

impl BattlefieldCard {
    pub fn new(card: Card, position: Position, face_down: bool) -> Self {
        BattlefieldCard {
            card,
            position,
            current_hp: card.rank.value(),
            face_down,
        }
    }
}

/// One player's 2x4 battlefield grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Battlefield {
    slots: [Option<BattlefieldCard>; SLOTS_PER_PLAYER],
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<&BattlefieldCard> {
        self.slots[pos.grid_index()].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut BattlefieldCard> {
        self.slots[pos.grid_index()].as_mut()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.slots[pos.grid_index()].is_some()
    }

    /// Place a card into an empty slot
    pub fn place(&mut self, card: Card, pos: Position, face_down: bool) -> Result<()> {
        let slot = &mut self.slots[pos.grid_index()];
        if slot.is_some() {
            return Err(EngineError::Validation(format!(
                "Slot {} is already occupied",
                pos
            )));
        }
        *slot = Some(BattlefieldCard::new(card, pos, face_down));
        Ok(())
    }

    /// Remove the card at a position, returning it if present
    pub fn remove(&mut self, pos: Position) -> Option<BattlefieldCard> {
        self.slots[pos.grid_index()].take()
    }

    /// Next open slot in a column, front before back
    pub fn next_open_in_column(&self, col: usize) -> Option<Position> {
        for row in [Row::Front, Row::Back] {
            let pos = Position::new(row, col);
            if !self.is_occupied(pos) {
                return Some(pos);
            }
        }
        None
    }

    pub fn column_is_full(&self, col: usize) -> bool {
        self.next_open_in_column(col).is_none()
    }

    /// Number of cards in a column (0, 1 or 2)
    pub fn column_count(&self, col: usize) -> usize {
        [Row::Front, Row::Back]
            .iter()
            .filter(|&&row| self.is_occupied(Position::new(row, col)))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn card_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate over all present cards
    pub fn cards(&self) -> impl Iterator<Item = &BattlefieldCard> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Iterate mutably over all present cards
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut BattlefieldCard> {
        self.slots.iter_mut().filter_map(|s| s.as_mut())
    }
}
