//! Game actions and the legality predicate
//!
//! `Action` is the wire shape the session layer submits, discriminated by
//! `type`. `validate_action` is a pure predicate over (state, action);
//! the controller calls it before touching anything, so an illegal action
//! can never leave a partially-mutated state behind.

use crate::core::{Card, Position, Row, COLUMNS};
use crate::game::phase::Phase;
use crate::game::state::GameState;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Types of game actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Place a hand card into the next open slot of a column (deployment)
    Deploy {
        player_index: usize,
        card: Card,
        column: usize,
    },

    /// Attack from an own front-row slot into an opponent column
    Attack {
        player_index: usize,
        attacker_position: Position,
        target_position: Position,
    },

    /// End the turn with no effect
    Pass { player_index: usize },

    /// Refill the emptied column with a hand card (reinforcement)
    Reinforce { player_index: usize, card: Card },

    /// Concede; the other player wins immediately
    Forfeit { player_index: usize },
}

impl Action {
    pub fn player_index(&self) -> usize {
        match self {
            Action::Deploy { player_index, .. }
            | Action::Attack { player_index, .. }
            | Action::Pass { player_index }
            | Action::Reinforce { player_index, .. }
            | Action::Forfeit { player_index } => *player_index,
        }
    }
}

/// Check an action's legality against the current state.
///
/// Returns `Ok(())` when the action may be applied, a `Structural` error
/// for malformed input, and a `Validation` error with the reason for
/// anything illegal in the current state.
pub fn validate_action(state: &GameState, action: &Action) -> Result<()> {
    if action.player_index() > 1 {
        return Err(EngineError::Structural(format!(
            "Player index {} out of range",
            action.player_index()
        )));
    }

    if state.phase == Phase::GameOver {
        return Err(EngineError::Validation(
            "Game is over; no further actions accepted".to_string(),
        ));
    }

    match action {
        Action::Deploy {
            player_index,
            card,
            column,
        } => {
            require_phase(state, Phase::Deployment, "deploy")?;
            require_entitled(state, *player_index)?;
            require_column(*column)?;
            require_in_hand(state, *player_index, *card)?;
            let battlefield = &state.players[*player_index].battlefield;
            if battlefield.next_open_in_column(*column).is_none() {
                return Err(EngineError::Validation(format!(
                    "Column {} is already full",
                    column
                )));
            }
            Ok(())
        }

        Action::Attack {
            player_index,
            attacker_position,
            target_position,
        } => {
            require_phase(state, Phase::Combat, "attack")?;
            require_entitled(state, *player_index)?;
            require_column(attacker_position.col)?;
            require_column(target_position.col)?;
            if attacker_position.row != Row::Front {
                return Err(EngineError::Validation(
                    "Attacks must come from a front-row slot".to_string(),
                ));
            }
            let battlefield = &state.players[*player_index].battlefield;
            if !battlefield.is_occupied(*attacker_position) {
                return Err(EngineError::Validation(format!(
                    "No card at attacker slot {}",
                    attacker_position
                )));
            }
            Ok(())
        }

        Action::Pass { player_index } => {
            require_phase(state, Phase::Combat, "pass")?;
            require_entitled(state, *player_index)
        }

        Action::Reinforce { player_index, card } => {
            require_phase(state, Phase::Reinforcement, "reinforce")?;
            let context = state.reinforcement.ok_or_else(|| {
                EngineError::Validation("No reinforcement is pending".to_string())
            })?;
            let defender_index = GameState::opponent_index(context.attacker_index);
            if *player_index != defender_index {
                return Err(EngineError::Validation(format!(
                    "Only the defender (player {}) may reinforce",
                    defender_index
                )));
            }
            require_in_hand(state, *player_index, *card)?;
            if state.players[defender_index]
                .battlefield
                .column_is_full(context.column)
            {
                return Err(EngineError::Validation(format!(
                    "Reinforcement column {} is already full",
                    context.column
                )));
            }
            Ok(())
        }

        Action::Forfeit { player_index } => {
            if !matches!(state.phase, Phase::Combat | Phase::Reinforcement) {
                return Err(EngineError::Validation(
                    "Forfeit is only legal during combat or reinforcement".to_string(),
                ));
            }
            require_entitled(state, *player_index)
        }
    }
}

fn require_phase(state: &GameState, expected: Phase, verb: &str) -> Result<()> {
    if state.phase != expected {
        return Err(EngineError::Validation(format!(
            "Cannot {} during {:?} phase",
            verb, state.phase
        )));
    }
    Ok(())
}

fn require_entitled(state: &GameState, player_index: usize) -> Result<()> {
    if player_index != state.active_player_index {
        return Err(EngineError::Validation(format!(
            "It is not player {}'s turn to act",
            player_index
        )));
    }
    Ok(())
}

fn require_column(col: usize) -> Result<()> {
    if col >= COLUMNS {
        return Err(EngineError::Validation(format!(
            "Column {} out of range 0-{}",
            col,
            COLUMNS - 1
        )));
    }
    Ok(())
}

fn require_in_hand(state: &GameState, player_index: usize, card: Card) -> Result<()> {
    if !state.players[player_index].hand.contains(&card) {
        return Err(EngineError::Validation(format!(
            "Card {} is not in player {}'s hand",
            card, player_index
        )));
    }
    Ok(())
}
