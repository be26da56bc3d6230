//! Main game state structure
//!
//! `GameState` is the single unit of truth for a match. It is a value:
//! every mutation in the action pipeline happens on a clone, so callers
//! never observe a partially-applied action.

use crate::core::{standard_deck, PlayerName, PlayerState};
use crate::game::log::TransactionLogEntry;
use crate::game::logger::GameLogger;
use crate::game::phase::{GameOptions, GameOutcome, Phase, ReinforcementContext};
use crate::game::victory::check_victory;
use crate::{EngineError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Cards dealt to each hand at creation: 8 deployment placements plus
/// the 4-card combat hand.
pub const INITIAL_HAND_SIZE: usize = 12;

/// Hand size reinforcement tops back up to
pub const REINFORCEMENT_HAND_SIZE: usize = 4;

/// Immutable match configuration; together with the ordered action list
/// it fully determines every reachable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub players: [PlayerName; 2],
    pub rng_seed: u64,
    #[serde(default)]
    pub options: GameOptions,
}

/// Complete match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: [PlayerState; 2],

    /// Index of the entitled actor: the deploying player during
    /// deployment, the attacker during combat, the defender during
    /// reinforcement.
    pub active_player_index: usize,

    pub phase: Phase,

    /// 0 during deployment; set to 1 when combat begins, then
    /// incremented every time the turn passes.
    pub turn_number: u32,

    pub rng_seed: u64,

    /// Pending reinforcement, set while phase is Reinforcement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reinforcement: Option<ReinforcementContext>,

    /// Hash-chained audit trail, append-only
    #[serde(default)]
    pub transaction_log: Vec<TransactionLogEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,

    pub options: GameOptions,

    /// Event narration; never serialized, never digested
    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    /// Create a seeded match: both 52-card decks shuffled
    /// deterministically from `rng_seed` (one ChaCha12 stream, player 0's
    /// deck then player 1's), initial hands dealt, phase = deployment.
    pub fn new_game(config: &GameConfig) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(config.rng_seed);

        let players = config.players.clone().map(|name| {
            let mut player = PlayerState::new(name);
            let mut deck = standard_deck();
            deck.shuffle(&mut rng);
            player.drawpile = deck;
            player.draw(INITIAL_HAND_SIZE);
            player
        });

        GameState {
            players,
            active_player_index: 0,
            phase: Phase::Deployment,
            turn_number: 0,
            rng_seed: config.rng_seed,
            reinforcement: None,
            transaction_log: Vec::new(),
            outcome: None,
            options: config.options,
            logger: GameLogger::new(),
        }
    }

    pub fn player(&self, index: usize) -> Result<&PlayerState> {
        self.players
            .get(index)
            .ok_or_else(|| EngineError::Structural(format!("No player at index {}", index)))
    }

    pub fn active_player(&self) -> &PlayerState {
        &self.players[self.active_player_index]
    }

    /// The other player's index, for this strictly two-player game
    pub fn opponent_index(index: usize) -> usize {
        1 - index
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Draw up to `count` cards for a player, returning the new state.
    pub fn draw_cards(&self, player_index: usize, count: usize) -> Result<GameState> {
        if player_index > 1 {
            return Err(EngineError::Structural(format!(
                "Player index {} out of range",
                player_index
            )));
        }
        let mut next = self.clone();
        let drawn = next.players[player_index].draw(count);
        next.logger.log_verbose(
            "draw",
            format!("{} drew {} card(s)", next.players[player_index].name, drawn),
        );
        check_victory(&mut next);
        Ok(next)
    }

    /// Redact hidden information for one viewer.
    ///
    /// The opponent's hand and drawpile become empty with counts exposed;
    /// the viewer's own zones pass through untouched and never carry
    /// counts. Battlefields, discard piles, lifepoints and all match
    /// metadata are public and unchanged for both players.
    pub fn filter_for_player(&self, viewer_index: usize) -> Result<GameState> {
        if viewer_index > 1 {
            return Err(EngineError::Structural(format!(
                "Player index {} out of range",
                viewer_index
            )));
        }
        let mut filtered = self.clone();
        let opponent = &mut filtered.players[Self::opponent_index(viewer_index)];
        opponent.hand_count = Some(opponent.hand.len());
        opponent.drawpile_count = Some(opponent.drawpile.len());
        opponent.hand = Vec::new();
        opponent.drawpile = Vec::new();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DECK_SIZE;

    fn config(seed: u64) -> GameConfig {
        GameConfig {
            players: [PlayerName::new("Alice"), PlayerName::new("Bob")],
            rng_seed: seed,
            options: GameOptions::default(),
        }
    }

    #[test]
    fn test_new_game_shape() {
        let state = GameState::new_game(&config(7));

        assert_eq!(state.phase, Phase::Deployment);
        assert_eq!(state.active_player_index, 0);
        assert_eq!(state.turn_number, 0);
        assert!(state.outcome.is_none());
        for player in &state.players {
            assert_eq!(player.hand.len(), INITIAL_HAND_SIZE);
            assert_eq!(player.drawpile.len(), DECK_SIZE - INITIAL_HAND_SIZE);
            assert!(player.holds_full_deck());
        }
    }

    #[test]
    fn test_dealing_is_deterministic() {
        let a = GameState::new_game(&config(42));
        let b = GameState::new_game(&config(42));
        assert_eq!(a, b);

        let c = GameState::new_game(&config(43));
        assert_ne!(a.players[0].hand, c.players[0].hand);
    }

    #[test]
    fn test_players_get_distinct_decks() {
        let state = GameState::new_game(&config(42));
        // Same seed, same stream, but sequential shuffles: the two hands
        // should not coincide.
        assert_ne!(state.players[0].hand, state.players[1].hand);
    }

    #[test]
    fn test_draw_cards_is_pure() {
        let state = GameState::new_game(&config(1));
        let next = state.draw_cards(0, 3).unwrap();

        assert_eq!(state.players[0].hand.len(), INITIAL_HAND_SIZE);
        assert_eq!(next.players[0].hand.len(), INITIAL_HAND_SIZE + 3);
        assert!(next.players[0].holds_full_deck());

        assert!(state.draw_cards(2, 1).is_err());
    }

    #[test]
    fn test_filter_hides_opponent_zones() {
        let state = GameState::new_game(&config(9));
        let view = state.filter_for_player(0).unwrap();

        // Viewer's own zones untouched, no counts
        assert_eq!(view.players[0].hand, state.players[0].hand);
        assert_eq!(view.players[0].drawpile, state.players[0].drawpile);
        assert!(view.players[0].hand_count.is_none());
        assert!(view.players[0].drawpile_count.is_none());

        // Opponent redacted with counts
        assert!(view.players[1].hand.is_empty());
        assert!(view.players[1].drawpile.is_empty());
        assert_eq!(view.players[1].hand_count, Some(INITIAL_HAND_SIZE));
        assert_eq!(
            view.players[1].drawpile_count,
            Some(DECK_SIZE - INITIAL_HAND_SIZE)
        );

        // Public fields pass through
        assert_eq!(view.players[1].lifepoints, state.players[1].lifepoints);
        assert_eq!(view.phase, state.phase);
        assert_eq!(view.rng_seed, state.rng_seed);
    }

    #[test]
    fn test_filtered_view_serde_carries_counts() {
        let state = GameState::new_game(&config(9));
        let view = state.filter_for_player(1).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["players"][0]["handCount"].is_number());
        // Own state never carries count fields
        assert!(json["players"][1].get("handCount").is_none());
    }
}
