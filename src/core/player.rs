//! Player representation

use crate::core::{Battlefield, Card, PlayerName, DECK_SIZE};
use serde::{Deserialize, Serialize};

/// Lifepoints each player starts with
pub const STARTING_LIFEPOINTS: u32 = 20;

/// One player's complete state
///
/// Card conservation invariant: hand + drawpile + discard pile + occupied
/// battlefield slots always account for exactly 52 cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub name: PlayerName,

    /// Cards in hand (hidden from the opponent)
    pub hand: Vec<Card>,

    /// Face-down draw pile; deterministic order from the seed.
    /// Draws pop from the back.
    pub drawpile: Vec<Card>,

    /// Destroyed cards, append-only, never reshuffled
    pub discard_pile: Vec<Card>,

    /// Lifepoints, clamped at 0
    pub lifepoints: u32,

    pub battlefield: Battlefield,

    /// Only present on filtered opponent views (see
    /// `GameState::filter_for_player`); never set on a player's own state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawpile_count: Option<usize>,
}

impl PlayerState {
    pub fn new(name: impl Into<PlayerName>) -> Self {
        PlayerState {
            name: name.into(),
            hand: Vec::new(),
            drawpile: Vec::new(),
            discard_pile: Vec::new(),
            lifepoints: STARTING_LIFEPOINTS,
            battlefield: Battlefield::new(),
            hand_count: None,
            drawpile_count: None,
        }
    }

    /// Total cards across all zones; 52 for any reachable unfiltered state
    pub fn card_count(&self) -> usize {
        self.hand.len()
            + self.drawpile.len()
            + self.discard_pile.len()
            + self.battlefield.card_count()
    }

    pub fn holds_full_deck(&self) -> bool {
        self.card_count() == DECK_SIZE
    }

    /// Remove a specific card from hand, if held
    pub fn take_from_hand(&mut self, card: Card) -> Option<Card> {
        let idx = self.hand.iter().position(|c| *c == card)?;
        Some(self.hand.remove(idx))
    }

    /// Draw up to `count` cards from the drawpile into hand
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            match self.drawpile.pop() {
                Some(card) => {
                    self.hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Draw until hand size reaches `target` or the drawpile is exhausted
    pub fn draw_to_hand_size(&mut self, target: usize) -> usize {
        let need = target.saturating_sub(self.hand.len());
        self.draw(need)
    }

    pub fn lose_lifepoints(&mut self, amount: u32) {
        self.lifepoints = self.lifepoints.saturating_sub(amount);
    }

    /// Out of material: nothing on the field, in hand, or left to draw
    pub fn is_depleted(&self) -> bool {
        self.battlefield.is_empty() && self.hand.is_empty() && self.drawpile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};

    #[test]
    fn test_player_creation() {
        let player = PlayerState::new("Alice");
        assert_eq!(player.name.as_str(), "Alice");
        assert_eq!(player.lifepoints, STARTING_LIFEPOINTS);
        assert_eq!(player.card_count(), 0);
        assert!(player.hand_count.is_none());
    }

    #[test]
    fn test_draw_stops_at_empty_pile() {
        let mut player = PlayerState::new("Bob");
        player.drawpile = vec![
            Card::new(Suit::Spades, Rank::Two),
            Card::new(Suit::Spades, Rank::Three),
        ];

        assert_eq!(player.draw(5), 2);
        assert_eq!(player.hand.len(), 2);
        assert!(player.drawpile.is_empty());

        // Drawpile is a stack: last card comes first
        assert_eq!(player.hand[0].rank, Rank::Three);
    }

    #[test]
    fn test_draw_to_hand_size() {
        let mut player = PlayerState::new("Bob");
        player.hand = vec![Card::new(Suit::Hearts, Rank::King)];
        player.drawpile = vec![
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Clubs, Rank::Three),
            Card::new(Suit::Clubs, Rank::Four),
            Card::new(Suit::Clubs, Rank::Five),
        ];

        assert_eq!(player.draw_to_hand_size(4), 3);
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.drawpile.len(), 1);

        // Already at target: no draws
        assert_eq!(player.draw_to_hand_size(4), 0);
    }

    #[test]
    fn test_lifepoints_clamp_at_zero() {
        let mut player = PlayerState::new("Carol");
        player.lose_lifepoints(7);
        assert_eq!(player.lifepoints, 13);

        player.lose_lifepoints(100);
        assert_eq!(player.lifepoints, 0);
    }

    #[test]
    fn test_take_from_hand() {
        let mut player = PlayerState::new("Dave");
        let card = Card::new(Suit::Diamonds, Rank::Seven);
        player.hand = vec![Card::new(Suit::Clubs, Rank::Two), card];

        assert_eq!(player.take_from_hand(card), Some(card));
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.take_from_hand(card), None);
    }

    #[test]
    fn test_depletion() {
        let mut player = PlayerState::new("Eve");
        assert!(player.is_depleted());

        player.hand.push(Card::new(Suit::Spades, Rank::Ace));
        assert!(!player.is_depleted());

        // Discard pile does not count as material
        player.discard_pile.push(player.hand.pop().unwrap());
        assert!(player.is_depleted());
    }
}
