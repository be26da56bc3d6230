//! Combat resolver: the damage cascade
//!
//! One attack resolves front target -> back target -> lifepoints within
//! the defender's column, halting as soon as the overflow runs out. Suit
//! powers hook into the cascade at fixed points: clubs double overflow
//! handed to an occupied back card, spades double overflow reaching
//! lifepoints, diamonds (always) and hearts (when dying as the sole card
//! of their column) shield lifepoints on destruction. The Ace is special
//! on both sides: it attacks for exactly 1 with no multipliers, and it
//! cannot be destroyed except by another Ace.

use crate::core::{Card, PlayerState, Position, Rank, Row, Suit, COLUMNS};
use crate::game::state::GameState;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What a cascade step hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CascadeTarget {
    FrontCard,
    BackCard,
    Lifepoints,
}

/// Suit- and Ace-triggered abilities, recorded on the step they affected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bonus {
    /// Non-Ace attacker cannot destroy an Ace defender
    AceInvulnerable,
    /// Ace vs Ace: the floor does not apply
    AceVsAce,
    /// Destroyed diamond shields lifepoints by its rank value
    DiamondDeathShield,
    /// Destroyed heart shields lifepoints when it died as the sole
    /// remaining card of its column
    HeartDeathShield,
    /// Clubs attacker doubles overflow handed to the back card
    ClubDoubleOverflow,
    /// Spades attacker doubles overflow reaching lifepoints
    SpadeDoubleLp,
}

/// One resolved step of the cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeStep {
    pub target: CascadeTarget,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    /// Damage arriving at this step, after any transfer multiplier
    pub incoming_damage: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp_before: Option<u32>,

    /// How much this target soaked up
    pub absorbed: u32,

    /// What passed through to the next step (post death shield)
    pub overflow: u32,

    /// Damage actually applied here (hp lost, or lifepoints lost)
    pub damage: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp_after: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lp_after: Option<u32>,

    pub destroyed: bool,

    pub bonuses: SmallVec<[Bonus; 2]>,
}

/// Full record of one attack's resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatLogEntry {
    pub turn_number: u32,
    pub attacker_player_index: usize,
    pub attacker_card: Card,
    pub target_column: usize,
    pub base_damage: u32,
    /// Lifepoints actually lost by the defender (after clamping)
    pub total_lp_damage: u32,
    pub steps: SmallVec<[CascadeStep; 3]>,
}

impl CombatLogEntry {
    /// Did the cascade destroy at least one card in the column?
    pub fn destroyed_any(&self) -> bool {
        self.steps.iter().any(|s| s.destroyed)
    }
}

/// Resolve the cascade of `attacker` into `target_column` of `defender`,
/// mutating the defender in place and returning the structured record.
///
/// This is the rules core shared by `apply_action` and the standalone
/// `resolve_attack`; it touches nothing but the defender.
pub(crate) fn run_cascade(
    attacker: Card,
    attacker_index: usize,
    turn_number: u32,
    defender: &mut PlayerState,
    target_column: usize,
) -> CombatLogEntry {
    let base_damage = attacker.attack_damage();
    // Ace attacks are flat: no attack-side multiplier ever applies
    let multipliers_apply = attacker.rank != Rank::Ace;

    let mut incoming = base_damage;
    let mut steps: SmallVec<[CascadeStep; 3]> = SmallVec::new();

    for row in [Row::Front, Row::Back] {
        if incoming == 0 {
            break;
        }
        let pos = Position::new(row, target_column);
        // Empty slots are skipped; overflow passes through unchanged
        let Some(occupant) = defender.battlefield.get(pos) else {
            continue;
        };
        let card = occupant.card;
        let hp = occupant.current_hp;

        let mut bonuses: SmallVec<[Bonus; 2]> = SmallVec::new();
        if row == Row::Back && multipliers_apply && attacker.suit == Suit::Clubs {
            incoming *= 2;
            bonuses.push(Bonus::ClubDoubleOverflow);
        }

        let absorbed;
        let hp_after;
        let destroyed;
        if card.rank == Rank::Ace && attacker.rank != Rank::Ace {
            // Invulnerability floor: the Ace soaks what it can but stays
            // on the field at 1hp (an Ace's hp is always 1).
            absorbed = incoming.min(hp);
            hp_after = 1;
            destroyed = false;
            bonuses.push(Bonus::AceInvulnerable);
        } else {
            if card.rank == Rank::Ace {
                bonuses.push(Bonus::AceVsAce);
            }
            absorbed = incoming.min(hp);
            hp_after = hp - absorbed;
            destroyed = hp_after == 0;
        }

        let mut overflow = incoming - absorbed;

        if destroyed {
            let sole_in_column = defender.battlefield.column_count(target_column) == 1;
            let shields = match card.suit {
                Suit::Diamonds => true,
                Suit::Hearts => sole_in_column,
                _ => false,
            };
            if shields && overflow > 0 {
                let shield = overflow.min(card.rank.value());
                overflow -= shield;
                bonuses.push(match card.suit {
                    Suit::Diamonds => Bonus::DiamondDeathShield,
                    _ => Bonus::HeartDeathShield,
                });
            }
            let removed = defender.battlefield.remove(pos).expect("occupied slot");
            defender.discard_pile.push(removed.card);
        } else if let Some(occupant) = defender.battlefield.get_mut(pos) {
            occupant.current_hp = hp_after;
        }

        steps.push(CascadeStep {
            target: match row {
                Row::Front => CascadeTarget::FrontCard,
                Row::Back => CascadeTarget::BackCard,
            },
            card: Some(card),
            incoming_damage: incoming,
            hp_before: Some(hp),
            absorbed,
            overflow,
            damage: absorbed,
            hp_after: Some(hp_after),
            lp_after: None,
            destroyed,
            bonuses,
        });

        incoming = overflow;
    }

    let mut total_lp_damage = 0;
    if incoming > 0 {
        let mut bonuses: SmallVec<[Bonus; 2]> = SmallVec::new();
        if multipliers_apply && attacker.suit == Suit::Spades {
            incoming *= 2;
            bonuses.push(Bonus::SpadeDoubleLp);
        }
        let lp_before = defender.lifepoints;
        let damage = incoming.min(lp_before);
        defender.lose_lifepoints(incoming);
        total_lp_damage = damage;

        steps.push(CascadeStep {
            target: CascadeTarget::Lifepoints,
            card: None,
            incoming_damage: incoming,
            hp_before: None,
            absorbed: damage,
            overflow: incoming - damage,
            damage,
            hp_after: None,
            lp_after: Some(defender.lifepoints),
            destroyed: false,
            bonuses,
        });
    }

    CombatLogEntry {
        turn_number,
        attacker_player_index: attacker_index,
        attacker_card: attacker,
        target_column,
        base_damage,
        total_lp_damage,
        steps,
    }
}

/// Resolve one attack as a standalone computation.
///
/// The attacker is the active player's front card at `attacker_col`; the
/// cascade runs into the opponent's `target_col`. Cards are destroyed
/// and lifepoints reduced in the returned state, but no phase, turn or
/// victory transition happens - this is the pure cascade, exposed for
/// inspection and tooling.
pub fn resolve_attack(
    state: &GameState,
    attacker_col: usize,
    target_col: usize,
) -> Result<(GameState, CombatLogEntry)> {
    if attacker_col >= COLUMNS || target_col >= COLUMNS {
        return Err(EngineError::Validation(format!(
            "Column out of range 0-{}",
            COLUMNS - 1
        )));
    }
    let attacker_index = state.active_player_index;
    let attacker_pos = Position::new(Row::Front, attacker_col);
    let attacker = state.players[attacker_index]
        .battlefield
        .get(attacker_pos)
        .map(|bc| bc.card)
        .ok_or_else(|| {
            EngineError::Validation(format!("No card at attacker slot {}", attacker_pos))
        })?;

    let mut next = state.clone();
    let defender_index = GameState::opponent_index(attacker_index);
    let entry = run_cascade(
        attacker,
        attacker_index,
        state.turn_number,
        &mut next.players[defender_index],
        target_col,
    );
    next.logger.log(
        "combat",
        format!(
            "{} attacks column {} for {} ({} lifepoint damage)",
            attacker, target_col, entry.base_damage, entry.total_lp_damage
        ),
    );
    Ok((next, entry))
}
