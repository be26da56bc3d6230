//! Phase/turn controller: the single pipeline applying actions
//!
//! `apply_action` is validate -> clone -> mutate -> detect victory ->
//! log. It either returns a fully consistent new state or an error with
//! the input state untouched; no caller ever sees a half-applied action.

use crate::core::{Card, Position, Row};
use crate::game::actions::{validate_action, Action};
use crate::game::combat::run_cascade;
use crate::game::log::{ActionDetails, HashFn, TransactionLogEntry};
use crate::game::phase::{DamageMode, Phase, ReinforcementContext, VictoryType};
use crate::game::state::{GameState, REINFORCEMENT_HAND_SIZE};
use crate::game::victory::{check_victory, declare_winner};
use crate::Result;

/// Per-application options. The timestamp is caller-supplied wall time:
/// the engine records it verbatim and never reads a clock itself, so
/// applying the same actions elsewhere reproduces identical states.
#[derive(Default, Clone, Copy)]
pub struct ApplyOptions<'a> {
    /// When present, a transaction log entry is appended per action
    pub hash_fn: Option<&'a HashFn>,
    pub timestamp: u64,
}

/// Apply one validated action, returning the successor state.
pub fn apply_action(state: &GameState, action: &Action, opts: &ApplyOptions) -> Result<GameState> {
    validate_action(state, action)?;

    let hash_before = opts.hash_fn.map(|f| f(state));
    let mut next = state.clone();

    let details = match *action {
        Action::Deploy {
            player_index,
            card,
            column,
        } => apply_deploy(&mut next, player_index, card, column)?,

        Action::Attack {
            player_index,
            attacker_position,
            target_position,
        } => apply_attack(&mut next, player_index, attacker_position.col, target_position.col),

        Action::Pass { player_index } => {
            next.logger.log_verbose(
                "pass",
                format!("{} passes", next.players[player_index].name),
            );
            advance_turn(&mut next, GameState::opponent_index(player_index));
            ActionDetails::Pass
        }

        Action::Reinforce { player_index, card } => {
            apply_reinforce(&mut next, player_index, card)?
        }

        Action::Forfeit { player_index } => {
            let winner_index = GameState::opponent_index(player_index);
            declare_winner(&mut next, winner_index, VictoryType::Forfeit);
            ActionDetails::Forfeit { winner_index }
        }
    };

    if let Some(hash_fn) = opts.hash_fn {
        let state_hash_after = hash_fn(&next);
        let entry = TransactionLogEntry {
            sequence_number: next.transaction_log.len() as u64,
            action: *action,
            state_hash_before: hash_before.unwrap_or_default(),
            state_hash_after,
            timestamp: opts.timestamp,
            details,
        };
        next.transaction_log.push(entry);
    }

    Ok(next)
}

fn apply_deploy(
    next: &mut GameState,
    player_index: usize,
    card: Card,
    column: usize,
) -> Result<ActionDetails> {
    let player = &mut next.players[player_index];
    let card = player
        .take_from_hand(card)
        .expect("validated: card in hand");
    let pos = player
        .battlefield
        .next_open_in_column(column)
        .expect("validated: open slot");
    // Deployment placements stay hidden until combat begins
    player.battlefield.place(card, pos, true)?;
    next.logger.log(
        "deploy",
        format!(
            "{} deploys to {} of column {}",
            next.players[player_index].name, pos, column
        ),
    );

    if next.players.iter().all(|p| p.battlefield.is_full()) {
        for player in &mut next.players {
            for placed in player.battlefield.cards_mut() {
                placed.face_down = false;
            }
        }
        next.phase = Phase::Combat;
        next.active_player_index = 0;
        next.turn_number = 1;
        next.logger.log("phase", "Deployment complete; combat begins");
    } else {
        // Alternate, unless the other player has nothing left to place
        let other = GameState::opponent_index(player_index);
        if !next.players[other].battlefield.is_full() {
            next.active_player_index = other;
        }
    }

    check_victory(next);
    Ok(ActionDetails::Deploy {
        grid_index: pos.grid_index(),
        phase_after: next.phase,
    })
}

fn apply_attack(
    next: &mut GameState,
    player_index: usize,
    attacker_col: usize,
    target_col: usize,
) -> ActionDetails {
    let attacker_card = next.players[player_index]
        .battlefield
        .get(Position::new(Row::Front, attacker_col))
        .expect("validated: occupied attacker slot")
        .card;

    let defender_index = GameState::opponent_index(player_index);
    let turn_number = next.turn_number;
    let combat = run_cascade(
        attacker_card,
        player_index,
        turn_number,
        &mut next.players[defender_index],
        target_col,
    );
    next.logger.log(
        "combat",
        format!(
            "{} attacks column {} with {} ({} lifepoint damage)",
            next.players[player_index].name, target_col, attacker_card, combat.total_lp_damage
        ),
    );

    // A lifepoint or card-depletion kill preempts reinforcement
    let victory_triggered = check_victory(next).is_some();

    let mut reinforcement_triggered = false;
    if !victory_triggered {
        let defender_has_hand = !next.players[defender_index].hand.is_empty();
        if combat.destroyed_any() && defender_has_hand {
            next.phase = Phase::Reinforcement;
            next.reinforcement = Some(ReinforcementContext {
                column: target_col,
                attacker_index: player_index,
            });
            next.active_player_index = defender_index;
            reinforcement_triggered = true;
            next.logger.log(
                "phase",
                format!(
                    "{} must reinforce column {}",
                    next.players[defender_index].name, target_col
                ),
            );
        } else {
            advance_turn(next, defender_index);
        }
    }

    ActionDetails::Attack {
        combat,
        reinforcement_triggered,
        victory_triggered,
    }
}

fn apply_reinforce(next: &mut GameState, player_index: usize, card: Card) -> Result<ActionDetails> {
    let context = next.reinforcement.expect("validated: pending reinforcement");
    let player = &mut next.players[player_index];
    let card = player
        .take_from_hand(card)
        .expect("validated: card in hand");
    let pos = player
        .battlefield
        .next_open_in_column(context.column)
        .expect("validated: open slot in column");
    player.battlefield.place(card, pos, false)?;

    let column_full = player.battlefield.column_is_full(context.column);
    let hand_empty = player.hand.is_empty();
    let reinforcement_complete = column_full || hand_empty;

    let mut cards_drawn = 0;
    if reinforcement_complete {
        cards_drawn = player.draw_to_hand_size(REINFORCEMENT_HAND_SIZE);
        next.reinforcement = None;
        next.phase = Phase::Combat;
        // The attacker's turn ended with the attack; the new turn is the
        // defender's, who is already the active player.
        advance_turn(next, player_index);
    }
    next.logger.log(
        "reinforce",
        format!(
            "{} reinforces {} of column {} (drew {})",
            next.players[player_index].name, pos, context.column, cards_drawn
        ),
    );

    check_victory(next);
    Ok(ActionDetails::Reinforce {
        column: context.column,
        grid_index: pos.grid_index(),
        cards_drawn,
        reinforcement_complete,
    })
}

/// Pass the turn: the given player becomes active and the turn counter
/// advances. Under per-turn damage, surviving cards heal to full.
fn advance_turn(state: &mut GameState, next_active: usize) {
    state.active_player_index = next_active;
    state.turn_number += 1;
    if state.options.damage_mode == DamageMode::PerTurn {
        for player in &mut state.players {
            for placed in player.battlefield.cards_mut() {
                placed.current_hp = placed.card.rank.value();
            }
        }
    }
}
