//! Victory detection
//!
//! Runs after every mutation. Precedence: forfeit (declared directly by
//! the controller) beats lifepoint depletion beats card depletion, and a
//! lifepoint kill preempts any pending reinforcement transition.

use crate::game::phase::{GameOutcome, Phase, VictoryType};
use crate::game::state::GameState;

/// Record an outcome exactly once and enter the terminal phase.
pub(crate) fn declare_winner(state: &mut GameState, winner_index: usize, victory_type: VictoryType) {
    if state.outcome.is_some() {
        return;
    }
    state.outcome = Some(GameOutcome {
        winner_index,
        victory_type,
        turn_number: state.turn_number,
    });
    state.phase = Phase::GameOver;
    state.reinforcement = None;
    state.logger.log(
        "victory",
        format!(
            "{} wins by {:?} on turn {}",
            state.players[winner_index].name, victory_type, state.turn_number
        ),
    );
}

/// Inspect the state for a decided match and transition if one is found.
///
/// Returns the outcome when the game is (already or newly) over.
pub fn check_victory(state: &mut GameState) -> Option<GameOutcome> {
    if state.outcome.is_some() {
        return state.outcome;
    }

    // Lifepoint depletion first: it wins even when the same mutation
    // emptied a column and would otherwise trigger reinforcement.
    for index in 0..2 {
        if state.players[index].lifepoints == 0 {
            declare_winner(state, GameState::opponent_index(index), VictoryType::LpDepletion);
            return state.outcome;
        }
    }

    // Card depletion: no battlefield, no hand, no drawpile.
    for index in 0..2 {
        if state.players[index].is_depleted() {
            declare_winner(
                state,
                GameState::opponent_index(index),
                VictoryType::CardDepletion,
            );
            return state.outcome;
        }
    }

    None
}
