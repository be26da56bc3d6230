//! Deterministic replay
//!
//! A `{config, actions}` pair fully determines a game: dealing is seeded
//! and the engine never consults a clock, so re-applying the actions from
//! a fresh state reconstructs every intermediate state. With a hash
//! function injected, the rebuilt transaction log can be compared
//! link-for-link against a live one to audit it.

use crate::game::actions::Action;
use crate::game::controller::{apply_action, ApplyOptions};
use crate::game::log::HashFn;
use crate::game::state::{GameConfig, GameState};

/// Options for a replay run
#[derive(Default, Clone, Copy)]
pub struct ReplayOptions<'a> {
    /// When present, the replayed states grow a transaction log too
    pub hash_fn: Option<&'a HashFn>,
}

/// Outcome of a replay run.
///
/// An invalid replay is not an engine error: the replay itself worked
/// and `final_state` holds the last state reached before the rejected
/// action, so the caller can inspect exactly where a log diverged.
#[derive(Debug)]
pub struct ReplayResult {
    pub final_state: GameState,
    pub valid: bool,
    /// Index into the action list of the first rejected action
    pub failed_at_index: Option<usize>,
    pub error: Option<String>,
}

/// Rebuild a game from its config and action sequence.
///
/// Stops at the first action the engine rejects; a well-formed recording
/// replays to the end with `valid: true`.
pub fn replay_game(config: &GameConfig, actions: &[Action], opts: &ReplayOptions) -> ReplayResult {
    let mut state = GameState::new_game(config);
    let apply_opts = ApplyOptions {
        hash_fn: opts.hash_fn,
        // Replays carry no wall time of their own
        timestamp: 0,
    };

    for (index, action) in actions.iter().enumerate() {
        match apply_action(&state, action, &apply_opts) {
            Ok(next) => state = next,
            Err(err) => {
                return ReplayResult {
                    final_state: state,
                    valid: false,
                    failed_at_index: Some(index),
                    error: Some(err.to_string()),
                };
            }
        }
    }

    ReplayResult {
        final_state: state,
        valid: true,
        failed_at_index: None,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerName, COLUMNS};
    use crate::game::log::compute_state_digest;
    use crate::game::phase::{GameOptions, Phase};

    fn config() -> GameConfig {
        GameConfig {
            players: [PlayerName::new("Alice"), PlayerName::new("Bob")],
            rng_seed: 99,
            options: GameOptions::default(),
        }
    }

    /// Record the deployment phase as an action list.
    fn deployment_script() -> Vec<Action> {
        let mut state = GameState::new_game(&config());
        let mut actions = Vec::new();
        while state.phase == Phase::Deployment {
            let player_index = state.active_player_index;
            let card = state.players[player_index].hand[0];
            let column = (0..COLUMNS)
                .find(|&c| !state.players[player_index].battlefield.column_is_full(c))
                .unwrap();
            let action = Action::Deploy {
                player_index,
                card,
                column,
            };
            state = apply_action(&state, &action, &ApplyOptions::default()).unwrap();
            actions.push(action);
        }
        actions
    }

    #[test]
    fn test_replay_reconstructs_state() {
        let actions = deployment_script();

        let live = {
            let mut state = GameState::new_game(&config());
            for action in &actions {
                state = apply_action(&state, action, &ApplyOptions::default()).unwrap();
            }
            state
        };
        let replayed = replay_game(&config(), &actions, &ReplayOptions::default());

        assert!(replayed.valid);
        assert_eq!(
            compute_state_digest(&live),
            compute_state_digest(&replayed.final_state)
        );
    }

    #[test]
    fn test_replay_rebuilds_transaction_log() {
        let actions = deployment_script();
        let opts = ReplayOptions {
            hash_fn: Some(&compute_state_digest),
        };
        let result = replay_game(&config(), &actions, &opts);

        assert!(result.valid);
        assert_eq!(result.final_state.transaction_log.len(), actions.len());
        let log = &result.final_state.transaction_log;
        for pair in log.windows(2) {
            assert_eq!(pair[0].state_hash_after, pair[1].state_hash_before);
        }
    }

    #[test]
    fn test_replay_reports_first_illegal_action() {
        let mut actions = deployment_script();
        // Corrupt the recording: swap one deploy's actor
        if let Action::Deploy { player_index, .. } = &mut actions[3] {
            *player_index = 1 - *player_index;
        }

        let result = replay_game(&config(), &actions, &ReplayOptions::default());
        assert!(!result.valid);
        assert_eq!(result.failed_at_index, Some(3));
        assert!(result.error.is_some());
        // The state reached before the bad action is preserved
        assert_eq!(result.final_state.phase, Phase::Deployment);
    }

    #[test]
    fn test_empty_action_list_is_valid() {
        let result = replay_game(&config(), &[], &ReplayOptions::default());
        assert!(result.valid);
        assert_eq!(result.final_state.turn_number, 0);
    }
}
