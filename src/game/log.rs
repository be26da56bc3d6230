//! Transaction log and state digests
//!
//! Every applied action is wrapped in a log entry carrying the digest of
//! the state before and after, forming a hash chain a third party can
//! recompute from {config, actions} alone. The digest function itself is
//! an injected capability: the engine never chooses the hash primitive,
//! it only promises to feed it deterministic bytes.

use crate::game::actions::Action;
use crate::game::combat::CombatLogEntry;
use crate::game::phase::Phase;
use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An injected pure digest over game states
pub type HashFn = dyn Fn(&GameState) -> String;

/// Action-type-specific record of what an application did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionDetails {
    Deploy {
        grid_index: usize,
        phase_after: Phase,
    },
    Attack {
        combat: CombatLogEntry,
        reinforcement_triggered: bool,
        victory_triggered: bool,
    },
    Pass,
    Reinforce {
        column: usize,
        grid_index: usize,
        cards_drawn: usize,
        reinforcement_complete: bool,
    },
    Forfeit {
        winner_index: usize,
    },
}

/// One link of the hash chain; the log is append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogEntry {
    /// 0-based, strictly increasing
    pub sequence_number: u64,
    pub action: Action,
    pub state_hash_before: String,
    pub state_hash_after: String,
    /// Caller-supplied wall time; never read by the engine
    pub timestamp: u64,
    pub details: ActionDetails,
}

/// Fields stripped before digesting.
///
/// The transaction log records digests, so it cannot itself be part of
/// what they cover - otherwise appending an entry would invalidate the
/// chain it extends. (The event logger is already skipped by serde.)
const EXCLUDED_FIELDS: &[&str] = &["transactionLog"];

/// Default state digest: canonical JSON of the gameplay-relevant state,
/// hashed. Two states that differ only in their transaction logs digest
/// identically. Callers wanting a cryptographic digest inject their own
/// function via `ApplyOptions`/`ReplayOptions`.
pub fn compute_state_digest(state: &GameState) -> String {
    let json_value = match serde_json::to_value(state) {
        Ok(v) => v,
        Err(_) => return "0".repeat(16),
    };

    let cleaned = strip_excluded(json_value);

    let canonical = match serde_json::to_string(&cleaned) {
        Ok(s) => s,
        Err(_) => return "0".repeat(16),
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn strip_excluded(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => {
            for field in EXCLUDED_FIELDS {
                map.remove(*field);
            }
            for (_, v) in map.iter_mut() {
                *v = strip_excluded(v.clone());
            }
            serde_json::Value::Object(map)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(strip_excluded).collect())
        }
        other => other,
    }
}
