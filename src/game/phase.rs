//! Match phases, outcomes and game options

use serde::{Deserialize, Serialize};

/// Phases of a match
///
/// deployment -> combat <-> reinforcement -> gameOver (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Players alternately fill their battlefields from hand
    Deployment,
    /// Active player attacks or passes; each ends the turn
    Combat,
    /// The defender refills an emptied column before play continues
    Reinforcement,
    /// Terminal; rejects all actions
    GameOver,
}

/// How a match was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VictoryType {
    LpDepletion,
    CardDepletion,
    Forfeit,
}

/// Set exactly once, when the match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub winner_index: usize,
    pub victory_type: VictoryType,
    pub turn_number: u32,
}

/// Context carried while a reinforcement is pending: which column was
/// emptied and who attacked into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinforcementContext {
    pub column: usize,
    pub attacker_index: usize,
}

/// Whether battlefield damage persists between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DamageMode {
    /// Damage sticks until the card is destroyed
    #[default]
    Cumulative,
    /// Surviving cards heal to full rank value whenever the turn passes
    PerTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    pub damage_mode: DamageMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(
            serde_json::to_string(&Phase::GameOver).unwrap(),
            r#""gameOver""#
        );
        assert_eq!(
            serde_json::to_string(&VictoryType::LpDepletion).unwrap(),
            r#""lpDepletion""#
        );
    }

    #[test]
    fn test_default_options() {
        let opts = GameOptions::default();
        assert_eq!(opts.damage_mode, DamageMode::Cumulative);
    }
}
