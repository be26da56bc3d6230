//! Game state, rules and the action pipeline

pub mod actions;
pub mod combat;
pub mod controller;
pub mod log;
pub mod logger;
pub mod phase;
pub mod replay;
pub mod state;
pub mod victory;

pub use actions::{validate_action, Action};
pub use combat::{resolve_attack, Bonus, CascadeStep, CascadeTarget, CombatLogEntry};
pub use controller::{apply_action, ApplyOptions};
pub use log::{compute_state_digest, ActionDetails, HashFn, TransactionLogEntry};
pub use logger::{GameLogger, LogEntry, VerbosityLevel};
pub use phase::{
    DamageMode, GameOptions, GameOutcome, Phase, ReinforcementContext, VictoryType,
};
pub use replay::{replay_game, ReplayOptions, ReplayResult};
pub use state::{GameConfig, GameState};
pub use victory::check_victory;
