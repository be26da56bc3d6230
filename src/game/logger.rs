//! In-memory game event logger
//!
//! Captures a narrated event stream (deployments, cascade results,
//! outcomes) alongside the structured transaction log. The logger lives
//! inside `GameState` but is skipped by serde, so it never feeds the
//! state digest and cannot perturb determinism.

use serde::{Deserialize, Serialize};

/// How much the logger narrates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VerbosityLevel {
    Silent,
    #[default]
    Normal,
    Verbose,
}

/// A log entry with owned strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "deploy", "combat", "victory")
    pub category: Option<String>,
}

/// Centralized logger for game events
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    entries: Vec<LogEntry>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            entries: Vec::new(),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Record an event at Normal level
    pub fn log(&mut self, category: &str, message: impl Into<String>) {
        self.log_at(VerbosityLevel::Normal, category, message);
    }

    /// Record an event at Verbose level
    pub fn log_verbose(&mut self, category: &str, message: impl Into<String>) {
        self.log_at(VerbosityLevel::Verbose, category, message);
    }

    fn log_at(&mut self, level: VerbosityLevel, category: &str, message: impl Into<String>) {
        if level > self.verbosity {
            return;
        }
        self.entries.push(LogEntry {
            level,
            message: message.into(),
            category: Some(category.to_string()),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
