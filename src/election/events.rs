//! Append-only execution log consumed by the log panel of a visualization
//! frontend. Entries are never mutated or removed once appended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifies a log entry for display (color/icon selection in a frontend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    /// A node put a message on the ring
    Send,
    /// A node accepted an incoming message
    Receive,
    /// A message was discarded instead of forwarded
    Destroy,
    /// A node was elected
    Elect,
    /// Lifecycle information (initialization, decisions)
    Info,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f.pad so callers can apply width/alignment specifiers
        let tag = match self {
            LogCategory::Send => "send",
            LogCategory::Receive => "receive",
            LogCategory::Destroy => "destroy",
            LogCategory::Elect => "elect",
            LogCategory::Info => "info",
        };
        f.pad(tag)
    }
}

/// One entry of the execution journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Step the entry was produced in (0 for initialization)
    pub step: u64,
    /// Human-readable description of what happened
    pub description: String,
    /// Display category
    pub category: LogCategory,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(step: u64, description: impl Into<String>, category: LogCategory) -> Self {
        Self {
            step,
            description: description.into(),
            category,
        }
    }

    /// Creates a send entry
    pub fn send(step: u64, description: impl Into<String>) -> Self {
        Self::new(step, description, LogCategory::Send)
    }

    /// Creates a receive entry
    pub fn receive(step: u64, description: impl Into<String>) -> Self {
        Self::new(step, description, LogCategory::Receive)
    }

    /// Creates a destroy entry
    pub fn destroy(step: u64, description: impl Into<String>) -> Self {
        Self::new(step, description, LogCategory::Destroy)
    }

    /// Creates an elect entry
    pub fn elect(step: u64, description: impl Into<String>) -> Self {
        Self::new(step, description, LogCategory::Elect)
    }

    /// Creates an info entry
    pub fn info(step: u64, description: impl Into<String>) -> Self {
        Self::new(step, description, LogCategory::Info)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>2}] {:<7} {}", self.step, self.category, self.description)
    }
}
