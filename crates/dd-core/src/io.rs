//! Command sources and status sinks
//!
//! The game loop reads one line per turn from a [`CommandSource`] and
//! reports to a [`StatusSink`]. The console front end implements both on
//! top of stdin/stdout; the in-memory versions here drive scripted and
//! test sessions.

use core::fmt;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Snapshot printed at the start of every turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub name: String,
    pub health: u32,
    pub inventory: Vec<String>,
    pub mission_progress: u32,
    pub turn: u64,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Game Update ---")?;
        writeln!(f, "Health: {}", self.health)?;
        writeln!(f, "Inventory: [{}]", self.inventory.join(", "))?;
        write!(f, "Mission Progress: {}%", self.mission_progress)
    }
}

/// Provider of player input
pub trait CommandSource {
    /// Block until the next line is available. `None` means end of input.
    fn next_command(&mut self, prompt: &str) -> Option<String>;
}

/// Consumer of player-facing output
pub trait StatusSink {
    fn status(&mut self, status: &Status);
    fn message(&mut self, text: &str);
}

/// Commands fed from a fixed list
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    lines: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a script into lines, skipping blanks and `#` comments
    pub fn parse(script: &str) -> Self {
        Self::new(
            script
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self, _prompt: &str) -> Option<String> {
        self.lines.pop_front()
    }
}

/// Sink that keeps everything it is given
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub statuses: Vec<Status>,
    pub messages: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saw_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl StatusSink for RecordingSink {
    fn status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
