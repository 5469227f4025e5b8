//! Session-wide game state

use serde::{Deserialize, Serialize};

/// Mission progress is a percentage
pub const MAX_PROGRESS: u32 = 100;

/// Mutable state of one game session.
///
/// Owned by the game loop. The mission manager borrows it to move the
/// progress bar but never keeps a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    running: bool,

    /// Items carried by the player, in pickup order
    pub inventory: Vec<String>,

    mission_progress: u32,

    /// Accepted gameplay actions so far
    pub turns: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            running: true,
            inventory: Vec::new(),
            mission_progress: 0,
            turns: 0,
        }
    }

    /// Start a session with a pre-filled inventory
    pub fn with_inventory<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new();
        for item in items {
            state.add_item(item);
        }
        state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mission_progress(&self) -> u32 {
        self.mission_progress
    }

    pub fn is_mission_complete(&self) -> bool {
        self.mission_progress >= MAX_PROGRESS
    }

    /// Append an item. Duplicates are allowed.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Move the progress bar forward, clamping at 100.
    ///
    /// Reaching 100 has no side effect here; completion is signalled by
    /// the mission manager on the same tick.
    pub fn advance_mission(&mut self, delta: u32) {
        self.mission_progress = self
            .mission_progress
            .saturating_add(delta)
            .min(MAX_PROGRESS);
    }

    /// End the session. There is no way to restart it.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(progress = self.mission_progress, "game state stopped");
        }
        self.running = false;
    }
}
