//! Gameplay events
//!
//! Emitted by mission updates and consumed by the game loop, which turns
//! them into messages and state changes.

use serde::{Deserialize, Serialize};

use crate::mission::MissionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MissionComplete { mission_id: MissionId },
    CharacterDeath { character_name: String },
    /// Event kinds the loop has no dedicated handling for
    Unknown { kind: String, data: String },
}

impl GameEvent {
    /// Whether handling this event ends the session unconditionally
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameEvent::CharacterDeath { .. })
    }

    /// Player-facing message
    pub fn describe(&self) -> String {
        match self {
            GameEvent::MissionComplete { .. } => "Mission complete!".to_string(),
            GameEvent::CharacterDeath { character_name } => {
                format!("{} has fallen. Game over.", character_name)
            }
            GameEvent::Unknown { kind, data } => {
                format!("Something strange happens... ({}: {})", kind, data)
            }
        }
    }
}
