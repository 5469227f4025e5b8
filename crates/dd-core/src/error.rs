//! Game errors
//!
//! Failures that can arise while building or driving a session. None of
//! these cross the game loop boundary during normal play: invalid commands
//! are reported to the player and the loop carries on.

use thiserror::Error;

use crate::mission::MissionId;

/// Errors raised by the game model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Player input matched no word in the active vocabulary
    #[error("Invalid command: '{0}'")]
    InvalidCommand(String),

    /// A character was created with negative or out-of-range health
    #[error("Invalid health {0}: health must be between 0 and 4294967295")]
    InvalidHealth(i64),

    /// Activating a mission while another one is already active
    #[error("Mission '{requested}' cannot be activated while '{active}' is active")]
    DuplicateActiveMission {
        requested: MissionId,
        active: MissionId,
    },

    /// Lookup of a mission id that was never loaded
    #[error("Unknown mission: '{0}'")]
    UnknownMission(MissionId),

    /// Activating a mission that already completed or failed
    #[error("Mission '{0}' is already finished")]
    MissionClosed(MissionId),
}
