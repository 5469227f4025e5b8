//! Missions
//!
//! Mission types and the manager that drives them.

mod manager;
mod types;

pub use manager::{DEFAULT_PROGRESS_STEP, MissionManager, starting_mission};
pub use types::{Mission, MissionId, MissionStatus};
