//! Mission data types

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Mission identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissionId(pub String);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Mission lifecycle
///
/// `Pending -> Active -> {Complete | Failed}`. Complete and Failed are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum MissionStatus {
    #[default]
    Pending,
    Active,
    Complete,
    Failed,
}

impl MissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionStatus::Complete | MissionStatus::Failed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_become(self, next: MissionStatus) -> bool {
        use MissionStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Active, Active) | (Active, Complete) | (Active, Failed)
        )
    }
}

/// A unit of progressable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub description: String,
    pub status: MissionStatus,
    pub reward_description: String,
}

impl Mission {
    /// Create a pending mission
    pub fn new(
        id: impl Into<MissionId>,
        description: impl Into<String>,
        reward_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            status: MissionStatus::Pending,
            reward_description: reward_description.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }

    /// Move to `next` if the lifecycle allows it. Returns whether the
    /// status changed hands.
    pub(crate) fn transition(&mut self, next: MissionStatus) -> bool {
        if !self.status.can_become(next) {
            tracing::warn!(
                mission = %self.id,
                from = %self.status,
                to = %next,
                "rejected mission transition"
            );
            return false;
        }
        self.status = next;
        true
    }
}
