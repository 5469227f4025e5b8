//! Player character
//!
//! Identity, vitality and ability tags. Nothing here knows about missions;
//! the mission manager and the game loop only read `name`, `health` and
//! `abilities`.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    health: u32,
    abilities: Vec<String>,
}

impl Character {
    /// Create a character.
    ///
    /// Health outside `0..=u32::MAX` is rejected with
    /// [`GameError::InvalidHealth`]. A character created with zero health
    /// is legal but already dead.
    pub fn new<I, S>(name: impl Into<String>, health: i64, abilities: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let health = u32::try_from(health).map_err(|_| GameError::InvalidHealth(health))?;

        Ok(Self {
            name: name.into(),
            health,
            abilities: abilities.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    /// Check if the character has the given ability tag
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }

    /// Alive while health is above zero
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Reduce health by `amount`, stopping at zero
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        tracing::debug!(name = %self.name, amount, health = self.health, "character took damage");
    }
}
