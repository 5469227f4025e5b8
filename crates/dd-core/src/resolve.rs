//! Exploration and combat resolution
//!
//! Resolution is a pluggable strategy. [`QuietResolver`] is the default
//! and always reports that nothing happened, so a session is fully
//! determined by its commands. [`RandomResolver`] is opt-in: it can turn
//! up loot while exploring and wound the character in combat, driven by a
//! seeded [`DiceRng`].
//!
//! Resolvers only read the character. Applying an outcome (picking up an
//! item, taking damage) is the game loop's job.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::character::Character;
use crate::rng::DiceRng;

/// Result of one exploration action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorationOutcome {
    Nothing,
    FoundItem(String),
}

/// Result of one combat action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    Nothing,
    /// The foe was driven off unharmed
    Victory,
    Wounded { damage: u32 },
}

impl ExplorationOutcome {
    pub fn describe(&self) -> String {
        match self {
            ExplorationOutcome::Nothing => "You explore the area. Nothing happens.".to_string(),
            ExplorationOutcome::FoundItem(item) => format!("You found a {}!", item),
        }
    }
}

impl CombatOutcome {
    pub fn describe(&self) -> String {
        match self {
            CombatOutcome::Nothing => "You brace for a fight, but no foe appears.".to_string(),
            CombatOutcome::Victory => "You defeat your foe!".to_string(),
            CombatOutcome::Wounded { damage } => {
                format!("You are wounded and lose {} health.", damage)
            }
        }
    }
}

/// Strategy that decides what a gameplay action produces
pub trait Resolver {
    fn explore(&mut self, character: &Character) -> ExplorationOutcome;
    fn combat(&mut self, character: &Character) -> CombatOutcome;
}

/// Resolver selection for configuration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    #[default]
    Quiet,
    Random,
}

/// Deterministic resolver where nothing ever happens
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietResolver;

impl Resolver for QuietResolver {
    fn explore(&mut self, _character: &Character) -> ExplorationOutcome {
        ExplorationOutcome::Nothing
    }

    fn combat(&mut self, _character: &Character) -> CombatOutcome {
        CombatOutcome::Nothing
    }
}

/// Items the random resolver can turn up
pub const DEFAULT_LOOT: &[&str] = &["Health Potion", "Shield", "Rusty Key", "Map Fragment"];

/// Seeded resolver with simple loot and wound rolls
#[derive(Debug, Clone)]
pub struct RandomResolver {
    rng: DiceRng,
    /// Percent chance an exploration finds loot
    pub find_chance: u32,
    /// Percent chance a combat action wounds the character
    pub wound_chance: u32,
    /// Largest wound, rolled as one die
    pub max_damage: u32,
    pub loot: Vec<String>,
}

impl RandomResolver {
    pub fn new(rng: DiceRng) -> Self {
        Self {
            rng,
            find_chance: 25,
            wound_chance: 30,
            max_damage: 20,
            loot: DEFAULT_LOOT.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(DiceRng::new(seed))
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl Resolver for RandomResolver {
    fn explore(&mut self, _character: &Character) -> ExplorationOutcome {
        if !self.rng.chance(self.find_chance) {
            return ExplorationOutcome::Nothing;
        }
        match self.rng.pick(&self.loot) {
            Some(item) => ExplorationOutcome::FoundItem(item.clone()),
            None => ExplorationOutcome::Nothing,
        }
    }

    fn combat(&mut self, _character: &Character) -> CombatOutcome {
        if self.rng.chance(self.wound_chance) {
            let damage = self.rng.roll(self.max_damage);
            if damage > 0 {
                return CombatOutcome::Wounded { damage };
            }
        }
        CombatOutcome::Victory
    }
}

/// Build the resolver selected by configuration
pub fn make_resolver(kind: ResolverKind, seed: Option<u64>) -> Box<dyn Resolver> {
    match kind {
        ResolverKind::Quiet => Box::new(QuietResolver),
        ResolverKind::Random => {
            let rng = seed.map(DiceRng::new).unwrap_or_else(DiceRng::from_entropy);
            tracing::info!(seed = rng.seed(), "using random resolver");
            Box::new(RandomResolver::new(rng))
        }
    }
}
