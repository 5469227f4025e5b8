//! Mission manager
//!
//! Translates classified player commands into mission and state
//! transitions. At most one mission is active at any time.

use hashbrown::HashMap;

use super::types::{Mission, MissionId, MissionStatus};
use crate::character::Character;
use crate::command::{CommandKind, Vocabulary};
use crate::error::GameError;
use crate::event::GameEvent;
use crate::resolve::{CombatOutcome, ExplorationOutcome, QuietResolver, Resolver};
use crate::state::GameState;

/// Progress added to the active mission per accepted gameplay action
pub const DEFAULT_PROGRESS_STEP: u32 = 10;

/// The mission every session starts with
pub fn starting_mission() -> Mission {
    Mission::new(
        "dreamscape_awakening",
        "Explore the Digital Dreamscape and find its heart",
        "The Dreamscape remembers your name",
    )
}

/// Owns the missions of a session and advances them
pub struct MissionManager {
    missions: HashMap<MissionId, Mission>,
    /// Load order, for stable listing and promotion
    order: Vec<MissionId>,
    active: Option<MissionId>,
    vocabulary: Vocabulary,
    resolver: Box<dyn Resolver>,
    step: u32,
}

impl Default for MissionManager {
    fn default() -> Self {
        Self::new(Vocabulary::canonical(), Box::new(QuietResolver), DEFAULT_PROGRESS_STEP)
    }
}

impl MissionManager {
    pub fn new(vocabulary: Vocabulary, resolver: Box<dyn Resolver>, step: u32) -> Self {
        Self {
            missions: HashMap::new(),
            order: Vec::new(),
            active: None,
            vocabulary,
            resolver,
            step,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Seed the starting mission and make it active.
    ///
    /// Safe to call more than once: missions already loaded are kept as
    /// they are and a second mission is never activated.
    pub fn load_initial_missions(&mut self) {
        self.load_missions([starting_mission()]);
    }

    /// Load missions, then promote the first pending one if none is active
    pub fn load_missions(&mut self, missions: impl IntoIterator<Item = Mission>) {
        for mission in missions {
            if self.missions.contains_key(&mission.id) {
                tracing::debug!(mission = %mission.id, "mission already loaded");
                continue;
            }
            self.add_mission(mission);
        }

        if self.active.is_some() {
            return;
        }
        let next = self
            .order
            .iter()
            .find(|id| {
                self.missions
                    .get(*id)
                    .is_some_and(|m| m.status == MissionStatus::Pending)
            })
            .cloned();
        if let Some(id) = next {
            // No mission is active, so this cannot fail
            if let Err(err) = self.activate(&id) {
                tracing::warn!(%err, "could not activate starting mission");
            }
        }
    }

    /// Register a pending mission without activating it
    pub fn add_mission(&mut self, mut mission: Mission) {
        // Missions only enter through activate()
        if mission.status == MissionStatus::Active {
            mission.status = MissionStatus::Pending;
        }
        tracing::debug!(mission = %mission.id, "mission loaded");
        self.order.push(mission.id.clone());
        self.missions.insert(mission.id.clone(), mission);
    }

    /// Promote a pending mission to active.
    ///
    /// Re-activating the mission that is already active is a no-op.
    pub fn activate(&mut self, id: &MissionId) -> Result<(), GameError> {
        if let Some(active) = &self.active {
            if active == id {
                return Ok(());
            }
            return Err(GameError::DuplicateActiveMission {
                requested: id.clone(),
                active: active.clone(),
            });
        }

        let mission = self
            .missions
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownMission(id.clone()))?;
        if !mission.transition(MissionStatus::Active) {
            return Err(GameError::MissionClosed(id.clone()));
        }

        tracing::info!(mission = %id, description = %mission.description, "mission started");
        self.active = Some(id.clone());
        Ok(())
    }

    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.get(id)
    }

    /// Missions in load order
    pub fn missions(&self) -> impl Iterator<Item = &Mission> {
        self.order.iter().filter_map(|id| self.missions.get(id))
    }

    pub fn active_mission(&self) -> Option<&Mission> {
        self.active.as_ref().and_then(|id| self.missions.get(id))
    }

    /// Classify a raw command line against the vocabulary
    pub fn classify(&self, raw: &str) -> CommandKind {
        self.vocabulary.classify(raw)
    }

    pub fn process_exploration(&mut self, character: &Character) -> ExplorationOutcome {
        self.resolver.explore(character)
    }

    pub fn process_combat(&mut self, character: &Character) -> CombatOutcome {
        self.resolver.combat(character)
    }

    /// Advance missions after one accepted gameplay action.
    ///
    /// A dead character fails the active mission and yields only
    /// `CharacterDeath`, even if this tick would have completed it.
    /// Otherwise the active mission gains one step of progress and
    /// completes when the bar reaches 100.
    pub fn update_missions(
        &mut self,
        state: &mut GameState,
        character: &Character,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if !character.is_alive() {
            if let Some(id) = self.active.take() {
                if let Some(mission) = self.missions.get_mut(&id) {
                    mission.transition(MissionStatus::Failed);
                }
                tracing::info!(mission = %id, "mission failed");
            }
            events.push(GameEvent::CharacterDeath {
                character_name: character.name().to_string(),
            });
            return events;
        }

        let Some(id) = self.active.clone() else {
            return events;
        };

        state.advance_mission(self.step);
        tracing::debug!(mission = %id, progress = state.mission_progress(), "mission advanced");

        if state.is_mission_complete() {
            if let Some(mission) = self.missions.get_mut(&id) {
                mission.transition(MissionStatus::Complete);
                tracing::info!(
                    mission = %id,
                    reward = %mission.reward_description,
                    "mission complete"
                );
            }
            self.active = None;
            events.push(GameEvent::MissionComplete { mission_id: id });
        }

        events
    }
}
