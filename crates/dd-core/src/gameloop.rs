//! Main game loop
//!
//! One iteration per player turn: show status, read a command, classify
//! it, dispatch it, advance missions and handle the resulting events.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::command::CommandKind;
use crate::error::GameError;
use crate::event::GameEvent;
use crate::io::{CommandSource, Status, StatusSink};
use crate::mission::{MissionId, MissionManager, MissionStatus};
use crate::options::GameOptions;
use crate::resolve::{CombatOutcome, ExplorationOutcome, make_resolver};
use crate::state::GameState;

/// Result of a game loop tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameLoopResult {
    /// Continue playing
    Continue,
    /// Input was not recognised; nothing changed
    InvalidInput(String),
    /// The active mission was completed
    MissionComplete(MissionId),
    /// Player died
    PlayerDied(String),
    /// Player quit, or input ran out
    PlayerQuit,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: GameLoopResult,
    /// Loop iterations, including rejected input
    pub iterations: u64,
    /// Accepted gameplay actions
    pub turns: u64,
    pub mission_progress: u32,
    pub missions: Vec<(MissionId, MissionStatus)>,
}

impl SessionSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Final progress: {}% after {} turns",
            self.mission_progress, self.turns
        )];
        for (id, status) in &self.missions {
            lines.push(format!("Mission {}: {}", id, status));
        }
        lines
    }
}

/// Game session driver
pub struct GameLoop {
    state: GameState,
    character: Character,
    missions: MissionManager,
    stop_on_complete: bool,
    iterations: u64,
    last_result: GameLoopResult,
}

impl GameLoop {
    /// Create a loop around pre-built session objects.
    ///
    /// Initial missions are loaded here.
    pub fn new(state: GameState, character: Character, mut missions: MissionManager) -> Self {
        missions.load_initial_missions();
        Self {
            state,
            character,
            missions,
            stop_on_complete: true,
            iterations: 0,
            last_result: GameLoopResult::Continue,
        }
    }

    /// Build a session from options
    pub fn from_options(options: &GameOptions) -> Result<Self, GameError> {
        let character = Character::new(
            options.name.clone(),
            options.health,
            options.abilities.iter().cloned(),
        )?;
        let state = GameState::with_inventory(options.inventory.iter().cloned());
        let resolver = make_resolver(options.resolver, options.seed);
        let missions = MissionManager::new(options.build_vocabulary()?, resolver, options.step);

        let mut game = Self::new(state, character, missions);
        game.stop_on_complete = options.stop_on_complete;
        Ok(game)
    }

    pub fn with_stop_on_complete(mut self, stop: bool) -> Self {
        self.stop_on_complete = stop;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn missions(&self) -> &MissionManager {
        &self.missions
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn prompt(&self) -> String {
        self.missions.vocabulary().prompt()
    }

    /// Current status snapshot
    pub fn status(&self) -> Status {
        Status {
            name: self.character.name().to_string(),
            health: self.character.health(),
            inventory: self.state.inventory.clone(),
            mission_progress: self.state.mission_progress(),
            turn: self.state.turns,
        }
    }

    /// Run one iteration with an already-read line. `None` means the
    /// command source ran dry and counts as quitting.
    pub fn tick(&mut self, line: Option<&str>, sink: &mut dyn StatusSink) -> GameLoopResult {
        self.iterations += 1;
        let result = self.dispatch(line, sink);
        self.last_result = result.clone();
        result
    }

    fn dispatch(&mut self, line: Option<&str>, sink: &mut dyn StatusSink) -> GameLoopResult {
        let Some(raw) = line else {
            tracing::debug!("end of input");
            return self.quit(sink);
        };

        match self.missions.classify(raw.trim()) {
            CommandKind::Quit => return self.quit(sink),
            CommandKind::Unknown(word) => {
                let err = GameError::InvalidCommand(word.clone());
                tracing::warn!(%err, "rejected input");
                sink.message("Invalid input.");
                return GameLoopResult::InvalidInput(word);
            }
            CommandKind::Explore => {
                let outcome = self.missions.process_exploration(&self.character);
                sink.message(&outcome.describe());
                if let ExplorationOutcome::FoundItem(item) = outcome {
                    self.state.add_item(item);
                }
            }
            CommandKind::Combat => {
                let outcome = self.missions.process_combat(&self.character);
                sink.message(&outcome.describe());
                if let CombatOutcome::Wounded { damage } = outcome {
                    self.character.apply_damage(damage);
                }
            }
        }

        self.state.turns += 1;
        let events = self.missions.update_missions(&mut self.state, &self.character);

        let mut result = GameLoopResult::Continue;
        for event in events {
            let handled = self.handle_event(event, sink);
            if handled != GameLoopResult::Continue {
                result = handled;
            }
        }
        result
    }

    fn quit(&mut self, sink: &mut dyn StatusSink) -> GameLoopResult {
        sink.message("Exiting game...");
        self.state.stop();
        GameLoopResult::PlayerQuit
    }

    /// Apply one event to the session
    pub fn handle_event(&mut self, event: GameEvent, sink: &mut dyn StatusSink) -> GameLoopResult {
        sink.message(&event.describe());
        match event {
            GameEvent::MissionComplete { mission_id } => {
                if let Some(mission) = self.missions.mission(&mission_id) {
                    sink.message(&format!("Reward: {}", mission.reward_description));
                }
                if self.stop_on_complete {
                    self.state.stop();
                    GameLoopResult::MissionComplete(mission_id)
                } else {
                    GameLoopResult::Continue
                }
            }
            GameEvent::CharacterDeath { character_name } => {
                self.state.stop();
                GameLoopResult::PlayerDied(character_name)
            }
            GameEvent::Unknown { kind, .. } => {
                tracing::debug!(%kind, "unhandled event");
                GameLoopResult::Continue
            }
        }
    }

    /// Play until the session stops
    pub fn run(
        &mut self,
        source: &mut dyn CommandSource,
        sink: &mut dyn StatusSink,
    ) -> SessionSummary {
        sink.message(&format!("Welcome, {}!", self.character.name()));
        if let Some(mission) = self.missions.active_mission() {
            sink.message(&format!("Mission: {}", mission.description));
        }

        while self.state.is_running() {
            sink.status(&self.status());
            let line = source.next_command(&self.prompt());
            let result = self.tick(line.as_deref(), sink);
            tracing::debug!(iteration = self.iterations, ?result, "tick");
        }

        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            outcome: self.last_result.clone(),
            iterations: self.iterations,
            turns: self.state.turns,
            mission_progress: self.state.mission_progress(),
            missions: self
                .missions
                .missions()
                .map(|m| (m.id.clone(), m.status))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{RecordingSink, ScriptedCommands};
    use crate::mission::starting_mission;

    fn new_game() -> GameLoop {
        GameLoop::from_options(&GameOptions::default()).unwrap()
    }

    #[test]
    fn test_new_game_from_defaults() {
        let game = new_game();
        assert!(game.is_running());
        assert_eq!(game.character().name(), "Victor");
        assert_eq!(game.state().inventory, ["Health Potion", "Shield"]);
        assert!(game.missions().active_mission().is_some());
    }

    #[test]
    fn test_invalid_health_option() {
        let options = GameOptions {
            health: -10,
            ..GameOptions::default()
        };
        assert_eq!(
            GameLoop::from_options(&options).err(),
            Some(GameError::InvalidHealth(-10))
        );
    }

    #[test]
    fn test_tick_explore_advances() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        assert_eq!(game.tick(Some("explore"), &mut sink), GameLoopResult::Continue);
        assert_eq!(game.state().mission_progress(), 10);
        assert_eq!(game.state().turns, 1);
    }

    #[test]
    fn test_tick_trims_input() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        assert_eq!(game.tick(Some("  combat\n"), &mut sink), GameLoopResult::Continue);
        assert_eq!(game.state().mission_progress(), 10);
    }

    #[test]
    fn test_tick_unknown_changes_nothing() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        let before = game.state().clone();
        assert_eq!(
            game.tick(Some("banana"), &mut sink),
            GameLoopResult::InvalidInput("banana".to_string())
        );
        assert_eq!(game.state(), &before);
        assert!(sink.saw_message("Invalid input."));
        assert!(game.is_running());
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        assert_eq!(game.tick(None, &mut sink), GameLoopResult::PlayerQuit);
        assert!(!game.is_running());
        assert!(sink.saw_message("Exiting game..."));
    }

    #[test]
    fn test_death_event_stops() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        game.character_mut().apply_damage(100);
        assert_eq!(
            game.tick(Some("explore"), &mut sink),
            GameLoopResult::PlayerDied("Victor".to_string())
        );
        assert!(!game.is_running());
        assert_eq!(game.state().mission_progress(), 0);
    }

    #[test]
    fn test_keep_playing_after_completion() {
        let mut game = new_game().with_stop_on_complete(false);
        let mut sink = RecordingSink::new();
        for _ in 0..9 {
            game.tick(Some("explore"), &mut sink);
        }
        assert_eq!(
            game.tick(Some("explore"), &mut sink),
            GameLoopResult::Continue
        );
        assert!(game.is_running());
        assert!(sink.saw_message("Mission complete!"));
        assert_eq!(
            game.missions().mission(&starting_mission().id).unwrap().status,
            MissionStatus::Complete
        );
        // Further actions are accepted but move nothing
        assert_eq!(game.tick(Some("explore"), &mut sink), GameLoopResult::Continue);
        assert_eq!(game.state().mission_progress(), 100);
    }

    #[test]
    fn test_unknown_event_is_reported() {
        let mut game = new_game();
        let mut sink = RecordingSink::new();
        let result = game.handle_event(
            GameEvent::Unknown {
                kind: "portal".into(),
                data: "shimmering".into(),
            },
            &mut sink,
        );
        assert_eq!(result, GameLoopResult::Continue);
        assert!(sink.saw_message("portal"));
        assert!(game.is_running());
    }

    #[test]
    fn test_run_prints_welcome_and_status() {
        let mut game = new_game();
        let mut source = ScriptedCommands::new(["explore", "quit"]);
        let mut sink = RecordingSink::new();
        let summary = game.run(&mut source, &mut sink);

        assert_eq!(sink.messages[0], "Welcome, Victor!");
        assert_eq!(sink.statuses.len(), 2);
        assert_eq!(sink.statuses[1].mission_progress, 10);
        assert_eq!(summary.outcome, GameLoopResult::PlayerQuit);
        assert_eq!(summary.iterations, 2);
        assert_eq!(summary.turns, 1);
    }

    #[test]
    fn test_summary_lines() {
        let game = new_game();
        let lines = game.summary().lines();
        assert!(lines[0].contains("0%"));
        assert!(lines[1].contains("Active"));
    }
}
