//! dd-core: Core game logic for Digital Dreamscape
//!
//! A turn-based text adventure: a character, a session state and a
//! mission manager driven by a single-threaded game loop. This crate has
//! no terminal I/O; input and output go through the [`io`] traits.

pub mod character;
pub mod command;
pub mod error;
pub mod event;
pub mod io;
pub mod mission;
pub mod options;
pub mod resolve;
pub mod state;

mod gameloop;
mod rng;

pub use character::Character;
pub use command::{CommandKind, Verb, Vocabulary, VocabularyPreset};
pub use error::GameError;
pub use event::GameEvent;
pub use gameloop::{GameLoop, GameLoopResult, SessionSummary};
pub use options::{GameOptions, OptionsError};
pub use rng::DiceRng;
pub use state::GameState;
