//! Player commands and the vocabulary that recognises them
//!
//! Raw input lines are classified into a [`CommandKind`] by exact,
//! case-sensitive lookup in a [`Vocabulary`]. Two presets exist: the verb
//! scheme (`explore`, `combat`, `quit`) and the legacy numeric scheme
//! (`1` to continue, `q` to quit). Extra words can be bound on top of
//! either preset.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::GameError;

/// Recognised verbs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Explore,
    Combat,
    Quit,
}

/// Classified player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Explore,
    Combat,
    Quit,
    /// Input that matched no word, kept verbatim for reporting
    Unknown(String),
}

impl CommandKind {
    /// Whether this command is a gameplay action that advances missions
    pub fn is_gameplay(&self) -> bool {
        matches!(self, CommandKind::Explore | CommandKind::Combat)
    }
}

impl From<Verb> for CommandKind {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Explore => CommandKind::Explore,
            Verb::Combat => CommandKind::Combat,
            Verb::Quit => CommandKind::Quit,
        }
    }
}

/// Built-in vocabularies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VocabularyPreset {
    /// `explore`, `combat`, `quit`
    #[default]
    Canonical,
    /// `1` (continue exploring), `q` (quit)
    Legacy,
}

/// Word-to-verb mapping used to classify input
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashMap<String, Verb>,
    /// Words in binding order, for prompts
    order: Vec<String>,
    preset: Option<VocabularyPreset>,
}

impl Vocabulary {
    /// Create an empty vocabulary. Everything classifies as unknown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preset(preset: VocabularyPreset) -> Self {
        let mut vocab = Self::new();
        let words: &[(&str, Verb)] = match preset {
            VocabularyPreset::Canonical => &[
                ("explore", Verb::Explore),
                ("combat", Verb::Combat),
                ("quit", Verb::Quit),
            ],
            VocabularyPreset::Legacy => &[("1", Verb::Explore), ("q", Verb::Quit)],
        };
        for &(word, verb) in words {
            vocab.insert(word, verb);
        }
        vocab.preset = Some(preset);
        vocab
    }

    pub fn canonical() -> Self {
        Self::from_preset(VocabularyPreset::Canonical)
    }

    pub fn legacy() -> Self {
        Self::from_preset(VocabularyPreset::Legacy)
    }

    /// Bind a word to a verb, replacing any previous binding of that word.
    ///
    /// Words must be non-empty and free of whitespace, since input is
    /// trimmed before classification and could never match otherwise.
    pub fn bind(&mut self, word: &str, verb: Verb) -> Result<(), GameError> {
        if word.is_empty() || word.chars().any(char::is_whitespace) {
            return Err(GameError::InvalidCommand(word.to_string()));
        }
        self.insert(word, verb);
        // A custom binding means the preset prompt no longer describes us
        self.preset = None;
        Ok(())
    }

    /// Remove a word binding
    pub fn unbind(&mut self, word: &str) -> Option<Verb> {
        let verb = self.words.remove(word)?;
        self.order.retain(|w| w != word);
        self.preset = None;
        Some(verb)
    }

    fn insert(&mut self, word: &str, verb: Verb) {
        if self.words.insert(word.to_string(), verb).is_none() {
            self.order.push(word.to_string());
        }
    }

    /// Look up the verb for a word
    pub fn verb(&self, word: &str) -> Option<Verb> {
        self.words.get(word).copied()
    }

    /// Words bound to a verb, in binding order
    pub fn words_for(&self, verb: Verb) -> Vec<&str> {
        self.order
            .iter()
            .filter(|w| self.words.get(w.as_str()) == Some(&verb))
            .map(String::as_str)
            .collect()
    }

    /// Classify one line of input.
    ///
    /// Pure and total: exact match only, no trimming or case folding.
    pub fn classify(&self, raw: &str) -> CommandKind {
        match self.verb(raw) {
            Some(verb) => verb.into(),
            None => CommandKind::Unknown(raw.to_string()),
        }
    }

    /// Prompt shown before reading a command
    pub fn prompt(&self) -> String {
        if self.preset == Some(VocabularyPreset::Legacy) {
            return "Enter '1' to continue, 'q' to quit: ".to_string();
        }

        let quoted: Vec<String> = Verb::iter()
            .flat_map(|verb| self.words_for(verb))
            .map(|w| format!("'{}'", w))
            .collect();

        match quoted.split_last() {
            None => "Enter a command: ".to_string(),
            Some((only, [])) => format!("Enter {}: ", only),
            Some((last, rest)) => format!("Enter {} or {}: ", rest.join(", "), last),
        }
    }
}
