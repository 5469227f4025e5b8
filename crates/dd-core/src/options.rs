//! Game options and configuration
//!
//! Options come from defaults, an optional rc file and then command-line
//! overrides. The rc file uses `OPTIONS=` lines of comma-separated
//! options and `BIND=word:verb` lines for extra command words:
//!
//! ```text
//! # ~/.dreamscaperc
//! OPTIONS=name:Victor,health:100,step:10
//! OPTIONS=abilities:laser_eyes+super_strength
//! OPTIONS=inventory:Health Potion+Shield
//! OPTIONS=vocabulary:legacy,resolver:random,seed:42,!stop_on_complete
//! BIND=go:explore
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{Verb, Vocabulary, VocabularyPreset};
use crate::error::GameError;
use crate::mission::DEFAULT_PROGRESS_STEP;
use crate::resolve::ResolverKind;

/// Name of the rc file in the home directory
pub const RC_FILE_NAME: &str = ".dreamscaperc";

/// Option list separator inside a single value
const LIST_SEPARATOR: &str = "+";

/// Separator between options on one `OPTIONS=` line
const OPTION_SEPARATOR: char = ',';

/// Errors while loading or parsing options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },

    #[error("Malformed line {line}: {text}")]
    Malformed { line: usize, text: String },
}

/// User-configurable session options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    // Character
    pub name: String,
    pub health: i64,
    pub abilities: Vec<String>,
    pub inventory: Vec<String>,

    // Progression
    pub step: u32,
    pub stop_on_complete: bool,

    // Input
    pub vocabulary: VocabularyPreset,
    /// Extra words bound on top of the preset, in file order
    pub bindings: Vec<(String, Verb)>,

    // Resolution
    pub resolver: ResolverKind,
    pub seed: Option<u64>,

    /// Delay between turns, applied by the console front end
    pub pace_ms: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            name: "Victor".to_string(),
            health: 100,
            abilities: vec!["laser_eyes".to_string(), "super_strength".to_string()],
            inventory: vec!["Health Potion".to_string(), "Shield".to_string()],

            step: DEFAULT_PROGRESS_STEP,
            stop_on_complete: true,

            vocabulary: VocabularyPreset::Canonical,
            bindings: Vec::new(),

            resolver: ResolverKind::Quiet,
            seed: None,

            pace_ms: 0,
        }
    }
}

/// Default rc file location, if a home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(RC_FILE_NAME))
}

impl GameOptions {
    /// Load options from an rc file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Load the rc file at `path` if given, else the default file if it
    /// exists, else defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, OptionsError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading rc file");
                Self::load_from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Parse options from rc file contents
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(OPTION_SEPARATOR) {
                    options.parse_option(opt.trim())?;
                }
            } else if let Some(bind) = line.strip_prefix("BIND=") {
                let (word, verb) = bind.split_once(':').ok_or_else(|| OptionsError::Malformed {
                    line: index + 1,
                    text: line.to_string(),
                })?;
                options.bind(word.trim(), verb.trim())?;
            } else {
                return Err(OptionsError::Malformed {
                    line: index + 1,
                    text: line.to_string(),
                });
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Check that every value survives a trip through
    /// [`to_config_string`](Self::to_config_string) and back.
    ///
    /// The name may not contain `,`; ability and inventory items may not
    /// contain `,` or `+`; bound words may not contain `:`. Values must be
    /// non-empty and carry no surrounding whitespace.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_value("name", &self.name, &[OPTION_SEPARATOR])?;
        for ability in &self.abilities {
            check_value("abilities", ability, &[OPTION_SEPARATOR, '+'])?;
        }
        for item in &self.inventory {
            check_value("inventory", item, &[OPTION_SEPARATOR, '+'])?;
        }
        for (word, _) in &self.bindings {
            check_value("BIND", word, &[':'])?;
        }
        Ok(())
    }

    /// Parse a single `name`, `!name`, `noname` or `name:value` option
    pub fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        match opt.strip_prefix('!').or_else(|| opt.strip_prefix("no")) {
            Some(name) if self.set_bool_option(name, false).is_ok() => Ok(()),
            _ => self.set_bool_option(opt, true),
        }
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "stop_on_complete" => self.stop_on_complete = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue {
            option: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "name" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.name = value.to_string();
            }
            "health" | "hp" => self.health = value.parse().map_err(|_| invalid())?,
            "abilities" => self.abilities = split_list(value),
            "inventory" => self.inventory = split_list(value),
            "step" => self.step = value.parse().map_err(|_| invalid())?,
            "vocabulary" => self.vocabulary = value.parse().map_err(|_| invalid())?,
            "resolver" => self.resolver = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "pace" | "pace_ms" => self.pace_ms = value.parse().map_err(|_| invalid())?,
            "stop_on_complete" => {
                self.stop_on_complete = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Record an extra command word
    pub fn bind(&mut self, word: &str, verb: &str) -> Result<(), OptionsError> {
        let verb: Verb = verb.parse().map_err(|_| OptionsError::InvalidValue {
            option: format!("BIND={}", word),
            value: verb.to_string(),
        })?;
        self.bindings.push((word.to_string(), verb));
        Ok(())
    }

    /// Build the vocabulary: preset first, then bindings in order
    pub fn build_vocabulary(&self) -> Result<Vocabulary, GameError> {
        let mut vocab = Vocabulary::from_preset(self.vocabulary);
        for (word, verb) in &self.bindings {
            vocab.bind(word, *verb)?;
        }
        Ok(vocab)
    }

    /// Render options in rc file format
    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# Digital Dreamscape configuration".to_string(), String::new()];

        lines.push(format!("OPTIONS=name:{},health:{}", self.name, self.health));
        lines.push(format!(
            "OPTIONS=abilities:{}",
            self.abilities.join(LIST_SEPARATOR)
        ));
        lines.push(format!(
            "OPTIONS=inventory:{}",
            self.inventory.join(LIST_SEPARATOR)
        ));
        lines.push(format!(
            "OPTIONS=step:{},{}",
            self.step,
            if self.stop_on_complete {
                "stop_on_complete"
            } else {
                "!stop_on_complete"
            }
        ));
        lines.push(format!(
            "OPTIONS=vocabulary:{},resolver:{},pace:{}",
            self.vocabulary, self.resolver, self.pace_ms
        ));
        if let Some(seed) = self.seed {
            lines.push(format!("OPTIONS=seed:{}", seed));
        }
        for (word, verb) in &self.bindings {
            lines.push(format!("BIND={}:{}", word, verb));
        }

        lines.join("\n")
    }
}

fn check_value(option: &str, value: &str, reserved: &[char]) -> Result<(), OptionsError> {
    if value.is_empty() || value.trim() != value || value.contains(reserved) {
        return Err(OptionsError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;

    #[test]
    fn test_default_options() {
        let opts = GameOptions::default();
        assert_eq!(opts.name, "Victor");
        assert_eq!(opts.health, 100);
        assert_eq!(opts.inventory, ["Health Potion", "Shield"]);
        assert_eq!(opts.step, 10);
        assert!(opts.stop_on_complete);
        assert_eq!(opts.resolver, ResolverKind::Quiet);
    }

    #[test]
    fn test_parse_value_options() {
        let config = "OPTIONS=name:Ada,health:40,step:25\nOPTIONS=vocabulary:legacy";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.name, "Ada");
        assert_eq!(opts.health, 40);
        assert_eq!(opts.step, 25);
        assert_eq!(opts.vocabulary, VocabularyPreset::Legacy);
    }

    #[test]
    fn test_parse_lists() {
        let config = "OPTIONS=abilities:flight + x_ray,inventory:Rope+Lamp+Rope";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.abilities, ["flight", "x_ray"]);
        assert_eq!(opts.inventory, ["Rope", "Lamp", "Rope"]);
    }

    #[test]
    fn test_parse_bool_option() {
        let opts = GameOptions::parse_config("OPTIONS=!stop_on_complete").unwrap();
        assert!(!opts.stop_on_complete);
        let opts = GameOptions::parse_config("OPTIONS=nostop_on_complete").unwrap();
        assert!(!opts.stop_on_complete);
        let opts =
            GameOptions::parse_config("OPTIONS=!stop_on_complete,stop_on_complete").unwrap();
        assert!(opts.stop_on_complete);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let config = "# comment\n\n   \nOPTIONS=seed:7\n";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.seed, Some(7));
    }

    #[test]
    fn test_unknown_option() {
        let err = GameOptions::parse_config("OPTIONS=color").unwrap_err();
        assert_eq!(err, OptionsError::UnknownOption("color".to_string()));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=step:lots"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=resolver:chaotic"),
            Err(OptionsError::InvalidValue { .. })
        ));
        assert!(matches!(
            GameOptions::parse_config("BIND=go:dance"),
            Err(OptionsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_malformed_line() {
        let err = GameOptions::parse_config("OPTIONS=seed:1\nHELLO").unwrap_err();
        assert!(matches!(err, OptionsError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_negative_health_parses() {
        // Rejected later, when the character is built
        let opts = GameOptions::parse_config("OPTIONS=health:-3").unwrap();
        assert_eq!(opts.health, -3);
    }

    #[test]
    fn test_bindings_build_vocabulary() {
        let config = "OPTIONS=vocabulary:legacy\nBIND=go:explore\nBIND=fight:combat";
        let opts = GameOptions::parse_config(config).unwrap();
        let vocab = opts.build_vocabulary().unwrap();
        assert_eq!(vocab.classify("1"), CommandKind::Explore);
        assert_eq!(vocab.classify("go"), CommandKind::Explore);
        assert_eq!(vocab.classify("fight"), CommandKind::Combat);
        assert_eq!(vocab.classify("q"), CommandKind::Quit);
    }

    #[test]
    fn test_config_string_reparses() {
        let mut opts = GameOptions::default();
        opts.name = "Ada".to_string();
        opts.stop_on_complete = false;
        opts.resolver = ResolverKind::Random;
        opts.seed = Some(99);
        opts.bindings.push(("go".to_string(), Verb::Explore));

        let parsed = GameOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_config_string_reparses_punctuation() {
        let mut opts = GameOptions::default();
        opts.name = "Dr. Ada+Bob: the 2nd".to_string();
        opts.abilities = vec!["x-ray: level 2".to_string()];
        opts.inventory = vec!["Salt & Pepper".to_string(), "Key=7".to_string()];

        assert_eq!(opts.validate(), Ok(()));
        let parsed = GameOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_separators_in_values_rejected() {
        let mut opts = GameOptions::default();
        opts.name = "Smith, John".to_string();
        assert_eq!(
            opts.validate(),
            Err(OptionsError::InvalidValue {
                option: "name".to_string(),
                value: "Smith, John".to_string(),
            })
        );

        let mut opts = GameOptions::default();
        opts.inventory = vec!["Salt+Pepper".to_string()];
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::InvalidValue { ref option, .. }) if option == "inventory"
        ));

        let mut opts = GameOptions::default();
        opts.abilities = vec!["fly,swim".to_string()];
        assert!(opts.validate().is_err());

        let mut opts = GameOptions::default();
        opts.name = " Ada".to_string();
        assert!(opts.validate().is_err());

        let mut opts = GameOptions::default();
        opts.bindings.push(("a:b".to_string(), Verb::Quit));
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_default_options_are_valid() {
        assert_eq!(GameOptions::default().validate(), Ok(()));
    }
}
