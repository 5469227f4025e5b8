//! Digital Dreamscape
//!
//! Console entry point for the game.

mod console;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dd_core::io::{CommandSource, ScriptedCommands, StatusSink};
use dd_core::resolve::ResolverKind;
use dd_core::{GameLoop, GameOptions, SessionSummary, VocabularyPreset};

use crate::console::{ConsoleSink, StdinSource};

/// Digital Dreamscape, a text adventure
#[derive(Parser, Debug)]
#[command(name = "dreamscape")]
#[command(author, version, about = "Digital Dreamscape - explore, fight, complete your mission", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Starting health
    #[arg(long = "health", allow_negative_numbers = true)]
    health: Option<i64>,

    /// Options file (defaults to ~/.dreamscaperc when present)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Use the legacy '1'/'q' commands
    #[arg(long = "legacy")]
    legacy: bool,

    /// Let exploration and combat have random outcomes
    #[arg(long = "random")]
    random: bool,

    /// Seed for random outcomes (implies --random)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Delay between turns in milliseconds
    #[arg(long = "pace-ms")]
    pace_ms: Option<u64>,

    /// Read commands from a file instead of stdin
    #[arg(long = "script")]
    script: Option<PathBuf>,

    /// Emit status and messages as JSON lines
    #[arg(long = "json")]
    json: bool,

    /// Print the effective options in rc file format and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// Verbose logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Command-line flags take precedence over the options file
    fn apply(&self, options: &mut GameOptions) {
        if let Some(ref name) = self.name {
            options.name = name.clone();
        }
        if let Some(health) = self.health {
            options.health = health;
        }
        if self.legacy {
            options.vocabulary = VocabularyPreset::Legacy;
        }
        if self.random || self.seed.is_some() {
            options.resolver = ResolverKind::Random;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if let Some(pace) = self.pace_ms {
            options.pace_ms = pace;
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "dreamscape=debug,dd_core=debug"
    } else {
        "dreamscape=warn,dd_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Announce, build and run one session
fn play(
    options: &GameOptions,
    source: &mut dyn CommandSource,
    sink: &mut dyn StatusSink,
) -> anyhow::Result<SessionSummary> {
    sink.message("Initializing game...");
    let mut game = GameLoop::from_options(options).context("could not create a new game")?;
    Ok(game.run(source, sink))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut options =
        GameOptions::load(args.config.as_deref()).context("could not load options")?;
    args.apply(&mut options);
    options.validate().context("invalid options")?;
    tracing::debug!(?options, "effective options");

    if args.dump_config {
        println!("{}", options.to_config_string());
        return Ok(());
    }

    let mut sink = ConsoleSink::new(args.json, Duration::from_millis(options.pace_ms));

    let summary = match args.script {
        Some(ref path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("could not read script {}", path.display()))?;
            let mut source = ScriptedCommands::parse(&script);
            play(&options, &mut source, &mut sink)?
        }
        None => {
            let mut source = StdinSource::new(!args.json);
            play(&options, &mut source, &mut sink)?
        }
    };

    sink.summary(&summary);
    tracing::info!(outcome = ?summary.outcome, turns = summary.turns, "session over");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dd_core::GameLoopResult;
    use dd_core::io::RecordingSink;

    #[test]
    fn test_flags_override_options() {
        let args = Args::parse_from([
            "dreamscape",
            "--name",
            "Ada",
            "--health",
            "-5",
            "--legacy",
            "--seed",
            "9",
        ]);
        let mut options = GameOptions::default();
        args.apply(&mut options);
        assert_eq!(options.name, "Ada");
        assert_eq!(options.health, -5);
        assert_eq!(options.vocabulary, VocabularyPreset::Legacy);
        assert_eq!(options.resolver, ResolverKind::Random);
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn test_name_flag_with_separator_rejected() {
        let args = Args::parse_from(["dreamscape", "--name", "Smith, John"]);
        let mut options = GameOptions::default();
        args.apply(&mut options);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_no_flags_keep_options() {
        let args = Args::parse_from(["dreamscape"]);
        let mut options = GameOptions::default();
        args.apply(&mut options);
        assert_eq!(options, GameOptions::default());
    }

    #[test]
    fn test_play_announces_before_welcome() {
        let mut source = ScriptedCommands::new(["quit"]);
        let mut sink = RecordingSink::new();
        let summary = play(&GameOptions::default(), &mut source, &mut sink).unwrap();

        assert_eq!(sink.messages[0], "Initializing game...");
        assert_eq!(sink.messages[1], "Welcome, Victor!");
        assert_eq!(summary.outcome, GameLoopResult::PlayerQuit);
    }

    #[test]
    fn test_play_rejects_negative_health() {
        let options = GameOptions {
            health: -1,
            ..GameOptions::default()
        };
        let mut source = ScriptedCommands::new(Vec::<String>::new());
        let mut sink = RecordingSink::new();
        assert!(play(&options, &mut source, &mut sink).is_err());
    }
}
