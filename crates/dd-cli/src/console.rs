//! Console command source and status sink

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use serde::Serialize;

use dd_core::SessionSummary;
use dd_core::io::{CommandSource, Status, StatusSink};

/// Reads commands from stdin, one line per turn
pub struct StdinSource {
    stdin: io::Stdin,
    echo_prompt: bool,
}

impl StdinSource {
    pub fn new(echo_prompt: bool) -> Self {
        Self {
            stdin: io::stdin(),
            echo_prompt,
        }
    }
}

impl CommandSource for StdinSource {
    fn next_command(&mut self, prompt: &str) -> Option<String> {
        if self.echo_prompt {
            print!("{}", prompt);
            let _ = io::stdout().flush();
        }

        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                tracing::warn!(%err, "failed to read from stdin");
                None
            }
        }
    }
}

/// One line of machine-readable output
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonLine<'a> {
    Status(&'a Status),
    Message { text: &'a str },
    Summary(&'a SessionSummary),
}

/// Prints status and messages to stdout, as text or JSON lines
pub struct ConsoleSink {
    json: bool,
    pace: Duration,
    statuses_shown: u64,
}

impl ConsoleSink {
    pub fn new(json: bool, pace: Duration) -> Self {
        Self {
            json,
            pace,
            statuses_shown: 0,
        }
    }

    fn emit_json(&self, line: &JsonLine<'_>) {
        match serde_json::to_string(line) {
            Ok(text) => println!("{}", text),
            Err(err) => tracing::error!(%err, "failed to encode output"),
        }
    }

    pub fn summary(&mut self, summary: &SessionSummary) {
        if self.json {
            self.emit_json(&JsonLine::Summary(summary));
            return;
        }
        println!();
        for line in summary.lines() {
            println!("{}", line);
        }
    }
}

impl StatusSink for ConsoleSink {
    fn status(&mut self, status: &Status) {
        if self.statuses_shown > 0 && !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
        self.statuses_shown += 1;

        if self.json {
            self.emit_json(&JsonLine::Status(status));
        } else {
            println!("\n{}", status);
        }
    }

    fn message(&mut self, text: &str) {
        if self.json {
            self.emit_json(&JsonLine::Message { text });
        } else {
            println!("{}", text);
        }
    }
}
