// termline — A multi-line readline engine for terminal command input
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use std::fs::OpenOptions;
use std::io::Write;
use termline::Cli;
use termline::editor::{Outcome, ReadlineBuilder};
use termline::error::ReadlineError;
use termline::term::CrosstermTerminal;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(readline_error) = extract_readline_error(&err) {
            eprintln!("{}", readline_error.user_message());
            std::process::exit(readline_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self, ReadlineError> {
        terminal::enable_raw_mode().map_err(|_| ReadlineError::NotATerminal)?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("failed to leave raw mode: {e}");
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut builder = ReadlineBuilder::new()
        .prompt(cli.prompt.as_str())
        .empty_continuation_prompt(cli.empty_continuation_prompt)
        .mark_prompts(!cli.no_mark_prompts);
    if let Some(continuation) = cli.continuation_prompt.as_deref() {
        builder = builder.continuation_prompt(continuation);
    }
    let mut readline = builder.build(CrosstermTerminal::stdout());

    let raw_mode = RawMode::enable()?;
    readline.start()?;
    loop {
        let outcome = match event::read().map_err(ReadlineError::from)? {
            Event::Key(key) if key.kind != KeyEventKind::Release => readline.on_key_event(key)?,
            Event::Paste(text) => readline.on_text(&text, false)?,
            Event::Resize(..) => {
                readline.on_resize()?;
                Outcome::Handled
            }
            _ => Outcome::Handled,
        };
        match outcome {
            Outcome::Accepted => {
                readline.end()?;
                let text = readline.all_text();
                tracing::info!(
                    bytes = text.len(),
                    lines = readline.buffer().line_count(),
                    "input accepted"
                );
                print_accepted(&text)?;
                readline.reset_text();
                readline.start()?;
            }
            Outcome::EndOfStream => {
                readline.end()?;
                break;
            }
            Outcome::Handled | Outcome::CouldNotPerform | Outcome::Unhandled => {}
        }
    }
    drop(raw_mode);
    Ok(())
}

/// Echo accepted input; raw mode needs explicit carriage returns.
fn print_accepted(text: &str) -> Result<(), ReadlineError> {
    let mut out = std::io::stdout().lock();
    for line in text.split('\n') {
        write!(out, "{line}\r\n")?;
    }
    out.flush()?;
    Ok(())
}

fn extract_readline_error(err: &anyhow::Error) -> Option<&ReadlineError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ReadlineError>())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
