//! Interactive REPL
//!
//! Provides a readline-based interface with:
//! - Command history
//! - Multi-line input support
//! - Typed assistant replies and delayed follow-ups

mod commands;
mod helper;

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use crate::config::{Settings, history_path};
use crate::error::SessionError;
use crate::log::{LogEntry, Role};
use crate::paint::{AnsiPainter, Painter};
use crate::session::{ChatSession, Turn};
use crate::typing::Typewriter;

pub use commands::{Command, HELP, Input};
use helper::FinHealthHelper;

/// Send one message, wait out its follow-ups and return everything logged
pub async fn run_once(
    session: &ChatSession,
    settings: &Settings,
    message: &str,
) -> Result<Vec<LogEntry>, SessionError> {
    let mut turn = session.send(message).await?;
    while let Some(follow_up) = turn.follow_up.take() {
        tokio::time::sleep(settings.scaled_delay(follow_up.delay)).await;
        turn = session.run_follow_up(follow_up).await?;
    }
    Ok(session.entries_since(0))
}

/// REPL state
pub struct Repl {
    /// Readline editor with history and completion
    editor: Editor<FinHealthHelper, DefaultHistory>,
    session: ChatSession,
    settings: Settings,
    painter: AnsiPainter,
    typer: Typewriter,
    /// History file path
    history_path: PathBuf,
    /// Set by Ctrl+C to finish typing immediately
    cancelled: Arc<AtomicBool>,
}

impl Repl {
    pub fn new(session: ChatSession, settings: Settings) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(FinHealthHelper::new(settings.color)));

        Ok(Self {
            editor,
            session,
            painter: AnsiPainter::new(settings.color),
            typer: Typewriter::new(settings.typing_interval),
            settings,
            history_path: history_path(),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Load command history
    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    /// Save command history
    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    /// Run the REPL loop
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();

        // Ctrl+C skips the rest of the typing effect
        tokio::spawn(watch_interrupts(
            tokio::signal::ctrl_c,
            Arc::clone(&self.cancelled),
        ));

        println!("Type your message (Ctrl+D to exit, /help for commands)");
        println!("  Use \\ at end of line for multi-line input");
        println!();

        let greeting = self.session.greet();
        self.show(greeting, false).await?;

        loop {
            let Some(line) = self.read_input()? else {
                println!("Goodbye!");
                break;
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history_entry(trimmed)?;
            self.cancelled.store(false, Ordering::SeqCst);

            let outcome = match Input::parse(trimmed) {
                Input::Command(Command::Quit) => {
                    println!("Goodbye!");
                    break;
                }
                Input::Command(command) => self.handle_command(command).await,
                Input::Message(text) => {
                    // A picked suggestion was not typed, so echo it
                    let typed = self.session.suggestion_for(&text).is_none();
                    self.loading();
                    let result = self.session.send_input(&text).await;
                    self.done_loading();
                    self.show_result(result, typed).await
                }
            };

            if let Err(e) = outcome {
                println!("{}", self.painter.error(&e.to_string()));
            }
        }

        self.save_history();
        Ok(())
    }

    /// Read input with backslash continuation
    fn read_input(&mut self) -> Result<Option<String>> {
        let first_line = match self.editor.readline(&self.painter.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                return Ok(Some(String::new()));
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => {
                eprintln!("Error: {:?}", err);
                return Ok(None);
            }
        };

        if first_line.trim().ends_with('\\') {
            return self.read_continuation_lines(&first_line);
        }
        Ok(Some(first_line))
    }

    /// Read continuation lines (ending with \)
    fn read_continuation_lines(&mut self, first_line: &str) -> Result<Option<String>> {
        let mut lines = vec![strip_continuation(first_line)];

        loop {
            match self.editor.readline(&self.painter.continuation_prompt()) {
                Ok(line) if line.trim().ends_with('\\') => lines.push(strip_continuation(&line)),
                Ok(line) => {
                    lines.push(line);
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C (cancelled multi-line)");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    return Ok(None);
                }
            }
        }

        Ok(Some(lines.join("\n")))
    }

    /// Handle slash commands
    async fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => println!("{}", HELP),
            Command::Version => {
                println!("FinHealth v{}", env!("CARGO_PKG_VERSION"));
                println!("  Backend: {}", self.settings.api_url);
            }
            Command::Symptoms(text) => {
                self.loading();
                let result = self.session.analyze_symptoms(&text).await;
                self.done_loading();
                self.show_result(result, true).await?;
            }
            Command::Compare(text) => {
                self.loading();
                let result = self.session.compare_from_text(&text).await;
                self.done_loading();
                self.show_result(result, true).await?;
            }
            Command::Plans => {
                let turn = self.session.list_insurance_plans();
                self.show(turn, false).await?;
            }
            Command::Locate(procedure) => {
                let turn = self.session.request_procedure_location(&procedure);
                self.show(turn, false).await?;
            }
            Command::Insurance => {
                let turn = self.session.request_insurance_comparison();
                self.show(turn, false).await?;
            }
            Command::Intake {
                location,
                procedure,
                insurance,
            } => {
                self.loading();
                let result = self
                    .session
                    .submit_intake(&location, &procedure, insurance.as_deref())
                    .await;
                self.done_loading();
                self.show_result(result, false).await?;
            }
            Command::History => {
                let entries = self.session.entries_since(0);
                if entries.is_empty() {
                    println!("{}", self.painter.status("Nothing yet."));
                } else {
                    print!("{}", self.painter.transcript(&entries));
                }
            }
            Command::Quit => {}
            Command::Usage(usage) => println!("{}", usage),
            Command::Unknown(name) => println!("Unknown command: {}. Try /help", name),
        }
        Ok(())
    }

    async fn show_result(&self, result: Result<Turn, SessionError>, typed_input: bool) -> Result<()> {
        let turn = result?;
        self.show(turn, typed_input).await
    }

    /// Paint a turn and any follow-ups it schedules
    async fn show(&self, turn: Turn, typed_input: bool) -> Result<()> {
        let mut turn = turn;
        let mut skip_echo = typed_input;

        loop {
            for entry in self.session.entries_since(turn.first_seq) {
                // The user's own line is already on screen
                if skip_echo && entry.entry.role == Role::User {
                    skip_echo = false;
                    continue;
                }
                self.paint(&entry).await?;
            }

            let Some(follow_up) = turn.follow_up.take() else {
                return Ok(());
            };
            let delay = self.settings.scaled_delay(follow_up.delay);
            debug!(?delay, "waiting for follow-up");
            self.loading();
            tokio::time::sleep(delay).await;
            self.done_loading();
            turn = self.session.run_follow_up(follow_up).await?;
            skip_echo = false;
        }
    }

    async fn paint(&self, entry: &LogEntry) -> Result<()> {
        let painted = self.painter.entry(&entry.entry);
        let mut stdout = io::stdout();
        if entry.entry.is_typed() {
            self.typer
                .type_out(&mut stdout, &painted, &self.cancelled)
                .await?;
        } else {
            stdout.write_all(painted.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Show the typing indicator
    fn loading(&self) {
        print!("{}", self.painter.status("FinHealth is typing..."));
        let _ = io::stdout().flush();
    }

    /// Clear the typing indicator line
    fn done_loading(&self) {
        print!("\r\x1b[2K");
        let _ = io::stdout().flush();
    }
}

/// Raise `flag` on every signal until the signal source fails
async fn watch_interrupts<F, Fut>(mut next_signal: F, flag: Arc<AtomicBool>)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    loop {
        match next_signal().await {
            Ok(()) => flag.store(true, Ordering::SeqCst),
            Err(e) => {
                debug!("Ctrl+C handling unavailable: {}", e);
                return;
            }
        }
    }
}

fn strip_continuation(line: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_suffix('\\').unwrap_or(trimmed).to_string()
}

/// Entry point for the interactive REPL
pub async fn run(session: ChatSession, settings: Settings) -> Result<()> {
    let mut repl = Repl::new(session, settings)?;
    repl.run().await
}
