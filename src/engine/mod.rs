//! The command engine behind the terminal.
//!
//! A `CommandEngine` owns the scrollback, the input buffer, the bounded
//! history and the command registry. Lines are tokenized, dispatched to a
//! handler and the handler's output is rendered into the scrollback.
//!
//! Only one command runs at a time. `begin_submit` hands back a
//! `PendingCommand` future the caller can await or spawn; `finish` renders
//! its outcome. Submitting again before `finish` is rejected with
//! `EngineError::Busy`.
mod commands;
mod completion;
mod context;
mod history;
mod options;
mod output;
mod registry;
mod tokenizer;

use std::any::Any;
use std::future::Future;
use std::mem;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use anyhow::anyhow;
use futures::future::BoxFuture;
use futures::FutureExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::ports::{Opener, SystemOpener};
use crate::theme::Theme;

use context::Effect;

pub use commands::normalize_url;
pub use completion::Suggestion;
pub use context::{CommandContext, CommandSummary};
pub use history::{History, Recall, DEFAULT_HISTORY_SIZE};
pub use options::{EngineOptions, Profile};
pub use output::CommandOutput;
pub use registry::{handler_fn, sync_handler, CommandHandler, CommandRegistry, CommandSpec};
pub use tokenizer::tokenize;

/// Marker echoed in front of every submitted line.
pub const PROMPT: &str = "$ ";

/// Errors returned by the engine's submission API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("a command is already running")]
    Busy,
    #[error("no command is running")]
    NotRunning,
}

/// What the engine is doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running { command: String },
}

/// The result of a handler, ready to be passed to `CommandEngine::finish`.
#[derive(Debug)]
pub struct CommandOutcome {
    pub command: String,
    pub result: anyhow::Result<CommandOutput>,
}

/// A dispatched handler that has not completed yet.
///
/// The future owns everything it needs, so it can be spawned onto a runtime
/// while the engine keeps accepting edits.
pub struct PendingCommand {
    command: String,
    future: BoxFuture<'static, anyhow::Result<CommandOutput>>,
}

impl PendingCommand {
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Future for PendingCommand {
    type Output = CommandOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(self.future.as_mut().poll(cx));
        Poll::Ready(CommandOutcome {
            command: mem::take(&mut self.command),
            result,
        })
    }
}

pub struct CommandEngine {
    scrollback: Vec<String>,
    scrollback_epoch: u64,
    input: String,
    /// Cursor position in the input buffer, counted in chars.
    cursor_pos: usize,
    history: History,
    registry: CommandRegistry,
    summaries: Arc<Vec<CommandSummary>>,
    theme: Theme,
    suggestion: Suggestion,
    phase: Phase,
    opener: Arc<dyn Opener>,
    effects_tx: mpsc::UnboundedSender<Effect>,
    effects_rx: mpsc::UnboundedReceiver<Effect>,
}

impl CommandEngine {
    pub fn new(options: EngineOptions) -> Self {
        let registry =
            CommandRegistry::build(commands::builtins(&options.profile), options.commands);
        let summaries = Arc::new(registry.summaries());
        let opener = options
            .opener
            .unwrap_or_else(|| Arc::new(SystemOpener) as Arc<dyn Opener>);
        let (effects_tx, effects_rx) = mpsc::unbounded_channel();

        debug!(
            "Command engine ready with {} commands, history bound {}",
            registry.len(),
            options.history_size
        );

        Self {
            scrollback: options.initial_lines,
            scrollback_epoch: 0,
            input: String::new(),
            cursor_pos: 0,
            history: History::new(options.history_size),
            registry,
            summaries,
            theme: options.theme,
            suggestion: Suggestion::None,
            phase: Phase::Idle,
            opener,
            effects_tx,
            effects_rx,
        }
    }

    /// Submits the input buffer.
    ///
    /// Whitespace-only input is left in place and nothing happens. Otherwise
    /// the input buffer is taken and dispatched like `begin_execute`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Busy` if a command is still running.
    pub fn begin_submit(&mut self) -> Result<Option<PendingCommand>, EngineError> {
        self.ensure_idle()?;
        if self.input.trim().is_empty() {
            return Ok(None);
        }

        let line = mem::take(&mut self.input);
        self.cursor_pos = 0;
        self.begin_execute(&line)
    }

    /// Dispatches `line`.
    ///
    /// Returns `None` when nothing needs awaiting (blank input or an unknown
    /// command, both already rendered). Otherwise the engine is `Running` and
    /// the returned future must be awaited and passed to `finish`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Busy` if a command is still running.
    pub fn begin_execute(&mut self, line: &str) -> Result<Option<PendingCommand>, EngineError> {
        self.ensure_idle()?;
        if line.trim().is_empty() {
            return Ok(None);
        }

        self.scrollback.push(format!("{}{}", PROMPT, line));
        self.history.push(line);
        self.input.clear();
        self.cursor_pos = 0;
        self.refresh_suggestion();

        let mut tokens = tokenize(line).into_iter();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<String> = tokens.collect();

        let Some(spec) = self.registry.get(&name) else {
            debug!("Unknown command: {}", name);
            self.scrollback.push(format!(
                "command not found: {}. Type 'help' for available commands.",
                name
            ));
            return Ok(None);
        };

        debug!("Dispatching '{}' with {} args", name, args.len());
        let handler = spec.handler.clone();
        let context = CommandContext::new(
            self.effects_tx.clone(),
            self.opener.clone(),
            self.theme,
            self.summaries.clone(),
            Arc::new(self.history.entries().map(str::to_string).collect()),
        );

        let panicked = name.clone();
        let future = AssertUnwindSafe(async move { handler.run(args, context).await })
            .catch_unwind()
            .map(move |caught| match caught {
                Ok(result) => result,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!("Command '{}' panicked: {}", panicked, message);
                    Err(anyhow!(message))
                }
            })
            .boxed();

        self.phase = Phase::Running {
            command: name.clone(),
        };

        Ok(Some(PendingCommand {
            command: name,
            future,
        }))
    }

    /// Renders a completed command and returns the engine to `Idle`.
    ///
    /// Capability effects queued by the handler are applied first, then the
    /// returned lines. An error becomes a single `error: ...` line.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotRunning` if no command was dispatched.
    pub fn finish(&mut self, outcome: CommandOutcome) -> Result<(), EngineError> {
        if !self.is_running() {
            return Err(EngineError::NotRunning);
        }

        self.pump();
        match outcome.result {
            Ok(CommandOutput::None) => {}
            Ok(CommandOutput::Line(line)) => self.scrollback.push(line),
            Ok(CommandOutput::Lines(lines)) => self.scrollback.extend(lines),
            Ok(CommandOutput::Clear) => self.clear_scrollback(),
            Err(e) => {
                debug!("Command '{}' failed: {:#}", outcome.command, e);
                self.scrollback.push(format!("error: {:#}", e));
            }
        }

        self.phase = Phase::Idle;
        Ok(())
    }

    /// Dispatches `line` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Busy` if a command is still running.
    pub async fn execute(&mut self, line: &str) -> Result<(), EngineError> {
        if let Some(pending) = self.begin_execute(line)? {
            let outcome = pending.await;
            self.finish(outcome)?;
        }
        Ok(())
    }

    /// Submits the input buffer and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Busy` if a command is still running.
    pub async fn submit(&mut self) -> Result<(), EngineError> {
        if let Some(pending) = self.begin_submit()? {
            let outcome = pending.await;
            self.finish(outcome)?;
        }
        Ok(())
    }

    /// Applies capability effects queued by handlers.
    ///
    /// Returns `true` if anything changed. Effects sent by tasks that outlive
    /// their command land whenever the engine next pumps.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(effect) = self.effects_rx.try_recv() {
            changed = true;
            match effect {
                Effect::Print(line) => self.scrollback.push(line),
                Effect::Clear => self.clear_scrollback(),
                Effect::SetTheme(theme) => self.set_theme(theme),
            }
        }
        changed
    }

    /// Empties the scrollback and the input buffer.
    pub fn reset(&mut self) {
        self.clear_scrollback();
        self.set_input("");
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            info!("Theme changed from {} to {}", self.theme, theme);
        }
        self.theme = theme;
    }

    fn clear_scrollback(&mut self) {
        self.scrollback.clear();
        self.scrollback_epoch += 1;
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::Busy);
        }
        Ok(())
    }

    // Input editing

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_pos);
        self.input.insert(at, c);
        self.cursor_pos += 1;
        self.input_changed();
    }

    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor_pos);
        self.input.insert_str(at, text);
        self.cursor_pos += text.chars().count();
        self.input_changed();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        self.cursor_pos -= 1;
        let at = self.byte_offset(self.cursor_pos);
        self.input.remove(at);
        self.input_changed();
    }

    pub fn delete(&mut self) {
        if self.cursor_pos >= self.input.chars().count() {
            return;
        }
        let at = self.byte_offset(self.cursor_pos);
        self.input.remove(at);
        self.input_changed();
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.chars().count();
    }

    /// Replaces the input buffer, as if the user typed `text`.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input.chars().count();
        self.input_changed();
    }

    fn input_changed(&mut self) {
        self.history.reset_cursor();
        self.refresh_suggestion();
    }

    fn replace_input(&mut self, text: String) {
        self.input = text;
        self.cursor_pos = self.input.chars().count();
        self.refresh_suggestion();
    }

    fn refresh_suggestion(&mut self) {
        self.suggestion = completion::suggest(&self.input, self.registry.names());
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map_or(self.input.len(), |(i, _)| i)
    }

    // History and completion

    /// Recalls the previous (older) history entry into the input buffer.
    pub fn history_previous(&mut self) {
        let recalled = match self.history.previous() {
            Recall::Entry(entry) => Some(entry.to_string()),
            _ => None,
        };
        if let Some(entry) = recalled {
            self.replace_input(entry);
        }
    }

    /// Recalls the next (newer) history entry, clearing the input once past
    /// the newest one.
    pub fn history_next(&mut self) {
        let recalled = match self.history.next() {
            Recall::Entry(entry) => Some(entry.to_string()),
            Recall::Exhausted => Some(String::new()),
            Recall::Unchanged => None,
        };
        if let Some(text) = recalled {
            self.replace_input(text);
        }
    }

    /// Completes the first token of the input.
    ///
    /// A single match rewrites the token. Several matches are only surfaced
    /// through `suggestion()`.
    pub fn complete(&mut self) -> &Suggestion {
        self.refresh_suggestion();
        let completed = match &self.suggestion {
            Suggestion::Single(name) => completion::apply(&self.input, name),
            _ => None,
        };
        if let Some(completed) = completed.filter(|c| c != &self.input) {
            self.set_input(&completed);
        }
        &self.suggestion
    }

    // Accessors

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    /// Counts how often the scrollback was emptied.
    pub fn scrollback_epoch(&self) -> u64 {
        self.scrollback_epoch
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn suggestion(&self) -> &Suggestion {
        &self.suggestion
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "command panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn engine() -> CommandEngine {
        CommandEngine::new(EngineOptions::default().with_opener(|_: &str| -> anyhow::Result<()> { Ok(()) }))
    }

    #[tokio::test]
    async fn echo_prints_joined_arguments() {
        let mut engine = engine();
        engine.execute("echo \"a b\" c").await.unwrap();
        assert_eq!(engine.scrollback(), ["$ echo \"a b\" c", "a b c"]);
    }

    #[tokio::test]
    async fn unknown_command_suggests_help() {
        let mut engine = engine();
        engine.execute("nope 1 2").await.unwrap();
        assert_eq!(
            engine.scrollback(),
            [
                "$ nope 1 2",
                "command not found: nope. Type 'help' for available commands."
            ]
        );
        assert_eq!(engine.history().len(), 1);
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn handler_errors_become_one_line() {
        let mut engine = CommandEngine::new(EngineOptions::default().with_command(
            CommandSpec::new(
                "fail",
                "always fails",
                sync_handler(|_, _| Err(anyhow!("disk on fire"))),
            ),
        ));

        engine.execute("fail").await.unwrap();
        assert_eq!(engine.scrollback(), ["$ fail", "error: disk on fire"]);
    }

    #[tokio::test]
    async fn handler_panics_are_caught() {
        let mut engine = CommandEngine::new(EngineOptions::default().with_command(
            CommandSpec::new(
                "boom",
                "panics",
                sync_handler(|_, _| panic!("kaboom")),
            ),
        ));

        engine.execute("boom").await.unwrap();
        assert_eq!(engine.scrollback(), ["$ boom", "error: kaboom"]);
        assert_eq!(engine.phase(), &Phase::Idle);

        engine.execute("echo still alive").await.unwrap();
        assert_eq!(engine.scrollback().last().unwrap(), "still alive");
    }

    #[tokio::test]
    async fn second_submission_while_running_is_rejected() {
        let gate = Arc::new(Notify::new());
        let wait = gate.clone();
        let mut engine = CommandEngine::new(EngineOptions::default().with_command(
            CommandSpec::new(
                "slow",
                "waits for the gate",
                handler_fn(move |_, ctx| {
                    let wait = wait.clone();
                    async move {
                        ctx.print("started");
                        wait.notified().await;
                        Ok(CommandOutput::line("done"))
                    }
                }),
            ),
        ));

        let pending = engine.begin_execute("slow").unwrap().unwrap();
        assert_eq!(pending.command(), "slow");
        let task = tokio::spawn(pending);

        assert!(engine.is_running());
        assert_eq!(engine.begin_execute("echo hi").err(), Some(EngineError::Busy));

        engine.set_input("ec");
        engine.complete();
        assert_eq!(engine.input(), "echo");
        assert_eq!(engine.begin_submit().err(), Some(EngineError::Busy));
        assert_eq!(engine.input(), "echo");

        gate.notify_one();
        let outcome = task.await.unwrap();
        engine.finish(outcome).unwrap();

        assert_eq!(engine.scrollback(), ["$ slow", "started", "done"]);
        assert_eq!(engine.history().len(), 1);
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn finish_without_running_command_is_an_error() {
        let mut engine = engine();
        let outcome = CommandOutcome {
            command: "echo".to_string(),
            result: Ok(CommandOutput::None),
        };
        assert_eq!(engine.finish(outcome), Err(EngineError::NotRunning));
    }

    #[tokio::test]
    async fn printed_lines_come_before_returned_lines() {
        let mut engine = CommandEngine::new(EngineOptions::default().with_command(
            CommandSpec::new(
                "mixed",
                "prints and returns",
                sync_handler(|_, ctx| {
                    ctx.print("one");
                    Ok(CommandOutput::lines(["two", "three"]))
                }),
            ),
        ));

        engine.execute("mixed").await.unwrap();
        assert_eq!(engine.scrollback(), ["$ mixed", "one", "two", "three"]);
    }

    #[tokio::test]
    async fn clear_bumps_the_epoch() {
        let mut engine = engine();
        engine.execute("echo hi").await.unwrap();
        assert_eq!(engine.scrollback_epoch(), 0);

        engine.execute("clear").await.unwrap();
        assert!(engine.scrollback().is_empty());
        assert_eq!(engine.scrollback_epoch(), 1);
    }

    #[tokio::test]
    async fn open_goes_through_the_interceptor() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = opened.clone();
        let mut engine = CommandEngine::new(EngineOptions::default().with_opener(
            move |target: &str| -> anyhow::Result<()> {
                sink.lock().unwrap().push(target.to_string());
                Ok(())
            },
        ));

        engine.execute("open github.com/someone").await.unwrap();
        engine.execute("open").await.unwrap();

        assert_eq!(
            *opened.lock().unwrap(),
            vec!["https://github.com/someone".to_string()]
        );
        assert_eq!(
            engine.scrollback(),
            [
                "$ open github.com/someone",
                "opening https://github.com/someone",
                "$ open",
                "usage: open <url>",
            ]
        );
    }

    #[tokio::test]
    async fn history_command_lists_entries_including_itself() {
        let mut engine = engine();
        engine.execute("echo one").await.unwrap();
        engine.execute("history").await.unwrap();
        assert_eq!(
            &engine.scrollback()[2..],
            ["$ history", "   1  echo one", "   2  history"]
        );
    }

    #[tokio::test]
    async fn help_describes_one_command() {
        let mut engine = engine();
        engine.execute("help theme").await.unwrap();
        assert_eq!(
            &engine.scrollback()[1..],
            ["theme - Switch the colour theme", "usage: theme <holo|dark|light>"]
        );
    }

    #[test]
    fn editing_is_char_aware() {
        let mut engine = engine();
        engine.insert_str("héllo");
        engine.cursor_left();
        engine.cursor_left();
        engine.backspace();
        assert_eq!(engine.input(), "hélo");
        engine.cursor_home();
        engine.delete();
        assert_eq!(engine.input(), "élo");
        engine.cursor_end();
        engine.insert_char('!');
        assert_eq!(engine.input(), "élo!");
        assert_eq!(engine.cursor_pos(), 4);
    }

    #[test]
    fn suggestion_follows_every_edit() {
        let mut engine = engine();
        engine.insert_char('w');
        assert_eq!(engine.suggestion(), &Suggestion::Single("whoami".into()));
        engine.backspace();
        assert!(engine.suggestion().is_none());
    }
}
