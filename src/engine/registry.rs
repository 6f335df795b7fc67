//! This module maps command names to their handlers.
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::context::{CommandContext, CommandSummary};
use super::output::CommandOutput;

/// Something that runs when its command name is entered.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command with its positional arguments.
    ///
    /// # Errors
    ///
    /// Any error is rendered as a single scrollback line by the engine.
    async fn run(&self, args: Vec<String>, context: CommandContext) -> Result<CommandOutput>;
}

/// Adapts an async closure into a `CommandHandler`. See [`handler_fn`].
pub struct FnHandler<F>(F);

/// Wraps `f` as a handler. `f` returns a future that may suspend.
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Vec<String>, CommandContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CommandOutput>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Vec<String>, CommandContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CommandOutput>> + Send + 'static,
{
    async fn run(&self, args: Vec<String>, context: CommandContext) -> Result<CommandOutput> {
        (self.0)(args, context).await
    }
}

/// Adapts a plain closure into a `CommandHandler`. See [`sync_handler`].
pub struct SyncHandler<F>(F);

/// Wraps a closure that finishes without suspending.
pub fn sync_handler<F>(f: F) -> SyncHandler<F>
where
    F: Fn(&[String], &CommandContext) -> Result<CommandOutput> + Send + Sync,
{
    SyncHandler(f)
}

#[async_trait]
impl<F> CommandHandler for SyncHandler<F>
where
    F: Fn(&[String], &CommandContext) -> Result<CommandOutput> + Send + Sync,
{
    async fn run(&self, args: Vec<String>, context: CommandContext) -> Result<CommandOutput> {
        (self.0)(&args, &context)
    }
}

/// A named command with its help text and handler.
#[derive(Clone)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub usage: Option<String>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            usage: self.usage.clone(),
        }
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Immutable, case-sensitive mapping from command name to `CommandSpec`.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    /// Builds a registry from `builtins`, then overlays `overrides` on top.
    ///
    /// An override replaces the built-in with the same name. Nothing is
    /// ever removed, so every built-in name stays resolvable.
    pub(crate) fn build(builtins: Vec<CommandSpec>, overrides: Vec<CommandSpec>) -> Self {
        let commands = builtins
            .into_iter()
            .chain(overrides)
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn summaries(&self) -> Vec<CommandSummary> {
        self.commands.values().map(CommandSpec::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(name: &str, line: &'static str) -> CommandSpec {
        CommandSpec::new(name, format!("prints {line}"), sync_handler(move |_, _| {
            Ok(CommandOutput::line(line))
        }))
    }

    #[test]
    fn overrides_replace_builtins_of_the_same_name() {
        let registry = CommandRegistry::build(
            vec![fixed("help", "builtin"), fixed("echo", "echo")],
            vec![fixed("help", "custom"), fixed("projects", "projects")],
        );

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("help").unwrap().description, "prints custom");
        assert!(registry.contains("echo"));
        assert!(registry.contains("projects"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = CommandRegistry::build(vec![fixed("help", "x")], Vec::new());
        assert!(registry.get("HELP").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let registry = CommandRegistry::build(
            vec![fixed("time", "t"), fixed("clear", "c"), fixed("help", "h")],
            Vec::new(),
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["clear", "help", "time"]);
    }
}
