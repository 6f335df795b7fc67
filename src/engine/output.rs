//! What a command handler hands back to the engine.

/// Output produced by a command handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandOutput {
    /// Nothing to print.
    #[default]
    None,
    /// A single scrollback line.
    Line(String),
    /// Several scrollback lines, appended in order.
    Lines(Vec<String>),
    /// Empty the scrollback instead of appending.
    Clear,
}

impl CommandOutput {
    pub fn line(line: impl Into<String>) -> Self {
        Self::Line(line.into())
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Lines(lines.into_iter().map(Into::into).collect())
    }
}

impl From<()> for CommandOutput {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl From<String> for CommandOutput {
    fn from(line: String) -> Self {
        Self::Line(line)
    }
}

impl From<&str> for CommandOutput {
    fn from(line: &str) -> Self {
        Self::Line(line.to_string())
    }
}

impl From<Vec<String>> for CommandOutput {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Option<String>> for CommandOutput {
    fn from(line: Option<String>) -> Self {
        line.map_or(Self::None, Self::Line)
    }
}
