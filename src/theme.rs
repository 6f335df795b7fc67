//! This module defines the closed set of terminal colour themes.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named colour preset for the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default neon look of the portfolio site.
    #[default]
    Holo,
    /// Light text on a dark background.
    Dark,
    /// Dark text on a light background.
    Light,
}

/// Returned when a theme name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Every theme, in the order they are listed to users.
    pub const ALL: [Theme; 3] = [Theme::Holo, Theme::Dark, Theme::Light];

    /// The token users type to select this theme.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Holo => "holo",
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// All theme names joined with `|`, as shown in usage lines.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|theme| theme.name())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("holo".parse::<Theme>(), Ok(Theme::Holo));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_names() {
        assert_eq!(
            "neon".parse::<Theme>(),
            Err(UnknownTheme("neon".to_string()))
        );
        assert!("Dark".parse::<Theme>().is_err());
    }

    #[test]
    fn choices_lists_every_theme() {
        assert_eq!(Theme::choices(), "holo|dark|light");
    }

    #[test]
    fn serializes_as_lowercase_token() {
        let json = serde_json::to_string(&Theme::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let theme: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
    }
}
