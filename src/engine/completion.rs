//! Prefix completion of the command name being typed.

/// The completion state for the current input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Suggestion {
    /// No command starts with the typed token (or nothing is typed).
    #[default]
    None,
    /// Exactly one command matches.
    Single(String),
    /// Several commands match, sorted by name.
    Ambiguous(Vec<String>),
}

impl Suggestion {
    pub fn is_none(&self) -> bool {
        matches!(self, Suggestion::None)
    }

    /// Text shown to the user for this suggestion.
    pub fn text(&self) -> Option<String> {
        match self {
            Suggestion::None => None,
            Suggestion::Single(name) => Some(name.clone()),
            Suggestion::Ambiguous(names) => Some(names.join("  ")),
        }
    }

    /// Part of a single match not yet typed, for inline hints.
    pub fn hint<'a>(&'a self, input: &str) -> Option<&'a str> {
        match self {
            Suggestion::Single(name) if !input.contains(char::is_whitespace) => name
                .strip_prefix(input)
                .filter(|rest| !rest.is_empty()),
            _ => None,
        }
    }
}

/// Byte range of the first whitespace-delimited token in `input`.
pub fn first_token_span(input: &str) -> Option<(usize, usize)> {
    let start = input.find(|c: char| !c.is_whitespace())?;
    let end = input[start..]
        .find(char::is_whitespace)
        .map_or(input.len(), |offset| start + offset);
    Some((start, end))
}

/// Computes which of `names` complete the first token of `input`.
pub fn suggest<'a, I>(input: &str, names: I) -> Suggestion
where
    I: IntoIterator<Item = &'a str>,
{
    let Some((start, end)) = first_token_span(input) else {
        return Suggestion::None;
    };
    let prefix = &input[start..end];

    let mut matches: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(str::to_string)
        .collect();
    matches.sort();
    matches.dedup();

    match matches.len() {
        0 => Suggestion::None,
        1 => Suggestion::Single(matches.remove(0)),
        _ => Suggestion::Ambiguous(matches),
    }
}

/// Replaces the first token of `input` with `name`, keeping everything else.
pub fn apply(input: &str, name: &str) -> Option<String> {
    let (start, end) = first_token_span(input)?;
    Some(format!("{}{}{}", &input[..start], name, &input[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["help", "history", "theme", "time"];

    #[test]
    fn single_prefix_match() {
        assert_eq!(suggest("he", NAMES), Suggestion::Single("help".into()));
        assert_eq!(suggest("  th", NAMES), Suggestion::Single("theme".into()));
    }

    #[test]
    fn ambiguous_matches_are_sorted() {
        assert_eq!(
            suggest("h", NAMES),
            Suggestion::Ambiguous(vec!["help".into(), "history".into()])
        );
        assert_eq!(suggest("h", NAMES).text().unwrap(), "help  history");
    }

    #[test]
    fn no_match_or_no_input() {
        assert_eq!(suggest("zz", NAMES), Suggestion::None);
        assert_eq!(suggest("   ", NAMES), Suggestion::None);
        assert_eq!(suggest("", NAMES), Suggestion::None);
    }

    #[test]
    fn only_the_first_token_is_considered() {
        assert_eq!(suggest("ti foo", NAMES), Suggestion::Single("time".into()));
    }

    #[test]
    fn apply_keeps_arguments_and_leading_space() {
        assert_eq!(apply("he", "help").as_deref(), Some("help"));
        assert_eq!(apply(" th dark", "theme").as_deref(), Some(" theme dark"));
        assert_eq!(apply("   ", "help"), None);
    }

    #[test]
    fn hint_is_the_untyped_remainder() {
        let suggestion = Suggestion::Single("help".into());
        assert_eq!(suggestion.hint("he"), Some("lp"));
        assert_eq!(suggestion.hint("help"), None);
        assert_eq!(suggestion.hint("he x"), None);
    }
}
