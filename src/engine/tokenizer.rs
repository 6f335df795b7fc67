//! Splits a command line into tokens.

/// Splits `line` on whitespace, keeping quoted substrings together.
///
/// A `"` or `'` opens a quoted group only at the start of a token, and only
/// when the same quote character appears again later in the line. The quotes
/// themselves are dropped. Any other quote, such as the apostrophe in `I'm`,
/// is kept as an ordinary character.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for (idx, c) in line.char_indices() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            } else {
                current.push(c);
            }
            continue;
        }

        if (c == '"' || c == '\'') && !in_token && line[idx + c.len_utf8()..].contains(c) {
            quote = Some(c);
            in_token = true;
        } else if c.is_whitespace() {
            if in_token {
                tokens.push(std::mem::take(&mut current));
                in_token = false;
            }
        } else {
            current.push(c);
            in_token = true;
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}
