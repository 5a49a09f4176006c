//! Shell-style splitting of a REPL input line into words.

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
}

/// Split `line` on unquoted whitespace.
///
/// Single quotes are literal; inside double quotes and bare words a
/// backslash takes the next character as-is. A quoted empty string (`''`)
/// yields an empty word.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word: Option<String> = None;
    let mut quote: Option<Quote> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(Quote::Single), '\'') | (Some(Quote::Double), '"') => quote = None,
            (Some(Quote::Single), c) => word.get_or_insert_with(String::new).push(c),
            (_, '\\') => match chars.next() {
                Some(c) => word.get_or_insert_with(String::new).push(c),
                None => bail!("Trailing backslash"),
            },
            (None, '\'') => {
                quote = Some(Quote::Single);
                word.get_or_insert_with(String::new);
            }
            (None, '"') => {
                quote = Some(Quote::Double);
                word.get_or_insert_with(String::new);
            }
            (None, c) if c.is_whitespace() => words.extend(word.take()),
            (_, c) => word.get_or_insert_with(String::new).push(c),
        }
    }

    match quote {
        Some(Quote::Single) => bail!("Unclosed single quote"),
        Some(Quote::Double) => bail!("Unclosed double quote"),
        None => {}
    }
    words.extend(word);
    Ok(words)
}
