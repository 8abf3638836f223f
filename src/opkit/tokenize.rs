//! # Tokenizer
//!
//! Splits pasted text into trimmed tokens and infers which delimiter the text
//! "mostly" uses. Both `,` and `\n` always act as separators; the inferred
//! [`Delimiter`] only decides how transformed tokens are joined back together.
//!
//! Inference is a plain count: more newlines than commas means [`Delimiter::Newline`],
//! anything else (ties included) means [`Delimiter::Comma`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Newline,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Newline => '\n',
        }
    }

    /// The other delimiter (comma ↔ newline).
    pub fn flipped(self) -> Self {
        match self {
            Delimiter::Comma => Delimiter::Newline,
            Delimiter::Newline => Delimiter::Comma,
        }
    }

    /// Infers the delimiter from separator counts in `text`.
    pub fn infer(text: &str) -> Self {
        let (newlines, commas) = text.chars().fold((0usize, 0usize), |(n, c), ch| match ch {
            '\n' => (n + 1, c),
            ',' => (n, c + 1),
            _ => (n, c),
        });
        if newlines > commas {
            Delimiter::Newline
        } else {
            Delimiter::Comma
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Newline => write!(f, "newline"),
        }
    }
}

/// Tokens borrowed from the source text, plus the delimiter inferred from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized<'a> {
    pub tokens: Vec<&'a str>,
    pub delimiter: Delimiter,
}

impl Tokenized<'_> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn is_separator(ch: char) -> bool {
    ch == '\n' || ch == ','
}

pub fn tokenize(text: &str) -> Tokenized<'_> {
    let tokens = text
        .split(is_separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    Tokenized {
        tokens,
        delimiter: Delimiter::infer(text),
    }
}
