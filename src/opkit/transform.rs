//! # Transform Library
//!
//! Pure, total per-token functions. None of them can fail: a token a transform
//! does not apply to (a word handed to the encoder, a plain number handed to the
//! decoder, an unquoted token handed to the quote stripper) comes back untouched.
//!
//! Internally each transform reports an [`Outcome`] so callers can count how many
//! tokens were actually changed; [`Outcome::into_text`] collapses it back into the
//! string that ends up in the output blob.

use crate::codec::Codec;
use crate::error::OpkitError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub const QUOTE: char = '\'';
pub const FULLWIDTH_COMMA: char = '\u{FF0C}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The transform applied and produced new text.
    Mapped(String),
    /// The transform did not apply; the token is kept as-is.
    Passthrough,
}

impl Outcome {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Outcome::Mapped(_))
    }

    pub fn into_text(self, original: &str) -> Cow<'_, str> {
        match self {
            Outcome::Mapped(text) => Cow::Owned(text),
            Outcome::Passthrough => Cow::Borrowed(original),
        }
    }
}

/// Encodes `token` when it is a base-10 integer the codec can represent.
///
/// Signs and leading zeros are accepted (`"+007"` encodes 7). Negative numbers
/// have no encoding and pass through.
pub fn encode_token(codec: &Codec, token: &str) -> Outcome {
    match token.parse::<i64>() {
        Ok(n) if n >= 0 => Outcome::Mapped(codec.encode(n as u64)),
        _ => Outcome::Passthrough,
    }
}

/// Decodes `token` back to its canonical decimal form. Ids that hold more than
/// one number pass through.
pub fn decode_token(codec: &Codec, token: &str) -> Outcome {
    match codec.decode(token).as_deref() {
        Some([n]) if i64::try_from(*n).is_ok() => Outcome::Mapped(n.to_string()),
        _ => Outcome::Passthrough,
    }
}

/// True when `token` starts and ends with a single quote (and is not just one quote).
pub fn is_quoted(token: &str) -> bool {
    token.chars().count() >= 2 && token.starts_with(QUOTE) && token.ends_with(QUOTE)
}

pub fn add_quotes(token: &str) -> Outcome {
    if is_quoted(token) {
        Outcome::Passthrough
    } else {
        Outcome::Mapped(format!("{QUOTE}{token}{QUOTE}"))
    }
}

/// Removes one pair of surrounding quotes.
///
/// Only a token wrapped in exactly one pair is unwrapped: `'a'` becomes `a`, but
/// `''a''` is left alone so that stripping twice never eats into the value.
pub fn strip_quotes(token: &str) -> Outcome {
    if !is_quoted(token) {
        return Outcome::Passthrough;
    }
    let inner = &token[QUOTE.len_utf8()..token.len() - QUOTE.len_utf8()];
    if is_quoted(inner) {
        Outcome::Passthrough
    } else {
        Outcome::Mapped(inner.to_string())
    }
}

pub fn normalize_comma(ch: char) -> char {
    if ch == FULLWIDTH_COMMA {
        ','
    } else {
        ch
    }
}

/// The operations a session can run over a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    Encrypt,
    Decrypt,
    FormatFlip,
    AddQuotes,
    StripQuotes,
    NormalizeComma,
}

impl TransformKind {
    pub const ALL: [TransformKind; 6] = [
        TransformKind::Encrypt,
        TransformKind::Decrypt,
        TransformKind::FormatFlip,
        TransformKind::AddQuotes,
        TransformKind::StripQuotes,
        TransformKind::NormalizeComma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Encrypt => "encrypt",
            TransformKind::Decrypt => "decrypt",
            TransformKind::FormatFlip => "format-flip",
            TransformKind::AddQuotes => "add-quotes",
            TransformKind::StripQuotes => "strip-quotes",
            TransformKind::NormalizeComma => "normalize-comma",
        }
    }

    /// Kinds that can rewrite a buffer in place rather than only producing output.
    pub fn is_in_place(self) -> bool {
        matches!(
            self,
            TransformKind::AddQuotes | TransformKind::StripQuotes | TransformKind::NormalizeComma
        )
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = OpkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" | "encode" => Ok(TransformKind::Encrypt),
            "decrypt" | "decode" => Ok(TransformKind::Decrypt),
            "format-flip" | "flip" => Ok(TransformKind::FormatFlip),
            "add-quotes" | "quote" => Ok(TransformKind::AddQuotes),
            "strip-quotes" | "unquote" => Ok(TransformKind::StripQuotes),
            "normalize-comma" | "commas" => Ok(TransformKind::NormalizeComma),
            other => Err(OpkitError::Api(format!("Unknown transform: {}", other))),
        }
    }
}
