//! # Batch Processor
//!
//! Runs a per-token transform across a whole blob and joins the results back
//! with the delimiter inferred from that blob. Work is done in chunks of
//! `batch_size` tokens so the transient `Vec`s stay small on very large pastes;
//! the chunk size never changes the output.
//!
//! Comma normalization is the odd one out: it works on characters rather than
//! tokens, so it keeps the text byte-for-byte apart from the replaced commas.

use crate::codec::Codec;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::tokenize::{tokenize, Delimiter};
use crate::transform::{self, Outcome, TransformKind};
use std::borrow::Cow;

/// What a batch run did, item by item.
///
/// Items are tokens for token transforms and characters for comma normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub items: usize,
    pub mapped: usize,
}

impl BatchReport {
    pub fn passed_through(&self) -> usize {
        self.items - self.mapped
    }

    fn record(&mut self, outcome: &Outcome) {
        self.items += 1;
        if outcome.is_mapped() {
            self.mapped += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub text: String,
    pub report: BatchReport,
    /// Delimiter used to join the output; `None` for character-level runs.
    pub delimiter: Option<Delimiter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    batch_size: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchProcessor {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Runs `kind` over `text`.
    pub fn run(&self, codec: &Codec, kind: TransformKind, text: &str) -> BatchOutput {
        match kind {
            TransformKind::Encrypt => self.apply(text, |t| transform::encode_token(codec, t)),
            TransformKind::Decrypt => self.apply(text, |t| transform::decode_token(codec, t)),
            TransformKind::FormatFlip => self.flip_format(text),
            TransformKind::AddQuotes => self.apply(text, transform::add_quotes),
            TransformKind::StripQuotes => self.apply(text, transform::strip_quotes),
            TransformKind::NormalizeComma => self.map_chars(text, transform::normalize_comma),
        }
    }

    /// Applies `f` to every token, rejoining with the inferred delimiter.
    pub fn apply<F>(&self, text: &str, f: F) -> BatchOutput
    where
        F: FnMut(&str) -> Outcome,
    {
        let delimiter = Delimiter::infer(text);
        self.apply_joined(text, delimiter, f)
    }

    /// Rejoins the tokens with the opposite delimiter, leaving each token as-is.
    pub fn flip_format(&self, text: &str) -> BatchOutput {
        let delimiter = Delimiter::infer(text).flipped();
        self.apply_joined(text, delimiter, |_| Outcome::Passthrough)
    }

    fn apply_joined<F>(&self, text: &str, delimiter: Delimiter, mut f: F) -> BatchOutput
    where
        F: FnMut(&str) -> Outcome,
    {
        let tokenized = tokenize(text);
        let mut out = String::with_capacity(text.len());
        let mut report = BatchReport::default();
        let mut written = 0usize;
        let sep = delimiter.as_char();

        for chunk in tokenized.tokens.chunks(self.batch_size) {
            let rendered: Vec<Cow<'_, str>> = chunk
                .iter()
                .map(|&token| {
                    let outcome = f(token);
                    report.record(&outcome);
                    outcome.into_text(token)
                })
                .collect();

            for piece in rendered {
                // Tokens can render empty (`''` unquoted), so track position, not length.
                if written > 0 {
                    out.push(sep);
                }
                out.push_str(&piece);
                written += 1;
            }
        }

        BatchOutput {
            text: out,
            report,
            delimiter: Some(delimiter),
        }
    }

    /// Maps every character through `f`, chunk by chunk.
    pub fn map_chars<F>(&self, text: &str, f: F) -> BatchOutput
    where
        F: Fn(char) -> char,
    {
        let mut out = String::with_capacity(text.len());
        let mut report = BatchReport::default();
        let mut rest = text;

        while !rest.is_empty() {
            let split = rest
                .char_indices()
                .nth(self.batch_size)
                .map_or(rest.len(), |(i, _)| i);
            let (chunk, tail) = rest.split_at(split);
            for ch in chunk.chars() {
                let mapped = f(ch);
                report.items += 1;
                if mapped != ch {
                    report.mapped += 1;
                }
                out.push(mapped);
            }
            rest = tail;
        }

        BatchOutput {
            text: out,
            report,
            delimiter: None,
        }
    }
}
