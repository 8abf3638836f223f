//! # Session Store
//!
//! Holds the two logical buffers of a session, input and output, each a full
//! blob plus its page cursor. Both live in one [`SessionState`] behind a single
//! mutex owned by [`Session`].
//!
//! ## Invariants
//!
//! - A blob is only ever replaced wholesale. [`Buffer::replace`] swaps the text
//!   and rebuilds the cursor in the same call, so a holder of the lock can never
//!   observe a cursor that belongs to a different blob.
//! - The visible page is rendered while the lock is held (see the command layer),
//!   so what a caller receives always matches the blob it was cut from.
//!
//! ## Draft vs committed input
//!
//! The committed input is whatever the user explicitly pasted/loaded. Text typed
//! ad hoc (the "draft") is owned by the caller and passed into each operation; it
//! is used as the source only while nothing has been committed.

use crate::error::OpkitError;
use crate::pager::PageCursor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod memory;

pub use memory::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    Input,
    Output,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Input => write!(f, "input"),
            BufferKind::Output => write!(f, "output"),
        }
    }
}

impl FromStr for BufferKind {
    type Err = OpkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" | "in" | "i" => Ok(BufferKind::Input),
            "output" | "out" | "o" => Ok(BufferKind::Output),
            other => Err(OpkitError::Api(format!("Unknown buffer: {}", other))),
        }
    }
}

/// A blob with its pagination cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    blob: String,
    char_len: usize,
    cursor: PageCursor,
}

impl Buffer {
    pub fn blob(&self) -> &str {
        &self.blob
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Swaps in a new blob and resets the cursor to its first page.
    pub fn replace(&mut self, blob: String, page_size: usize) {
        self.char_len = blob.chars().count();
        self.cursor = PageCursor::for_len(self.char_len, page_size);
        self.blob = blob;
    }

    pub fn clear(&mut self) {
        self.blob.clear();
        self.char_len = 0;
        self.cursor = PageCursor::EMPTY;
    }

    /// Moves to `page`; returns false (and changes nothing) when out of range.
    pub fn goto(&mut self, page: usize) -> bool {
        self.cursor.goto(page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub input: Buffer,
    pub output: Buffer,
}

impl SessionState {
    pub fn buffer(&self, kind: BufferKind) -> &Buffer {
        match kind {
            BufferKind::Input => &self.input,
            BufferKind::Output => &self.output,
        }
    }

    pub fn buffer_mut(&mut self, kind: BufferKind) -> &mut Buffer {
        match kind {
            BufferKind::Input => &mut self.input,
            BufferKind::Output => &mut self.output,
        }
    }

    /// The text an operation reads from `kind`.
    ///
    /// For the input buffer that is the committed input, falling back to `draft`
    /// when nothing has been committed. The output buffer has no draft.
    pub fn source<'a>(&'a self, kind: BufferKind, draft: &'a str) -> &'a str {
        match kind {
            BufferKind::Input if self.input.is_empty() => draft,
            BufferKind::Input => self.input.blob(),
            BufferKind::Output => self.output.blob(),
        }
    }
}
