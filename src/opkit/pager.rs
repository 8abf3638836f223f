//! # Pager
//!
//! Fixed-size, code-point-aligned pages over a blob. Pages are 1-indexed; an
//! empty blob has zero pages and renders as empty text.
//!
//! A [`PageCursor`] is only ever derived from a blob's length: it is created by
//! [`PageCursor::for_len`] and can only move between existing pages, so it never
//! points past the end of the blob it was built for.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    current: usize,
    total: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PageCursor {
    pub const EMPTY: PageCursor = PageCursor {
        current: 1,
        total: 0,
    };

    /// Cursor on page 1 of a blob that is `char_len` code points long.
    pub fn for_len(char_len: usize, page_size: usize) -> Self {
        Self {
            current: 1,
            total: paginate(char_len, page_size),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Moves to `page`; out-of-range pages leave the cursor where it is.
    pub fn goto(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total {
            return false;
        }
        self.current = page;
        true
    }

    /// Resolves a navigation request to a target page number.
    ///
    /// `Prev` on page 1 resolves to 0, which [`goto`](Self::goto) then ignores.
    pub fn target(&self, nav: PageNav) -> usize {
        match nav {
            PageNav::First => 1,
            PageNav::Prev => self.current.saturating_sub(1),
            PageNav::Next => self.current + 1,
            PageNav::Last => self.total,
            PageNav::To(page) => page,
        }
    }

    /// `"Page 2/3"`, or empty for blobs with fewer than two pages.
    pub fn label(&self) -> String {
        if self.total > 1 {
            format!("Page {}/{}", self.current, self.total)
        } else {
            String::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
    To(usize),
}

impl fmt::Display for PageNav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNav::First => write!(f, "first"),
            PageNav::Prev => write!(f, "prev"),
            PageNav::Next => write!(f, "next"),
            PageNav::Last => write!(f, "last"),
            PageNav::To(page) => write!(f, "{}", page),
        }
    }
}

/// Number of pages needed for `char_len` code points.
pub fn paginate(char_len: usize, page_size: usize) -> usize {
    if char_len == 0 {
        return 0;
    }
    char_len.div_ceil(page_size.max(1))
}

/// The visible slice of `blob` for `cursor`.
///
/// Offsets are counted in code points, so a page never splits a multi-byte
/// character.
pub fn render_page<'a>(blob: &'a str, cursor: &PageCursor, page_size: usize) -> &'a str {
    if cursor.total == 0 {
        return "";
    }
    let page_size = page_size.max(1);
    let start_char = (cursor.current - 1) * page_size;
    let start = byte_offset(blob, start_char);
    let len = byte_offset(&blob[start..], page_size);
    &blob[start..start + len]
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(i, _)| i)
}
