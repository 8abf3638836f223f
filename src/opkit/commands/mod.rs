//! # Command Layer
//!
//! Business logic for every session operation. A command receives the already
//! locked [`SessionState`](crate::store::SessionState) and the immutable
//! [`Engine`], computes the new blob, swaps it in, and renders the visible page
//! before returning, all while the caller still holds the lock.
//!
//! Commands never fail on user text. Results carry a [`PageView`] for the buffer
//! that was touched and a list of [`CmdMessage`]s for the UI to show.

use crate::batch::{BatchProcessor, BatchReport};
use crate::codec::Codec;
use crate::config::OpkitConfig;
use crate::error::Result;
use crate::pager::{render_page, PageCursor};
use crate::store::{BufferKind, SessionState};

pub mod buffer;
pub mod paging;
pub mod transform;

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct Engine {
    pub codec: Codec,
    pub batch: BatchProcessor,
    pub page_size: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            codec: Codec::default(),
            batch: BatchProcessor::default(),
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Engine {
    pub fn from_config(config: &OpkitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            codec: Codec::from_config(&config.encoding)?,
            batch: BatchProcessor::new(config.batch_size),
            page_size: config.page_size,
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// The page of a buffer handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub buffer: BufferKind,
    pub text: String,
    pub cursor: PageCursor,
}

impl PageView {
    pub fn render(state: &SessionState, kind: BufferKind, page_size: usize) -> Self {
        let buffer = state.buffer(kind);
        let cursor = buffer.cursor();
        Self {
            buffer: kind,
            text: render_page(buffer.blob(), &cursor, page_size).to_string(),
            cursor,
        }
    }

    /// Page indicator text; empty unless the buffer spans several pages.
    pub fn label(&self) -> String {
        self.cursor.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub view: Option<PageView>,
    pub report: Option<BatchReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_view(mut self, view: PageView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_report(mut self, report: BatchReport) -> Self {
        self.report = Some(report);
        self
    }

    /// Visible text of the rendered page, or empty when nothing was rendered.
    pub fn text(&self) -> &str {
        self.view.as_ref().map_or("", |view| view.text.as_str())
    }

    pub fn label(&self) -> String {
        self.view.as_ref().map(PageView::label).unwrap_or_default()
    }
}
