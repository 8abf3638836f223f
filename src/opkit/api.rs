//! # API Facade
//!
//! The single entry point for every session operation, whatever the UI.
//!
//! [`OpkitApi`] is a cheap, cloneable handle: clones share one [`Session`] and
//! one [`Engine`], so handing a clone to each event handler or thread gives all
//! of them the same two buffers. Every method takes the session lock, runs one
//! command against the locked state, and returns the command's [`CmdResult`]
//! (rendered page included) before the lock is released.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr, clipboard or files
//!
//! The only errors it returns are caller mistakes that a typed UI cannot make,
//! such as asking for an in-place run of a transform that only produces output.

use crate::commands::{self, CmdResult, Engine};
use crate::config::OpkitConfig;
use crate::error::{OpkitError, Result};
use crate::pager::PageNav;
use crate::store::{BufferKind, Session};
use crate::transform::TransformKind;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct OpkitApi {
    session: Arc<Session>,
    engine: Arc<Engine>,
}

impl Default for OpkitApi {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl OpkitApi {
    pub fn new(engine: Engine) -> Self {
        Self::with_session(engine, Session::new())
    }

    pub fn with_session(engine: Engine, session: Session) -> Self {
        Self {
            session: Arc::new(session),
            engine: Arc::new(engine),
        }
    }

    pub fn from_config(config: &OpkitConfig) -> Result<Self> {
        Ok(Self::new(Engine::from_config(config)?))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Commits `text` as the full input (a paste).
    pub fn set_input(&self, text: &str) -> CmdResult {
        let mut state = self.session.lock();
        commands::buffer::set_input(&mut state, &self.engine, text)
    }

    pub fn clear_input(&self) -> CmdResult {
        self.clear(BufferKind::Input)
    }

    pub fn clear_output(&self) -> CmdResult {
        self.clear(BufferKind::Output)
    }

    pub fn clear(&self, kind: BufferKind) -> CmdResult {
        let mut state = self.session.lock();
        commands::buffer::clear(&mut state, &self.engine, kind)
    }

    /// Runs `kind` over the committed input (or `draft`) into the output buffer.
    pub fn transform(&self, kind: TransformKind, draft: &str) -> CmdResult {
        let mut state = self.session.lock();
        commands::transform::run(&mut state, &self.engine, kind, draft)
    }

    /// Rewrites `target` with `kind`. Only quoting and comma normalization can run
    /// in place.
    pub fn transform_in_place(
        &self,
        kind: TransformKind,
        target: BufferKind,
        draft: &str,
    ) -> Result<CmdResult> {
        if !kind.is_in_place() {
            return Err(OpkitError::Api(format!(
                "{} only writes to the output buffer",
                kind
            )));
        }
        let mut state = self.session.lock();
        Ok(commands::transform::in_place(
            &mut state,
            &self.engine,
            kind,
            target,
            draft,
        ))
    }

    pub fn goto_page(&self, kind: BufferKind, page: usize) -> CmdResult {
        let mut state = self.session.lock();
        commands::paging::goto(&mut state, &self.engine, kind, page)
    }

    pub fn goto_input_page(&self, page: usize) -> CmdResult {
        self.goto_page(BufferKind::Input, page)
    }

    pub fn goto_output_page(&self, page: usize) -> CmdResult {
        self.goto_page(BufferKind::Output, page)
    }

    pub fn navigate(&self, kind: BufferKind, nav: PageNav) -> CmdResult {
        let mut state = self.session.lock();
        commands::paging::navigate(&mut state, &self.engine, kind, nav)
    }

    pub fn show_page(&self, kind: BufferKind) -> CmdResult {
        let state = self.session.lock();
        commands::paging::show(&state, &self.engine, kind)
    }

    /// The whole output blob, e.g. for "copy full result".
    pub fn current_output_blob(&self) -> String {
        self.session.lock().output.blob().to_string()
    }

    pub fn current_input_blob(&self) -> String {
        self.session.lock().input.blob().to_string()
    }
}

pub use crate::commands::{CmdMessage, MessageLevel, PageView};
pub use crate::pager::PageCursor;
