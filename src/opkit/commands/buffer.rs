use crate::commands::{CmdMessage, CmdResult, Engine, PageView};
use crate::store::{BufferKind, SessionState};
use tracing::debug;

/// Commits `text` as the full input. An empty paste keeps the current input.
pub fn set_input(state: &mut SessionState, engine: &Engine, text: &str) -> CmdResult {
    let mut result = CmdResult::default();

    if text.is_empty() {
        result.add_message(CmdMessage::info("Nothing to paste"));
        return result.with_view(PageView::render(state, BufferKind::Input, engine.page_size));
    }

    state.input.replace(text.to_string(), engine.page_size);
    debug!(
        chars = state.input.char_len(),
        pages = state.input.cursor().total(),
        "input committed"
    );
    result.add_message(CmdMessage::success(format!(
        "Loaded {} characters",
        state.input.char_len()
    )));
    result.with_view(PageView::render(state, BufferKind::Input, engine.page_size))
}

pub fn clear(state: &mut SessionState, engine: &Engine, kind: BufferKind) -> CmdResult {
    state.buffer_mut(kind).clear();
    debug!(buffer = %kind, "buffer cleared");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Cleared {}", kind)));
    result.with_view(PageView::render(state, kind, engine.page_size))
}
