use crate::commands::{CmdMessage, CmdResult, Engine, PageView};
use crate::pager::PageNav;
use crate::store::{BufferKind, SessionState};
use tracing::debug;

/// Moves `kind` to the page `nav` points at and renders it.
///
/// Targets outside `1..=total` leave the cursor alone and re-render the current
/// page.
pub fn navigate(
    state: &mut SessionState,
    engine: &Engine,
    kind: BufferKind,
    nav: PageNav,
) -> CmdResult {
    let buffer = state.buffer_mut(kind);
    let target = buffer.cursor().target(nav);
    let moved = buffer.goto(target);
    debug!(buffer = %kind, %nav, target, moved, "page navigation");

    let mut result = CmdResult::default();
    if !moved {
        let total = buffer.cursor().total();
        let note = if total == 0 {
            format!("The {} is empty", kind)
        } else {
            format!("Page {} is out of range (1-{})", target, total)
        };
        result.add_message(CmdMessage::info(note));
    }
    result.with_view(PageView::render(state, kind, engine.page_size))
}

pub fn goto(state: &mut SessionState, engine: &Engine, kind: BufferKind, page: usize) -> CmdResult {
    navigate(state, engine, kind, PageNav::To(page))
}

/// Renders the current page of `kind` without touching the cursor.
pub fn show(state: &SessionState, engine: &Engine, kind: BufferKind) -> CmdResult {
    CmdResult::default().with_view(PageView::render(state, kind, engine.page_size))
}
