use crate::batch::BatchOutput;
use crate::commands::{CmdMessage, CmdResult, Engine, PageView};
use crate::store::{BufferKind, SessionState};
use crate::tokenize::Delimiter;
use crate::transform::TransformKind;
use tracing::debug;

/// Runs `kind` over the input (or `draft`) and replaces the output with the result.
pub fn run(
    state: &mut SessionState,
    engine: &Engine,
    kind: TransformKind,
    draft: &str,
) -> CmdResult {
    let source = state.source(BufferKind::Input, draft);
    let output = engine.batch.run(&engine.codec, kind, source);
    apply(state, engine, kind, BufferKind::Output, output)
}

/// Rewrites `target` with `kind` applied to its own contents.
///
/// The input buffer reads from the committed input or `draft` and commits the
/// result; the output buffer reads and writes the full output. An empty source
/// leaves the session untouched.
pub fn in_place(
    state: &mut SessionState,
    engine: &Engine,
    kind: TransformKind,
    target: BufferKind,
    draft: &str,
) -> CmdResult {
    let source = state.source(target, draft);
    if source.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("Nothing to transform in {}", target)));
        return result.with_view(PageView::render(state, target, engine.page_size));
    }

    let output = engine.batch.run(&engine.codec, kind, source);
    apply(state, engine, kind, target, output)
}

fn apply(
    state: &mut SessionState,
    engine: &Engine,
    kind: TransformKind,
    target: BufferKind,
    output: BatchOutput,
) -> CmdResult {
    let BatchOutput {
        text,
        report,
        delimiter,
    } = output;

    state.buffer_mut(target).replace(text, engine.page_size);
    let cursor = state.buffer(target).cursor();
    debug!(
        %kind,
        buffer = %target,
        items = report.items,
        mapped = report.mapped,
        pages = cursor.total(),
        "transform applied"
    );

    let mut result = CmdResult::default().with_report(report);
    if report.items == 0 {
        result.add_message(CmdMessage::info("Input is empty"));
    } else {
        result.add_message(CmdMessage::success(summary(kind, report.items, report.mapped, delimiter)));
        if matches!(kind, TransformKind::Encrypt | TransformKind::Decrypt)
            && report.passed_through() > 0
        {
            result.add_message(CmdMessage::warning(format!(
                "{} token(s) passed through unchanged",
                report.passed_through()
            )));
        }
    }

    result.with_view(PageView::render(state, target, engine.page_size))
}

fn summary(kind: TransformKind, items: usize, mapped: usize, delimiter: Option<Delimiter>) -> String {
    match kind {
        TransformKind::Encrypt => format!("Encoded {} of {} tokens", mapped, items),
        TransformKind::Decrypt => format!("Decoded {} of {} tokens", mapped, items),
        TransformKind::FormatFlip => match delimiter {
            Some(Delimiter::Newline) => format!("Split {} tokens onto separate lines", items),
            _ => format!("Joined {} tokens with commas", items),
        },
        TransformKind::AddQuotes => format!("Quoted {} of {} tokens", mapped, items),
        TransformKind::StripQuotes => format!("Unquoted {} of {} tokens", mapped, items),
        TransformKind::NormalizeComma => format!("Replaced {} full-width comma(s)", mapped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::SessionFixture;

    fn engine(page_size: usize) -> Engine {
        Engine::default().with_page_size(page_size)
    }

    #[test]
    fn encrypt_then_decrypt_via_output() {
        let engine = engine(5000);
        let mut state = SessionFixture::default().with_input("100,200,300").state;

        run(&mut state, &engine, TransformKind::Encrypt, "");
        let encrypted = state.output.blob().to_string();

        let mut state = SessionFixture::default().with_input(&encrypted).state;
        let result = run(&mut state, &engine, TransformKind::Decrypt, "");
        assert_eq!(state.output.blob(), "100,200,300");
        assert_eq!(result.text(), "100,200,300");
    }

    #[test]
    fn uses_draft_when_nothing_committed() {
        let engine = engine(5000);
        let mut state = SessionState::default();

        run(&mut state, &engine, TransformKind::FormatFlip, "a,b");
        assert_eq!(state.output.blob(), "a\nb");
        assert!(state.input.is_empty(), "draft must not be promoted to input");
    }

    #[test]
    fn committed_input_wins_over_draft() {
        let engine = engine(5000);
        let mut state = SessionFixture::default().with_input("x,y").state;

        run(&mut state, &engine, TransformKind::AddQuotes, "ignored");
        assert_eq!(state.output.blob(), "'x','y'");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let engine = engine(5000);
        for kind in TransformKind::ALL {
            let mut state = SessionFixture::default().with_output("stale").state;
            let result = run(&mut state, &engine, kind, "");
            assert_eq!(state.output.blob(), "");
            assert_eq!(state.output.cursor().total(), 0);
            assert_eq!(result.label(), "");
        }
    }

    #[test]
    fn transform_resets_output_to_first_page() {
        let engine = engine(4);
        let mut state = SessionFixture::new(4)
            .with_input("1,2,3,4,5,6")
            .with_output("abcdefghijkl")
            .state;
        state.output.goto(3);

        let result = run(&mut state, &engine, TransformKind::FormatFlip, "");
        assert_eq!(state.output.cursor().current(), 1);
        assert_eq!(result.text(), "1\n2\n");
        assert_eq!(result.label(), "Page 1/3");
    }

    #[test]
    fn passthrough_is_reported_as_warning() {
        let engine = engine(5000);
        let mut state = SessionFixture::default().with_input("1,abc").state;

        let result = run(&mut state, &engine, TransformKind::Encrypt, "");
        assert_eq!(result.report.unwrap().passed_through(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    #[test]
    fn in_place_on_input_commits_result() {
        let engine = engine(5000);
        let mut state = SessionState::default();

        in_place(
            &mut state,
            &engine,
            TransformKind::NormalizeComma,
            BufferKind::Input,
            "1，2，3",
        );
        assert_eq!(state.input.blob(), "1,2,3");
        assert!(state.output.is_empty());
    }

    #[test]
    fn in_place_on_output_reads_output() {
        let engine = engine(5000);
        let mut state = SessionFixture::default()
            .with_input("untouched")
            .with_output("'a','b'")
            .state;

        let result = in_place(
            &mut state,
            &engine,
            TransformKind::StripQuotes,
            BufferKind::Output,
            "",
        );
        assert_eq!(state.output.blob(), "a,b");
        assert_eq!(state.input.blob(), "untouched");
        assert_eq!(result.text(), "a,b");
    }

    #[test]
    fn in_place_on_empty_buffer_is_a_no_op() {
        let engine = engine(5000);
        let mut state = SessionFixture::default().with_input("keep").state;

        let result = in_place(
            &mut state,
            &engine,
            TransformKind::AddQuotes,
            BufferKind::Output,
            "",
        );
        assert!(state.output.is_empty());
        assert_eq!(state.input.blob(), "keep");
        assert!(result.report.is_none());
    }
}
