use colored::Colorize;
use opkit::api::{CmdMessage, MessageLevel, PageView};
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 60;
const RULE: char = '─';

pub(super) fn format_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

/// Messages go to stderr so stdout carries only the list itself.
pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", format_message(message));
    }
}

/// A rule with `title` centered in it, e.g. `──── Page 2/3 ────`.
pub(super) fn titled_rule(title: &str) -> String {
    if title.is_empty() {
        return RULE.to_string().repeat(RULE_WIDTH);
    }
    let padded = format!(" {} ", title);
    let remaining = RULE_WIDTH.saturating_sub(padded.width());
    let left = remaining / 2;
    let right = remaining - left;
    format!(
        "{}{}{}",
        RULE.to_string().repeat(left),
        padded,
        RULE.to_string().repeat(right)
    )
}

/// Framed page for the interactive shell: buffer name on top, page label below.
pub(super) fn render_view(view: &PageView) -> String {
    let mut out = String::new();
    out.push_str(&titled_rule(&view.buffer.to_string()));
    out.push('\n');
    if !view.text.is_empty() {
        out.push_str(&view.text);
        if !view.text.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(&titled_rule(&view.label()));
    out.push('\n');
    out
}
