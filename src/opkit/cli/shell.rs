//! Line-oriented interactive session.
//!
//! The shell owns the "draft" (ad-hoc typed text) and forwards everything else
//! to one [`OpkitApi`]. Reading is generic over [`BufRead`] and writing over
//! [`Write`] so the whole loop can be driven from tests.

use super::clipboard::{copy_to_clipboard, get_from_clipboard};
use super::print::{format_message, render_view};
use opkit::api::OpkitApi;
use opkit::commands::CmdResult;
use opkit::error::{OpkitError, Result};
use opkit::pager::PageNav;
use opkit::store::BufferKind;
use opkit::transform::TransformKind;
use std::io::{BufRead, Write};
use tracing::debug;

const END_OF_PASTE: &str = ".";

const HELP: &str = "\
Commands:
  read                      paste lines from stdin, end with a line containing only '.'
  paste                     load the input from the system clipboard
  load <path>               load the input from a file
  draft <text>              set ad-hoc text, used while no input is loaded
  run <kind>                transform the input into the output
  input <kind>              rewrite the input in place (add-quotes, strip-quotes, normalize-comma)
  output <kind>             rewrite the output in place (same kinds)
  page <buffer> <nav>       nav: a page number, first, prev, next or last
  show <buffer>             show the current page again
  clear <buffer>            empty a buffer (input or output)
  copy                      copy the full output to the clipboard
  save <path>               write the full output to a file
  help                      this text
  quit                      leave the shell

Kinds: encrypt, decrypt, format-flip, add-quotes, strip-quotes, normalize-comma
";

pub(super) struct Shell<R, W> {
    api: OpkitApi,
    draft: String,
    input: R,
    out: W,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn new(api: OpkitApi, input: R, out: W) -> Self {
        Self {
            api,
            draft: String::new(),
            input,
            out,
        }
    }

    pub(super) fn run(&mut self, prompt: bool) -> Result<()> {
        let mut line = String::new();
        loop {
            if prompt {
                write!(self.out, "opkit> ")?;
                self.out.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            // Command mistakes are reported and the session carries on.
            match self.execute(line.trim()) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(OpkitError::Io(e)) => return Err(OpkitError::Io(e)),
                Err(e) => writeln!(self.out, "Error: {}", e)?,
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        debug!(command, "shell command");

        match command {
            "" => {}
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => write!(self.out, "{}", HELP)?,
            "read" => {
                let text = self.read_paste()?;
                let result = self.api.set_input(&text);
                self.show(&result)?;
            }
            "paste" => {
                let text = get_from_clipboard()?;
                let result = self.api.set_input(&text);
                self.show(&result)?;
            }
            "load" => {
                let text = std::fs::read_to_string(required(rest, "load <path>")?)?;
                let result = self.api.set_input(&text);
                self.show(&result)?;
            }
            "draft" => {
                self.draft = rest.to_string();
                writeln!(self.out, "Draft set ({} characters)", self.draft.chars().count())?;
            }
            "run" => {
                let kind: TransformKind = required(rest, "run <kind>")?.parse()?;
                let result = self.api.transform(kind, &self.draft);
                self.show(&result)?;
            }
            "input" | "output" => {
                let target: BufferKind = command.parse()?;
                let kind: TransformKind = required(rest, "input|output <kind>")?.parse()?;
                let result = self.api.transform_in_place(kind, target, &self.draft)?;
                self.show(&result)?;
            }
            "page" => {
                let (buffer, nav) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("page <buffer> <nav>"))?;
                let result = self.api.navigate(buffer.parse()?, parse_nav(nav.trim())?);
                self.show(&result)?;
            }
            "show" => {
                let result = self.api.show_page(required(rest, "show <buffer>")?.parse()?);
                self.show(&result)?;
            }
            "clear" => {
                let result = self.api.clear(required(rest, "clear <buffer>")?.parse()?);
                self.show(&result)?;
            }
            "copy" => {
                let blob = self.api.current_output_blob();
                copy_to_clipboard(&blob)?;
                writeln!(self.out, "Copied {} characters", blob.chars().count())?;
            }
            "save" => {
                let path = required(rest, "save <path>")?;
                let blob = self.api.current_output_blob();
                std::fs::write(path, &blob)?;
                writeln!(self.out, "Saved {} characters to {}", blob.chars().count(), path)?;
            }
            other => {
                return Err(OpkitError::Api(format!(
                    "Unknown command: {} (try 'help')",
                    other
                )))
            }
        }
        Ok(Flow::Continue)
    }

    /// Collects lines until a line holding only `.` (or end of input).
    fn read_paste(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim_end_matches(['\r', '\n']) == END_OF_PASTE {
                break;
            }
            text.push_str(&line);
        }
        // The terminator line ends the paste; its newline is not part of the list.
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }

    fn show(&mut self, result: &CmdResult) -> Result<()> {
        if let Some(view) = &result.view {
            write!(self.out, "{}", render_view(view))?;
        }
        for message in &result.messages {
            writeln!(self.out, "{}", format_message(message))?;
        }
        Ok(())
    }
}

fn required<'a>(arg: &'a str, usage_text: &str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(usage(usage_text))
    } else {
        Ok(arg)
    }
}

fn usage(text: &str) -> OpkitError {
    OpkitError::Api(format!("usage: {}", text))
}

fn parse_nav(nav: &str) -> Result<PageNav> {
    match nav {
        "first" => Ok(PageNav::First),
        "prev" | "previous" => Ok(PageNav::Prev),
        "next" => Ok(PageNav::Next),
        "last" => Ok(PageNav::Last),
        n => n
            .parse()
            .map(PageNav::To)
            .map_err(|_| OpkitError::Api(format!("Not a page: {}", n))),
    }
}
