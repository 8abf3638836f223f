//! System clipboard access through the platform's command-line tools.
//!
//! - macOS: `pbcopy` / `pbpaste`
//! - Linux: `wl-copy` / `wl-paste`, then `xclip`, then `xsel`
//! - Windows: `clip` / `powershell Get-Clipboard`

use opkit::error::{OpkitError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

type Tool = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const COPY_TOOLS: &[Tool] = &[("pbcopy", &[])];
#[cfg(target_os = "macos")]
const PASTE_TOOLS: &[Tool] = &[("pbpaste", &[])];

#[cfg(target_os = "linux")]
const COPY_TOOLS: &[Tool] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];
#[cfg(target_os = "linux")]
const PASTE_TOOLS: &[Tool] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

#[cfg(target_os = "windows")]
const COPY_TOOLS: &[Tool] = &[("clip", &[])];
#[cfg(target_os = "windows")]
const PASTE_TOOLS: &[Tool] = &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard -Raw"])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const COPY_TOOLS: &[Tool] = &[];
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const PASTE_TOOLS: &[Tool] = &[];

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_error = unsupported();
    for (program, args) in COPY_TOOLS {
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => last_error = e,
        }
    }
    Err(last_error)
}

pub fn get_from_clipboard() -> Result<String> {
    let mut last_error = unsupported();
    for (program, args) in PASTE_TOOLS {
        match read_from(program, args) {
            Ok(text) => return Ok(text),
            Err(e) => last_error = e,
        }
    }
    Err(last_error)
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| OpkitError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| OpkitError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| OpkitError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(OpkitError::Clipboard(format!("{} exited with error", program)))
    }
}

fn read_from(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::null())
        .output()
        .map_err(|e| OpkitError::Clipboard(format!("Failed to execute {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(OpkitError::Clipboard(format!("{} exited with error", program)));
    }
    String::from_utf8(output.stdout)
        .map_err(|e| OpkitError::Clipboard(format!("Invalid UTF-8 in clipboard: {}", e)))
}

fn unsupported() -> OpkitError {
    OpkitError::Clipboard("Clipboard not supported on this platform".to_string())
}
