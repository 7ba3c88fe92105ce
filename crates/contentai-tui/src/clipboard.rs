use std::io::Write;
use std::process::{Command, Stdio};

type Helper = (&'static str, &'static [&'static str]);

const MACOS_HELPERS: &[Helper] = &[("pbcopy", &[])];
const WINDOWS_HELPERS: &[Helper] = &[("clip", &[])];
const UNIX_HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Clipboard helpers to try, first match wins
fn candidates() -> &'static [Helper] {
    if cfg!(target_os = "macos") {
        MACOS_HELPERS
    } else if cfg!(target_os = "windows") {
        WINDOWS_HELPERS
    } else {
        UNIX_HELPERS
    }
}

/// Best-effort copy. Returns the helper that took the text, if any.
pub fn copy_to_clipboard(text: &str) -> Option<&'static str> {
    for &(program, args) in candidates() {
        if run_helper(program, args, text) {
            tracing::debug!(program, bytes = text.len(), "Copied to clipboard");
            return Some(program);
        }
    }

    tracing::warn!("No clipboard helper available");
    None
}

/// Pipe `text` into the helper and reap it. xclip and xsel fork a daemon to
/// serve the selection, so their foreground process exits once stdin closes.
fn run_helper(program: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    // Dropping stdin closes the pipe so the helper sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    match (written, child.wait()) {
        (Ok(()), Ok(status)) if status.success() => true,
        (Err(e), _) => {
            tracing::debug!(program, error = %e, "Clipboard helper rejected input");
            false
        }
        (_, Ok(status)) => {
            tracing::debug!(program, %status, "Clipboard helper failed");
            false
        }
        (_, Err(e)) => {
            tracing::debug!(program, error = %e, "Clipboard helper could not be reaped");
            false
        }
    }
}
