//! System clipboard access through the platform's copy command.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard command '{program}' failed to start: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("clipboard command '{program}' failed: {reason}")]
    Failed { program: String, reason: String },
}

/// Anything that can receive copied text.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into `pbcopy`, `clip`, `wl-copy` or `xclip`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn command() -> (&'static str, &'static [&'static str]) {
        if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if cfg!(windows) {
            ("clip", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            ("wl-copy", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (program, args) = Self::command();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let failed = |reason: String| ClipboardError::Failed {
            program: program.to_string(),
            reason,
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }
        let status = child.wait().map_err(|e| failed(e.to_string()))?;
        if !status.success() {
            return Err(failed(format!("exited with {status}")));
        }
        Ok(())
    }
}
