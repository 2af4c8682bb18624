use std::io::{self, Write};
use std::process::{Command, Stdio};

use gtk4::gdk;
use gtk4::gdk::prelude::*;
use serde::Deserialize;
use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to access default display for clipboard operations")]
    DisplayUnavailable,
    #[error("failed to run wl-copy command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("wl-copy exited with non-zero status: {status}")]
    CommandFailed { status: String },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()>;
}

/// Which backend places text on the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipboardBackendKind {
    #[default]
    Gdk,
    WlCopy,
}

pub fn backend_for(kind: ClipboardBackendKind) -> Box<dyn ClipboardBackend> {
    match kind {
        ClipboardBackendKind::Gdk => Box::new(GdkClipboardBackend),
        ClipboardBackendKind::WlCopy => Box::new(WlCopyBackend),
    }
}

/// Owns the selection through the running GTK display.
#[derive(Debug, Default)]
pub struct GdkClipboardBackend;

impl ClipboardBackend for GdkClipboardBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        let display = gdk::Display::default().ok_or(ClipboardError::DisplayUnavailable)?;
        display.clipboard().set_text(text);
        Ok(())
    }
}

/// Hands the text to `wl-copy`, which keeps serving it after we exit.
#[derive(Debug, Default)]
pub struct WlCopyBackend;

impl ClipboardBackend for WlCopyBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        pipe_text(WL_COPY_COMMAND, text)
    }
}

/// Feeds `text` to `program` on stdin and waits for it to exit.
///
/// The child is always reaped, even when writing its stdin fails.
fn pipe_text(program: &str, text: &str) -> ClipboardResult<()> {
    let command_io = |source| ClipboardError::CommandIo {
        command: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(command_io)?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let waited = child.wait();

    written.map_err(command_io)?;
    let status = waited.map_err(command_io)?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed {
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_kebab_case_names() {
        let kind: ClipboardBackendKind = serde_json::from_str("\"wl-copy\"").expect("parse");
        assert_eq!(kind, ClipboardBackendKind::WlCopy);
        let kind: ClipboardBackendKind = serde_json::from_str("\"gdk\"").expect("parse");
        assert_eq!(kind, ClipboardBackendKind::Gdk);
    }

    #[test]
    fn default_backend_kind_is_gdk() {
        assert_eq!(ClipboardBackendKind::default(), ClipboardBackendKind::Gdk);
    }

    #[test]
    fn command_error_contains_command_name() {
        let err = ClipboardError::CommandFailed {
            status: "exit status 1".to_string(),
        };
        assert!(format!("{err}").contains("wl-copy"));
    }

    #[test]
    fn broken_stdin_is_reported_after_child_exits() {
        // `true` never reads stdin, so a payload larger than the pipe buffer
        // hits a closed pipe.
        let payload = "x".repeat(1 << 20);

        let err = pipe_text("true", &payload).expect_err("write must fail");

        match err {
            ClipboardError::CommandIo { command, source } => {
                assert_eq!(command, "true");
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        let err = pipe_text("false", "").expect_err("false exits 1");
        assert!(matches!(err, ClipboardError::CommandFailed { .. }));
    }
}
