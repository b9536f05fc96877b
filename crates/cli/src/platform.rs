//! Platform collaborators: reading the selected file and writing the clipboard.
//!
//! The controller only talks to these traits, so it can be driven in tests
//! without a filesystem or a clipboard.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Errors from a clipboard write
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}{}", format_stderr(.stderr))]
    Rejected {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{0}")]
    Io(#[from] io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Reads the raw bytes of a user-selected file
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Places plain text on the clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[async_trait]
impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text).await
    }
}

/// Reads files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

#[async_trait]
impl FileSource for FsFileSource {
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Copies text by piping it into an external command such as `pbcopy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        CommandClipboard {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line, e.g. `xclip -selection clipboard`.
    ///
    /// Returns `None` for a blank command line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    /// The usual clipboard command for the current platform
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", Vec::new())
        } else if cfg!(target_os = "windows") {
            Self::new("clip", Vec::new())
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", Vec::new())
        } else {
            Self::new("xclip", vec!["-selection".into(), "clipboard".into()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!(program = %self.program, bytes = text.len(), "writing clipboard");

        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Rejected {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Writes the clipboard text to standard output instead
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let clipboard = CommandClipboard::parse("  xclip -selection clipboard ").unwrap();
        assert_eq!(clipboard.program(), "xclip");
        assert_eq!(clipboard.args(), ["-selection", "clipboard"]);

        assert!(CommandClipboard::parse("   ").is_none());
    }

    #[test]
    fn test_platform_default_has_program() {
        assert!(!CommandClipboard::platform_default().program().is_empty());
    }

    #[test]
    fn test_rejected_message_includes_stderr() {
        assert_eq!(format_stderr("  \n"), "");
        assert_eq!(format_stderr("no display\n"), ": no display");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = FsFileSource
            .read_file(Path::new("/definitely/not/here.csv"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
