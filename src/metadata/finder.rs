//! Finder comments on macOS, set through `osascript`.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::metadata::{CommandReport, MetadataWriter};
use crate::page::sanitize::escape_for_shell_argument;

/// AppleScript lines run by `osascript`; the path and comment arrive as `argv`.
const SCRIPT_LINES: [&str; 3] = [
    "on run argv",
    "tell application \"Finder\" to set comment of (POSIX file (item 1 of argv) as alias) to (item 2 of argv)",
    "end run",
];

/// Sets the Finder "Comments" field of a file.
#[derive(Debug, Clone)]
pub struct FinderCommentWriter {
    program: String,
}

impl Default for FinderCommentWriter {
    fn default() -> Self {
        Self::with_program("osascript")
    }
}

impl FinderCommentWriter {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to the program, with no shell in between.
    pub fn arguments(path: &Path, text: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(SCRIPT_LINES.len() * 2 + 2);
        for line in SCRIPT_LINES {
            args.push("-e".to_string());
            args.push(line.to_string());
        }
        args.push(path.to_string_lossy().into_owned());
        args.push(text.to_string());
        args
    }

    /// The invocation as a line that can be pasted into a shell.
    pub fn display_command(&self, path: &Path, text: &str) -> String {
        let mut line = escape_for_shell_argument(&self.program);
        for arg in Self::arguments(path, text) {
            line.push(' ');
            line.push_str(&escape_for_shell_argument(&arg));
        }
        line
    }
}

#[async_trait]
impl MetadataWriter for FinderCommentWriter {
    async fn write_comment(&self, path: &Path, text: &str) -> Result<CommandReport> {
        tracing::debug!("Running: {}", self.display_command(path, text));

        let output = Command::new(&self.program)
            .args(Self::arguments(path, text))
            .output()
            .await
            .map_err(|e| Error::MetadataWrite {
                path: path.to_path_buf(),
                status: -1,
                stdout: String::new(),
                stderr: format!("Failed to run {}: {}", self.program, e),
            })?;

        Ok(CommandReport {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
