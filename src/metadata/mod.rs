//! File comment metadata.
//!
//! Attaching a comment is a platform capability. The boundary picks a writer;
//! the pipeline only asks whether one is available.

pub mod finder;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub use finder::FinderCommentWriter;

/// What an external metadata command reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandReport {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Attaches a text comment to a saved file.
#[async_trait]
pub trait MetadataWriter: Send + Sync {
    /// Whether this writer does anything on the current platform.
    fn is_available(&self) -> bool {
        true
    }

    /// Attach `text` to `path`.
    ///
    /// `Err` means the writer could not run at all; a nonzero status comes back
    /// in the report.
    async fn write_comment(&self, path: &Path, text: &str) -> Result<CommandReport>;
}

/// Writer for platforms without file comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetadataWriter;

#[async_trait]
impl MetadataWriter for NoopMetadataWriter {
    fn is_available(&self) -> bool {
        false
    }

    async fn write_comment(&self, _path: &Path, _text: &str) -> Result<CommandReport> {
        Ok(CommandReport::default())
    }
}

/// Writer for the current platform.
pub fn platform_writer(enabled: bool) -> Box<dyn MetadataWriter> {
    if enabled && cfg!(target_os = "macos") {
        Box::new(FinderCommentWriter::default())
    } else {
        Box::new(NoopMetadataWriter)
    }
}
