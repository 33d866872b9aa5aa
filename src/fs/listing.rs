//! Directory snapshots and file type classification.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Bytes read from the head of a file when sniffing its type.
const SNIFF_LEN: usize = 64;

/// One regular file in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Coarse file category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Other,
}

/// Classifies files on disk.
pub trait FileTypeOf {
    fn file_type_of(&self, path: &Path) -> Result<FileCategory>;
}

/// Sniffs magic bytes first and falls back to the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct SniffingFileTypes;

impl FileTypeOf for SniffingFileTypes {
    fn file_type_of(&self, path: &Path) -> Result<FileCategory> {
        let mut head = Vec::with_capacity(SNIFF_LEN);
        File::open(path)?
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)?;

        if image::guess_format(&head).is_ok() {
            return Ok(FileCategory::Image);
        }

        let by_extension = mime_guess::from_path(path)
            .first_raw()
            .map(|mime| mime.starts_with("image/"))
            .unwrap_or(false);

        Ok(if by_extension {
            FileCategory::Image
        } else {
            FileCategory::Other
        })
    }
}

/// List regular files in `dir`, oldest modification first.
///
/// A directory that does not exist yet lists as empty.
pub fn list_directory(dir: &Path) -> Result<Vec<DirEntryInfo>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            modified: metadata.modified()?,
        });
    }

    entries.sort_by_key(|e| e.modified);
    Ok(entries)
}

/// Keep only entries classified as images. Unreadable files are skipped.
pub fn image_entries(entries: Vec<DirEntryInfo>, file_types: &dyn FileTypeOf) -> Vec<DirEntryInfo> {
    entries
        .into_iter()
        .filter(|entry| match file_types.file_type_of(&entry.path) {
            Ok(FileCategory::Image) => true,
            Ok(FileCategory::Other) => false,
            Err(e) => {
                tracing::debug!("Skipping unreadable file {}: {}", entry.path.display(), e);
                false
            }
        })
        .collect()
}
