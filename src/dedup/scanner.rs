//! Hash scan of the destination directory.

use std::path::Path;

use crate::dedup::hash::hash_file;
use crate::error::Result;
use crate::fs::listing::{image_entries, list_directory, FileTypeOf};

/// Name of an existing image whose content hash equals `hash`, if any.
///
/// Only files classified as images are hashed. When several files share the
/// hash, the first in listing order is reported.
pub fn find_existing_image_with_hash(
    dir: &Path,
    hash: &str,
    file_types: &dyn FileTypeOf,
) -> Result<Option<String>> {
    let images = image_entries(list_directory(dir)?, file_types);
    tracing::debug!("Checking {} existing images in {}", images.len(), dir.display());

    for entry in images {
        let existing = hash_file(&entry.path)?;
        if existing == hash {
            return Ok(Some(entry.name));
        }
    }

    Ok(None)
}
