//! Filename construction.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fs::listing::{image_entries, list_directory, FileTypeOf};

static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Pick the filename stem: a non-empty user value wins over the caption.
///
/// `None` means neither is usable.
pub fn build_base_name(user_supplied: Option<&str>, caption: &str) -> Option<String> {
    match user_supplied {
        Some(name) if !name.trim().is_empty() => Some(name.to_string()),
        _ if !caption.is_empty() => Some(caption.to_string()),
        _ => None,
    }
}

/// Prefix `base_name` with the next four-digit counter for `dir`.
///
/// The counter continues from the first four-digit run in the name of the most
/// recently modified image. With no image in the directory the prefix is `0000`;
/// an image without digits counts as zero. Never fails.
pub fn prepend_count(dir: &Path, base_name: &str, file_types: &dyn FileTypeOf) -> String {
    let count = next_count(dir, file_types);
    format!("{:04}-{}", count, base_name)
}

fn next_count(dir: &Path, file_types: &dyn FileTypeOf) -> u32 {
    let entries = match list_directory(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {} for counting: {}", dir.display(), e);
            return 0;
        }
    };

    // Listing is oldest first; equal mtimes keep listing order.
    let Some(latest) = image_entries(entries, file_types).pop() else {
        return 0;
    };

    let previous = count_in_name(&latest.name).unwrap_or(0);
    tracing::debug!("Latest image {} carries count {}", latest.name, previous);
    previous + 1
}

/// First run of four digits in a filename.
pub fn count_in_name(name: &str) -> Option<u32> {
    COUNT_RE.find(name).and_then(|m| m.as_str().parse().ok())
}

/// `dir/filename.extension`.
pub fn target_path(dir: &Path, filename: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", filename, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::listing::SniffingFileTypes;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn write_aged(dir: &Path, name: &str, secs_ago: u64) {
        let path = dir.join(name);
        std::fs::write(&path, name).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[test]
    fn test_build_base_name_prefers_user_value() {
        assert_eq!(
            build_base_name(Some("mine"), "Caption"),
            Some("mine".to_string())
        );
        assert_eq!(build_base_name(None, "Caption"), Some("Caption".to_string()));
        assert_eq!(build_base_name(Some(""), "Caption"), Some("Caption".to_string()));
        assert_eq!(build_base_name(None, ""), None);
        assert_eq!(build_base_name(Some("  "), ""), None);
    }

    #[test]
    fn test_prepend_count_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            prepend_count(dir.path(), "Dark Nebulae", &SniffingFileTypes),
            "0000-Dark Nebulae"
        );
    }

    #[test]
    fn test_prepend_count_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("apotd");
        assert_eq!(prepend_count(&missing, "x", &SniffingFileTypes), "0000-x");
    }

    #[test]
    fn test_prepend_count_continues_from_latest_image() {
        let dir = TempDir::new().unwrap();
        write_aged(dir.path(), "0099-Older.jpg", 600);
        write_aged(dir.path(), "0073-Latest.jpg", 60);
        write_aged(dir.path(), "0500-notes.txt", 1);

        assert_eq!(
            prepend_count(dir.path(), "Dark Nebulae", &SniffingFileTypes),
            "0074-Dark Nebulae"
        );
    }

    #[test]
    fn test_prepend_count_latest_without_digits() {
        let dir = TempDir::new().unwrap();
        write_aged(dir.path(), "0042-Older.jpg", 600);
        write_aged(dir.path(), "Comet.png", 60);

        assert_eq!(prepend_count(dir.path(), "x", &SniffingFileTypes), "0001-x");
    }

    #[test]
    fn test_count_in_name() {
        assert_eq!(count_in_name("0073-Dark Nebulae.jpg"), Some(73));
        assert_eq!(count_in_name("M31 in 2023.jpg"), Some(2023));
        assert_eq!(count_in_name("123456.jpg"), Some(1234));
        assert_eq!(count_in_name("M31.jpg"), None);
    }

    #[test]
    fn test_target_path() {
        assert_eq!(
            target_path(Path::new("/pics"), "Dark Nebulae", "jpg"),
            PathBuf::from("/pics/Dark Nebulae.jpg")
        );
    }
}
