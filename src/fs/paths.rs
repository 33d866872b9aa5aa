//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

use crate::error::{Error, Result};

/// Subdirectory of the pictures folder used by default.
const DEFAULT_SUBDIR: &str = "apotd";

/// Default destination: `<Pictures>/apotd`, or `./apotd` without a pictures folder.
pub fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SUBDIR)
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "apotd")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("apotd.toml"))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::debug!("Creating directory {}", path.display());
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }
    Ok(())
}

/// Write `bytes` to `path`, creating the parent directory first.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
}
