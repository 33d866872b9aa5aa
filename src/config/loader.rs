//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use crate::fs::paths::default_download_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Page read when no URL is configured.
pub const DEFAULT_PAGE_URL: &str = "https://apod.nasa.gov/apod/astropix.html";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Where the daily page lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the daily page.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Placement options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Destination directory.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Filename stem; the caption is used when unset.
    #[serde(default)]
    pub filename: Option<String>,

    /// Prefix filenames with a running four-digit count.
    #[serde(default)]
    pub prepend_count: bool,

    /// Attach the description as a file comment where supported.
    #[serde(default = "default_true")]
    pub write_metadata: bool,

    /// Whether to show spinners and progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            filename: None,
            prepend_count: false,
            write_metadata: true,
            show_progress: true,
        }
    }
}

/// Failure notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Operator address; no mail is sent when unset.
    #[serde(default)]
    pub mail_to: Option<String>,

    /// Mail program taking `-s subject address` and the body on stdin.
    #[serde(default = "default_mail_command")]
    pub mail_command: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            mail_to: None,
            mail_command: default_mail_command(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("apotd/{}", env!("CARGO_PKG_VERSION"))
}

fn default_mail_command() -> String {
    "mail".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(default_download_dir)
    }
}
