//! Error types for the apotd application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Page errors
    #[error("Could not fetch {url}: {reason}. Check your network connection.")]
    Fetch { url: String, reason: String },

    #[error("No image found on {url}; today's content is probably not an image (a video, perhaps)")]
    NoImageFound { url: String },

    #[error("Malformed image tag: {0}")]
    MalformedImageTag(String),

    #[error("Could not fetch image {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    // Placement errors
    #[error("No filename available: the page has no caption and no --filename was given")]
    NoFilenameAvailable,

    #[error("Image already saved as {0}")]
    DuplicateImage(String),

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Could not attach comment to {} (exit status {status}): stdout: {stdout} stderr: {stderr}",
        .path.display()
    )]
    MetadataWrite {
        path: PathBuf,
        status: i32,
        stdout: String,
        stderr: String,
    },

    // Operator notification
    #[error("Notification failed: {0}")]
    Notify(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                exit_codes::CONFIG_ERROR
            }
            Error::Fetch { .. } | Error::ImageFetch { .. } | Error::Http(_) => {
                exit_codes::FETCH_ERROR
            }
            Error::NoImageFound { .. } | Error::MalformedImageTag(_) | Error::UrlParse(_) => {
                exit_codes::PAGE_ERROR
            }
            Error::NoFilenameAvailable | Error::DuplicateImage(_) => exit_codes::PLACEMENT_ERROR,
            Error::Write { .. } => exit_codes::WRITE_ERROR,
            Error::MetadataWrite { .. } => exit_codes::METADATA_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Exit codes, one per error family.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const FETCH_ERROR: i32 = 3;
    pub const PAGE_ERROR: i32 = 4;
    pub const PLACEMENT_ERROR: i32 = 5;
    pub const WRITE_ERROR: i32 = 6;
    pub const METADATA_ERROR: i32 = 7;
}
