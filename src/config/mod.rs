//! Configuration module for apotd.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, NotifyConfig, OptionsConfig, SourceConfig, DEFAULT_PAGE_URL};
pub use validation::{validate_config, validate_filename, validate_mail_address, validate_page_url};
