//! Filesystem module.
//!
//! Provides:
//! - Directory listings and image classification
//! - Filename generation and numeric prefixing
//! - Path defaults and file writing

pub mod listing;
pub mod naming;
pub mod paths;

pub use listing::{list_directory, DirEntryInfo, FileCategory, FileTypeOf, SniffingFileTypes};
pub use naming::{build_base_name, count_in_name, prepend_count, target_path};
pub use paths::{default_config_path, default_download_dir, ensure_dir, write_file};
