//! Page module: reading the daily page.
//!
//! Provides:
//! - Text sanitization for filenames and shell arguments
//! - Image, caption and alt-text extraction
//! - Image URL resolution and permanent links

pub mod extract;
pub mod links;
pub mod sanitize;

pub use extract::{
    extract, extract_caption, extract_descriptive_text, extract_image_reference, Extraction,
    ImageReference,
};
pub use links::{permalink, resolve_image_url};
pub use sanitize::{collapse_to_one_line, escape_for_shell_argument, sanitize_filename_text};
