//! Deduplication module.
//!
//! Provides:
//! - MD5 content hashing of bytes and files
//! - Hash scan of the destination directory

pub mod hash;
pub mod scanner;

pub use hash::{hash_bytes, hash_file};
pub use scanner::find_existing_image_with_hash;
