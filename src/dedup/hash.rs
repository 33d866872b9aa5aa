//! Content hashing for deduplication.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::Result;

/// Compute the MD5 hash of in-memory bytes.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let result = Md5::digest(bytes);
    format!("{:x}", result)
}

/// Compute the MD5 hash of a file.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
