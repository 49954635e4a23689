//! CRC32 checksum utilities
//!
//! Provides the single canonical checksum format (8 lowercase hex
//! digits) carried in manifest entries. CRC32 is a change detector,
//! not an integrity guarantee; the protocol never treats it as one.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crc32fast::Hasher;

use crate::{Error, Result};

/// Compute the CRC32 checksum of in-memory content.
///
/// Returns 8 lowercase hex digits, zero-padded.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content);
    format!("{:08x}", hasher.finalize())
}

/// Compute the CRC32 checksum of a file's contents.
///
/// Reads through a buffer so large files are never held in memory.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| Error::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:08x}", hasher.finalize()))
}
