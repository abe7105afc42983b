//! Filesystem checks for the observation dataset

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;

/// Every SQLite 3 database file starts with this header
const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Check that a path is a regular file carrying the SQLite 3 header.
pub fn is_sqlite_file(path: &str) -> bool {
    let path = Path::new(path);
    if !path.is_file() {
        return false;
    }

    let mut header = [0u8; 16];
    match File::open(path).and_then(|mut f| f.read_exact(&mut header)) {
        Ok(()) => &header == SQLITE_HEADER,
        Err(e) => {
            warn!("Failed to read header of {}: {}", path.display(), e);
            false
        }
    }
}
