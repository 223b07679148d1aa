use std::{
    fs::File,
    io::{self, ErrorKind, Read},
    path::Path,
};

use log::warn;
use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::{
    config::{HASH_CHUNK_SIZE, HASH_ERROR_MARKER},
    path::display_name,
    probe::Probe,
};

/// Lowercase hex digests of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

/// The `hashes` mapping of a record. Always exactly three keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hashes {
    pub md5: Probe<String>,
    pub sha1: Probe<String>,
    pub sha256: Probe<String>,
}

impl Hashes {
    fn failed() -> Self {
        Self {
            md5: Probe::Failed(HASH_ERROR_MARKER),
            sha1: Probe::Failed(HASH_ERROR_MARKER),
            sha256: Probe::Failed(HASH_ERROR_MARKER),
        }
    }
}

impl From<Digests> for Hashes {
    fn from(d: Digests) -> Self {
        Self {
            md5: Probe::Ok(d.md5),
            sha1: Probe::Ok(d.sha1),
            sha256: Probe::Ok(d.sha256),
        }
    }
}

/// Feed `reader` through all three digests in a single pass.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<Digests> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();
    let mut sha256 = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buf[..n];
        md5.update(chunk);
        sha1.update(chunk);
        sha256.update(chunk);
    }

    Ok(Digests {
        md5: hex::encode(md5.finalize()),
        sha1: hex::encode(sha1.finalize()),
        sha256: hex::encode(sha256.finalize()),
    })
}

pub fn digest_file(path: &Path) -> io::Result<Digests> {
    let file = File::open(path)?;
    digest_reader(file)
}

/// Hash a file; any I/O failure marks all three digests.
pub fn hash_file(path: &Path) -> Hashes {
    match digest_file(path) {
        Ok(digests) => digests.into(),
        Err(e) => {
            warn!("error hashing file '{}': {e}", display_name(path));
            Hashes::failed()
        }
    }
}

#[cfg(test)]
#[path = "hasher_tests.rs"]
mod tests;
