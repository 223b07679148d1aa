use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::warn;

use crate::{config::STAT_ERROR_MARKER, probe::Probe};

/// An input path made absolute, plus the name reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing (reachable) at this path.
    Missing,
    /// Exists, but is a directory, socket, device, ...
    NotAFile,
    RegularFile,
}

/// Resolve a caller-supplied path.
///
/// Existing paths are canonicalized (symlinks followed); missing ones are
/// only made absolute against the working directory.
pub fn resolve(input: &Path) -> ResolvedPath {
    let absolute = if input.as_os_str().is_empty() {
        env::current_dir()
    } else {
        std::path::absolute(input)
    }
    .unwrap_or_else(|_| input.to_path_buf());

    match fs::canonicalize(&absolute) {
        Ok(canonical) => ResolvedPath {
            name: display_name(&canonical),
            path: canonical,
        },
        Err(_) => ResolvedPath {
            name: display_name(input),
            path: absolute,
        },
    }
}

/// Final component of `path`, or an empty string for roots.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn classify(path: &Path) -> PathKind {
    // An unreadable parent is indistinguishable from a missing file here.
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => PathKind::RegularFile,
        Ok(_) => PathKind::NotAFile,
        Err(_) => PathKind::Missing,
    }
}

pub fn file_size(path: &Path) -> Probe<u64> {
    match fs::metadata(path) {
        Ok(meta) => Probe::Ok(meta.len()),
        Err(e) => {
            warn!("could not get size for '{}': {e}", display_name(path));
            Probe::Failed(STAT_ERROR_MARKER)
        }
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
