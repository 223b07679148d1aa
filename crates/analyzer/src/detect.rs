use std::{io, path::Path};

use filemeta_fs::display_name;
use log::{error, warn};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{
    capability::{Capability, resolve_backend},
    config::{TYPE_ERROR_MARKER, TYPE_MISCONFIGURED_MARKER, TYPE_SKIPPED_MARKER},
};

/// What a sniffer found in a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sniffed {
    pub mime: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum SniffError {
    /// The backend exists but cannot work right now.
    #[error("sniffer backend unusable: {0}")]
    BackendUnusable(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Other(String),
}

/// Content-based file type detection.
pub trait ContentSniffer: Send + Sync {
    fn sniff(&self, path: &Path) -> Result<Sniffed, SniffError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAvailable,
    Misconfigured,
}

/// The `file_type` field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    Detected(Sniffed),
    Skipped(SkipReason),
    Failed,
}

impl FileType {
    pub fn render(&self) -> String {
        match self {
            FileType::Detected(s) => format!("{} ({})", s.mime, s.description),
            FileType::Skipped(SkipReason::NotAvailable) => TYPE_SKIPPED_MARKER.to_owned(),
            FileType::Skipped(SkipReason::Misconfigured) => TYPE_MISCONFIGURED_MARKER.to_owned(),
            FileType::Failed => TYPE_ERROR_MARKER.to_owned(),
        }
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

/// Why a bare MIME query produced nothing.
#[derive(Debug, Error)]
pub enum MimeUnavailable {
    #[error("content sniffer not available")]
    NoSniffer,
    #[error(transparent)]
    Sniff(#[from] SniffError),
}

pub struct TypeDetector {
    sniffer: Capability<Box<dyn ContentSniffer>>,
}

impl TypeDetector {
    pub fn new(sniffer: Capability<Box<dyn ContentSniffer>>) -> Self {
        Self { sniffer }
    }

    /// Detector backed by the builtin sniffer, subject to `FILEMETA_SNIFFER`.
    pub fn from_env() -> Self {
        let sniffer = resolve_backend(
            filemeta_runtime::SNIFFER_BACKEND_ENV,
            "sniffer",
            builtin_sniffer,
        );
        if let Capability::Misconfigured(reason) = &sniffer {
            warn!("{reason}; file type detection will be skipped");
        }
        Self::new(sniffer)
    }

    pub fn detect(&self, path: &Path) -> FileType {
        let sniffer = match &self.sniffer {
            Capability::Available(s) => s,
            Capability::Unavailable => return FileType::Skipped(SkipReason::NotAvailable),
            Capability::Misconfigured(reason) => {
                warn!(
                    "file type detection skipped for '{}': {reason}",
                    display_name(path)
                );
                return FileType::Skipped(SkipReason::Misconfigured);
            }
        };

        match sniffer.sniff(path) {
            Ok(sniffed) => FileType::Detected(sniffed),
            Err(SniffError::BackendUnusable(reason)) => {
                warn!(
                    "file type detection skipped for '{}': {reason}",
                    display_name(path)
                );
                FileType::Skipped(SkipReason::Misconfigured)
            }
            Err(e) => {
                error!("error detecting file type for '{}': {e}", display_name(path));
                FileType::Failed
            }
        }
    }

    /// MIME type alone, for callers that only gate on it.
    pub fn mime(&self, path: &Path) -> Result<String, MimeUnavailable> {
        match &self.sniffer {
            Capability::Available(s) => Ok(s.sniff(path)?.mime),
            _ => Err(MimeUnavailable::NoSniffer),
        }
    }
}

#[cfg(feature = "sniff")]
mod file_format_backend {
    use std::path::Path;

    use file_format::FileFormat;

    use super::{ContentSniffer, SniffError, Sniffed};

    /// Signature-based sniffing with the `file-format` crate.
    pub struct FileFormatSniffer;

    impl ContentSniffer for FileFormatSniffer {
        fn sniff(&self, path: &Path) -> Result<Sniffed, SniffError> {
            let format = FileFormat::from_file(path)?;
            Ok(Sniffed {
                mime: format.media_type().to_owned(),
                description: format.name().to_owned(),
            })
        }
    }
}

#[cfg(feature = "sniff")]
pub use file_format_backend::FileFormatSniffer;

#[cfg(feature = "sniff")]
fn builtin_sniffer() -> Option<Box<dyn ContentSniffer>> {
    Some(Box::new(FileFormatSniffer))
}

#[cfg(not(feature = "sniff"))]
fn builtin_sniffer() -> Option<Box<dyn ContentSniffer>> {
    None
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
