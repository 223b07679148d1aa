use filemeta_fs::{Hashes, Probe, Timestamps};
use serde::{Serialize, Serializer};

use crate::{detect::FileType, exif_data::ExifData};

/// Result for one input path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub file_path: String,
    pub file_name: String,
    #[serde(flatten)]
    pub body: RecordBody,
}

/// Either a critical failure or a full analysis, never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordBody {
    Critical { error: CriticalError },
    Analyzed(Box<Analysis>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalError {
    NotFound,
    NotAFile,
}

impl CriticalError {
    pub fn message(self) -> &'static str {
        match self {
            CriticalError::NotFound => "File not found",
            CriticalError::NotAFile => "Path is not a file",
        }
    }
}

impl Serialize for CriticalError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub size_bytes: Probe<u64>,
    pub file_type: FileType,
    pub timestamps: Timestamps,
    pub hashes: Hashes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif_data: Option<ExifData>,
}

impl FileRecord {
    pub fn critical(file_path: String, file_name: String, error: CriticalError) -> Self {
        Self {
            file_path,
            file_name,
            body: RecordBody::Critical { error },
        }
    }

    pub fn analyzed(file_path: String, file_name: String, analysis: Analysis) -> Self {
        Self {
            file_path,
            file_name,
            body: RecordBody::Analyzed(Box::new(analysis)),
        }
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.body {
            RecordBody::Analyzed(a) => Some(a),
            RecordBody::Critical { .. } => None,
        }
    }

    pub fn critical_error(&self) -> Option<CriticalError> {
        match self.body {
            RecordBody::Critical { error } => Some(error),
            RecordBody::Analyzed(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
