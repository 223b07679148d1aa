use std::path::Path;

use filemeta_fs::{PathKind, classify, file_size, hash_file, read_timestamps, resolve};
use log::{debug, error};

use crate::{
    detect::TypeDetector,
    exif_data::ExifExtractor,
    record::{Analysis, CriticalError, FileRecord},
};

/// Runs every extraction step for a single file.
///
/// Each step turns its own failures into markers, so a record is always
/// produced and one failing step never hides the others.
pub struct FileAnalyzer {
    detector: TypeDetector,
    exif: ExifExtractor,
}

impl FileAnalyzer {
    pub fn new(detector: TypeDetector, exif: ExifExtractor) -> Self {
        Self { detector, exif }
    }

    /// Resolve both optional backends from the environment, once.
    pub fn from_env() -> Self {
        Self::new(TypeDetector::from_env(), ExifExtractor::from_env())
    }

    pub fn analyze(&self, input: &Path) -> FileRecord {
        let resolved = resolve(input);
        let file_path = resolved.path.to_string_lossy().into_owned();

        match classify(&resolved.path) {
            PathKind::Missing => {
                error!("file path does not exist: {file_path}");
                return FileRecord::critical(file_path, resolved.name, CriticalError::NotFound);
            }
            PathKind::NotAFile => {
                error!("path is not a file: {file_path}");
                return FileRecord::critical(file_path, resolved.name, CriticalError::NotAFile);
            }
            PathKind::RegularFile => {}
        }

        debug!("analyzing {file_path}");
        let path = resolved.path.as_path();

        let analysis = Analysis {
            size_bytes: file_size(path),
            file_type: self.detector.detect(path),
            timestamps: read_timestamps(path),
            hashes: hash_file(path),
            exif_data: self.exif.extract(path, &self.detector).into_field(),
        };

        FileRecord::analyzed(file_path, resolved.name, analysis)
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
