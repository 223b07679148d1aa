mod analyzer;
mod batch;
mod capability;
mod config;
mod detect;
mod exif_data;
mod record;

#[cfg(test)]
mod fixtures;

pub use analyzer::FileAnalyzer;
pub use batch::run_batch;
pub use capability::{Capability, resolve_backend};
pub use config::{
    EXCLUDED_EXIF_TAGS, EXIF_VALUE_DECODE_ERROR, EXIF_VALUE_MAX_CHARS, TYPE_ERROR_MARKER,
    TYPE_MISCONFIGURED_MARKER, TYPE_SKIPPED_MARKER,
};
#[cfg(feature = "sniff")]
pub use detect::FileFormatSniffer;
pub use detect::{
    ContentSniffer, FileType, MimeUnavailable, SkipReason, SniffError, Sniffed, TypeDetector,
};
#[cfg(feature = "exif")]
pub use exif_data::KamadakReader;
pub use exif_data::{
    ExifData, ExifExtractor, ExifOutcome, ExifReadError, NotApplicable, RawTag, TagDecodeError,
    TagReader, is_excluded, truncate_value,
};
pub use record::{Analysis, CriticalError, FileRecord, RecordBody};
