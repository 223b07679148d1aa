pub const TYPE_SKIPPED_MARKER: &str = "Detection Skipped (content sniffer not available)";
pub const TYPE_MISCONFIGURED_MARKER: &str =
    "Detection Skipped (content sniffer missing/misconfigured)";
pub const TYPE_ERROR_MARKER: &str = "Error: Type detection failed";

/// Longest EXIF printable value kept verbatim, in characters.
pub const EXIF_VALUE_MAX_CHARS: usize = 150;
pub const EXIF_TRUNCATION_SUFFIX: &str = "...";
pub const EXIF_VALUE_DECODE_ERROR: &str = "[Value Decode Error]";
pub const EXIF_VANISHED_MESSAGE: &str = "File not found during EXIF read";

/// MIME fragments that make a file worth handing to the EXIF parser.
pub const EXIF_MIME_HINTS: &[&str] = &["jpeg", "tiff"];

/// Tags that are binary blobs, padding, or echo the file name.
pub const EXCLUDED_EXIF_TAGS: &[&str] = &[
    "JPEGThumbnail",
    "TIFFThumbnail",
    "Filename",
    "EXIF MakerNote",
    "InteroperabilityThumbnail",
    "Padding",
    "Image Padding",
    "EXIF Padding",
];
