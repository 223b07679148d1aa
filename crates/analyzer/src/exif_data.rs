//! EXIF extraction for JPEG and TIFF files.
//!
//! Extraction is gated twice: the parser has to be available, and the
//! detected MIME type (when there is one) has to look like an image format
//! that carries EXIF. Every way of ending up with nothing to report is kept
//! apart in [`NotApplicable`] even though the record treats them alike.

use std::{collections::BTreeMap, io, path::Path};

use filemeta_fs::display_name;
use log::{debug, error, warn};
use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

use crate::{
    capability::{Capability, resolve_backend},
    config::{
        EXCLUDED_EXIF_TAGS, EXIF_MIME_HINTS, EXIF_TRUNCATION_SUFFIX, EXIF_VALUE_DECODE_ERROR,
        EXIF_VALUE_MAX_CHARS, EXIF_VANISHED_MESSAGE,
    },
    detect::TypeDetector,
};

/// A tag whose printable value could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDecodeError;

/// One tag as reported by a parser, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub key: String,
    pub value: Result<String, TagDecodeError>,
}

#[derive(Debug, Error)]
pub enum ExifReadError {
    #[error("no EXIF data present")]
    NoExif,
    #[error("file not found at read time")]
    Vanished,
    #[error("{category}: {detail}")]
    Parse {
        category: &'static str,
        detail: String,
    },
}

impl ExifReadError {
    pub fn from_io(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            ExifReadError::Vanished
        } else {
            ExifReadError::Parse {
                category: "Io",
                detail: e.to_string(),
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            ExifReadError::Vanished => EXIF_VANISHED_MESSAGE.to_owned(),
            ExifReadError::Parse { category, .. } => format!("Could not process EXIF - {category}"),
            ExifReadError::NoExif => "Could not process EXIF - NoExif".to_owned(),
        }
    }
}

/// Reads every EXIF tag of a file.
pub trait TagReader: Send + Sync {
    fn read_tags(&self, path: &Path) -> Result<Vec<RawTag>, ExifReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotApplicable {
    CapabilityMissing,
    /// Pre-filter rejected the file; carries the detected MIME type.
    NotAnImage(String),
    NoTags,
    AllFiltered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExifOutcome {
    NotApplicable(NotApplicable),
    Tags(BTreeMap<String, String>),
    Failed(String),
}

impl ExifOutcome {
    /// What ends up in `exif_data`, if anything.
    pub fn into_field(self) -> Option<ExifData> {
        match self {
            ExifOutcome::NotApplicable(_) => None,
            ExifOutcome::Tags(tags) => Some(ExifData::Tags(tags)),
            ExifOutcome::Failed(message) => Some(ExifData::Error(message)),
        }
    }
}

/// The `exif_data` field: tag values, or a single `error` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExifData {
    Tags(BTreeMap<String, String>),
    Error(String),
}

impl Serialize for ExifData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExifData::Tags(tags) => tags.serialize(serializer),
            ExifData::Error(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

pub fn is_excluded(key: &str) -> bool {
    EXCLUDED_EXIF_TAGS.contains(&key)
}

/// Cut `value` to the printable limit, counting characters.
pub fn truncate_value(value: String) -> String {
    match value.char_indices().nth(EXIF_VALUE_MAX_CHARS) {
        Some((cut, _)) => {
            let mut short = value[..cut].to_owned();
            short.push_str(EXIF_TRUNCATION_SUFFIX);
            short
        }
        None => value,
    }
}

fn mime_may_carry_exif(mime: &str) -> bool {
    let mime = mime.to_ascii_lowercase();
    EXIF_MIME_HINTS.iter().any(|hint| mime.contains(hint))
}

pub struct ExifExtractor {
    reader: Capability<Box<dyn TagReader>>,
}

impl ExifExtractor {
    pub fn new(reader: Capability<Box<dyn TagReader>>) -> Self {
        Self { reader }
    }

    /// Extractor backed by the builtin parser, subject to `FILEMETA_EXIF`.
    pub fn from_env() -> Self {
        let reader = resolve_backend(filemeta_runtime::EXIF_BACKEND_ENV, "exif", builtin_reader);
        if let Capability::Misconfigured(reason) = &reader {
            warn!("{reason}; EXIF extraction disabled");
        }
        Self::new(reader)
    }

    pub fn extract(&self, path: &Path, detector: &TypeDetector) -> ExifOutcome {
        let Capability::Available(reader) = &self.reader else {
            return ExifOutcome::NotApplicable(NotApplicable::CapabilityMissing);
        };

        // A failed MIME query does not block extraction; the parser decides.
        match detector.mime(path) {
            Ok(mime) if !mime_may_carry_exif(&mime) => {
                return ExifOutcome::NotApplicable(NotApplicable::NotAnImage(mime));
            }
            Ok(_) => {}
            Err(e) => debug!("EXIF pre-filter skipped for '{}': {e}", display_name(path)),
        }

        let tags = match reader.read_tags(path) {
            Ok(tags) if tags.is_empty() => {
                return ExifOutcome::NotApplicable(NotApplicable::NoTags);
            }
            Ok(tags) => tags,
            Err(ExifReadError::NoExif) => {
                return ExifOutcome::NotApplicable(NotApplicable::NoTags);
            }
            Err(e) => {
                error!("error processing EXIF for '{}': {e}", display_name(path));
                return ExifOutcome::Failed(e.describe());
            }
        };

        let kept: BTreeMap<String, String> = tags
            .into_iter()
            .filter(|tag| !is_excluded(&tag.key))
            .map(|tag| {
                let value = match tag.value {
                    Ok(v) => truncate_value(v),
                    Err(TagDecodeError) => EXIF_VALUE_DECODE_ERROR.to_owned(),
                };
                (tag.key, value)
            })
            .collect();

        if kept.is_empty() {
            ExifOutcome::NotApplicable(NotApplicable::AllFiltered)
        } else {
            ExifOutcome::Tags(kept)
        }
    }
}

#[cfg(feature = "exif")]
mod kamadak_backend {
    use std::{
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    };

    use exif::{Context, Exif, Field, In, Tag, Value};

    use super::{ExifReadError, RawTag, TagDecodeError, TagReader};

    const PADDING_TAG: u16 = 0xEA1C;

    /// EXIF parsing with `kamadak-exif`, naming tags `"<IFD> <Tag>"`.
    pub struct KamadakReader;

    impl TagReader for KamadakReader {
        fn read_tags(&self, path: &Path) -> Result<Vec<RawTag>, ExifReadError> {
            let file = File::open(path).map_err(ExifReadError::from_io)?;
            let mut reader = BufReader::new(file);

            // Anything kamadak cannot open as a container simply has no EXIF.
            let head = reader.fill_buf().map_err(ExifReadError::from_io)?;
            if !is_exif_container(head) {
                return Err(ExifReadError::NoExif);
            }

            let exif = exif::Reader::new()
                .read_from_container(&mut reader)
                .map_err(read_error)?;

            Ok(exif
                .fields()
                .map(|field| RawTag {
                    key: tag_key(field),
                    value: printable(field, &exif),
                })
                .collect())
        }
    }

    /// Signatures of the containers kamadak can read EXIF from.
    pub(super) fn is_exif_container(head: &[u8]) -> bool {
        let jpeg = head.starts_with(&[0xFF, 0xD8]);
        let tiff = head.starts_with(b"II*\0") || head.starts_with(b"MM\0*");
        let png = head.starts_with(b"\x89PNG\r\n\x1a\n");
        let webp = head.starts_with(b"RIFF") && head.get(8..12) == Some(b"WEBP".as_slice());
        let heif = head.get(4..8) == Some(b"ftyp".as_slice());
        jpeg || tiff || png || webp || heif
    }

    fn read_error(e: exif::Error) -> ExifReadError {
        let (category, detail) = match e {
            exif::Error::NotFound(_) => return ExifReadError::NoExif,
            exif::Error::Io(io) => return ExifReadError::from_io(io),
            exif::Error::InvalidFormat(d) => ("InvalidFormat", d.to_owned()),
            exif::Error::NotSupported(d) => ("NotSupported", d.to_owned()),
            exif::Error::TooBig(d) => ("TooBig", d.to_owned()),
            exif::Error::BlankValue(d) => ("BlankValue", d.to_owned()),
            exif::Error::UnexpectedValue(d) => ("UnexpectedValue", d.to_owned()),
            other => ("ExifError", other.to_string()),
        };
        ExifReadError::Parse { category, detail }
    }

    pub(super) fn ifd_prefix(context: Context, ifd: In) -> String {
        match context {
            Context::Exif => "EXIF".to_owned(),
            Context::Gps => "GPS".to_owned(),
            Context::Interop => "Interoperability".to_owned(),
            _ if ifd == In::PRIMARY => "Image".to_owned(),
            _ if ifd == In::THUMBNAIL => "Thumbnail".to_owned(),
            _ => format!("IFD{}", ifd.index()),
        }
    }

    pub(super) fn tag_name(tag: Tag) -> String {
        if tag.description().is_some() {
            tag.to_string()
        } else if tag.number() == PADDING_TAG {
            "Padding".to_owned()
        } else {
            format!("Tag 0x{:04X}", tag.number())
        }
    }

    fn tag_key(field: &Field) -> String {
        format!(
            "{} {}",
            ifd_prefix(field.tag.context(), field.ifd_num),
            tag_name(field.tag)
        )
    }

    fn printable(field: &Field, exif: &Exif) -> Result<String, TagDecodeError> {
        match &field.value {
            Value::Unknown(..) => Err(TagDecodeError),
            // Plain text without the quoting kamadak adds for display.
            Value::Ascii(parts) => {
                let parts = parts
                    .iter()
                    .map(|p| std::str::from_utf8(p).map_err(|_| TagDecodeError))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join(", "))
            }
            _ => Ok(field.display_value().with_unit(exif).to_string()),
        }
    }
}

#[cfg(feature = "exif")]
pub use kamadak_backend::KamadakReader;

#[cfg(feature = "exif")]
fn builtin_reader() -> Option<Box<dyn TagReader>> {
    Some(Box::new(KamadakReader))
}

#[cfg(not(feature = "exif"))]
fn builtin_reader() -> Option<Box<dyn TagReader>> {
    None
}

#[cfg(test)]
#[path = "exif_data_tests.rs"]
mod tests;
