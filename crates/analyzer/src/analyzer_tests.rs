use super::*;

use std::{fs, path::PathBuf};

use filemeta_fs::{HASH_ERROR_MARKER, Probe};
use serde_json::{Value, json};

use crate::{
    capability::Capability,
    detect::{FileType, SkipReason},
    exif_data::{ExifData, ExifReadError, RawTag, TagReader},
};

fn bare_analyzer() -> FileAnalyzer {
    FileAnalyzer::new(
        TypeDetector::new(Capability::Unavailable),
        ExifExtractor::new(Capability::Unavailable),
    )
}

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write fixture");
    path
}

fn sorted_keys(v: &Value) -> Vec<String> {
    let mut keys: Vec<String> = v.as_object().expect("object").keys().cloned().collect();
    keys.sort_unstable();
    keys
}

#[test]
fn missing_path_is_a_critical_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("ghost.dd");

    let rec = bare_analyzer().analyze(&missing);

    assert_eq!(
        serde_json::to_value(&rec).expect("serialize"),
        json!({
            "file_path": missing.to_string_lossy(),
            "file_name": "ghost.dd",
            "error": "File not found",
        })
    );
}

#[test]
fn directory_is_a_critical_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("case-files");
    fs::create_dir(&dir).expect("create dir");

    let rec = bare_analyzer().analyze(&dir);
    let json = serde_json::to_value(&rec).expect("serialize");

    assert_eq!(sorted_keys(&json), ["error", "file_name", "file_path"]);
    assert_eq!(json["error"], "Path is not a file");
    assert_eq!(json["file_name"], "case-files");
    assert_eq!(rec.critical_error(), Some(CriticalError::NotAFile));
}

#[test]
fn hello_text_file_full_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = write_file(&tmp, "hello.txt", b"hello");

    let rec = bare_analyzer().analyze(&file);
    let json = serde_json::to_value(&rec).expect("serialize");

    assert_eq!(
        json["file_path"],
        fs::canonicalize(&file)
            .expect("canonicalize")
            .to_string_lossy()
            .into_owned()
    );
    assert_eq!(json["file_name"], "hello.txt");
    assert_eq!(json["size_bytes"], 5);
    assert_eq!(json["hashes"]["md5"], "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(sorted_keys(&json["hashes"]), ["md5", "sha1", "sha256"]);
    assert_eq!(
        sorted_keys(&json["timestamps"]),
        ["accessed", "created_or_changed", "modified"]
    );
    assert!(json.get("exif_data").is_none());
    assert!(json.get("error").is_none());

    let analysis = rec.analysis().expect("full analysis");
    assert_eq!(analysis.file_type, FileType::Skipped(SkipReason::NotAvailable));
}

#[test]
fn empty_file_has_standard_empty_digests() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = write_file(&tmp, "empty.bin", b"");

    let rec = bare_analyzer().analyze(&file);
    let analysis = rec.analysis().expect("full analysis");

    assert_eq!(analysis.size_bytes, Probe::Ok(0));
    assert_eq!(
        analysis.hashes.md5,
        Probe::Ok("d41d8cd98f00b204e9800998ecf8427e".to_string())
    );
    assert_eq!(
        analysis.hashes.sha256,
        Probe::Ok("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string())
    );
    assert_ne!(analysis.hashes.sha1, Probe::Failed(HASH_ERROR_MARKER));
}

struct FailingReader;

impl TagReader for FailingReader {
    fn read_tags(&self, _path: &Path) -> Result<Vec<RawTag>, ExifReadError> {
        Err(ExifReadError::Parse {
            category: "InvalidFormat",
            detail: "Broken TIFF header".into(),
        })
    }
}

#[test]
fn exif_failure_does_not_disturb_other_fields() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = write_file(&tmp, "hello.txt", b"hello");

    let analyzer = FileAnalyzer::new(
        TypeDetector::new(Capability::Unavailable),
        ExifExtractor::new(Capability::Available(Box::new(FailingReader))),
    );
    let rec = analyzer.analyze(&file);
    let analysis = rec.analysis().expect("full analysis");

    assert_eq!(
        analysis.exif_data,
        Some(ExifData::Error("Could not process EXIF - InvalidFormat".into()))
    );
    assert_eq!(
        analysis.hashes.md5,
        Probe::Ok("5d41402abc4b2a76b9719d911017c592".to_string())
    );
    assert!(analysis.timestamps.modified.is_ok());
    assert_eq!(analysis.size_bytes, Probe::Ok(5));
}

#[cfg(all(feature = "sniff", feature = "exif"))]
mod builtin_backends {
    use super::*;

    use crate::{detect::FileFormatSniffer, exif_data::KamadakReader, fixtures};

    fn full_analyzer() -> FileAnalyzer {
        FileAnalyzer::new(
            TypeDetector::new(Capability::Available(Box::new(FileFormatSniffer))),
            ExifExtractor::new(Capability::Available(Box::new(KamadakReader))),
        )
    }

    #[test]
    fn text_file_has_no_exif_data() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file = write_file(&tmp, "hello.txt", b"hello");

        let json = serde_json::to_value(full_analyzer().analyze(&file)).expect("serialize");

        assert!(json.get("exif_data").is_none());
        assert_eq!(json["hashes"]["md5"], "5d41402abc4b2a76b9719d911017c592");
        let file_type = json["file_type"].as_str().expect("string");
        assert!(file_type.starts_with("text/plain ("), "{file_type}");
    }

    #[test]
    fn text_file_without_sniffer_still_has_no_exif_data() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file = write_file(&tmp, "hello.txt", b"hello");

        let analyzer = FileAnalyzer::new(
            TypeDetector::new(Capability::Unavailable),
            ExifExtractor::new(Capability::Available(Box::new(KamadakReader))),
        );
        let json = serde_json::to_value(analyzer.analyze(&file)).expect("serialize");

        assert!(json.get("exif_data").is_none(), "{json}");
        assert_eq!(json["size_bytes"], 5);
    }

    #[test]
    fn jpeg_with_exif_reports_tags() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file = write_file(&tmp, "camera.jpg", &fixtures::jpeg_with_make("Canon"));

        let json = serde_json::to_value(full_analyzer().analyze(&file)).expect("serialize");

        assert_eq!(json["exif_data"], json!({ "Image Make": "Canon" }));
        assert!(
            json["file_type"]
                .as_str()
                .expect("string")
                .starts_with("image/jpeg ("),
            "{}",
            json["file_type"]
        );
    }

    #[test]
    fn jpeg_with_corrupt_exif_reports_error_category() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let bytes = fixtures::jpeg_with_corrupt_exif();
        let file = write_file(&tmp, "broken.jpg", &bytes);

        let json = serde_json::to_value(full_analyzer().analyze(&file)).expect("serialize");

        assert_eq!(
            json["exif_data"],
            json!({ "error": "Could not process EXIF - InvalidFormat" })
        );
        assert_eq!(json["size_bytes"], bytes.len());
        for algo in ["md5", "sha1", "sha256"] {
            let digest = json["hashes"][algo].as_str().expect("digest");
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit()), "{algo}: {digest}");
        }
        assert_ne!(json["timestamps"]["modified"], "Error");
    }

    #[test]
    fn jpeg_without_exif_omits_field() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file = write_file(&tmp, "plain.jpg", &fixtures::jpeg_without_exif());

        let rec = full_analyzer().analyze(&file);

        assert_eq!(rec.analysis().expect("full analysis").exif_data, None);
    }
}
