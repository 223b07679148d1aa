//! Hand-built image files for tests.

/// Wrap an APP1 payload in a minimal JPEG.
fn jpeg_with_app1(payload: &[u8]) -> Vec<u8> {
    let len = u16::try_from(payload.len() + 2).expect("APP1 payload fits a segment");
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// JPEG whose primary IFD holds a single `Make` tag.
pub fn jpeg_with_make(make: &str) -> Vec<u8> {
    assert!(make.len() >= 4, "short values would be stored inline");

    const VALUE_OFFSET: u32 = 8 + 2 + 12 + 4;
    let count = u32::try_from(make.len() + 1).expect("small value");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0");
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x010Fu16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&count.to_le_bytes());
    tiff.extend_from_slice(&VALUE_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(make.as_bytes());
    tiff.push(0);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    jpeg_with_app1(&payload)
}

/// JPEG with an `Exif` APP1 segment whose TIFF header is garbage.
pub fn jpeg_with_corrupt_exif() -> Vec<u8> {
    jpeg_with_app1(b"Exif\0\0XXXXXXXXXXXX")
}

/// JPEG with a JFIF segment and no EXIF at all.
pub fn jpeg_without_exif() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}
