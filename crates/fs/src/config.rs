/// Read size for a single hashing pass.
pub const HASH_CHUNK_SIZE: usize = 8 * 1024;

/// Marker reported for every digest when the file could not be read.
pub const HASH_ERROR_MARKER: &str = "Error: Hashing failed";

/// Marker for a failed stat, also used for `size_bytes`.
pub const STAT_ERROR_MARKER: &str = "Error";
