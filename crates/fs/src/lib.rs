mod config;
mod hasher;
mod path;
mod probe;
mod timestamps;

pub use config::{HASH_CHUNK_SIZE, HASH_ERROR_MARKER, STAT_ERROR_MARKER};
pub use hasher::{Digests, Hashes, digest_file, digest_reader, hash_file};
pub use path::{PathKind, ResolvedPath, classify, display_name, file_size, resolve};
pub use probe::Probe;
pub use timestamps::{Timestamps, format_local, read_timestamps};
