//! Error taxonomy for the plane codec.
//!
//! Usage errors (bad parity string, bad config) and I/O errors are fatal for
//! the whole run.  Per-character transmission errors are NOT errors at this
//! level: they are recorded on the [`DecodeReport`](crate::codec::DecodeReport)
//! and decoding continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HammingError {
    #[error("Incorrect parity '{0}' entered! Either 'even' or 'odd', default is 'even' (case sensitive)")]
    InvalidParity(String),

    #[error("{what} exceeds the {limit}-byte bound ({actual} bytes read)")]
    SizeExceeded { what: &'static str, actual: usize, limit: usize },

    #[error("Nothing to process: {0}")]
    EmptyInput(&'static str),

    /// Plane 0 carries the only length signal; without it decode cannot start.
    #[error("Cannot read plane 0 at {}: {source}", path.display())]
    MissingPlane { path: PathBuf, source: io::Error },

    #[error("Cannot read plane file {}: {source}", path.display())]
    PlaneRead { path: PathBuf, source: io::Error },

    #[error("Cannot write plane file {}: {source}", path.display())]
    PlaneWrite { path: PathBuf, source: io::Error },

    #[error("Plane {index} holds {actual} bytes, plane 0 holds {expected}")]
    PlaneLength { index: usize, expected: usize, actual: usize },

    #[error("Config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HammingError>;
