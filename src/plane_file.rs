//! The persisted form of a message: twelve files `<prefix>_<index>.hamming`.
//!
//! Files are always written and read as a whole set.  Plane 0's byte length
//! is the only length signal the decoder has, so a missing plane 0 is
//! reported separately from the other planes.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{HammingError, Result};
use crate::plane::{PackedPlanes, PLANE_COUNT};

pub const PLANE_EXTENSION: &str = "hamming";
/// Default upper bound on a single plane file, in bytes.
pub const DEFAULT_MAX_PLANE_BYTES: usize = 4196;

/// Owner read/write only.
#[cfg(unix)]
const PLANE_FILE_MODE: u32 = 0o600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneFileSet {
    prefix: String,
}

impl PlaneFileSet {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str { &self.prefix }

    pub fn path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}_{index}.{PLANE_EXTENSION}", self.prefix))
    }

    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..PLANE_COUNT).map(|index| self.path(index))
    }

    // ── Write ─────────────────────────────────────────────────────────────────

    /// Create or truncate all twelve files.  Stops at the first failure.
    pub fn write(&self, planes: &PackedPlanes) -> Result<()> {
        for (index, bytes) in planes.iter() {
            let path = self.path(index);
            create_plane(&path)
                .and_then(|mut f| f.write_all(bytes))
                .map_err(|source| HammingError::PlaneWrite { path: path.clone(), source })?;
            log::debug!("wrote plane {index}: {} ({} B)", path.display(), bytes.len());
        }
        Ok(())
    }

    // ── Read ──────────────────────────────────────────────────────────────────

    /// Read one plane file, failing if it is larger than `max_bytes`.
    pub fn read_plane(&self, index: usize, max_bytes: usize) -> Result<Vec<u8>> {
        let path = self.path(index);
        let bytes = read_bounded(&path, max_bytes).map_err(|source| match index {
            0 => HammingError::MissingPlane { path: path.clone(), source },
            _ => HammingError::PlaneRead { path: path.clone(), source },
        })?;
        if bytes.len() > max_bytes {
            return Err(HammingError::SizeExceeded {
                what:   "plane file",
                actual: bytes.len(),
                limit:  max_bytes,
            });
        }
        log::trace!("read plane {index}: {} ({} B)", path.display(), bytes.len());
        Ok(bytes)
    }

    /// Read the whole set.  Plane 0 must be non-empty and no other plane may
    /// be shorter than it.
    pub fn read(&self, max_plane_bytes: usize) -> Result<PackedPlanes> {
        let mut planes: [Vec<u8>; PLANE_COUNT] = Default::default();
        for (index, plane) in planes.iter_mut().enumerate() {
            *plane = self.read_plane(index, max_plane_bytes)?;
            if index == 0 && plane.is_empty() {
                return Err(HammingError::EmptyInput("plane 0 is empty"));
            }
        }
        PackedPlanes::new(planes)
    }
}

fn create_plane(path: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(PLANE_FILE_MODE);
    }
    opts.open(path)
}

/// Reads at most `max_bytes + 1` so an oversized file is detectable without
/// pulling it all into memory.
fn read_bounded(path: &Path, max_bytes: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    File::open(path)?
        .take((max_bytes as u64).saturating_add(1))
        .read_to_end(&mut buf)?;
    Ok(buf)
}
