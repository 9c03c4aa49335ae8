//! Process-level passes: one encode or one decode per invocation.
//!
//! ```no_run
//! use ascii_hamming::config::Settings;
//! use ascii_hamming::pipeline::{decode_from_files, encode_to_files, write_report};
//!
//! let settings = Settings::default();
//! encode_to_files(&settings, &b"Hello\n"[..])?;
//! let report = decode_from_files(&settings)?;
//! write_report(std::io::stdout().lock(), &report)?;
//! # Ok::<(), ascii_hamming::HammingError>(())
//! ```

use std::io::{self, Read, Write};

use serde::Serialize;

use crate::codec::{self, DecodeReport};
use crate::config::Settings;
use crate::error::{HammingError, Result};
use crate::plane::{plane_role, PackedPlanes, PLANE_COUNT};

/// Printed after the decoded text when any character was flagged.
pub const CORRUPTION_WARNING: &str = "This message might have been altered due to corrupted files.";

/// Bytes of each plane shown by [`inspect`].
const PREVIEW_BYTES: usize = 8;

// ── Encode ───────────────────────────────────────────────────────────────────

/// Read the message, dropping one trailing newline.
pub fn read_message<R: Read>(reader: R, max_input: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    // One extra byte for the newline, one more to detect overflow.
    reader.take((max_input as u64).saturating_add(2)).read_to_end(&mut buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.len() > max_input {
        return Err(HammingError::SizeExceeded {
            what:   "message",
            actual: buf.len(),
            limit:  max_input,
        });
    }
    if buf.is_empty() {
        return Err(HammingError::EmptyInput("no message on standard input"));
    }
    Ok(buf)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub chars:       usize,
    pub plane_bytes: usize,
}

pub fn encode_to_files<R: Read>(settings: &Settings, input: R) -> Result<EncodeSummary> {
    let message = read_message(input, settings.max_input)?;
    let planes = codec::encode(&message, settings.parity)?;
    settings.plane_files().write(&planes)?;
    Ok(EncodeSummary { chars: message.len(), plane_bytes: planes.byte_len() })
}

// ── Decode ───────────────────────────────────────────────────────────────────

pub fn decode_from_files(settings: &Settings) -> Result<DecodeReport> {
    let planes = settings.plane_files().read(settings.max_plane_bytes)?;
    codec::decode(&planes, settings.parity)
}

/// Emit the printable characters, then the warning line if anything was
/// flagged.
pub fn write_report<W: Write>(mut out: W, report: &DecodeReport) -> io::Result<()> {
    out.write_all(&report.printable())?;
    if report.has_flagged() {
        write!(out, "\n{}\n", CORRUPTION_WARNING)?;
    }
    out.flush()
}

// ── Inspect ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PlaneInfo {
    pub index:   usize,
    pub role:    String,
    pub path:    String,
    pub len:     Option<usize>,
    pub crc32:   Option<String>,
    pub preview: Option<String>,
    pub error:   Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaneSetInfo {
    pub prefix:      String,
    pub planes:      Vec<PlaneInfo>,
    /// All twelve planes readable and of equal length.
    pub uniform:     bool,
    pub message_len: Option<usize>,
    pub padding:     Option<usize>,
}

/// Describe a plane file set without decoding it.  Per-plane read failures
/// are recorded on the plane they concern.
pub fn inspect(settings: &Settings) -> PlaneSetInfo {
    let files = settings.plane_files();
    let mut planes = Vec::with_capacity(PLANE_COUNT);
    let mut contents: Vec<Option<Vec<u8>>> = Vec::with_capacity(PLANE_COUNT);

    for index in 0..PLANE_COUNT {
        let path = files.path(index).display().to_string();
        let role = plane_role(index);
        match files.read_plane(index, settings.max_plane_bytes) {
            Ok(bytes) => {
                planes.push(PlaneInfo {
                    index,
                    role,
                    path,
                    len:     Some(bytes.len()),
                    crc32:   Some(format!("{:08x}", crc32fast::hash(&bytes))),
                    preview: Some(hex::encode(&bytes[..bytes.len().min(PREVIEW_BYTES)])),
                    error:   None,
                });
                contents.push(Some(bytes));
            }
            Err(e) => {
                planes.push(PlaneInfo {
                    index, role, path,
                    len: None, crc32: None, preview: None,
                    error: Some(e.to_string()),
                });
                contents.push(None);
            }
        }
    }

    let lens: Vec<Option<usize>> = planes.iter().map(|p| p.len).collect();
    let uniform = lens.iter().all(|l| l.is_some() && *l == lens[0]);

    let packed = match contents.into_iter().collect::<Option<Vec<Vec<u8>>>>() {
        Some(all) => <[Vec<u8>; PLANE_COUNT]>::try_from(all)
            .ok()
            .and_then(|raw| PackedPlanes::new(raw).ok())
            .filter(|p| !p.is_empty()),
        None => None,
    };

    PlaneSetInfo {
        prefix:      files.prefix().to_owned(),
        planes,
        uniform,
        message_len: packed.as_ref().map(PackedPlanes::message_len),
        padding:     packed.as_ref().map(PackedPlanes::padding_slots),
    }
}
