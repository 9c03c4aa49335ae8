//! Whole-message encode and decode passes over in-memory planes.
//!
//! ```
//! use ascii_hamming::codec::{decode, encode};
//! use ascii_hamming::ParityMode;
//!
//! let planes = encode(b"Hello", ParityMode::Odd)?;
//! let report = decode(&planes, ParityMode::Odd)?;
//! assert_eq!(report.text(), "Hello");
//! assert!(!report.has_flagged());
//! # Ok::<(), ascii_hamming::HammingError>(())
//! ```

use crate::error::{HammingError, Result};
use crate::hamming::{Outcome, ParityMode};
use crate::plane::{pack, unpack, PackedPlanes, PlaneBits, Unpacked};

/// Printable ASCII as `isprint` defines it in the C locale.
#[inline]
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

// ── Encode ───────────────────────────────────────────────────────────────────

pub fn encode(message: &[u8], mode: ParityMode) -> Result<PackedPlanes> {
    if message.is_empty() {
        return Err(HammingError::EmptyInput("message is empty"));
    }
    let planes = pack(&PlaneBits::from_message(message, mode));
    log::debug!("encoded {} chars into 12 planes of {} B ({mode} parity)",
        message.len(), planes.byte_len());
    Ok(planes)
}

// ── Decode ───────────────────────────────────────────────────────────────────

/// Result of a decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Every decoded character, printable or not, after correction.
    pub bytes:     Vec<u8>,
    /// Characters repaired through the pair table.
    pub corrected: usize,
    /// Characters left uncorrected because 1, 3 or 4 checks failed.
    pub flagged:   usize,
    /// Padding slots skipped at the end of the final byte.
    pub padding:   usize,
}

impl DecodeReport {
    pub fn has_flagged(&self) -> bool { self.flagged > 0 }

    pub fn printable(&self) -> Vec<u8> {
        self.bytes.iter().copied().filter(|&b| is_printable(b)).collect()
    }

    pub fn text(&self) -> String {
        // Printable ASCII is always valid UTF-8.
        String::from_utf8_lossy(&self.printable()).into_owned()
    }
}

pub fn decode(planes: &PackedPlanes, mode: ParityMode) -> Result<DecodeReport> {
    if planes.is_empty() {
        return Err(HammingError::EmptyInput("plane set is empty"));
    }

    let Unpacked { codewords, padding } = unpack(planes);
    let mut report = DecodeReport {
        bytes: Vec::with_capacity(codewords.len()),
        padding,
        ..DecodeReport::default()
    };

    for (i, cw) in codewords.iter().enumerate() {
        let fix = cw.correct(mode);
        match fix.outcome {
            Outcome::Clean => {}
            Outcome::Corrected { bit } => {
                report.corrected += 1;
                log::debug!("char {i}: checks {} failed, flipped b{bit}", fix.syndrome);
            }
            Outcome::Flagged => {
                report.flagged += 1;
                log::warn!("char {i}: checks {} failed, left uncorrected", fix.syndrome);
            }
        }
        report.bytes.push(fix.byte());
    }

    log::debug!("decoded {} chars, {padding} padding slots", report.bytes.len());
    Ok(report)
}
