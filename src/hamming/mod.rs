//! Parity computation for the 12-bit per-character codeword.
//!
//! # Coverage table
//! Four checks, named after the classic Hamming positions they replace, each
//! cover a fixed subset of the 8 data bits (b0 = MSB):
//!
//! | Check | Data bits covered   | Mask   |
//! |-------|---------------------|--------|
//! | p1    | b0 b1 b3 b4 b6      | `0xDA` |
//! | p2    | b0 b2 b3 b5 b6      | `0xB6` |
//! | p4    | b1 b2 b3 b7         | `0x71` |
//! | p8    | b4 b5 b6 b7         | `0x0F` |
//!
//! This is NOT the canonical Hamming(12,8) layout.  Plane files written by
//! any encoder must be decoded with exactly this table, so it is frozen.
//!
//! # Parity modes
//! EVEN emits each check's sum bit as is; ODD emits its inverse.  The mode is
//! not recorded in the plane files: decoding with the other mode miscomputes
//! every syndrome and nothing detects it.

use std::fmt;
use std::str::FromStr;

use crate::bits::{msb_mask, BitVector, BITS_PER_BYTE};
use crate::error::HammingError;

pub mod syndrome;

pub use syndrome::{correct, Correction, Outcome, Syndrome};

/// Parity bits per character.
pub const PARITY_BITS:   usize = 4;
/// Data + parity bits per character; also the number of planes.
pub const CODEWORD_BITS: usize = BITS_PER_BYTE + PARITY_BITS;

// ── ParityMode ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ParityMode {
    #[default]
    Even,
    Odd,
}

impl ParityMode {
    pub fn name(self) -> &'static str {
        match self {
            ParityMode::Even => "even",
            ParityMode::Odd  => "odd",
        }
    }

    /// `(sum + parity bit) mod 2` of a check on an undamaged codeword.
    #[inline]
    pub fn expected_check(self) -> u8 {
        match self {
            ParityMode::Even => 0,
            ParityMode::Odd  => 1,
        }
    }

    /// Turn a raw sum bit into the parity bit emitted under this mode.
    #[inline]
    fn emit(self, sum: u8) -> u8 {
        sum ^ self.expected_check()
    }
}

/// Case-sensitive: only `"even"` and `"odd"` are accepted.
impl FromStr for ParityMode {
    type Err = HammingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even" => Ok(ParityMode::Even),
            "odd"  => Ok(ParityMode::Odd),
            other  => Err(HammingError::InvalidParity(other.to_owned())),
        }
    }
}

impl fmt::Display for ParityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Check ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    P1,
    P2,
    P4,
    P8,
}

impl Check {
    /// All checks in quad order.
    pub const ALL: [Check; PARITY_BITS] = [Check::P1, Check::P2, Check::P4, Check::P8];

    /// Check identifier; also its bit in a [`Syndrome`].
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            Check::P1 => 1,
            Check::P2 => 2,
            Check::P4 => 4,
            Check::P8 => 8,
        }
    }

    /// Position of this check's bit inside a [`HammingQuad`].
    #[inline]
    pub fn quad_index(self) -> usize {
        match self {
            Check::P1 => 0,
            Check::P2 => 1,
            Check::P4 => 2,
            Check::P8 => 3,
        }
    }

    /// Covered data bits as a byte mask (MSB = b0).
    #[inline]
    pub fn mask(self) -> u8 {
        match self {
            Check::P1 => 0xDA,
            Check::P2 => 0xB6,
            Check::P4 => 0x71,
            Check::P8 => 0x0F,
        }
    }

    #[inline]
    pub fn covers(self, bit: usize) -> bool {
        self.mask() & msb_mask(bit) != 0
    }

    /// Sum mod 2 of the covered data bits.
    #[inline]
    pub fn sum(self, bits: &BitVector) -> u8 {
        ((bits.to_byte() & self.mask()).count_ones() & 1) as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Check::P1 => "p1",
            Check::P2 => "p2",
            Check::P4 => "p4",
            Check::P8 => "p8",
        }
    }
}

// ── HammingQuad ──────────────────────────────────────────────────────────────

/// Four parity bits in the order `[p1, p2, p4, p8]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct HammingQuad(pub [u8; PARITY_BITS]);

impl HammingQuad {
    #[inline]
    pub fn bit(&self, check: Check) -> u8 { self.0[check.quad_index()] }

    #[inline]
    pub fn flip(&mut self, i: usize) { self.0[i] ^= 1; }
}

/// Compute the parity quad of one character.
pub fn parity_of(bits: &BitVector, mode: ParityMode) -> HammingQuad {
    let mut quad = [0u8; PARITY_BITS];
    for check in Check::ALL {
        quad[check.quad_index()] = mode.emit(check.sum(bits));
    }
    HammingQuad(quad)
}

// ── Codeword ─────────────────────────────────────────────────────────────────

/// One character's 12 transmitted bits, addressed by plane index:
/// planes 0–7 are data bits b0–b7, planes 8–11 are p1, p2, p4, p8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Codeword {
    pub data:   BitVector,
    pub parity: HammingQuad,
}

impl Codeword {
    pub fn encode(byte: u8, mode: ParityMode) -> Self {
        let data = BitVector::from_byte(byte);
        Self { data, parity: parity_of(&data, mode) }
    }

    #[inline]
    pub fn bit(&self, plane: usize) -> u8 {
        if plane < BITS_PER_BYTE {
            self.data.bit(plane)
        } else {
            self.parity.0[plane - BITS_PER_BYTE]
        }
    }

    #[inline]
    pub fn set_bit(&mut self, plane: usize, bit: u8) {
        if plane < BITS_PER_BYTE {
            self.data.set(plane, bit);
        } else {
            self.parity.0[plane - BITS_PER_BYTE] = bit & 1;
        }
    }

    /// True when all 12 bits are zero, i.e. indistinguishable from padding.
    pub fn is_blank(&self) -> bool {
        (0..CODEWORD_BITS).all(|plane| self.bit(plane) == 0)
    }

    pub fn correct(&self, mode: ParityMode) -> Correction {
        correct(self.data, self.parity, mode)
    }
}
