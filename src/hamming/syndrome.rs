//! Syndrome evaluation and single-position correction.
//!
//! A check fails when `(sum + received parity bit) mod 2` differs from the
//! mode's expected value.  The number of failing checks decides what happens:
//!
//! | Failing | Action                                              |
//! |---------|-----------------------------------------------------|
//! | 0       | clean                                               |
//! | 2       | flip the data bit the pair table names, not flagged |
//! | 1, 3, 4 | flag the character, leave it uncorrected            |
//!
//! The pair table maps each of the six check pairs to the one data bit whose
//! coverage is exactly that pair.  Data bits b3 and b6 are covered by three
//! checks, so a single flip of either one is flagged rather than corrected.
//! A lone parity-bit flip fails one check and is flagged as well.

use std::fmt;

use super::{Check, HammingQuad, ParityMode};
use crate::bits::BitVector;

// ── Syndrome ─────────────────────────────────────────────────────────────────

/// The set of failing checks, one bit per [`Check::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Syndrome(pub u8);

impl Syndrome {
    pub fn compute(bits: &BitVector, quad: &HammingQuad, mode: ParityMode) -> Self {
        let failing = Check::ALL
            .iter()
            .filter(|check| (check.sum(bits) + quad.bit(**check)) % 2 != mode.expected_check())
            .fold(0u8, |acc, check| acc | check.id());
        Syndrome(failing)
    }

    /// Number of failing checks (0–4).
    #[inline]
    pub fn errors(self) -> u32 { self.0.count_ones() }

    #[inline]
    pub fn is_clean(self) -> bool { self.0 == 0 }

    #[inline]
    pub fn fails(self, check: Check) -> bool { self.0 & check.id() != 0 }

    pub fn failing(self) -> impl Iterator<Item = Check> {
        Check::ALL.into_iter().filter(move |c| self.fails(*c))
    }

    /// Data bit to flip when exactly two checks fail.
    pub fn pair_target(self) -> Option<usize> {
        match self.0 {
            0b0011 => Some(0), // p1 p2
            0b0101 => Some(1), // p1 p4
            0b1001 => Some(4), // p1 p8
            0b0110 => Some(2), // p2 p4
            0b1010 => Some(5), // p2 p8
            0b1100 => Some(7), // p4 p8
            _      => None,
        }
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.failing().map(Check::name).collect();
        f.write_str(&names.join("+"))
    }
}

// ── Correction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Two checks failed; `bit` was flipped per the pair table.
    Corrected { bit: usize },
    /// One, three or four checks failed; the data bits are passed through.
    Flagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    pub bits:     BitVector,
    pub syndrome: Syndrome,
    pub outcome:  Outcome,
}

impl Correction {
    #[inline]
    pub fn flagged(&self) -> bool { self.outcome == Outcome::Flagged }

    #[inline]
    pub fn byte(&self) -> u8 { self.bits.to_byte() }
}

/// Check one received character and repair it where the pair table allows.
pub fn correct(mut bits: BitVector, quad: HammingQuad, mode: ParityMode) -> Correction {
    let syndrome = Syndrome::compute(&bits, &quad, mode);
    let outcome = match (syndrome.errors(), syndrome.pair_target()) {
        (0, _) => Outcome::Clean,
        (_, Some(bit)) => {
            bits.flip(bit);
            Outcome::Corrected { bit }
        }
        _ => Outcome::Flagged,
    };
    Correction { bits, syndrome, outcome }
}
