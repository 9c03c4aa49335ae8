//! Bit-plane packing and unpacking.
//!
//! # Layout
//! Plane `k` is the sequence of bit `k` of every character's codeword
//! (planes 0–7 data, 8–11 parity).  A plane of `N` bits is packed into
//! `ceil(N / 8)` bytes: slot `i` lives in byte `i / 8` at MSB-first position
//! `i % 8`.
//!
//! # Final partial byte
//! When `N % 8 != 0` the last byte carries its bits left-aligned and the low
//! unused bits are zero.  The reader therefore needs no index shift for the
//! last byte.  The message length is not stored anywhere: the unpacker treats
//! the trailing slots of the last byte that are zero in all 12 planes as
//! padding.  Under ODD parity no character encodes to an all-zero codeword,
//! so this is exact.  Under EVEN parity a trailing NUL character is
//! indistinguishable from padding and is dropped.  The encoder always puts at
//! least one character in the last byte, so padding never exceeds 7 slots: a
//! last byte blank in every plane still decodes as one NUL.

use crate::bits::{msb_mask, pack_msb_first, BITS_PER_BYTE};
use crate::error::{HammingError, Result};
use crate::hamming::{Codeword, ParityMode, CODEWORD_BITS};

pub const PLANE_COUNT: usize = CODEWORD_BITS;

/// Packed byte length of a plane carrying `chars` bits.
#[inline]
pub fn packed_len(chars: usize) -> usize {
    chars.div_ceil(BITS_PER_BYTE)
}

/// Human-readable role of a plane index.
pub fn plane_role(index: usize) -> String {
    match index {
        0..=7  => format!("data b{index}"),
        8..=11 => format!("parity p{}", 1 << (index - BITS_PER_BYTE)),
        _      => "unknown".to_string(),
    }
}

// ── PlaneBits ────────────────────────────────────────────────────────────────

/// Unpacked planes: one `0`/`1` element per character in each of 12 buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneBits {
    planes: [Vec<u8>; PLANE_COUNT],
}

impl PlaneBits {
    pub fn from_codewords(codewords: &[Codeword]) -> Self {
        let planes = std::array::from_fn(|plane| {
            codewords.iter().map(|cw| cw.bit(plane)).collect()
        });
        Self { planes }
    }

    pub fn from_message(message: &[u8], mode: ParityMode) -> Self {
        let codewords: Vec<Codeword> = message
            .iter()
            .map(|&byte| Codeword::encode(byte, mode))
            .collect();
        Self::from_codewords(&codewords)
    }

    /// Characters per plane.
    pub fn len(&self) -> usize { self.planes[0].len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn plane(&self, index: usize) -> &[u8] { &self.planes[index] }
}

// ── PackedPlanes ─────────────────────────────────────────────────────────────

/// Twelve packed plane buffers, all the same byte length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedPlanes {
    planes: [Vec<u8>; PLANE_COUNT],
}

impl PackedPlanes {
    /// Adopt raw plane buffers.  Plane 0's length is authoritative: shorter
    /// planes are rejected, longer ones are cut to that length.
    pub fn new(mut planes: [Vec<u8>; PLANE_COUNT]) -> Result<Self> {
        let expected = planes[0].len();
        for (index, plane) in planes.iter_mut().enumerate().skip(1) {
            if plane.len() < expected {
                return Err(HammingError::PlaneLength { index, expected, actual: plane.len() });
            }
            plane.truncate(expected);
        }
        Ok(Self { planes })
    }

    /// Bytes per plane.
    pub fn byte_len(&self) -> usize { self.planes[0].len() }

    pub fn is_empty(&self) -> bool { self.byte_len() == 0 }

    pub fn plane(&self, index: usize) -> &[u8] { &self.planes[index] }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.planes.iter().map(Vec::as_slice).enumerate()
    }

    /// Slots of the final byte that are zero across every plane, at most 7.
    pub fn padding_slots(&self) -> usize {
        let Some(last) = self.byte_len().checked_sub(1) else { return 0 };
        let occupied = self.planes.iter().fold(0u8, |acc, plane| acc | plane[last]);
        (occupied.trailing_zeros() as usize).min(BITS_PER_BYTE - 1)
    }

    /// Number of characters the planes carry, excluding padding.
    pub fn message_len(&self) -> usize {
        BITS_PER_BYTE * self.byte_len() - self.padding_slots()
    }

    /// Read slot `i` of every plane into one codeword.
    pub fn codeword_at(&self, i: usize) -> Codeword {
        let byte_index = i / BITS_PER_BYTE;
        let mask = msb_mask(i % BITS_PER_BYTE);
        let mut cw = Codeword::default();
        for (index, plane) in self.iter() {
            cw.set_bit(index, u8::from(plane[byte_index] & mask != 0));
        }
        cw
    }
}

// ── Pack / unpack ────────────────────────────────────────────────────────────

/// Pack every plane MSB first, left-aligning the final partial byte.
pub fn pack(bits: &PlaneBits) -> PackedPlanes {
    let planes = std::array::from_fn(|index| {
        bits.plane(index)
            .chunks(BITS_PER_BYTE)
            .map(pack_msb_first)
            .collect()
    });
    PackedPlanes { planes }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpacked {
    pub codewords: Vec<Codeword>,
    /// Trailing slots of the last byte skipped as padding.
    pub padding:   usize,
}

/// Recover one codeword per character from packed planes.
pub fn unpack(planes: &PackedPlanes) -> Unpacked {
    let padding = planes.padding_slots();
    let codewords = (0..planes.message_len())
        .map(|i| planes.codeword_at(i))
        .collect();
    Unpacked { codewords, padding }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(message: &[u8], mode: ParityMode) -> PackedPlanes {
        pack(&PlaneBits::from_message(message, mode))
    }

    #[test]
    fn letter_a_planes() {
        let planes = packed(b"A", ParityMode::Even);
        let bytes: Vec<u8> = planes.iter().map(|(_, p)| {
            assert_eq!(p.len(), 1);
            p[0]
        }).collect();
        assert_eq!(bytes, vec![
            0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80,
            0x80, 0x00, 0x00, 0x80,
        ]);
    }

    #[test]
    fn plane_byte_length_is_ceil_n_over_8() {
        for n in 1..=41 {
            let message = vec![b'x'; n];
            let planes = packed(&message, ParityMode::Even);
            for (index, plane) in planes.iter() {
                assert_eq!(plane.len(), n.div_ceil(8), "plane {index}, n = {n}");
            }
        }
    }

    #[test]
    fn full_bytes_are_msb_first() {
        // b1 of "@ABCDEFG" is always 1, b7 alternates starting at 0.
        let planes = packed(b"@ABCDEFG", ParityMode::Even);
        assert_eq!(planes.plane(1), &[0xFF]);
        assert_eq!(planes.plane(7), &[0b0101_0101]);
    }

    #[test]
    fn partial_byte_round_trip_for_every_remainder() {
        for mode in [ParityMode::Even, ParityMode::Odd] {
            for n in 8..16 {
                let message: Vec<u8> = (0..n).map(|i| b'a' + i as u8).collect();
                let bits = PlaneBits::from_message(&message, mode);
                let planes = pack(&bits);
                let unpacked = unpack(&planes);

                assert_eq!(unpacked.padding, (8 - n % 8) % 8, "n = {n}, {mode}");
                let expected: Vec<Codeword> = message.iter().map(|&b| Codeword::encode(b, mode)).collect();
                assert_eq!(unpacked.codewords, expected, "n = {n}, {mode}");
            }
        }
    }

    #[test]
    fn final_byte_low_bits_are_zero() {
        let planes = packed(b"\xFF\xFF\xFF", ParityMode::Even);
        assert_eq!(planes.plane(0), &[0b1110_0000]);
    }

    #[test]
    fn trailing_nul_under_even_parity_reads_as_padding() {
        let planes = packed(b"hi\0", ParityMode::Even);
        assert_eq!(planes.message_len(), 2);
        let planes = packed(b"hi\0", ParityMode::Odd);
        assert_eq!(planes.message_len(), 3);
    }

    #[test]
    fn blank_last_byte_keeps_one_slot() {
        let planes = packed(b"abcdefgh\0\0\0\0\0\0\0\0", ParityMode::Even);
        assert_eq!(planes.byte_len(), 2);
        assert_eq!(planes.padding_slots(), 7);
        assert_eq!(planes.message_len(), 9);

        let unpacked = unpack(&planes);
        assert_eq!(unpacked.padding, 7);
        let bytes: Vec<u8> = unpacked.codewords.iter().map(|cw| cw.data.to_byte()).collect();
        assert_eq!(bytes, b"abcdefgh\0");
    }

    #[test]
    fn short_plane_is_rejected_long_plane_is_cut() {
        let mut raw: [Vec<u8>; PLANE_COUNT] = std::array::from_fn(|_| vec![0xAA, 0x55]);
        raw[5].push(0xFF);
        let planes = PackedPlanes::new(raw.clone()).unwrap();
        assert_eq!(planes.plane(5), &[0xAA, 0x55]);

        raw[9].truncate(1);
        match PackedPlanes::new(raw) {
            Err(HammingError::PlaneLength { index, expected, actual }) => {
                assert_eq!((index, expected, actual), (9, 2, 1));
            }
            other => panic!("expected PlaneLength, got {other:?}"),
        }
    }

    #[test]
    fn empty_planes_unpack_to_nothing() {
        let planes = PackedPlanes::default();
        assert_eq!(planes.padding_slots(), 0);
        assert!(unpack(&planes).codewords.is_empty());
    }

    #[test]
    fn plane_roles() {
        assert_eq!(plane_role(0), "data b0");
        assert_eq!(plane_role(7), "data b7");
        assert_eq!(plane_role(8), "parity p1");
        assert_eq!(plane_role(11), "parity p8");
    }
}
