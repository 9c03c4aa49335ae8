//! Byte ↔ bit-array conversion.
//!
//! Bit 0 is always the most significant bit.  Every other module inherits
//! this ordering: plane `k` carries bit `k` of each character, and plane
//! bytes are filled MSB first.

pub const BITS_PER_BYTE: usize = 8;

/// One character's 8 data bits, MSB first.  Each element is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BitVector(pub [u8; BITS_PER_BYTE]);

impl BitVector {
    #[inline]
    pub fn from_byte(byte: u8) -> Self { bits_of(byte) }

    #[inline]
    pub fn to_byte(&self) -> u8 { byte_of(self) }

    #[inline]
    pub fn bit(&self, i: usize) -> u8 { self.0[i] }

    #[inline]
    pub fn set(&mut self, i: usize, bit: u8) { self.0[i] = bit & 1; }

    #[inline]
    pub fn flip(&mut self, i: usize) { self.0[i] ^= 1; }
}

impl From<u8> for BitVector {
    fn from(byte: u8) -> Self { bits_of(byte) }
}

impl From<BitVector> for u8 {
    fn from(bits: BitVector) -> Self { byte_of(&bits) }
}

/// Mask selecting bit `i` (0 = MSB) of a byte.
#[inline]
pub const fn msb_mask(i: usize) -> u8 { 0x80 >> i }

/// Split a byte into its 8 bits, MSB first.
pub fn bits_of(byte: u8) -> BitVector {
    let mut bits = [0u8; BITS_PER_BYTE];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = u8::from(byte & msb_mask(i) != 0);
    }
    BitVector(bits)
}

/// Inverse of [`bits_of`].
pub fn byte_of(bits: &BitVector) -> u8 {
    pack_msb_first(&bits.0)
}

/// Pack up to 8 bits into one byte, MSB first.
///
/// Fewer than 8 bits are left-aligned; the unused low bits are zero.
/// Any non-zero input element counts as a 1.
pub fn pack_msb_first(bits: &[u8]) -> u8 {
    debug_assert!(bits.len() <= BITS_PER_BYTE);
    bits.iter()
        .take(BITS_PER_BYTE)
        .enumerate()
        .filter(|&(_, &b)| b != 0)
        .fold(0u8, |acc, (i, _)| acc | msb_mask(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_a_is_msb_first() {
        assert_eq!(bits_of(b'A'), BitVector([0, 1, 0, 0, 0, 0, 0, 1]));
    }

    #[test]
    fn every_byte_survives_split_and_join() {
        for b in 0u8..=255 {
            assert_eq!(byte_of(&bits_of(b)), b);
        }
    }

    #[test]
    fn partial_pack_is_left_aligned() {
        assert_eq!(pack_msb_first(&[1]), 0x80);
        assert_eq!(pack_msb_first(&[0, 1, 1]), 0x60);
        assert_eq!(pack_msb_first(&[]), 0x00);
        assert_eq!(pack_msb_first(&[1; 8]), 0xFF);
    }

    #[test]
    fn flip_and_set() {
        let mut bits = BitVector::from_byte(0x00);
        bits.flip(7);
        assert_eq!(bits.to_byte(), 0x01);
        bits.set(0, 3);
        assert_eq!(u8::from(bits), 0x81);
        bits.flip(0);
        assert_eq!(bits.bit(0), 0);
    }
}
