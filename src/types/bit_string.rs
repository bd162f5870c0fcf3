//! The `BIT STRING` type (§3.1: universal tag 3).
//!
//! Represented the way the teacher crate represents it: a type alias over
//! `bitvec`'s `BitVec<u8, Msb0>` rather than a hand-rolled bit container, so
//! bit-level indexing, slicing, and iteration come from `bitvec` itself.

use bitvec::order::Msb0;
use bitvec::vec::BitVec;

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// A `BIT STRING`: an ordered sequence of bits, most-significant-bit first
/// within each octet.
pub type BitString = BitVec<u8, Msb0>;

impl AsnType for BitString {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::BIT_STRING);
}

impl Encode for BitString {
    fn encoded_length(&self) -> usize {
        let content = content_len(self);
        content + 1 + crate::ber::header::length_octet_count(content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let content = content_len(self);
        let total = content + 1 + crate::ber::header::length_octet_count(content);
        EncodeError::assert_capacity(total, buf.len())?;

        buf[0] = 0x03;
        let len_len = crate::ber::encode_length(&mut buf[1..], content)?;
        let mut offset = 1 + len_len;

        if self.is_empty() {
            return Ok(offset);
        }

        let unused_bits = (8 - (self.len() % 8)) % 8;
        buf[offset] = unused_bits as u8;
        offset += 1;
        let bytes = self.as_raw_slice();
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        offset += bytes.len();
        Ok(offset)
    }
}

fn content_len(value: &BitString) -> usize {
    if value.is_empty() {
        0
    } else {
        1 + value.as_raw_slice().len()
    }
}

impl Decode for BitString {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::BIT_STRING, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        let Some((&unused_bits, octets)) = content.split_first() else {
            return Ok(BitString::new());
        };
        if unused_bits > 7 || (unused_bits > 0 && octets.is_empty()) {
            return Err(DecodeError::InvalidBitString { unused_bits });
        }

        let mut bits = BitString::from_vec(octets.to_vec());
        bits.truncate(bits.len() - unused_bits as usize);
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn round_trips_empty() {
        let value = BitString::new();
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0x03, 0x00]);
        assert_eq!(decode_exact::<BitString>(&encoded).unwrap(), value);
    }

    #[test]
    fn encodes_unused_bits_count() {
        // BIT STRING '1011'B: 4 significant bits, 4 unused.
        let value: BitString = bitvec::bits![u8, Msb0; 1, 0, 1, 1].into();
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0x03, 0x02, 0x04, 0b1011_0000]);
        assert_eq!(decode_exact::<BitString>(&encoded).unwrap(), value);
    }

    #[test]
    fn whole_byte_round_trip() {
        let value: BitString = BitString::from_vec(vec![0xAB, 0xCD]);
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0x03, 0x03, 0x00, 0xAB, 0xCD]);
        assert_eq!(decode_exact::<BitString>(&encoded).unwrap(), value);
    }

    #[test]
    fn rejects_unused_bits_out_of_range() {
        let bytes = [0x03, 0x02, 0x08, 0xFF];
        assert!(decode_exact::<BitString>(&bytes).is_err());
    }

    #[test]
    fn rejects_nonzero_unused_bits_on_empty_octets() {
        let bytes = [0x03, 0x01, 0x01];
        assert!(decode_exact::<BitString>(&bytes).is_err());
    }

    #[test]
    fn rejects_constructed_encoding() {
        let bytes = [0x23, 0x02, 0x00, 0x00];
        assert!(decode_exact::<BitString>(&bytes).is_err());
    }
}
