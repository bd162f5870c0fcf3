//! The `INTEGER` and `ENUMERATED` types.
//!
//! `Integer` is an arbitrary-precision two's-complement value so that a
//! decoded `INTEGER` never has to be rejected merely for not fitting a native
//! width; callers needing a fixed width convert with `TryFrom`.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// An arbitrary-precision `INTEGER` value.
pub type Integer = BigInt;

impl AsnType for Integer {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::INTEGER);
}

impl Encode for Integer {
    fn encoded_length(&self) -> usize {
        let content = self.to_signed_bytes_be().len();
        content + 1 + crate::ber::header::length_octet_count(content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let bytes = self.to_signed_bytes_be();
        let total = bytes.len() + 1 + crate::ber::header::length_octet_count(bytes.len());
        EncodeError::assert_capacity(total, buf.len())?;
        buf[0] = 0x02;
        let len_written = crate::ber::encode_length(&mut buf[1..], bytes.len())?;
        buf[1 + len_written..total].copy_from_slice(&bytes);
        Ok(total)
    }
}

impl Decode for Integer {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::INTEGER, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        if content.is_empty() {
            return Err(DecodeError::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Integer::from_signed_bytes_be(content))
    }
}

macro_rules! impl_native_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsnType for $ty {
                const IDENTIFIER: CompositeId = CompositeId::Single(Tag::INTEGER);
            }

            impl Encode for $ty {
                fn encoded_length(&self) -> usize {
                    Integer::from(*self).encoded_length()
                }

                fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
                    Integer::from(*self).encode(buf)
                }
            }

            impl Decode for $ty {
                fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
                    let value = Integer::decode(view)?;
                    value
                        .to_i64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| DecodeError::custom(format!(
                            "INTEGER value does not fit in {}",
                            core::any::type_name::<$ty>()
                        )))
                }
            }
        )+
    };
}

impl_native_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

/// A wire-level `ENUMERATED` value: encoded exactly like `INTEGER`, and
/// distinguished from it only by the tag it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerated(pub Integer);

impl AsnType for Enumerated {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::ENUMERATED);
}

impl Encode for Enumerated {
    fn encoded_length(&self) -> usize {
        let content = self.0.to_signed_bytes_be().len();
        content + 1 + crate::ber::header::length_octet_count(content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let bytes = self.0.to_signed_bytes_be();
        let total = bytes.len() + 1 + crate::ber::header::length_octet_count(bytes.len());
        EncodeError::assert_capacity(total, buf.len())?;
        buf[0] = 0x0a;
        let len_written = crate::ber::encode_length(&mut buf[1..], bytes.len())?;
        buf[1 + len_written..total].copy_from_slice(&bytes);
        Ok(total)
    }
}

impl Decode for Enumerated {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::ENUMERATED, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        if content.is_empty() {
            return Err(DecodeError::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Enumerated(Integer::from_signed_bytes_be(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn zero() {
        assert_eq!(encode_to_vec(&Integer::from(0)).unwrap(), &[0x02, 0x01, 0x00]);
    }

    #[test]
    fn positive_needs_leading_zero_when_top_bit_set() {
        assert_eq!(encode_to_vec(&Integer::from(128)).unwrap(), &[0x02, 0x02, 0x00, 0x80]);
        assert_eq!(encode_to_vec(&Integer::from(127)).unwrap(), &[0x02, 0x01, 0x7f]);
    }

    #[test]
    fn negative_needs_leading_ff_when_top_bit_clear() {
        assert_eq!(encode_to_vec(&Integer::from(-128)).unwrap(), &[0x02, 0x01, 0x80]);
        assert_eq!(encode_to_vec(&Integer::from(-129)).unwrap(), &[0x02, 0x02, 0xff, 0x7f]);
    }

    #[test]
    fn round_trip_big_integer() {
        let value = Integer::from(1) << 2048;
        let encoded = encode_to_vec(&value).unwrap();
        let decoded: Integer = decode_exact(&encoded).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn native_width_round_trip() {
        let encoded = encode_to_vec(&32768i32).unwrap();
        assert_eq!(encoded, &[0x02, 0x03, 0x00, 0x80, 0x00]);
        assert_eq!(decode_exact::<i32>(&encoded).unwrap(), 32768);
    }

    #[test]
    fn enumerated_shares_integer_wire_form_but_not_tag() {
        let value = Enumerated(Integer::from(5));
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, &[0x0a, 0x01, 0x05]);
        assert_eq!(decode_exact::<Enumerated>(&encoded).unwrap(), value);
        assert!(decode_exact::<Integer>(&encoded).is_err());
    }
}
