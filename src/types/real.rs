//! The `REAL` type (§4.5): X.690 §8.5 binary representation, plus the
//! special forms for `+INFINITY`, `-INFINITY`, `NaN`, and zero.
//!
//! The decimal (character-encoded) form of §8.5 is not produced or accepted;
//! every value this crate writes uses the binary form with base 2.

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// A `REAL` value, backed by `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Real(pub f64);

impl AsnType for Real {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::REAL);
}

const PLUS_INFINITY: u8 = 0x40;
const MINUS_INFINITY: u8 = 0x41;
const NOT_A_NUMBER: u8 = 0x42;
const MINUS_ZERO: u8 = 0x43;

/// Decomposes `value` into `(sign, mantissa, exponent)` such that
/// `value == sign * mantissa * 2^exponent` and `mantissa` is odd (or zero),
/// i.e. all trailing zero bits have been folded into the exponent.
fn decompose(value: f64) -> (bool, u64, i32) {
    let bits = value.to_bits();
    let sign = bits >> 63 == 1;
    let raw_exponent = ((bits >> 52) & 0x7ff) as i32;
    let raw_mantissa = bits & 0x000f_ffff_ffff_ffff;

    let (mut mantissa, mut exponent) = if raw_exponent == 0 {
        (raw_mantissa, -1074)
    } else {
        (raw_mantissa | (1 << 52), raw_exponent - 1075)
    };

    if mantissa == 0 {
        return (sign, 0, 0);
    }
    while mantissa & 1 == 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    (sign, mantissa, exponent)
}

fn minimal_be_bytes(mut value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut bytes = Vec::new();
    while value != 0 {
        bytes.push((value & 0xff) as u8);
        value >>= 8;
    }
    bytes.reverse();
    bytes
}

/// Minimal-width two's-complement encoding of `exponent`: strips leading
/// bytes that are pure sign-extension of the next byte's top bit.
fn exponent_bytes(exponent: i32) -> Vec<u8> {
    let mut bytes = exponent.to_be_bytes().to_vec();
    let extension = if exponent < 0 { 0xffu8 } else { 0x00u8 };
    while bytes.len() > 1 && bytes[0] == extension && (bytes[1] & 0x80 == extension & 0x80) {
        bytes.remove(0);
    }
    bytes
}

impl Encode for Real {
    fn encoded_length(&self) -> usize {
        let content = content_len(self.0);
        content + 1 + crate::ber::header::length_octet_count(content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let total = self.encoded_length();
        EncodeError::assert_capacity(total, buf.len())?;
        buf[0] = 0x09;

        let content = content_bytes(self.0);
        let len_len = crate::ber::encode_length(&mut buf[1..], content.len())?;
        let start = 1 + len_len;
        buf[start..start + content.len()].copy_from_slice(&content);
        Ok(start + content.len())
    }
}

fn content_bytes(value: f64) -> Vec<u8> {
    if value == 0.0 {
        return if value.is_sign_negative() {
            vec![MINUS_ZERO]
        } else {
            Vec::new()
        };
    }
    if value.is_nan() {
        return vec![NOT_A_NUMBER];
    }
    if value.is_infinite() {
        return vec![if value > 0.0 { PLUS_INFINITY } else { MINUS_INFINITY }];
    }

    let (sign, mantissa, exponent) = decompose(value);
    let exp_bytes = exponent_bytes(exponent);
    let mantissa_bytes = minimal_be_bytes(mantissa);

    let exp_len_field = match exp_bytes.len() {
        1 => 0x00,
        2 => 0x01,
        3 => 0x02,
        n => {
            let mut out = Vec::with_capacity(2 + n + mantissa_bytes.len());
            out.push(0x80 | 0x03 | if sign { 0x40 } else { 0x00 });
            out.push(n as u8);
            out.extend_from_slice(&exp_bytes);
            out.extend_from_slice(&mantissa_bytes);
            return out;
        }
    };

    let first = 0x80 | if sign { 0x40 } else { 0x00 } | exp_len_field;
    let mut out = Vec::with_capacity(1 + exp_bytes.len() + mantissa_bytes.len());
    out.push(first);
    out.extend_from_slice(&exp_bytes);
    out.extend_from_slice(&mantissa_bytes);
    out
}

fn content_len(value: f64) -> usize {
    content_bytes(value).len()
}

impl Decode for Real {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::REAL, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        if content.is_empty() {
            return Ok(Real(0.0));
        }

        let first = content[0];
        if first & 0x80 == 0 {
            return Err(DecodeError::custom(
                "REAL decimal (character) form is not supported",
            ));
        }
        match first {
            PLUS_INFINITY => return Ok(Real(f64::INFINITY)),
            MINUS_INFINITY => return Ok(Real(f64::NEG_INFINITY)),
            NOT_A_NUMBER => return Ok(Real(f64::NAN)),
            MINUS_ZERO => return Ok(Real(-0.0)),
            _ => {}
        }

        let sign = first & 0x40 != 0;
        let base = (first >> 4) & 0x03;
        if base != 0x00 {
            return Err(DecodeError::custom("only base-2 REAL binary form is supported"));
        }
        let exp_len_field = first & 0x03;

        let (exp_len, exp_start) = match exp_len_field {
            0 => (1, 1),
            1 => (2, 1),
            2 => (3, 1),
            _ => {
                let n = *content.get(1).ok_or(DecodeError::InvalidLength {
                    expected: 2,
                    actual: content.len(),
                })? as usize;
                (n, 2)
            }
        };

        let exp_bytes = content
            .get(exp_start..exp_start + exp_len)
            .ok_or(DecodeError::InvalidLength {
                expected: exp_start + exp_len,
                actual: content.len(),
            })?;
        let mut exponent: i32 = if exp_bytes[0] & 0x80 != 0 { -1 } else { 0 };
        for &byte in exp_bytes {
            exponent = (exponent << 8) | byte as i32;
        }

        let mantissa_bytes = &content[exp_start + exp_len..];
        let mut mantissa: u64 = 0;
        for &byte in mantissa_bytes {
            mantissa = (mantissa << 8) | byte as u64;
        }

        let value = (mantissa as f64) * 2f64.powi(exponent);
        Ok(Real(if sign { -value } else { value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn zero_has_empty_content() {
        assert_eq!(encode_to_vec(&Real(0.0)).unwrap(), &[0x09, 0x00]);
    }

    #[test]
    fn infinities_and_nan() {
        assert_eq!(encode_to_vec(&Real(f64::INFINITY)).unwrap(), &[0x09, 0x01, 0x40]);
        assert_eq!(encode_to_vec(&Real(f64::NEG_INFINITY)).unwrap(), &[0x09, 0x01, 0x41]);
        let nan = decode_exact::<Real>(&encode_to_vec(&Real(f64::NAN)).unwrap()).unwrap();
        assert!(nan.0.is_nan());
    }

    #[test]
    fn round_trips_finite_values() {
        for v in [1.0, -1.0, 0.5, 3.25, -100.0, 1e10, 1e-10] {
            let encoded = encode_to_vec(&Real(v)).unwrap();
            let decoded = decode_exact::<Real>(&encoded).unwrap();
            assert_eq!(decoded.0, v, "round trip failed for {v}");
        }
    }
}
