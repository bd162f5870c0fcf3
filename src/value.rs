//! The typed-value protocol (§4.4): the contract every ASN.1 value type
//! implements, plus the top-level convenience functions built on it.

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::AsnType;

/// The write half of the protocol.
pub trait Encode: AsnType {
    /// The exact number of bytes [`Encode::encode`] will write.
    fn encoded_length(&self) -> usize;

    /// Writes this value's TLV into `buf`. Fails iff `buf.len() <
    /// self.encoded_length()`; on failure `buf` is left untouched.
    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError>;
}

/// The read half of the protocol.
pub trait Decode: AsnType + Sized {
    /// Validates `view`'s identifier against `Self::IDENTIFIER` and
    /// populates a value from its content. Fails if the identifier
    /// mismatches or the content is ill-formed for `Self`.
    fn decode(view: &View<'_>) -> Result<Self, DecodeError>;
}

/// Encodes `value` into a freshly allocated buffer.
pub fn encode_to_vec<T: Encode>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut buf = vec![0u8; value.encoded_length()];
    let n = value.encode(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Decodes a `T` from the entirety of `input`, failing if any bytes remain
/// after `T`'s own TLV.
pub fn decode_exact<T: Decode>(input: &[u8]) -> Result<T, DecodeError> {
    let view = View::parse(input)?;
    if view.ber_length() != input.len() {
        return Err(DecodeError::TrailingData {
            length: input.len() - view.ber_length(),
        });
    }
    T::decode(&view)
}

/// Decodes a `T` from the front of `input`, returning it along with whatever
/// bytes remained.
pub fn decode_with_remainder<T: Decode>(input: &[u8]) -> Result<(T, &[u8]), DecodeError> {
    let view = View::parse(input)?;
    let value = T::decode(&view)?;
    Ok((value, &input[view.ber_length()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bool() {
        let encoded = encode_to_vec(&true).unwrap();
        assert_eq!(encoded, &[0x01, 0x01, 0xff]);
        let decoded: bool = decode_exact(&encoded).unwrap();
        assert!(decoded);
    }

    #[test]
    fn decode_exact_rejects_trailing_bytes() {
        let bytes = [0x01, 0x01, 0xff, 0x00];
        assert!(decode_exact::<bool>(&bytes).is_err());
    }

    #[test]
    fn decode_with_remainder_keeps_leftover() {
        let bytes = [0x01, 0x01, 0xff, 0x02, 0x01, 0x05];
        let (value, rest): (bool, _) = decode_with_remainder(&bytes).unwrap();
        assert!(value);
        assert_eq!(rest, &[0x02, 0x01, 0x05]);
    }
}
