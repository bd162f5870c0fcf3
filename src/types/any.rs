//! The `ANY` type (§4.6): stores a complete TLV verbatim, unopinionated about
//! its identifier.

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::{Class, Tag};
use crate::value::{Decode, Encode};

/// An opaque, already-encoded TLV. `Any::decode` accepts any identifier; the
/// identifier it was read with is recoverable via [`Any::tag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Any(Vec<u8>);

impl Any {
    /// Wraps an already-encoded TLV verbatim, without validating it.
    pub fn from_ber(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The identifier this TLV carries. Panics if the stored bytes aren't a
    /// well-formed TLV, which cannot happen for an `Any` produced by
    /// `Any::decode` or `Any::from_ber` over already-valid input.
    pub fn tag(&self) -> Tag {
        View::parse(&self.0).expect("Any always wraps a well-formed TLV").tag()
    }
}

impl AsnType for Any {
    // `Any` admits every identifier; decode never checks this constant. It
    // exists only to satisfy the trait.
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::new(Class::Universal, 0));
}

impl Encode for Any {
    fn encoded_length(&self) -> usize {
        self.0.len()
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        EncodeError::assert_capacity(self.0.len(), buf.len())?;
        buf[..self.0.len()].copy_from_slice(&self.0);
        Ok(self.0.len())
    }
}

impl Decode for Any {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        Ok(Self(view.ber().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn round_trips_arbitrary_tlv() {
        let bytes = vec![0x04, 0x02, 0xab, 0xcd];
        let value: Any = decode_exact(&bytes).unwrap();
        assert_eq!(value.tag(), Tag::OCTET_STRING);
        assert_eq!(encode_to_vec(&value).unwrap(), bytes);
    }
}
