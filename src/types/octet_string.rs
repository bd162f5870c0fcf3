//! The `OCTET STRING` type: raw, untyped content bytes.

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// An `OCTET STRING`: an owned span of raw bytes. Equality is byte-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OctetString(pub Vec<u8>);

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for OctetString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsnType for OctetString {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::OCTET_STRING);
}

impl Encode for OctetString {
    fn encoded_length(&self) -> usize {
        self.0.len() + 1 + crate::ber::header::length_octet_count(self.0.len())
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let total = self.encoded_length();
        EncodeError::assert_capacity(total, buf.len())?;
        buf[0] = 0x04;
        let len_len = crate::ber::encode_length(&mut buf[1..], self.0.len())?;
        buf[1 + len_len..total].copy_from_slice(&self.0);
        Ok(total)
    }
}

impl Decode for OctetString {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::OCTET_STRING, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        Ok(Self(view.content().to_vec()))
    }
}
