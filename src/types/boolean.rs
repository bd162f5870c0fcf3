use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

impl AsnType for bool {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::BOOL);
}

impl Encode for bool {
    fn encoded_length(&self) -> usize {
        3
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        EncodeError::assert_capacity(3, buf.len())?;
        buf[0] = 0x01;
        buf[1] = 0x01;
        buf[2] = if *self { 0xff } else { 0x00 };
        Ok(3)
    }
}

impl Decode for bool {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::BOOL, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        DecodeError::assert_length(1, content.len())?;
        Ok(content[0] != 0x00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn true_encodes_to_ff() {
        assert_eq!(encode_to_vec(&true).unwrap(), &[0x01, 0x01, 0xff]);
    }

    #[test]
    fn false_encodes_to_00() {
        assert_eq!(encode_to_vec(&false).unwrap(), &[0x01, 0x01, 0x00]);
    }

    #[test]
    fn non_canonical_true_byte_still_decodes_true() {
        let decoded: bool = decode_exact(&[0x01, 0x01, 0x7f]).unwrap();
        assert!(decoded);
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(decode_exact::<bool>(&[0x01, 0x02, 0x00, 0x00]).is_err());
    }
}
