use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// The `NULL` type: a tag with empty content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl AsnType for Null {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::NULL);
}

impl Encode for Null {
    fn encoded_length(&self) -> usize {
        2
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        EncodeError::assert_capacity(2, buf.len())?;
        buf[0] = 0x05;
        buf[1] = 0x00;
        Ok(2)
    }
}

impl Decode for Null {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::NULL, view.tag())?;
        DecodeError::assert_length(0, view.content_length())?;
        Ok(Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    #[test]
    fn round_trips() {
        let encoded = encode_to_vec(&Null).unwrap();
        assert_eq!(encoded, &[0x05, 0x00]);
        assert_eq!(decode_exact::<Null>(&encoded).unwrap(), Null);
    }

    #[test]
    fn nonempty_content_rejected() {
        assert!(decode_exact::<Null>(&[0x05, 0x01, 0x00]).is_err());
    }
}
