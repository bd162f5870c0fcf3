//! `CHOICE` (§4.6): holds exactly one of several named alternatives.
//!
//! A hand-written (or emitter-generated) enum implements [`ChoiceValue`]
//! instead of [`Decode`] directly: its `IDENTIFIER` is a
//! [`CompositeId::Choice`] over every alternative's own identifier, `Encode`
//! dispatches to whichever variant is active and writes *that* variant's
//! TLV with no extra wrapper (the choice is transparent unless a schema
//! gives it an explicit outer tag, in which case [`super::Explicit`]
//! wraps it), and [`ChoiceValue::decode_choice`] inspects the already-parsed
//! view to pick the matching variant. The blanket [`Decode`] impl here
//! checks the identifier against `IDENTIFIER` first, so `decode_choice`
//! itself never has to handle the "no alternative matches" case.

use crate::ber::View;
use crate::error::DecodeError;
use crate::identifier::AsnType;
use crate::tag::Tag;
use crate::value::Decode;

/// A `CHOICE` value: exactly one of a fixed set of named alternatives.
pub trait ChoiceValue: AsnType + Sized {
    /// Decodes whichever alternative `view`'s identifier selects. Called
    /// only after the blanket [`Decode`] impl has confirmed `view`'s tag is
    /// admitted by `Self::IDENTIFIER`.
    fn decode_choice(view: &View<'_>) -> Result<Self, DecodeError>;
}

impl<T: ChoiceValue> Decode for T {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        if !Self::IDENTIFIER.admits(view.tag()) {
            return Err(DecodeError::UnknownChoiceAlternative { actual: view.tag() });
        }
        Self::decode_choice(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::CompositeId;
    use crate::tag::Class;
    use crate::types::{Integer, OctetString};
    use crate::value::{decode_exact, encode_to_vec, Encode};
    use crate::error::EncodeError;

    /// `CHOICE { a [0] IMPLICIT INTEGER, b [1] IMPLICIT OCTET STRING }`
    #[derive(Debug, Clone, PartialEq)]
    enum Sample {
        A(Integer),
        B(OctetString),
    }

    const TAG_A: Tag = Tag::context(0);
    const TAG_B: Tag = Tag::context(1);
    static ALTERNATIVES: [CompositeId; 2] = [CompositeId::Single(TAG_A), CompositeId::Single(TAG_B)];

    impl AsnType for Sample {
        const IDENTIFIER: CompositeId = CompositeId::Choice(&ALTERNATIVES);
    }

    impl Encode for Sample {
        fn encoded_length(&self) -> usize {
            match self {
                Sample::A(v) => {
                    crate::ber::tlv_len(TAG_A, v.to_signed_bytes_be().len())
                }
                Sample::B(v) => crate::ber::tlv_len(TAG_B, v.as_bytes().len()),
            }
        }

        fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
            match self {
                Sample::A(v) => {
                    let bytes = v.to_signed_bytes_be();
                    crate::ber::encode_tlv(buf, TAG_A.class, false, TAG_A.value, &bytes)
                }
                Sample::B(v) => {
                    crate::ber::encode_tlv(buf, TAG_B.class, false, TAG_B.value, v.as_bytes())
                }
            }
        }
    }

    impl ChoiceValue for Sample {
        fn decode_choice(view: &View<'_>) -> Result<Self, DecodeError> {
            if view.tag() == TAG_A {
                Ok(Sample::A(Integer::from_signed_bytes_be(view.content())))
            } else {
                Ok(Sample::B(OctetString::from(view.content())))
            }
        }
    }

    #[test]
    fn concrete_vector_selects_integer_alternative() {
        let value = Sample::A(Integer::from(5));
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0x80, 0x01, 0x05]);
        assert_eq!(decode_exact::<Sample>(&encoded).unwrap(), value);
    }

    #[test]
    fn rejects_unlisted_alternative() {
        let bytes = [0x82, 0x00];
        assert!(decode_exact::<Sample>(&bytes).is_err());
    }

    #[test]
    fn admits_exactly_the_listed_tags() {
        assert!(Sample::IDENTIFIER.admits(TAG_A));
        assert!(Sample::IDENTIFIER.admits(TAG_B));
        assert!(!Sample::IDENTIFIER.admits(Tag::new(Class::Context, 2)));
    }
}
