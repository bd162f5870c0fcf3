//! `Implicit`/`Explicit` tagging (§4.9): wrappers that retag an inner type
//! without (implicit) or with (explicit) an extra TLV layer.
//!
//! A tag is named via a zero-sized marker implementing [`Context`], since a
//! [`Tag`] isn't (yet) expressible as a `const` generic parameter on stable
//! Rust: `struct MyTag; impl Context for MyTag { const TAG: Tag =
//! Tag::context(0); }`, then `Implicit<MyTag, Integer>`.

use core::marker::PhantomData;

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::{Class, Tag};
use crate::value::{decode_exact, encode_to_vec, Decode, Encode};

/// Names the tag an [`Implicit`] or [`Explicit`] wrapper applies.
pub trait Context {
    const TAG: Tag;
}

fn rewrap(content: &[u8], class: Class, is_constructed: bool, tag_number: u32) -> Vec<u8> {
    let total = crate::ber::tlv_len(Tag::new(class, tag_number), content.len());
    let mut buf = vec![0u8; total];
    crate::ber::encode_tlv(&mut buf, class, is_constructed, tag_number, content)
        .expect("buffer sized exactly for this TLV");
    buf
}

/// Replaces `T`'s own tag with `C::TAG`; the content octets are identical to
/// what `T` would have written, only the identifier changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Implicit<C, T>(pub T, PhantomData<C>);

impl<C, T> Implicit<C, T> {
    pub fn new(value: T) -> Self {
        Self(value, PhantomData)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<C: Context, T> AsnType for Implicit<C, T> {
    const IDENTIFIER: CompositeId = CompositeId::Single(C::TAG);
}

impl<C: Context, T: Encode> Encode for Implicit<C, T> {
    fn encoded_length(&self) -> usize {
        crate::ber::tlv_len(C::TAG, inner_content_len(&self.0))
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let inner = encode_to_vec(&self.0)?;
        let inner_view = View::parse(&inner).expect("just-encoded TLV is well-formed");
        let retagged = rewrap(inner_view.content(), C::TAG.class, inner_view.is_constructed(), C::TAG.value);
        EncodeError::assert_capacity(retagged.len(), buf.len())?;
        buf[..retagged.len()].copy_from_slice(&retagged);
        Ok(retagged.len())
    }
}

fn inner_content_len<T: Encode>(value: &T) -> usize {
    // `encoded_length` already counts T's own header; re-derive the content
    // length by subtracting it back out via a real encode, since the header
    // width of a retagged value can differ from T's own header width.
    let bytes = encode_to_vec(value).expect("encoding to a freshly sized buffer cannot fail");
    View::parse(&bytes).expect("just-encoded TLV is well-formed").content_length()
}

impl<C: Context, T: Decode> Decode for Implicit<C, T> {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(C::TAG, view.tag())?;
        let inner_tag = match T::IDENTIFIER {
            CompositeId::Single(tag) => tag,
            _ => {
                return Err(DecodeError::custom(
                    "IMPLICIT tagging requires an inner type with a single identifier",
                ))
            }
        };
        let retagged = rewrap(view.content(), inner_tag.class, view.is_constructed(), inner_tag.value);
        let inner_view = View::parse(&retagged)?;
        Ok(Implicit::new(T::decode(&inner_view)?))
    }
}

/// Wraps the complete inner TLV inside an outer constructed TLV carrying
/// `C::TAG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Explicit<C, T>(pub T, PhantomData<C>);

impl<C, T> Explicit<C, T> {
    pub fn new(value: T) -> Self {
        Self(value, PhantomData)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<C: Context, T: AsnType> AsnType for Explicit<C, T> {
    const IDENTIFIER: CompositeId = CompositeId::Double(C::TAG, &T::IDENTIFIER);
}

impl<C: Context, T: Encode> Encode for Explicit<C, T> {
    fn encoded_length(&self) -> usize {
        crate::ber::tlv_len(C::TAG, self.0.encoded_length())
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let inner = encode_to_vec(&self.0)?;
        let total = crate::ber::tlv_len(C::TAG, inner.len());
        EncodeError::assert_capacity(total, buf.len())?;
        crate::ber::encode_tlv(buf, C::TAG.class, true, C::TAG.value, &inner)
    }
}

impl<C: Context, T: Decode> Decode for Explicit<C, T> {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(C::TAG, view.tag())?;
        if view.is_primitive() {
            return Err(DecodeError::InvalidConstruction);
        }
        Ok(Explicit::new(decode_exact(view.content())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Integer;
    use crate::value::{decode_exact, encode_to_vec};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Tag0;
    impl Context for Tag0 {
        const TAG: Tag = Tag::context(0);
    }

    #[test]
    fn implicit_replaces_tag_but_keeps_content() {
        let value = Implicit::<Tag0, Integer>::new(Integer::from(5));
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0x80, 0x01, 0x05]);
        assert_eq!(decode_exact::<Implicit<Tag0, Integer>>(&encoded).unwrap().into_inner(), Integer::from(5));
    }

    #[test]
    fn explicit_wraps_the_whole_inner_tlv() {
        let value = Explicit::<Tag0, Integer>::new(Integer::from(5));
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(encoded, [0xa0, 0x03, 0x02, 0x01, 0x05]);
        assert_eq!(decode_exact::<Explicit<Tag0, Integer>>(&encoded).unwrap().into_inner(), Integer::from(5));
    }

    #[test]
    fn explicit_identifier_names_both_outer_and_inner_tag() {
        match <Explicit<Tag0, Integer> as AsnType>::IDENTIFIER {
            CompositeId::Double(outer, inner) => {
                assert_eq!(outer, Tag0::TAG);
                assert_eq!(*inner, Integer::IDENTIFIER);
            }
            other => panic!("expected CompositeId::Double, got {other:?}"),
        }
    }
}
