//! `SEQUENCE` and `SEQUENCE OF` (§4.6).
//!
//! A fixed-component `SEQUENCE` doesn't get a generic Rust type here — its
//! shape is schema-specific, so a hand-written (or emitter-generated) struct
//! implements [`Encode`]/[`Decode`] directly, calling [`encode_sequence`] to
//! assemble its components' already-encoded bytes in schema order, and
//! [`decode_required_component`]/[`decode_optional_component`] to walk
//! `view.children()` back position-by-position, peeking by identifier to
//! recognize an absent optional/default component. `SEQUENCE OF`, a single
//! repeated element type, is common enough to provide as [`SequenceOf`].

use std::iter::Peekable;

use crate::ber::{ChildIter, View};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// Decodes a `SEQUENCE`'s required component at schema position `position`:
/// the next child is consumed and decoded regardless of its identifier
/// (§4.6: "each non-optional component must appear at its schema position").
/// Fails with [`DecodeError::MissingComponent`] if no child remains.
pub fn decode_required_component<'a, T: Decode>(
    children: &mut Peekable<ChildIter<'a>>,
    position: usize,
) -> Result<T, DecodeError> {
    let child = children
        .next()
        .ok_or(DecodeError::MissingComponent { position })?;
    T::decode(&child)
}

/// Decodes a `SEQUENCE`'s optional or `DEFAULT` component: peeks the next
/// child's identifier, and only consumes and decodes it if `T::IDENTIFIER`
/// admits that tag; otherwise leaves `children` untouched and returns
/// `Ok(None)` (§4.6: "optional/default components are recognized by
/// identifier peek and skipped when absent").
pub fn decode_optional_component<'a, T: Decode>(
    children: &mut Peekable<ChildIter<'a>>,
) -> Result<Option<T>, DecodeError> {
    match children.peek() {
        Some(child) if T::IDENTIFIER.admits(child.tag()) => {
            let child = children.next().expect("peek just confirmed Some");
            T::decode(&child).map(Some)
        }
        _ => Ok(None),
    }
}

/// Assembles a `SEQUENCE`'s content from each component's already-encoded
/// TLV bytes, in schema order, and writes the wrapping constructed TLV under
/// `tag_number` (context-specific for an implicitly/explicitly retagged
/// sequence, or [`Tag::SEQUENCE.value`] for the default universal tag).
pub fn encode_sequence(
    buf: &mut [u8],
    class: crate::tag::Class,
    tag_number: u32,
    components: &[&[u8]],
) -> Result<usize, EncodeError> {
    let content_len: usize = components.iter().map(|c| c.len()).sum();
    let total = crate::ber::tlv_len(Tag::new(class, tag_number), content_len);
    EncodeError::assert_capacity(total, buf.len())?;

    let mut header = [0u8; 10];
    let id_len = crate::ber::encode_identifier(&mut header, class, true, tag_number)?;
    let len_len = crate::ber::encode_length(&mut header[id_len..], content_len)?;
    let header_len = id_len + len_len;
    buf[..header_len].copy_from_slice(&header[..header_len]);

    let mut offset = header_len;
    for component in components {
        buf[offset..offset + component.len()].copy_from_slice(component);
        offset += component.len();
    }
    Ok(offset)
}

/// A `SEQUENCE OF T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SequenceOf<T>(pub Vec<T>);

impl<T> AsnType for SequenceOf<T> {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::SEQUENCE);
}

impl<T: Encode> Encode for SequenceOf<T> {
    fn encoded_length(&self) -> usize {
        let content: usize = self.0.iter().map(Encode::encoded_length).sum();
        crate::ber::tlv_len(Tag::SEQUENCE, content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let content_len: usize = self.0.iter().map(Encode::encoded_length).sum();
        let total = crate::ber::tlv_len(Tag::SEQUENCE, content_len);
        EncodeError::assert_capacity(total, buf.len())?;

        let mut header = [0u8; 10];
        let id_len = crate::ber::encode_identifier(&mut header, Tag::SEQUENCE.class, true, Tag::SEQUENCE.value)?;
        let len_len = crate::ber::encode_length(&mut header[id_len..], content_len)?;
        let header_len = id_len + len_len;
        buf[..header_len].copy_from_slice(&header[..header_len]);

        let mut offset = header_len;
        for element in &self.0 {
            offset += element.encode(&mut buf[offset..])?;
        }
        Ok(offset)
    }
}

impl<T: Decode> Decode for SequenceOf<T> {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::SEQUENCE, view.tag())?;
        if view.is_primitive() {
            return Err(DecodeError::InvalidConstruction);
        }
        let mut elements = Vec::new();
        let mut children = view.children();
        for child in children.by_ref() {
            elements.push(T::decode(&child)?);
        }
        if !children.is_valid() {
            return Err(DecodeError::custom("malformed SEQUENCE OF element"));
        }
        Ok(SequenceOf(elements))
    }
}
