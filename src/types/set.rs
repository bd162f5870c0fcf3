//! `SET` and `SET OF` (§4.6).
//!
//! Like [`super::sequence`], a fixed-component `SET` is schema-specific and
//! implements [`Encode`]/[`Decode`] by hand, using [`encode_set`] to assemble
//! its components in canonical (ascending tag) order and
//! [`decode_set_components`] to bind the decoded children back to named
//! slots by identifier rather than wire position, since a `SET`'s components
//! may appear in any order. `SET OF` is provided generically as [`SetOf`].

use std::collections::HashMap;

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::{Class, Tag};
use crate::value::{Decode, Encode};

/// Walks a `SET`'s children into a map keyed by their wire tag, so a
/// hand-written `Decode` impl can look each named component up by identifier
/// instead of by position (§4.6: "`SET` binds children by identifier to
/// named slots in any order"). Fails with [`DecodeError::DuplicateComponent`]
/// if the same tag is seen twice.
pub fn decode_set_components<'a>(view: &View<'a>) -> Result<HashMap<Tag, View<'a>>, DecodeError> {
    let mut components = HashMap::new();
    let mut children = view.children();
    for child in children.by_ref() {
        let tag = child.tag();
        if components.insert(tag, child).is_some() {
            return Err(DecodeError::DuplicateComponent { tag });
        }
    }
    if !children.is_valid() {
        return Err(DecodeError::custom("malformed SET component"));
    }
    Ok(components)
}

/// Removes and decodes the required component identified by `T::IDENTIFIER`
/// from a `SET`'s component map. Fails with [`DecodeError::MissingComponent`]
/// if no child carried that identifier.
pub fn decode_required_set_component<T: Decode>(
    components: &mut HashMap<Tag, View<'_>>,
    position: usize,
) -> Result<T, DecodeError> {
    let tag = T::IDENTIFIER.smallest_tag();
    let child = components
        .remove(&tag)
        .ok_or(DecodeError::MissingComponent { position })?;
    T::decode(&child)
}

/// Removes and decodes an optional or `DEFAULT` component identified by
/// `T::IDENTIFIER`, returning `Ok(None)` if no child carried that identifier.
pub fn decode_optional_set_component<T: Decode>(
    components: &mut HashMap<Tag, View<'_>>,
) -> Result<Option<T>, DecodeError> {
    let tag = T::IDENTIFIER.smallest_tag();
    match components.remove(&tag) {
        Some(child) => T::decode(&child).map(Some),
        None => Ok(None),
    }
}

/// Assembles a `SET`'s content from each component's already-encoded TLV
/// bytes, reordered into ascending-tag canonical form, and writes the
/// wrapping constructed TLV.
pub fn encode_set(
    buf: &mut [u8],
    class: Class,
    tag_number: u32,
    components: &mut [&[u8]],
) -> Result<usize, EncodeError> {
    components.sort_by_key(|c| leading_tag_sort_key(c));

    let content_len: usize = components.iter().map(|c| c.len()).sum();
    let total = crate::ber::tlv_len(Tag::new(class, tag_number), content_len);
    EncodeError::assert_capacity(total, buf.len())?;

    let mut header = [0u8; 10];
    let id_len = crate::ber::encode_identifier(&mut header, class, true, tag_number)?;
    let len_len = crate::ber::encode_length(&mut header[id_len..], content_len)?;
    let header_len = id_len + len_len;
    buf[..header_len].copy_from_slice(&header[..header_len]);

    let mut offset = header_len;
    for component in components.iter() {
        buf[offset..offset + component.len()].copy_from_slice(component);
        offset += component.len();
    }
    Ok(offset)
}

fn leading_tag_sort_key(component: &[u8]) -> (u8, u32) {
    match crate::ber::decode_identifier(component) {
        Ok((id, _)) => (id.tag.class as u8, id.tag.value),
        Err(_) => (u8::MAX, u32::MAX),
    }
}

/// A `SET OF T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SetOf<T>(pub Vec<T>);

impl<T> AsnType for SetOf<T> {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::SET);
}

impl<T: Encode> Encode for SetOf<T> {
    fn encoded_length(&self) -> usize {
        let content: usize = self.0.iter().map(Encode::encoded_length).sum();
        crate::ber::tlv_len(Tag::SET, content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let content_len: usize = self.0.iter().map(Encode::encoded_length).sum();
        let total = crate::ber::tlv_len(Tag::SET, content_len);
        EncodeError::assert_capacity(total, buf.len())?;

        let mut header = [0u8; 10];
        let id_len = crate::ber::encode_identifier(&mut header, Tag::SET.class, true, Tag::SET.value)?;
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

impl<T: Decode> Decode for SetOf<T> {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::SET, view.tag())?;
        if view.is_primitive() {
            return Err(DecodeError::InvalidConstruction);
        }
        let mut elements = Vec::new();
        let mut children = view.children();
        for child in children.by_ref() {
            elements.push(T::decode(&child)?);
        }
        if !children.is_valid() {
            return Err(DecodeError::custom("malformed SET OF element"));
        }
        Ok(SetOf(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Context, Implicit, Integer, OctetString};
    use crate::value::{decode_exact, encode_to_vec};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Tag0;
    impl Context for Tag0 {
        const TAG: Tag = Tag::context(0);
    }

    /// `SET { a INTEGER, b [0] IMPLICIT OCTET STRING OPTIONAL }`
    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        a: Integer,
        b: Option<Implicit<Tag0, OctetString>>,
    }

    impl AsnType for Sample {
        const IDENTIFIER: CompositeId = CompositeId::Single(Tag::SET);
    }

    impl Encode for Sample {
        fn encoded_length(&self) -> usize {
            let content = self.a.encoded_length() + self.b.as_ref().map_or(0, Encode::encoded_length);
            crate::ber::tlv_len(Tag::SET, content)
        }

        fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
            let field_a = encode_to_vec(&self.a)?;
            let field_b = self.b.as_ref().map(encode_to_vec).transpose()?;
            let mut fields: Vec<&[u8]> = core::iter::once(field_a.as_slice())
                .chain(field_b.as_deref())
                .collect();
            encode_set(buf, Tag::SET.class, Tag::SET.value, &mut fields)
        }
    }

    impl Decode for Sample {
        fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
            DecodeError::assert_tag(Tag::SET, view.tag())?;
            if view.is_primitive() {
                return Err(DecodeError::InvalidConstruction);
            }
            let mut components = decode_set_components(view)?;
            let a = decode_required_set_component::<Integer>(&mut components, 0)?;
            let b = decode_optional_set_component::<Implicit<Tag0, OctetString>>(&mut components)?;
            Ok(Sample { a, b })
        }
    }

    #[test]
    fn decodes_components_by_identifier_regardless_of_order() {
        let with_b = Sample {
            a: Integer::from(5),
            b: Some(Implicit::new(OctetString::from(b"x".as_slice()))),
        };
        let encoded = encode_to_vec(&with_b).unwrap();
        assert_eq!(decode_exact::<Sample>(&encoded).unwrap(), with_b);

        let without_b = Sample { a: Integer::from(5), b: None };
        let encoded = encode_to_vec(&without_b).unwrap();
        assert_eq!(decode_exact::<Sample>(&encoded).unwrap(), without_b);
    }

    #[test]
    fn duplicate_component_identifier_is_rejected() {
        let bytes = [0x31, 0x06, 0x02, 0x01, 0x05, 0x02, 0x01, 0x06];
        let err = decode_exact::<Sample>(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::DuplicateComponent { tag: Tag::INTEGER });
    }

    #[test]
    fn encode_set_reorders_by_ascending_tag() {
        let octet_field = encode_to_vec(&crate::types::OctetString::from(b"x".as_slice())).unwrap();
        let int_field = encode_to_vec(&5i32).unwrap();
        let mut buf = [0u8; 16];
        let mut components = [octet_field.as_slice(), int_field.as_slice()];
        let n = encode_set(&mut buf, Class::Universal, Tag::SET.value, &mut components).unwrap();
        assert_eq!(&buf[..n], [0x31, 0x06, 0x02, 0x01, 0x05, 0x04, 0x01, 0x78]);
    }

    #[test]
    fn set_of_round_trips() {
        let value = SetOf(vec![1i32, 2, 3]);
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(decode_exact::<SetOf<i32>>(&encoded).unwrap(), value);
    }
}
