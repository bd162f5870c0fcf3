//! The read side of the container abstraction (§4.2): a non-owning view over
//! an encoded TLV, borrowed from a buffer the caller pins for its lifetime.

use crate::error::DecodeError;
use crate::tag::{Class, Tag};

use super::header::{decode_identifier, decode_length, Length};
use super::identifier::Identifier;

/// A `(pointer, tag, header_length, content_length)` view over a single BER
/// TLV. Never copies; parsing a view only ever borrows from `data`.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    data: &'a [u8],
    identifier: Identifier,
    header_length: usize,
    content_length: usize,
    is_indefinite: bool,
}

impl<'a> View<'a> {
    /// Parses a single TLV from the front of `data`. The view borrows from
    /// `data` for as long as it's pinned; `data` may contain trailing bytes
    /// belonging to a sibling or parent's remaining content.
    pub fn parse(data: &'a [u8]) -> Result<Self, DecodeError> {
        let (identifier, id_len) = decode_identifier(data)?;
        let (length, len_len) = decode_length(&data[id_len..])?;
        let header_length = id_len + len_len;

        let (content_length, is_indefinite) = match length {
            Length::Definite(n) => {
                let available = data.len().saturating_sub(header_length);
                if n > available {
                    return Err(DecodeError::LengthExceedsBuffer {
                        length: n,
                        available,
                    });
                }
                (n, false)
            }
            Length::Indefinite => {
                if identifier.is_primitive() {
                    return Err(DecodeError::IndefiniteLengthOnPrimitive);
                }
                let n = scan_indefinite_content(&data[header_length..])?;
                (n, true)
            }
        };

        Ok(Self {
            data,
            identifier,
            header_length,
            content_length,
            is_indefinite,
        })
    }

    pub fn class(&self) -> Class {
        self.identifier.tag.class
    }

    pub fn tag(&self) -> Tag {
        self.identifier.tag
    }

    pub fn is_constructed(&self) -> bool {
        self.identifier.is_constructed()
    }

    pub fn is_primitive(&self) -> bool {
        self.identifier.is_primitive()
    }

    pub fn identifier_length(&self) -> usize {
        self.identifier.tag.len()
    }

    pub fn header_length(&self) -> usize {
        self.header_length
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Whether this view's length was encoded in indefinite form. Implies a
    /// two-byte end-of-contents trailer beyond `content()`.
    pub fn is_indefinite(&self) -> bool {
        self.is_indefinite
    }

    pub fn content(&self) -> &'a [u8] {
        &self.data[self.header_length..self.header_length + self.content_length]
    }

    /// The total length of this TLV on the wire, including a trailing
    /// end-of-contents marker when indefinite.
    pub fn ber_length(&self) -> usize {
        self.header_length + self.content_length + if self.is_indefinite { 2 } else { 0 }
    }

    pub fn ber(&self) -> &'a [u8] {
        &self.data[..self.ber_length()]
    }

    /// Iterates over this view's content as a sequence of child TLVs.
    pub fn children(&self) -> ChildIter<'a> {
        ChildIter {
            remaining: self.content(),
            failed: false,
        }
    }
}

/// Walks an indefinite-length constructed value's content to find the
/// two-byte end-of-contents marker, returning the content length up to (but
/// excluding) it. Bounded by the size of `data`: each byte is visited once.
fn scan_indefinite_content(data: &[u8]) -> Result<usize, DecodeError> {
    let mut offset = 0;
    loop {
        if data.get(offset..offset + 2) == Some(&[0, 0]) {
            return Ok(offset);
        }
        if offset >= data.len() {
            return Err(DecodeError::MissingEndOfContents);
        }

        let (identifier, id_len) =
            decode_identifier(&data[offset..]).map_err(|_| DecodeError::MissingEndOfContents)?;
        let (length, len_len) =
            decode_length(&data[offset + id_len..]).map_err(|_| DecodeError::MissingEndOfContents)?;
        let header = id_len + len_len;

        let content_len = match length {
            Length::Definite(n) => n,
            Length::Indefinite => {
                if identifier.is_primitive() {
                    return Err(DecodeError::IndefiniteLengthOnPrimitive);
                }
                scan_indefinite_content(&data[offset + header..])? + 2
            }
        };

        let available = data.len().saturating_sub(offset + header);
        if content_len > available {
            return Err(DecodeError::LengthExceedsBuffer {
                length: content_len,
                available,
            });
        }

        offset += header + content_len;
    }
}

/// Iterates repeatedly re-parsing at the remaining span's front, advancing by
/// each child's `ber_length`. Stops when the remaining content is empty, or
/// reports `is_valid() == false` if a child fails to parse.
#[derive(Clone, Copy, Debug)]
pub struct ChildIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> ChildIter<'a> {
    /// True once iteration has ended, either by exhausting well-formed
    /// children or by failing to parse one.
    pub fn is_valid(&self) -> bool {
        !self.failed
    }
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = View<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        match View::parse(self.remaining) {
            Ok(view) => {
                self.remaining = &self.remaining[view.ber_length()..];
                Some(view)
            }
            Err(_) => {
                self.failed = true;
                None
            }
        }
    }
}

impl<'a> PartialEq for ChildIter<'a> {
    fn eq(&self, other: &Self) -> bool {
        let self_done = self.failed || self.remaining.is_empty();
        let other_done = other.failed || other.remaining.is_empty();
        match (self_done, other_done) {
            (true, true) => true,
            (false, false) => core::ptr::eq(self.remaining, other.remaining),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitive_tlv() {
        let bytes = [0x02, 0x01, 0x05];
        let view = View::parse(&bytes).unwrap();
        assert_eq!(view.tag(), Tag::INTEGER);
        assert_eq!(view.content(), &[0x05]);
        assert_eq!(view.ber_length(), 3);
        assert_eq!(view.ber(), &bytes);
    }

    #[test]
    fn rejects_truncated_content() {
        let bytes = [0x02, 0x05, 0x01];
        assert!(View::parse(&bytes).is_err());
    }

    #[test]
    fn iterates_definite_children() {
        let bytes = [0x30, 0x06, 0x02, 0x01, 0x05, 0x04, 0x01, 0x78];
        let view = View::parse(&bytes).unwrap();
        let children: Vec<_> = view.children().collect();
        assert_eq!(children.len(), 2);
        assert!(view.children().is_valid());
        assert_eq!(children[0].tag(), Tag::INTEGER);
        assert_eq!(children[1].tag(), Tag::OCTET_STRING);
    }

    #[test]
    fn indefinite_length_stops_at_eoc() {
        let bytes = [
            0x24, 0x80, // constructed octet string, indefinite length
            0x04, 0x02, 0xAB, 0xCD, // one chunk
            0x00, 0x00, // EOC
        ];
        let view = View::parse(&bytes).unwrap();
        assert!(view.is_indefinite());
        assert_eq!(view.content_length(), 4);
        assert_eq!(view.ber_length(), bytes.len());
        let children: Vec<_> = view.children().collect();
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn indefinite_length_on_primitive_is_rejected() {
        let bytes = [0x04, 0x80, 0x00, 0x00];
        assert!(View::parse(&bytes).is_err());
    }

    #[test]
    fn iterator_reports_invalid_on_malformed_child() {
        let bytes = [0x30, 0x03, 0x02, 0x05, 0x01];
        let view = View::parse(&bytes).unwrap();
        let mut iter = view.children();
        assert!(iter.next().is_none());
        assert!(!iter.is_valid());
    }
}
