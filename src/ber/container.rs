//! The write side of the container abstraction (§4.3): an owning byte vector
//! plus a view kept re-seated onto it after every mutation.

use crate::error::EncodeError;
use crate::tag::{Class, Tag};

use super::header::{encode_identifier, encode_length};
use super::view::View;

/// An owned, in-place editable TLV. The invariant `container.view().ber() ==
/// container.bytes_up_to_declared_length()` holds after every mutation.
#[derive(Debug, Clone, Default)]
pub struct Container {
    data: Vec<u8>,
    identified: bool,
    class: Class,
    tag_number: u32,
    header_length: usize,
    content_length: usize,
}

impl Container {
    /// An empty, untagged container (no identifier assigned yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `content` under a scratch tag-0 wrapper. Used by types whose
    /// identifier is applied by a caller layer (e.g. the inner value of an
    /// explicit prefix before the outer tag is known).
    pub fn assign_content(&mut self, content: &[u8]) {
        self.assign_content_with_tag(Class::Universal, false, 0, content);
    }

    /// Writes a fully-identified TLV: `(class, is_constructed, tag_number)`
    /// as the identifier, `content` as the content octets.
    pub fn assign_content_with_tag(
        &mut self,
        class: Class,
        is_constructed: bool,
        tag_number: u32,
        content: &[u8],
    ) {
        let mut header = [0u8; 16];
        let id_len = encode_identifier(&mut header, class, is_constructed, tag_number)
            .expect("tag number fits in the scratch header buffer");
        let len_len = encode_length(&mut header[id_len..], content.len())
            .expect("scratch header buffer is large enough for any in-memory length");
        let header_length = id_len + len_len;

        self.data.clear();
        self.data.extend_from_slice(&header[..header_length]);
        self.data.extend_from_slice(content);

        self.identified = true;
        self.class = class;
        self.tag_number = tag_number;
        self.header_length = header_length;
        self.content_length = content.len();
    }

    /// Resizes the content to `size`, preserving the current identifier,
    /// recomputing length octets, and moving existing content bytes in-place
    /// to their new offset.
    pub fn resize_content(&mut self, size: usize) {
        let is_constructed = self.view().is_constructed();
        let old_header_length = self.header_length;
        let old_content_length = self.content_length;

        let mut length_buf = [0u8; 9];
        let len_len = encode_length(&mut length_buf, size)
            .expect("scratch length buffer is large enough for any in-memory length");
        let identifier_length = Tag::new(self.class, self.tag_number).len();
        let new_header_length = identifier_length + len_len;

        let mut new_data = Vec::with_capacity(new_header_length + size);
        new_data.resize(new_header_length, 0);
        let id_len = encode_identifier(&mut new_data, self.class, is_constructed, self.tag_number)
            .expect("tag number fits the header buffer");
        debug_assert_eq!(id_len, identifier_length);
        new_data[identifier_length..new_header_length].copy_from_slice(&length_buf[..len_len]);

        let keep = old_content_length.min(size);
        new_data.extend_from_slice(&self.data[old_header_length..old_header_length + keep]);
        new_data.resize(new_header_length + size, 0);

        self.data = new_data;
        self.header_length = new_header_length;
        self.content_length = size;
    }

    pub fn is_valid(&self) -> bool {
        self.identified
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn tag(&self) -> Tag {
        Tag::new(self.class, self.tag_number)
    }

    pub fn header_length(&self) -> usize {
        self.header_length
    }

    pub fn content(&self) -> &[u8] {
        &self.data[self.header_length..self.header_length + self.content_length]
    }

    pub fn content_mut(&mut self) -> &mut [u8] {
        let start = self.header_length;
        let end = start + self.content_length;
        &mut self.data[start..end]
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    pub fn ber(&self) -> &[u8] {
        &self.data[..self.header_length + self.content_length]
    }

    pub fn ber_length(&self) -> usize {
        self.header_length + self.content_length
    }

    /// A borrowed [`View`] over this container's current bytes.
    pub fn view(&self) -> View<'_> {
        View::parse(self.ber()).expect("container invariant: bytes re-parse to a valid view")
    }

    /// Copies this container's bytes into `buf`.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        EncodeError::assert_capacity(self.ber_length(), buf.len())?;
        buf[..self.ber_length()].copy_from_slice(self.ber());
        Ok(self.ber_length())
    }

    /// Replaces this container's contents by copying `view`'s bytes.
    pub fn decode(&mut self, view: &View<'_>) {
        self.data = view.ber().to_vec();
        self.identified = true;
        self.class = view.class();
        self.tag_number = view.tag().value;
        self.header_length = view.header_length();
        self.content_length = view.content_length();
    }
}
