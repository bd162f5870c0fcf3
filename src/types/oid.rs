//! The `OBJECT IDENTIFIER` type (§4.5, §4.1 base-128 component form).

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// An `OBJECT IDENTIFIER`: a non-empty arc path. The first two arcs are
/// merged into a single leading octet on the wire (`40*c1 + c2`); X.690
/// requires `c1 <= 2`, and `c2 <= 39` when `c1 < 2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier(Vec<u64>);

impl ObjectIdentifier {
    /// Builds an OID from its arc components, validating the first-two-arc
    /// constraint X.690 places on the wire form.
    pub fn new(components: Vec<u64>) -> Result<Self, EncodeError> {
        validate(&components)?;
        Ok(Self(components))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// The number of arcs, derived structurally as it would be from the wire
    /// form: the count of base-128 terminal octets, plus one (the leading
    /// octet always represents two arcs).
    pub fn number_of_components(&self) -> usize {
        self.0.len()
    }

    /// The value of the `i`-th arc (0-indexed), or `-1` if `i` is out of range.
    pub fn component_number(&self, i: usize) -> i64 {
        self.0.get(i).map(|v| *v as i64).unwrap_or(-1)
    }

    pub fn value(&self) -> &[u64] {
        &self.0
    }
}

fn validate(components: &[u64]) -> Result<(), EncodeError> {
    if components.len() < 2 {
        return Err(EncodeError::InvalidObjectIdentifier);
    }
    let c1 = components[0];
    let c2 = components[1];
    if c1 > 2 || (c1 < 2 && c2 > 39) {
        return Err(EncodeError::InvalidObjectIdentifier);
    }
    Ok(())
}

fn base128_len(mut value: u64) -> usize {
    let mut len = 1;
    value >>= 7;
    while value != 0 {
        len += 1;
        value >>= 7;
    }
    len
}

fn write_base128(buf: &mut [u8], value: u64) -> usize {
    let mut digits = [0u8; 10];
    let mut count = 0;
    let mut v = value;
    loop {
        digits[count] = (v & 0x7f) as u8;
        count += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for (i, digit) in digits[..count].iter().rev().enumerate() {
        let continuation = if i + 1 < count { 0x80 } else { 0 };
        buf[i] = continuation | digit;
    }
    count
}

impl AsnType for ObjectIdentifier {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::OBJECT_IDENTIFIER);
}

impl Encode for ObjectIdentifier {
    fn encoded_length(&self) -> usize {
        let content = content_length(&self.0);
        content + 1 + crate::ber::header::length_octet_count(content)
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        validate(&self.0)?;
        let content = content_length(&self.0);
        let total = content + 1 + crate::ber::header::length_octet_count(content);
        EncodeError::assert_capacity(total, buf.len())?;

        buf[0] = 0x06;
        let len_len = crate::ber::encode_length(&mut buf[1..], content)?;
        let mut offset = 1 + len_len;

        let merged = 40 * self.0[0] + self.0[1];
        offset += write_base128(&mut buf[offset..], merged);
        for component in &self.0[2..] {
            offset += write_base128(&mut buf[offset..], *component);
        }
        Ok(offset)
    }
}

fn content_length(components: &[u64]) -> usize {
    let merged = 40 * components[0] + components[1];
    let mut len = base128_len(merged);
    for component in &components[2..] {
        len += base128_len(*component);
    }
    len
}

impl Decode for ObjectIdentifier {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::OBJECT_IDENTIFIER, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let content = view.content();
        if content.is_empty() {
            return Err(DecodeError::InvalidObjectIdentifier);
        }

        let mut arcs = Vec::new();
        let mut value: u64 = 0;
        let mut started = false;
        for &byte in content {
            started = true;
            value = value
                .checked_shl(7)
                .ok_or(DecodeError::InvalidObjectIdentifier)?
                | (byte & 0x7f) as u64;
            if byte & 0x80 == 0 {
                arcs.push(value);
                value = 0;
                started = false;
            }
        }
        if started {
            return Err(DecodeError::InvalidObjectIdentifier);
        }

        let (first_arc, rest) = arcs.split_first().ok_or(DecodeError::InvalidObjectIdentifier)?;
        let c1 = if *first_arc >= 80 {
            2
        } else {
            first_arc / 40
        };
        let c2 = first_arc - c1 * 40;

        let mut components = Vec::with_capacity(rest.len() + 2);
        components.push(c1);
        components.push(c2);
        components.extend_from_slice(rest);

        Ok(ObjectIdentifier(components))
    }
}
