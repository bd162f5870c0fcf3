//! The header codec (§4.1): identifier and length octets, independent of
//! content. Every function here returns the number of bytes consumed or
//! written; on failure nothing is consumed and the output is untouched.

use nom::bytes::complete::{take, take_while};
use nom::IResult;

use crate::error::{DecodeError, EncodeError};
use crate::tag::{Class, Tag};

use super::identifier::Identifier;

/// Writes the identifier octets for `(class, is_constructed, tag_number)`
/// into `buf`, returning the number of bytes written.
///
/// Low-tag form (`tag_number <= 30`) is a single octet. High-tag form writes
/// `class|construction|0x1F` followed by the tag number as base-128
/// big-endian digits, continuation bit set on every digit but the last.
pub fn encode_identifier(
    buf: &mut [u8],
    class: Class,
    is_constructed: bool,
    tag_number: u32,
) -> Result<usize, EncodeError> {
    let needed = Tag::new(class, tag_number).len();
    EncodeError::assert_capacity(needed, buf.len())?;

    let mut first = (class as u8) << 6;
    if is_constructed {
        first |= 0x20;
    }

    if tag_number <= 0x1e {
        buf[0] = first | (tag_number as u8);
        return Ok(1);
    }

    buf[0] = first | 0x1f;

    // Base-128 big-endian digits, most significant first.
    let mut digits = [0u8; 5];
    let mut count = 0;
    let mut value = tag_number;
    loop {
        digits[count] = (value & 0x7f) as u8;
        count += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for (i, digit) in digits[..count].iter().rev().enumerate() {
        let continuation = if i + 1 < count { 0x80 } else { 0 };
        buf[1 + i] = continuation | digit;
    }

    Ok(1 + count)
}

/// Splits a high-tag-number's base-128 digit run into its continuation
/// bytes (bit 7 set) and final byte (bit 7 clear), the way the teacher's own
/// BER tag parser does (`nom::bytes::streaming::take_while` over the
/// continuation bit, then `take(1)` for the terminator) — `complete` rather
/// than `streaming` here since a short buffer is a hard decode failure, not
/// a request for more input.
fn high_tag_digits(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    let (input, continuation) = take_while(|byte: u8| byte & 0x80 != 0)(input)?;
    let (input, terminator) = take(1usize)(input)?;
    Ok((input, (continuation, terminator)))
}

/// Parses identifier octets at the front of `input`, returning the decoded
/// identifier and the number of bytes consumed.
pub fn decode_identifier(input: &[u8]) -> Result<(Identifier, usize), DecodeError> {
    let first = *input.first().ok_or(DecodeError::MalformedIdentifier)?;
    let class = Class::from_u8((first & 0xc0) >> 6);
    let is_constructed = (first & 0x20) != 0;
    let low_tag = (first & 0x1f) as u32;

    if low_tag != 0x1f {
        return Ok((Identifier::new(class, is_constructed, low_tag), 1));
    }

    let (_, (continuation, terminator)) =
        high_tag_digits(&input[1..]).map_err(|_: nom::Err<_>| DecodeError::MalformedIdentifier)?;

    if continuation.first() == Some(&0x80) {
        // Canonical form forbids a leading all-zero continuation byte.
        return Err(DecodeError::MalformedIdentifier);
    }

    let mut value: u32 = 0;
    for &byte in continuation.iter().chain(terminator.iter()) {
        value = value
            .checked_shl(7)
            .ok_or(DecodeError::MalformedIdentifier)?
            | (byte & 0x7f) as u32;
    }

    let consumed = 1 + continuation.len() + terminator.len();
    Ok((Identifier::new(class, is_constructed, value), consumed))
}

/// An explicit, finite length, or the indefinite-length marker for a
/// constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Definite(usize),
    Indefinite,
}

/// The number of octets [`encode_length`] would write for `n`, without
/// actually writing them.
pub fn length_octet_count(n: usize) -> usize {
    if n < 128 {
        1
    } else {
        1 + (usize::BITS as usize / 8 - (n.leading_zeros() as usize / 8))
    }
}

/// Writes definite-form length octets for `n` into `buf`. Short form for
/// `n < 128`; otherwise long form with the minimum number of length-of-length
/// bytes. Never emits indefinite form (§4.1, §9: the encoder never emits it).
pub fn encode_length(buf: &mut [u8], n: usize) -> Result<usize, EncodeError> {
    if n < 128 {
        EncodeError::assert_capacity(1, buf.len())?;
        buf[0] = n as u8;
        return Ok(1);
    }

    let bytes = n.to_be_bytes();
    let first_significant = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    let width = bytes.len() - first_significant;
    EncodeError::assert_capacity(1 + width, buf.len())?;

    buf[0] = 0x80 | width as u8;
    buf[1..1 + width].copy_from_slice(&bytes[first_significant..]);
    Ok(1 + width)
}

/// Parses length octets at the front of `input`. A constructed value whose
/// length octet is `0x80` decodes as [`Length::Indefinite`]; that form on a
/// primitive value is rejected by the caller once construction is known
/// (this function just reports it).
pub fn decode_length(input: &[u8]) -> Result<(Length, usize), DecodeError> {
    let first = *input.first().ok_or(DecodeError::MalformedLength)?;

    if first & 0x80 == 0 {
        return Ok((Length::Definite((first & 0x7f) as usize), 1));
    }

    let width = (first & 0x7f) as usize;
    if width == 0 {
        return Ok((Length::Indefinite, 1));
    }
    if width > 8 {
        return Err(DecodeError::MalformedLength);
    }

    let (_, digits) =
        take::<_, _, nom::error::Error<&[u8]>>(width)(&input[1..]).map_err(|_| DecodeError::MalformedLength)?;
    let mut value: u64 = 0;
    for digit in digits {
        value = value
            .checked_shl(8)
            .ok_or(DecodeError::MalformedLength)?
            .checked_add(*digit as u64)
            .ok_or(DecodeError::MalformedLength)?;
    }

    let value = usize::try_from(value).map_err(|_| DecodeError::MalformedLength)?;
    Ok((Length::Definite(value), 1 + width))
}

/// The total TLV length (identifier + length + content octets) for a value
/// carrying `tag` with `content_len` content bytes.
pub fn tlv_len(tag: Tag, content_len: usize) -> usize {
    tag.len() + length_octet_count(content_len) + content_len
}

/// Writes a complete TLV (identifier, length, then `content` verbatim) into
/// `buf`, returning the number of bytes written.
pub fn encode_tlv(
    buf: &mut [u8],
    class: Class,
    is_constructed: bool,
    tag_number: u32,
    content: &[u8],
) -> Result<usize, EncodeError> {
    let total = Tag::new(class, tag_number).len() + length_octet_count(content.len()) + content.len();
    EncodeError::assert_capacity(total, buf.len())?;
    let id_len = encode_identifier(buf, class, is_constructed, tag_number)?;
    let len_len = encode_length(&mut buf[id_len..], content.len())?;
    let header_len = id_len + len_len;
    buf[header_len..total].copy_from_slice(content);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_tag_round_trip() {
        let mut buf = [0u8; 4];
        let n = encode_identifier(&mut buf, Class::Universal, false, 2).unwrap();
        assert_eq!(&buf[..n], &[0x02]);
        let (id, consumed) = decode_identifier(&buf[..n]).unwrap();
        assert_eq!(consumed, n);
        assert_eq!(id.tag, Tag::INTEGER);
        assert!(id.is_primitive());
    }

    #[test]
    fn high_tag_round_trip() {
        let mut buf = [0u8; 4];
        let n = encode_identifier(&mut buf, Class::Context, true, 1000).unwrap();
        let (id, consumed) = decode_identifier(&buf[..n]).unwrap();
        assert_eq!(consumed, n);
        assert_eq!(id.tag.value, 1000);
        assert_eq!(id.tag.class, Class::Context);
        assert!(id.is_constructed());
    }

    #[test]
    fn rejects_leading_zero_continuation() {
        // class=universal, tag=high-tag-form, then a leading 0x80 continuation.
        let bytes = [0x1f, 0x80, 0x01];
        assert!(decode_identifier(&bytes).is_err());
    }

    #[test]
    fn short_form_length() {
        let mut buf = [0u8; 4];
        let n = encode_length(&mut buf, 127).unwrap();
        assert_eq!(&buf[..n], &[0x7f]);
        assert_eq!(decode_length(&buf[..n]).unwrap(), (Length::Definite(127), 1));
    }

    #[test]
    fn long_form_length() {
        let mut buf = [0u8; 4];
        let n = encode_length(&mut buf, 128).unwrap();
        assert_eq!(&buf[..n], &[0x81, 0x80]);
        assert_eq!(decode_length(&buf[..n]).unwrap(), (Length::Definite(128), 2));
    }

    #[test]
    fn indefinite_length_decodes_but_is_never_encoded() {
        assert_eq!(decode_length(&[0x80]).unwrap(), (Length::Indefinite, 1));
    }

    #[test]
    fn overlong_length_rejected() {
        let bytes = [0x89, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        assert!(decode_length(&bytes).is_err());
    }
}
