//! Errors that can occur while decoding a BER-encoded value.

use crate::tag::Tag;
use snafu::Snafu;

/// An error produced while decoding. Every variant is recoverable: the
/// failure-safe postcondition (§4.10/§7) is that the caller gets this value
/// back and the target of the decode is left in its default state.
#[derive(Snafu, Debug, Clone, PartialEq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum DecodeError {
    /// The identifier octets could not be parsed (truncated input, or a
    /// high-tag-number form with a leading zero continuation byte).
    #[snafu(display("malformed identifier octets"))]
    MalformedIdentifier,

    /// The length octets could not be parsed, or a long-form length value
    /// does not fit in a `u64`.
    #[snafu(display("malformed length octets"))]
    MalformedLength,

    /// Indefinite length (`0x80`) was encountered on a primitive TLV, which
    /// X.690 forbids.
    #[snafu(display("indefinite length is not allowed on a primitive value"))]
    IndefiniteLengthOnPrimitive,

    /// An indefinite-length constructed value never reached its two-byte
    /// end-of-contents marker before the parent's content was exhausted.
    #[snafu(display("indefinite-length value missing its end-of-contents octets"))]
    MissingEndOfContents,

    /// The declared content length extends past the end of the buffer the
    /// view was parsed from.
    #[snafu(display("declared length {length} exceeds the remaining {available} bytes"))]
    LengthExceedsBuffer { length: usize, available: usize },

    /// The identifier read from the view did not match what the type
    /// expected.
    #[snafu(display("expected tag {expected:?}, found {actual:?}"))]
    MismatchedTag { expected: Tag, actual: Tag },

    /// A `CHOICE` was given an identifier that matches none of its
    /// alternatives.
    #[snafu(display("tag {actual:?} does not match any alternative of this CHOICE"))]
    UnknownChoiceAlternative { actual: Tag },

    /// A value whose content has a fixed expected length (`BOOLEAN`, `NULL`)
    /// did not have it.
    #[snafu(display("expected {expected} content octets, found {actual}"))]
    InvalidLength { expected: usize, actual: usize },

    /// A constructed encoding was seen where the type requires primitive, or
    /// vice-versa.
    #[snafu(display("invalid construction for this type"))]
    InvalidConstruction,

    /// An `OBJECT IDENTIFIER` component violated X.690 §8.19 (negative, or
    /// first/second arc out of range).
    #[snafu(display("invalid OBJECT IDENTIFIER encoding"))]
    InvalidObjectIdentifier,

    /// A `BIT STRING`'s leading unused-bits octet was outside the valid
    /// 0-7 range, or was nonzero on zero-length content.
    #[snafu(display("invalid BIT STRING unused-bits count: {unused_bits}"))]
    InvalidBitString { unused_bits: u8 },

    /// A `GeneralizedTime`/`UTCTime` value was outside the 10-23 byte content
    /// length window, or did not parse as a timestamp.
    #[snafu(display("invalid time string: {message}"))]
    InvalidTime { message: String },

    /// Bytes were not valid UTF-8 where a `UTF8String` was expected.
    #[snafu(display("invalid UTF-8 in UTF8String"))]
    InvalidUtf8,

    /// A required non-optional, non-default sequence component was absent.
    #[snafu(display("missing required component at position {position}"))]
    MissingComponent { position: usize },

    /// A `SET`'s decode saw the same component identifier twice.
    #[snafu(display("duplicate component for tag {tag:?}"))]
    DuplicateComponent { tag: Tag },

    /// There was unconsumed input after a constructed value's declared
    /// content was fully parsed.
    #[snafu(display("{length} unexpected trailing bytes"))]
    TrailingData { length: usize },

    /// A catch-all for codec-specific detail that doesn't warrant its own
    /// variant.
    #[snafu(display("{message}"))]
    Custom { message: String },
}

impl DecodeError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    pub fn assert_tag(expected: Tag, actual: Tag) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::MismatchedTag { expected, actual })
        }
    }

    pub fn assert_length(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::InvalidLength { expected, actual })
        }
    }
}
