//! Errors that can occur while encoding a value to BER.

use snafu::Snafu;

/// An error produced while encoding. As with [`super::DecodeError`], every
/// variant is recoverable; on failure the output buffer is left untouched
/// (the postcondition `encode` promises per §4.10).
#[derive(Snafu, Debug, Clone, Copy, PartialEq, Eq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum EncodeError {
    /// The destination span was smaller than [`crate::Encode::encoded_length`].
    #[snafu(display("buffer of {available} bytes is too small for {needed} encoded bytes"))]
    BufferTooSmall { needed: usize, available: usize },

    /// A negative tag number, or one too large to represent, was given to
    /// the identifier codec.
    #[snafu(display("tag number {value} cannot be encoded"))]
    InvalidTagNumber { value: i64 },

    /// `OBJECT IDENTIFIER` encoding requires at least two arcs, the first
    /// `<= 2`, the second `<= 39` when the first is `0` or `1`, and every
    /// arc non-negative.
    #[snafu(display("object identifier component out of range"))]
    InvalidObjectIdentifier,

    /// A length value exceeded what BER's long form can represent (more
    /// than 127 length-of-length octets would be needed).
    #[snafu(display("length {value} is too large to encode"))]
    LengthTooLarge { value: u64 },
}

impl EncodeError {
    pub fn assert_capacity(needed: usize, available: usize) -> Result<(), Self> {
        if available >= needed {
            Ok(())
        } else {
            Err(Self::BufferTooSmall { needed, available })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_check() {
        assert!(EncodeError::assert_capacity(4, 4).is_ok());
        assert!(EncodeError::assert_capacity(5, 4).is_err());
    }
}
