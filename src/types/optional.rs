//! `OPTIONAL` and `DEFAULT` component modifiers (§4.6).
//!
//! These aren't wire types — a `SEQUENCE`/`SET` component wrapped in one
//! carries no identifier of its own beyond the inner type's, so neither type
//! here implements [`crate::AsnType`]. A hand-written composite's decode loop
//! peeks the next child's tag against the component's expected identifier
//! and only then calls [`Optional::decode_present`] / [`WithDefault::decode_present`];
//! on a non-match it supplies [`Optional::absent`] / [`WithDefault::absent`].

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::value::{Decode, Encode};

/// An optional sequence/set component: present or wholly absent. Absence
/// emits zero content bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Optional<T>(pub Option<T>);

impl<T> Optional<T> {
    pub fn absent() -> Self {
        Self(None)
    }

    pub fn present(value: T) -> Self {
        Self(Some(value))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl<T: Encode> Optional<T> {
    pub fn encoded_length(&self) -> usize {
        self.0.as_ref().map_or(0, Encode::encoded_length)
    }

    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        match &self.0 {
            Some(value) => value.encode(buf),
            None => Ok(0),
        }
    }
}

impl<T: Decode> Optional<T> {
    pub fn decode_present(view: &View<'_>) -> Result<Self, DecodeError> {
        Ok(Self(Some(T::decode(view)?)))
    }
}

/// A defaulted sequence/set component: a value equal to `default` emits zero
/// content bytes; decode materializes `default` when the identifier is
/// absent, but still accepts an explicitly-encoded value equal to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WithDefault<T> {
    pub value: T,
    pub default: T,
}

impl<T: PartialEq> WithDefault<T> {
    pub fn new(value: T, default: T) -> Self {
        Self { value, default }
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }
}

impl<T: Encode + PartialEq> WithDefault<T> {
    pub fn encoded_length(&self) -> usize {
        if self.is_default() {
            0
        } else {
            self.value.encoded_length()
        }
    }

    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        if self.is_default() {
            Ok(0)
        } else {
            self.value.encode(buf)
        }
    }
}

impl<T: Decode> WithDefault<T> {
    pub fn decode_present(view: &View<'_>, default: T) -> Result<Self, DecodeError> {
        Ok(Self {
            value: T::decode(view)?,
            default,
        })
    }

    pub fn absent(default: T) -> Self
    where
        T: Clone,
    {
        Self {
            value: default.clone(),
            default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Integer;
    use crate::value::encode_to_vec;

    #[test]
    fn absent_optional_emits_nothing() {
        let value: Optional<Integer> = Optional::absent();
        assert_eq!(value.encoded_length(), 0);
        let mut buf = [0u8; 4];
        assert_eq!(value.encode(&mut buf).unwrap(), 0);
    }

    #[test]
    fn present_optional_encodes_its_value() {
        let value = Optional::present(Integer::from(5));
        let mut buf = [0u8; 4];
        let n = value.encode(&mut buf).unwrap();
        assert_eq!(&buf[..n], [0x02, 0x01, 0x05]);
    }

    #[test]
    fn default_equal_value_emits_nothing() {
        let value = WithDefault::new(Integer::from(0), Integer::from(0));
        assert_eq!(value.encoded_length(), 0);
    }

    #[test]
    fn default_differing_value_encodes() {
        let value = WithDefault::new(Integer::from(7), Integer::from(0));
        let encoded = {
            let mut buf = vec![0u8; value.encoded_length()];
            value.encode(&mut buf).unwrap();
            buf
        };
        assert_eq!(encoded, encode_to_vec(&Integer::from(7)).unwrap());
    }

    #[test]
    fn absent_default_materializes_the_default() {
        let value = WithDefault::absent(Integer::from(42));
        assert!(value.is_default());
        assert_eq!(value.value, Integer::from(42));
    }
}
