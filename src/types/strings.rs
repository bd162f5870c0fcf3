//! The restricted character string family (§4.5): each type is distinguished
//! from the others only by the universal tag it carries on the wire. Content
//! is stored and compared byte-wise; `Utf8String` additionally validates its
//! content is well-formed UTF-8 on decode.

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

macro_rules! byte_backed_string {
    ($name:ident, $tag:expr) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub Vec<u8>);

        impl $name {
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.as_bytes().to_vec())
            }
        }

        impl AsnType for $name {
            const IDENTIFIER: CompositeId = CompositeId::Single($tag);
        }

        impl Encode for $name {
            fn encoded_length(&self) -> usize {
                self.0.len() + 1 + crate::ber::header::length_octet_count(self.0.len())
            }

            fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
                let total = self.encoded_length();
                EncodeError::assert_capacity(total, buf.len())?;
                let mut header = [0u8; 10];
                let id_len = crate::ber::encode_identifier(&mut header, $tag.class, false, $tag.value)?;
                let len_len = crate::ber::encode_length(&mut header[id_len..], self.0.len())?;
                let header_len = id_len + len_len;
                buf[..header_len].copy_from_slice(&header[..header_len]);
                buf[header_len..total].copy_from_slice(&self.0);
                Ok(total)
            }
        }

        impl Decode for $name {
            fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
                DecodeError::assert_tag($tag, view.tag())?;
                if view.is_constructed() {
                    return Err(DecodeError::InvalidConstruction);
                }
                Ok(Self(view.content().to_vec()))
            }
        }
    };
}

byte_backed_string!(NumericString, Tag::NUMERIC_STRING);
byte_backed_string!(PrintableString, Tag::PRINTABLE_STRING);
byte_backed_string!(TeletexString, Tag::TELETEX_STRING);
byte_backed_string!(VideotexString, Tag::VIDEOTEX_STRING);
byte_backed_string!(Ia5String, Tag::IA5_STRING);
byte_backed_string!(GraphicString, Tag::GRAPHIC_STRING);
byte_backed_string!(VisibleString, Tag::VISIBLE_STRING);
byte_backed_string!(GeneralString, Tag::GENERAL_STRING);
byte_backed_string!(UniversalString, Tag::UNIVERSAL_STRING);
byte_backed_string!(CharacterString, Tag::CHARACTER_STRING);
byte_backed_string!(BmpString, Tag::BMP_STRING);

/// ISO 646 / IA5 are the same repertoire under a different name in some
/// modules; kept as a distinct type since it carries the IA5 tag but is
/// conventionally spelled `ISO646String` in schemas.
pub type Iso646String = Ia5String;

/// A `UTF8String`: like the other byte-backed string types, but decode
/// additionally rejects content that isn't valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Utf8String(pub String);

impl Utf8String {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Utf8String {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsnType for Utf8String {
    const IDENTIFIER: CompositeId = CompositeId::Single(Tag::UTF8_STRING);
}

impl Encode for Utf8String {
    fn encoded_length(&self) -> usize {
        self.0.len() + 1 + crate::ber::header::length_octet_count(self.0.len())
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let total = self.encoded_length();
        EncodeError::assert_capacity(total, buf.len())?;
        buf[0] = 0x0c;
        let len_len = crate::ber::encode_length(&mut buf[1..], self.0.len())?;
        buf[1 + len_len..total].copy_from_slice(self.0.as_bytes());
        Ok(total)
    }
}

impl Decode for Utf8String {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        DecodeError::assert_tag(Tag::UTF8_STRING, view.tag())?;
        if view.is_constructed() {
            return Err(DecodeError::InvalidConstruction);
        }
        let s = core::str::from_utf8(view.content()).map_err(|_| DecodeError::InvalidUtf8)?;
        Ok(Self(s.to_owned()))
    }
}
