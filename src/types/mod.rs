//! Primitive and composite ASN.1 value types (§4.5-§4.6).

mod any;
mod bit_string;
mod boolean;
mod choice;
mod integer;
mod null;
mod octet_string;
mod oid;
mod optional;
mod prefix;
mod real;
mod sequence;
mod set;
mod strings;
mod time;

pub use any::Any;
pub use bit_string::BitString;
pub use choice::ChoiceValue;
pub use integer::{Enumerated, Integer};
pub use null::Null;
pub use octet_string::OctetString;
pub use oid::ObjectIdentifier;
pub use optional::{Optional, WithDefault};
pub use prefix::{Context, Explicit, Implicit};
pub use real::Real;
pub use sequence::{encode_sequence, SequenceOf};
pub use set::{encode_set, SetOf};
pub use strings::{
    BmpString, CharacterString, GeneralString, GraphicString, Ia5String, Iso646String,
    NumericString, PrintableString, TeletexString, UniversalString, Utf8String, VideotexString,
    VisibleString,
};
pub use time::{GeneralizedTime, TimeZone, UtcTime};
