//! The BER runtime: header codec, view, and container (§4.1-§4.3).

pub mod container;
pub mod header;
pub mod identifier;
pub mod view;

pub use container::Container;
pub use header::{
    decode_identifier, decode_length, encode_identifier, encode_length, encode_tlv, tlv_len, Length,
};
pub use identifier::Identifier;
pub use view::{ChildIter, View};
