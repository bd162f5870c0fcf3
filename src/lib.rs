//! An ASN.1 toolkit.
//!
//! This crate provides two tightly coupled halves:
//!
//! - a Basic Encoding Rules (BER, ITU-T X.690) runtime: tag/length codecs, a
//!   zero-copy [`ber::View`] over encoded buffers, an owning [`ber::Container`],
//!   and the [`Encode`]/[`Decode`] protocol shared by every ASN.1 value type in
//!   [`types`];
//! - a schema model ([`schema`]) and resolver ([`resolver`]) that normalize a
//!   parsed ASN.1 module tree: resolving defined-type references, eliminating
//!   information-object-class field references, and deriving the wire
//!   identifier and dependency graph of every assignment.
//!
//! The grammar tokenizer/parser that produces a [`schema::Tree`] and the
//! code-emission back end that consumes a resolved one are external
//! collaborators and are not part of this crate.

pub mod error;
pub mod tag;
pub mod identifier;
pub mod ber;
pub mod value;
pub mod types;
pub mod schema;
pub mod resolver;
pub mod fs;

pub use crate::{
    error::{DecodeError, EncodeError, ResolveError},
    identifier::{AsnType, CompositeId},
    tag::{Class, Tag},
    value::{Decode, Encode},
};
