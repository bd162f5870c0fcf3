//! The in-memory ASN.1 tree (§3.2, C7): modules, imports, assignments, and
//! type/value variants. Produced by an external parser and consumed by
//! [`crate::resolver`].

pub mod assignment;
pub mod tree;
pub mod types;
pub mod value;

pub use assignment::{Assignment, AssignmentKind, DependencyEdge, ObjectClassField};
pub use tree::{Import, Module, TaggingMode, Tree};
pub use types::{
    BuiltinType, CharacterSet, Component, DefinedType, NamedNumber, ObjectClassFieldType,
    StoragePolicy, TimeKind, Type,
};
pub use value::{DefinedValue, Value};
