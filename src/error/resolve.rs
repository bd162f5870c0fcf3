//! Errors from the schema resolver (§4.7-§4.9). Unlike codec errors these are
//! fatal to the resolve/emit pipeline: the resolver stops at the first one
//! and no partial tree is ever handed to an emitter.

use snafu::Snafu;

/// A fatal error produced while resolving a parsed ASN.1 tree.
#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum ResolveError {
    /// A `DefinedType`/`DefinedValue` named a module that isn't in the tree.
    #[snafu(display("undefined module reference {module}"))]
    UndefinedModule { module: String },

    /// A `DefinedType`/`DefinedValue` named an assignment that doesn't exist
    /// in its module.
    #[snafu(display("undefined reference {module}.{name}"))]
    UndefinedReference { module: String, name: String },

    /// A defined-type chain resolved to something other than a type
    /// assignment (e.g. it named a value assignment).
    #[snafu(display("{module}.{name} is not a type"))]
    NotAType { module: String, name: String },

    /// An `ObjectClassFieldType` named a class that isn't an information
    /// object class (directly, by alias, or by import).
    #[snafu(display("{reference} is not an object class"))]
    NotAnObjectClass { reference: String },

    /// An `ObjectClassFieldType` named a field that the class doesn't
    /// declare, or whose path has more than one component (§9, open
    /// question: multi-level field paths are rejected).
    #[snafu(display("object class {class} has no field {field}"))]
    UnknownClassField { class: String, field: String },

    /// The named field exists but isn't a fixed-type value field, so it
    /// doesn't carry a concrete type to substitute.
    #[snafu(display("field {class}.{field} does not name a type"))]
    FieldIsNotATypeField { class: String, field: String },

    /// An `ObjectClassFieldType` named a field path with more than one
    /// component (§9, open question: multi-level field paths are rejected).
    #[snafu(display("object class field path {path:?} is not a single-level path"))]
    MultiLevelFieldPath { path: Vec<String> },

    /// Two alternatives of a `CHOICE` derived overlapping admissible
    /// identifier sets.
    #[snafu(display("ambiguous CHOICE: alternatives {first} and {second} share a tag"))]
    AmbiguousChoice { first: String, second: String },

    /// `get_dependencies_recursive` revisited an assignment already on its
    /// current path: the schema has a dependency cycle.
    #[snafu(display("dependency cycle detected at {module}.{name}"))]
    DependencyCycle { module: String, name: String },

    /// A parameter governor referenced something that could not itself be
    /// resolved to a type or value.
    #[snafu(display("invalid parameter governor for parameter {parameter}"))]
    InvalidParameterGovernor { parameter: String },
}
