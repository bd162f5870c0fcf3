//! Type and component variants of the schema model (§3.2).

use crate::schema::value::Value;
use crate::tag::{Class, Tag};
use crate::schema::tree::TaggingMode;

/// A by-name reference to another assignment, optionally module-qualified
/// and optionally parameterized (parameterized ASN.1, X.683).
#[derive(Debug, Clone, PartialEq)]
pub struct DefinedType {
    pub module: Option<String>,
    pub name: String,
    pub parameters: Vec<Type>,
}

/// A named enumerant or named number (`INTEGER { a(0), b(1) }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedNumber {
    pub name: String,
    pub value: i64,
}

/// Which restricted character-string repertoire a string type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Numeric,
    Printable,
    Teletex,
    Videotex,
    Ia5,
    Graphic,
    Visible,
    General,
    Universal,
    Character,
    Bmp,
    Utf8,
}

impl CharacterSet {
    pub fn universal_tag(self) -> Tag {
        let value = match self {
            CharacterSet::Numeric => 18,
            CharacterSet::Printable => 19,
            CharacterSet::Teletex => 20,
            CharacterSet::Videotex => 21,
            CharacterSet::Ia5 => 22,
            CharacterSet::Graphic => 25,
            CharacterSet::Visible => 26,
            CharacterSet::General => 27,
            CharacterSet::Universal => 28,
            CharacterSet::Character => 29,
            CharacterSet::Bmp => 30,
            CharacterSet::Utf8 => 12,
        };
        Tag::new(Class::Universal, value)
    }
}

/// Which time family member a time type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKind {
    GeneralizedTime,
    UtcTime,
}

/// An information-object-class field reference: `CLASS.&Field` or, once
/// resolved (§4.8), nothing — every instance of this variant is eliminated
/// before emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectClassFieldType {
    pub class_ref: DefinedType,
    pub field_path: Vec<String>,
}

/// Every ASN.1 built-in type.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltinType {
    Boolean,
    Integer { named_numbers: Vec<NamedNumber> },
    BitString { named_bits: Vec<NamedNumber> },
    OctetString,
    Null,
    ObjectIdentifier,
    RelativeObjectIdentifier,
    Enumerated { enumerants: Vec<NamedNumber> },
    CharacterStringType(CharacterSet),
    Real,
    Time(TimeKind),
    /// `SEQUENCE`/`SET`: an ordered list of named components.
    Structure { is_set: bool, components: Vec<Component> },
    /// `SEQUENCE OF`/`SET OF`: a single, optionally named, element type.
    StructureOf {
        is_set: bool,
        element_name: Option<String>,
        element_type: Box<Type>,
    },
    /// `CHOICE`: an ordered list of named alternatives.
    Choice { alternatives: Vec<(String, Type)> },
    /// A tagged type: `[class number] mode Type`.
    Prefixed {
        tag: Tag,
        mode: TaggingMode,
        inner: Box<Type>,
    },
    Any,
    ObjectClassField(ObjectClassFieldType),
}

/// Either a reference to another assignment or a built-in variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Defined(DefinedType),
    Builtin(BuiltinType),
}

/// How the emitter should represent a possibly-recursive component: inline,
/// small-buffer-optimized, or heap-indirected (§3.2, §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePolicy {
    Static,
    SmallBufferOptimized,
    Dynamic,
}

/// One named member of a `SEQUENCE`/`SET`.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub component_type: Type,
    pub optional: bool,
    pub default: Option<Value>,
    /// `COMPONENTS OF <type>`: splices another structure's components in at
    /// this point; resolved away before emission.
    pub components_of: Option<DefinedType>,
    pub storage: StoragePolicy,
}
