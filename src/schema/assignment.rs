//! Assignments (§3.2): the four kinds of top-level module entries, each
//! carrying the dependency and parameter lists the resolver (§4.9) and
//! emitter consume.

use crate::schema::types::Type;
use crate::schema::value::Value;

/// A reference to another assignment, optionally module-qualified — the
/// unit [`Assignment::depends_on`] and the dependency-graph walk (§4.9)
/// operate on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyEdge {
    pub module: Option<String>,
    pub name: String,
}

/// One object-class field: `&Field TypeFieldReference` (a type field) or
/// `&field ObjectReference` (a fixed-type value field); only the latter
/// survives as a valid substitution target in object-class elimination
/// (§4.8).
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectClassField {
    TypeField { name: String },
    FixedTypeValueField { name: String, field_type: Type },
    Other { name: String },
}

/// What kind of top-level entry an [`Assignment`] is.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentKind {
    Type(Type),
    Value { value_type: Type, value: Value },
    ObjectClass { fields: Vec<ObjectClassField> },
    /// An object set: `MY-CLASS ::= { ... }`. The member list isn't modeled
    /// structurally here (§1: the emitter consumes it, not the core); it's
    /// retained only so the resolver can recognize and drop the assignment.
    ObjectSet,
}

/// A named top-level module entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub kind: AssignmentKind,
    pub parameters: Vec<String>,
    pub dependencies: Vec<DependencyEdge>,
}

impl Assignment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_object_class(&self) -> bool {
        matches!(self.kind, AssignmentKind::ObjectClass { .. })
    }

    pub fn is_object_set(&self) -> bool {
        matches!(self.kind, AssignmentKind::ObjectSet)
    }

    pub fn as_type(&self) -> Option<&Type> {
        match &self.kind {
            AssignmentKind::Type(t) => Some(t),
            AssignmentKind::Value { value_type, .. } => Some(value_type),
            _ => None,
        }
    }

    pub fn as_type_mut(&mut self) -> Option<&mut Type> {
        match &mut self.kind {
            AssignmentKind::Type(t) => Some(t),
            AssignmentKind::Value { value_type, .. } => Some(value_type),
            _ => None,
        }
    }
}
