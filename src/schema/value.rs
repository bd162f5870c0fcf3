//! Schema-level value literals (§3.2): the right-hand side of a value
//! assignment, or a component's `DEFAULT`.

/// A schema-level value. This is the parser's value grammar, not a runtime
/// typed value (§4.4's `Encode`/`Decode` types) — it's what a `DEFAULT` or a
/// value assignment's right-hand side parses to, before the resolver has
/// matched it against its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
    ObjectIdentifier(Vec<u64>),
    Null,
    /// A named value bound elsewhere, e.g. another value assignment or a
    /// named number/enumerant. Resolved transparently like a `Defined` type.
    Defined(DefinedValue),
    Sequence(Vec<Value>),
}

/// A by-name reference to a value assignment, optionally module-qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinedValue {
    pub module: Option<String>,
    pub name: String,
}

impl Value {
    /// The defined-value references this value depends on, recursively
    /// (§4.9: "a value depends on any defined values it references").
    pub fn referenced_values(&self) -> Vec<&DefinedValue> {
        match self {
            Value::Defined(reference) => vec![reference],
            Value::Sequence(values) => values.iter().flat_map(Value::referenced_values).collect(),
            Value::Boolean(_) | Value::Integer(_) | Value::String(_) | Value::ObjectIdentifier(_) | Value::Null => {
                Vec::new()
            }
        }
    }
}

