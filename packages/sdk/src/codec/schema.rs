//! Schema descriptors
//!
//! Declarative description of a record's fields. Every record carries one
//! static [`Schema`] table; the codec engine consults it for key ownership
//! and diagnostics.

use serde_json::Value;
use std::fmt;

/// How a field behaves when its key is missing or `null` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key must be present with a non-null value (`T`)
    Required,
    /// Key must be present; `null` is a valid value (`Option<T>`)
    Nullable,
    /// Key may be missing, `null`, or hold a value (`Field<T>`)
    Optional,
}

/// Semantic type of a field, as far as the top-level JSON shape goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Any,
    Boolean,
    Integer,
    Number,
    String,
    List,
    Map,
    Record(&'static str),
    Union(&'static str),
}

impl Shape {
    /// Whether a JSON value of `kind` is structurally a candidate for this shape
    pub fn accepts(&self, kind: JsonKind) -> bool {
        match self {
            Shape::Any | Shape::Union(_) => true,
            Shape::Boolean => kind == JsonKind::Boolean,
            Shape::Integer | Shape::Number => kind == JsonKind::Number,
            Shape::String => kind == JsonKind::String,
            Shape::List => kind == JsonKind::Array,
            Shape::Map | Shape::Record(_) => kind == JsonKind::Object,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => write!(f, "any value"),
            Shape::Boolean => write!(f, "boolean"),
            Shape::Integer => write!(f, "integer"),
            Shape::Number => write!(f, "number"),
            Shape::String => write!(f, "string"),
            Shape::List => write!(f, "list"),
            Shape::Map => write!(f, "map"),
            Shape::Record(name) => write!(f, "{} object", name),
            Shape::Union(name) => write!(f, "{} union", name),
        }
    }
}

/// JSON value kind, used to report what was actually found on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Boolean => write!(f, "boolean"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
            JsonKind::Object => write!(f, "object"),
        }
    }
}

/// One declared field: wire key, presence mode and shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub presence: Presence,
    pub shape: Shape,
}

/// Ordered field table of a record type
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Look up a declared field by wire key
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Whether `key` belongs to a declared field rather than the overflow bag
    pub fn declares(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Wire keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    /// Keys that must be present on the wire
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.presence != Presence::Optional)
            .map(|f| f.key)
    }
}
