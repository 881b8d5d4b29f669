//! Decode errors

use std::fmt;
use thiserror::Error;

use super::schema::{JsonKind, Shape};

/// Why a field failed to decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Required key not on the wire
    Missing,
    /// Key present with `null` where a value is required
    UnexpectedNull,
    /// Value of the wrong JSON kind
    Shape { expected: Shape, found: JsonKind },
    /// Number does not fit the declared integer type
    OutOfRange { expected: Shape },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Missing => write!(f, "is missing"),
            Reason::UnexpectedNull => write!(f, "is null"),
            Reason::Shape { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Reason::OutOfRange { expected } => write!(f, "is out of range for {}", expected),
        }
    }
}

/// A decoded payload did not match the declared schema of a record.
///
/// `field` is a path relative to `record`, e.g. `spec.runtime.image` or
/// `flavors[1].name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation in {record}: field `{field}` {reason}")]
pub struct SchemaViolation {
    pub record: &'static str,
    pub field: String,
    pub reason: Reason,
}

/// Failure of a single value conversion, before it is attributed to a record.
///
/// `path` holds the segments below the value that failed (`.key`, `[index]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub reason: Reason,
}

impl Mismatch {
    pub fn new(reason: Reason) -> Self {
        Self {
            path: String::new(),
            reason,
        }
    }

    pub fn shape(expected: Shape, found: JsonKind) -> Self {
        Self::new(Reason::Shape { expected, found })
    }

    /// Prefix with a list index
    pub fn at_index(mut self, index: usize) -> Self {
        self.path = format!("[{}]{}", index, self.path);
        self
    }

    /// Prefix with a map key
    pub fn at_key(mut self, key: &str) -> Self {
        self.path = format!(".{}{}", key, self.path);
        self
    }

    /// Re-attribute a nested record's violation to the enclosing value
    pub fn from_violation(violation: SchemaViolation) -> Self {
        Self {
            path: format!(".{}", violation.field),
            reason: violation.reason,
        }
    }

    /// Attribute to `key` of `record`
    pub fn into_violation(self, record: &'static str, key: &str) -> SchemaViolation {
        SchemaViolation {
            record,
            field: format!("{}{}", key, self.path),
            reason: self.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path_formatting() {
        let inner = Mismatch::new(Reason::Missing)
            .into_violation("Runtime", "image");
        let outer = Mismatch::from_violation(inner)
            .into_violation("AgentSpec", "runtime");
        let top = Mismatch::from_violation(outer)
            .at_index(2)
            .into_violation("ModelWithDeployments", "deployments");

        assert_eq!(top.field, "deployments[2].runtime.image");
        assert_eq!(top.record, "ModelWithDeployments");
        assert_eq!(
            top.to_string(),
            "schema violation in ModelWithDeployments: field `deployments[2].runtime.image` is missing"
        );
    }
}
