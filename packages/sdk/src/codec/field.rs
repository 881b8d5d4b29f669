//! Tri-state optional field value

use std::mem;

/// Value of an optional field.
///
/// `Absent` means the key was not on the wire (and will not be written),
/// `Null` means the key was present with `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<T> Field<T> {
    /// `Some(v)` becomes `Present(v)`, `None` becomes `Absent`
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// The held value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Present(v) => Field::Present(v),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Present(v) => Field::Present(f(v)),
        }
    }

    /// Replace with `Absent`, returning the previous state
    pub fn take(&mut self) -> Field<T> {
        mem::take(self)
    }

    /// Mutable access to the value, inserting one first if absent or null
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if !self.is_present() {
            *self = Field::Present(f());
        }
        match self {
            Field::Present(v) => v,
            _ => unreachable!("field was just set to Present"),
        }
    }
}

impl<T: AsRef<str>> Field<T> {
    /// Borrow a string value, treating absent and null alike
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(|v| v.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_distinct() {
        let absent: Field<String> = Field::default();
        let null: Field<String> = Field::Null;
        let present = Field::from("x".to_string());

        assert!(absent.is_absent());
        assert!(null.is_null());
        assert_ne!(absent, null);
        assert_eq!(present.as_deref(), Some("x"));
        assert_eq!(null.as_deref(), None);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut field: Field<Vec<String>> = Field::Null;
        field.get_or_insert_with(Vec::new).push("a".into());
        assert_eq!(field, Field::Present(vec!["a".to_string()]));
    }
}
