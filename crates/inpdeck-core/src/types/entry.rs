//! Jumpable numeric entries.

use std::fmt;

/// A numeric field that may be elided with the jump token `j`.
///
/// MCNP allows any positional numeric entry to be replaced by the literal
/// `j`, meaning "use the default for this slot". A jumped field is
/// structurally absent rather than a value, so every restriction predicate
/// treats it as unconditionally valid; see [`Entry::satisfies`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<T> {
    /// The field was jumped with `j`; MCNP supplies its default.
    Jump,
    /// An explicit value.
    Value(T),
}

impl<T> Entry<T> {
    /// Returns the explicit value, if the field was not jumped.
    pub fn value(&self) -> Option<&T> {
        match self {
            Entry::Jump => None,
            Entry::Value(v) => Some(v),
        }
    }

    /// Returns `true` if the field was jumped.
    pub fn is_jump(&self) -> bool {
        matches!(self, Entry::Jump)
    }

    /// Apply a restriction predicate to the entry.
    ///
    /// A jumped entry satisfies every restriction: there is no value to
    /// validate, and MCNP's default is valid by definition.
    pub fn satisfies(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Entry::Jump => true,
            Entry::Value(v) => predicate(v),
        }
    }
}

impl<T> From<T> for Entry<T> {
    fn from(value: T) -> Self {
        Entry::Value(value)
    }
}

impl fmt::Display for Entry<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Jump => write!(f, "j"),
            Entry::Value(v) => write!(f, "{}", super::format_real(*v)),
        }
    }
}

impl fmt::Display for Entry<i64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Jump => write!(f, "j"),
            Entry::Value(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_satisfies_any_restriction() {
        let jump: Entry<f64> = Entry::Jump;
        assert!(jump.satisfies(|v| *v >= 0.0));
        assert!(jump.satisfies(|_| false));
    }

    #[test]
    fn test_value_applies_restriction() {
        let value = Entry::Value(-1.0);
        assert!(!value.satisfies(|v| *v >= 0.0));
        assert!(value.satisfies(|v| *v == -1.0 || *v >= 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Entry::<f64>::Jump.to_string(), "j");
        assert_eq!(Entry::Value(1.5).to_string(), "1.5");
        assert_eq!(Entry::Value(42i64).to_string(), "42");
    }

    #[test]
    fn test_value_accessor() {
        assert_eq!(Entry::Value(3i64).value(), Some(&3));
        assert_eq!(Entry::<i64>::Jump.value(), None);
        assert!(Entry::<i64>::Jump.is_jump());
    }
}
