//! Error types for card and value validation.
//!
//! Two failure categories exist at this level:
//!
//! - [`ValueError`] - a token could not be coerced to its primitive type
//!   (non-numeric text where a real is expected, an unknown particle code).
//! - [`SemanticError`] - a value parsed but violated the restriction of the
//!   attribute holding it. Card-level and option-level violations are kept
//!   apart so callers can report them against the right element.
//!
//! Both carry the offending value and enough identity (record and attribute
//! name) for a caller to build a readable diagnostic.

use thiserror::Error;

/// A token could not be coerced to its declared primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {expected}: `{text}`")]
pub struct ValueError {
    /// The primitive type that was expected (e.g. "real", "particle code").
    pub expected: &'static str,
    /// The offending raw text.
    pub text: String,
}

impl ValueError {
    /// Create a new value error.
    pub fn new(expected: &'static str, text: impl Into<String>) -> Self {
        Self {
            expected,
            text: text.into(),
        }
    }
}

/// A restriction violation raised during record construction.
///
/// Records are either fully valid or fail to construct; this error names the
/// record, the attribute, and the offending value. The two variants
/// distinguish top-level cards from nested options so a dispatcher can tell
/// "wrong card shape" (never this error) from "right shape, bad value"
/// (always this error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A top-level card attribute failed its restriction.
    #[error("card `{card}`: attribute `{attribute}` has invalid value `{value}`")]
    Card {
        card: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// A nested option attribute failed its restriction.
    #[error("option `{option}`: attribute `{attribute}` has invalid value `{value}`")]
    Option {
        option: &'static str,
        attribute: &'static str,
        value: String,
    },
}

impl SemanticError {
    /// Create a card-level semantic error.
    pub fn card(card: &'static str, attribute: &'static str, value: impl ToString) -> Self {
        Self::Card {
            card,
            attribute,
            value: value.to_string(),
        }
    }

    /// Create an option-level semantic error.
    pub fn option(option: &'static str, attribute: &'static str, value: impl ToString) -> Self {
        Self::Option {
            option,
            attribute,
            value: value.to_string(),
        }
    }

    /// The record type name this error was raised against.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Card { card, .. } => card,
            Self::Option { option, .. } => option,
        }
    }

    /// The attribute whose restriction failed.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Card { attribute, .. } | Self::Option { attribute, .. } => attribute,
        }
    }

    /// The offending value, formatted.
    pub fn value(&self) -> &str {
        match self {
            Self::Card { value, .. } | Self::Option { value, .. } => value,
        }
    }

    /// Whether this violation was raised by a nested option.
    pub fn is_option(&self) -> bool {
        matches!(self, Self::Option { .. })
    }
}

impl From<ValueError> for SemanticError {
    /// Primitive failures have no independent error channel; they surface at
    /// the owning record's level as a card-category violation.
    fn from(err: ValueError) -> Self {
        Self::Card {
            card: "value",
            attribute: err.expected,
            value: err.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_error_display() {
        let err = SemanticError::card("imp", "importance", -1.0);
        assert_eq!(
            err.to_string(),
            "card `imp`: attribute `importance` has invalid value `-1`"
        );
        assert!(!err.is_option());
    }

    #[test]
    fn test_option_error_accessors() {
        let err = SemanticError::option("wwn", "bound", -2.0);
        assert_eq!(err.element(), "wwn");
        assert_eq!(err.attribute(), "bound");
        assert_eq!(err.value(), "-2");
        assert!(err.is_option());
    }

    #[test]
    fn test_value_error_display() {
        let err = ValueError::new("real", "abc");
        assert_eq!(err.to_string(), "invalid real: `abc`");
    }
}
