//! Error codes for the INP diagnostic system.
//!
//! Codes are organized by phase:
//! - `E1xx` - card parsing errors (token shape)
//! - `E2xx` - semantic errors (values that parsed but violate a restriction)
//! - `E3xx` - deck assembly errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Card parsing errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// A card held a token that does not fit its grammar at that position,
    /// including words that fail to parse as the expected primitive type.
    E100,

    /// Incomplete card.
    ///
    /// The card ended before a complete record was parsed.
    E101,

    /// Unknown mnemonic.
    ///
    /// The leading word of the card is not a recognized card mnemonic.
    E102,

    /// No card variation matched.
    ///
    /// The mnemonic is known, but no variation of the card accepts this
    /// entry shape (usually a wrong entry count).
    E103,

    // =========================================================================
    // Semantic errors (E2xx)
    // =========================================================================
    /// Invalid card value.
    ///
    /// A value parsed but violates the restriction of the card attribute
    /// holding it.
    E200,

    /// Invalid option value.
    ///
    /// A value parsed but violates the restriction of a nested option
    /// attribute.
    E201,

    // =========================================================================
    // Deck assembly errors (E3xx)
    // =========================================================================
    /// Malformed deck structure.
    ///
    /// The deck is missing a block, the message block is unterminated, or
    /// the title card is absent.
    E300,

    /// Duplicate cell number.
    E301,

    /// Duplicate surface number.
    E302,
}

impl ErrorCode {
    /// The numeric code as a string (e.g. "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// A short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete card",
            ErrorCode::E102 => "unknown mnemonic",
            ErrorCode::E103 => "no card variation matched",
            ErrorCode::E200 => "invalid card value",
            ErrorCode::E201 => "invalid option value",
            ErrorCode::E300 => "malformed deck structure",
            ErrorCode::E301 => "duplicate cell number",
            ErrorCode::E302 => "duplicate surface number",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E301.to_string(), "E301");
    }

    #[test]
    fn test_description() {
        assert_eq!(ErrorCode::E102.description(), "unknown mnemonic");
        assert_eq!(ErrorCode::E200.description(), "invalid card value");
    }
}
