//! Cell geometry expressions.

use std::fmt;

use crate::error::ValueError;

/// A cell geometry expression over signed surface numbers.
///
/// Blanks are intersection, `:` is union, `#` is complement, and
/// parentheses group. The expression is stored in normalized token form
/// (single spaces between operands, no space around `:` and `#`).
///
/// Beyond token shape and balanced parentheses, no restriction is enforced:
/// the governing schema leaves geometry validation unspecified, so this type
/// deliberately does not guess one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Geometry(String);

impl Geometry {
    /// Create a geometry expression from normalized text.
    ///
    /// The text must be non-empty, contain only surface numbers and the
    /// operators `: # ( )`, and have balanced parentheses.
    pub fn new(text: impl Into<String>) -> Result<Self, ValueError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValueError::new("geometry", text));
        }
        let mut depth: i32 = 0;
        for c in text.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(ValueError::new("geometry", text));
                    }
                }
                '0'..='9' | '-' | '+' | ':' | '#' | ' ' => {}
                _ => return Err(ValueError::new("geometry", text)),
            }
        }
        if depth != 0 {
            return Err(ValueError::new("geometry", text));
        }
        Ok(Geometry(text))
    }

    /// The normalized expression text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_expressions() {
        assert!(Geometry::new("-7").is_ok());
        assert!(Geometry::new("1 -2").is_ok());
        assert!(Geometry::new("(-7:8) #5").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_unbalanced() {
        assert!(Geometry::new("").is_err());
        assert!(Geometry::new("  ").is_err());
        assert!(Geometry::new("(1 -2").is_err());
        assert!(Geometry::new("1) (2").is_err());
        assert!(Geometry::new("1 & 2").is_err());
    }
}
