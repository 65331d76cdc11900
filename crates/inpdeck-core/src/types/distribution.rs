//! Source distribution references (`d1`, `d999`).

use std::fmt;

use crate::error::ValueError;

/// A reference to a source distribution by number (`d<n>`, n in 0..=999).
///
/// Distribution references appear as values of `sdef` keywords and tie a
/// source variable to an `si`/`sp`/`sb`/`ds` card with the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DistributionNumber(u32);

impl DistributionNumber {
    /// Create a distribution reference. The number must be in 0..=999.
    pub fn new(number: u32) -> Result<Self, ValueError> {
        if number > 999 {
            return Err(ValueError::new("distribution number", number.to_string()));
        }
        Ok(Self(number))
    }

    /// Parse the textual form `d<n>` (case-insensitive).
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let digits = text
            .strip_prefix('d')
            .or_else(|| text.strip_prefix('D'))
            .ok_or_else(|| ValueError::new("distribution reference", text.to_string()))?;
        let number: u32 = digits
            .parse()
            .map_err(|_| ValueError::new("distribution reference", text.to_string()))?;
        Self::new(number).map_err(|_| ValueError::new("distribution reference", text.to_string()))
    }

    /// The distribution number.
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DistributionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(DistributionNumber::parse("d5").unwrap().number(), 5);
        assert_eq!(DistributionNumber::parse("D12").unwrap().number(), 12);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(DistributionNumber::parse("5").is_err());
        assert!(DistributionNumber::parse("d").is_err());
        assert!(DistributionNumber::parse("d1000").is_err());
        assert!(DistributionNumber::parse("dx").is_err());
    }

    #[test]
    fn test_round_trip() {
        let d = DistributionNumber::new(42).unwrap();
        assert_eq!(DistributionNumber::parse(&d.to_string()).unwrap(), d);
    }
}
