//! Nuclide identifiers (`ZZZAAA[.library]`).

use std::fmt;

use crate::error::ValueError;

/// A nuclide identifier: atomic number, mass number, optional library id.
///
/// The textual form is `ZZZAAA` with an optional `.library` suffix, e.g.
/// `1001.70c` for H-1 from the ENDF/B-VII.0 continuous-energy library.
/// A mass number of zero denotes the natural element (`6000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zaid {
    z: u32,
    a: u32,
    library: Option<String>,
}

impl Zaid {
    /// Create a nuclide identifier.
    ///
    /// `z` must be a real element (1..=118), `a` fits in the three-digit
    /// AAA field, and a library suffix must be alphanumeric.
    pub fn new(z: u32, a: u32, library: Option<String>) -> Result<Self, ValueError> {
        if !(1..=118).contains(&z) {
            return Err(ValueError::new("atomic number", z.to_string()));
        }
        if a > 999 {
            return Err(ValueError::new("mass number", a.to_string()));
        }
        if let Some(lib) = &library {
            if lib.is_empty() || !lib.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ValueError::new("library identifier", lib.clone()));
            }
        }
        Ok(Self {
            z,
            a,
            library: library.map(|l| l.to_ascii_lowercase()),
        })
    }

    /// Parse a nuclide identifier from its textual form.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let (za, library) = match text.split_once('.') {
            Some((za, lib)) => (za, Some(lib.to_string())),
            None => (text, None),
        };
        let za: u32 = za
            .parse()
            .map_err(|_| ValueError::new("zaid", text.to_string()))?;
        Self::new(za / 1000, za % 1000, library)
            .map_err(|_| ValueError::new("zaid", text.to_string()))
    }

    /// Atomic number.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Mass number (zero for the natural element).
    pub fn a(&self) -> u32 {
        self.a
    }

    /// Library suffix, if any.
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }
}

impl fmt::Display for Zaid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.z, self.a)?;
        if let Some(lib) = &self.library {
            write!(f, ".{lib}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_library() {
        let zaid = Zaid::parse("1001.70c").unwrap();
        assert_eq!(zaid.z(), 1);
        assert_eq!(zaid.a(), 1);
        assert_eq!(zaid.library(), Some("70c"));
        assert_eq!(zaid.to_string(), "1001.70c");
    }

    #[test]
    fn test_parse_natural_element() {
        let zaid = Zaid::parse("6000").unwrap();
        assert_eq!(zaid.z(), 6);
        assert_eq!(zaid.a(), 0);
        assert_eq!(zaid.to_string(), "6000");
    }

    #[test]
    fn test_parse_heavy_nuclide() {
        let zaid = Zaid::parse("92235.80c").unwrap();
        assert_eq!(zaid.z(), 92);
        assert_eq!(zaid.a(), 235);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Zaid::parse("abc").is_err());
        assert!(Zaid::parse("0001").is_err());
        assert!(Zaid::parse("120001").is_err());
        assert!(Zaid::parse("1001.").is_err());
        assert!(Zaid::parse("1001.7 c").is_err());
    }

    #[test]
    fn test_round_trip() {
        for text in ["1001.70c", "6000", "92235.80c", "8016"] {
            let zaid = Zaid::parse(text).unwrap();
            assert_eq!(Zaid::parse(&zaid.to_string()).unwrap(), zaid);
        }
    }
}
