//! `tr` coordinate-transformation cards.

use std::fmt;

use crate::error::SemanticError;
use crate::types::{Entry, Transformation, TransformError};

/// A `tr<n>` / `*tr<n>` card: a numbered coordinate transformation.
///
/// The `*` marker switches the rotation entries from cosines to degrees.
/// The transformation body follows the same 3/6/9/12/13-entry variations as
/// inline `trcl` transformations.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    degrees: bool,
    number: i64,
    transformation: Transformation,
}

impl CoordinateTransform {
    /// Create a `tr` card. The number must be in 1..=999.
    pub fn new(
        degrees: bool,
        number: i64,
        transformation: Transformation,
    ) -> Result<Self, SemanticError> {
        if !(1..=999).contains(&number) {
            return Err(SemanticError::card("tr", "number", number));
        }
        Ok(Self {
            degrees,
            number,
            transformation,
        })
    }

    /// Assemble from a flat entry list, selecting the variation by count.
    pub fn from_entries(
        degrees: bool,
        number: i64,
        entries: &[Entry<f64>],
    ) -> Result<Self, TransformError> {
        let transformation = Transformation::from_entries(entries)?;
        Self::new(degrees, number, transformation).map_err(Into::into)
    }

    pub fn degrees(&self) -> bool {
        self.degrees
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }
}

impl fmt::Display for CoordinateTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.degrees {
            write!(f, "*")?;
        }
        write!(f, "tr{} {}", self.number, self.transformation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[f64]) -> Vec<Entry<f64>> {
        v.iter().copied().map(Entry::Value).collect()
    }

    #[test]
    fn test_displacement_card() {
        let tr = CoordinateTransform::from_entries(false, 5, &values(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(tr.to_string(), "tr5 1 2 3");
    }

    #[test]
    fn test_degrees_marker() {
        let tr = CoordinateTransform::from_entries(true, 1, &values(&[0.0, 0.0, 0.0])).unwrap();
        assert_eq!(tr.to_string(), "*tr1 0 0 0");
    }

    #[test]
    fn test_number_range() {
        assert!(CoordinateTransform::from_entries(false, 0, &values(&[0.0; 3])).is_err());
        assert!(CoordinateTransform::from_entries(false, 1000, &values(&[0.0; 3])).is_err());
    }

    #[test]
    fn test_entry_count_dispatch() {
        assert!(CoordinateTransform::from_entries(false, 1, &values(&[0.0; 13])).is_err());
        let mut entries = values(&[0.0; 12]);
        entries.push(Entry::Value(1.0));
        assert!(CoordinateTransform::from_entries(false, 1, &entries).is_ok());
        assert!(matches!(
            CoordinateTransform::from_entries(false, 1, &values(&[0.0; 5])),
            Err(TransformError::NoVariantMatched { count: 5 })
        ));
    }
}
