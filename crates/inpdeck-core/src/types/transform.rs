//! Coordinate-transformation sub-records.
//!
//! A transformation is a displacement vector, an optional rotation matrix
//! given as 3, 6, or 9 entries, and an optional coordinate-system flag `m`
//! that may only follow a full rotation. The same sub-record appears on
//! `tr` cards, inline `trcl` cell options, and transformed `fill` options,
//! always selected by entry count: 3, 6, 9, 12, or 13.

use std::fmt;

use thiserror::Error;

use crate::error::SemanticError;

use super::Entry;

/// A displacement vector. Entries may be jumped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Entry<f64>,
    pub y: Entry<f64>,
    pub z: Entry<f64>,
}

impl Point {
    pub fn new(x: impl Into<Entry<f64>>, y: impl Into<Entry<f64>>, z: impl Into<Entry<f64>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// The rotation part of a transformation, by how much of the matrix is
/// spelled out.
#[derive(Debug, Clone, PartialEq)]
pub enum Rotation {
    /// No rotation entries; identity.
    None,
    /// First row only (3 entries).
    Row([Entry<f64>; 3]),
    /// First two rows (6 entries).
    TwoRows([Entry<f64>; 6]),
    /// The full matrix (9 entries).
    Full([Entry<f64>; 9]),
}

impl Rotation {
    fn entries(&self) -> Vec<Entry<f64>> {
        match self {
            Rotation::None => Vec::new(),
            Rotation::Row(r) => r.to_vec(),
            Rotation::TwoRows(r) => r.to_vec(),
            Rotation::Full(r) => r.to_vec(),
        }
    }
}

/// Failure to assemble a transformation from raw entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// No variation takes this many entries.
    #[error("transformation takes 3, 6, 9, 12, or 13 entries, got {count}")]
    NoVariantMatched { count: usize },

    /// An entry failed its restriction.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// A complete transformation sub-record.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    displacement: Point,
    rotation: Rotation,
    system: Option<i64>,
}

impl Transformation {
    /// Create a transformation.
    ///
    /// The `m` flag must be -1 or 1 and may only accompany a full rotation
    /// matrix.
    pub fn new(
        displacement: Point,
        rotation: Rotation,
        system: Option<i64>,
    ) -> Result<Self, SemanticError> {
        if let Some(m) = system {
            if m != 1 && m != -1 {
                return Err(SemanticError::card("transformation", "m", m));
            }
            if !matches!(rotation, Rotation::Full(_)) {
                return Err(SemanticError::card("transformation", "m", m));
            }
        }
        Ok(Self {
            displacement,
            rotation,
            system,
        })
    }

    /// Assemble a transformation from a flat entry list, selecting the
    /// variation by count (3, 6, 9, 12, or 13 entries).
    pub fn from_entries(entries: &[Entry<f64>]) -> Result<Self, TransformError> {
        let displacement = match entries {
            [x, y, z, ..] => Point::new(*x, *y, *z),
            _ => {
                return Err(TransformError::NoVariantMatched {
                    count: entries.len(),
                });
            }
        };
        let rest = &entries[3..];
        let (rotation, system) = match rest.len() {
            0 => (Rotation::None, None),
            3 => (Rotation::Row(rest.try_into().unwrap()), None),
            6 => (Rotation::TwoRows(rest.try_into().unwrap()), None),
            9 => (Rotation::Full(rest.try_into().unwrap()), None),
            10 => {
                // The system flag selects between two interpretations of the
                // whole card, so it cannot be jumped.
                let m = match rest[9] {
                    Entry::Value(v) if v == 1.0 || v == -1.0 => v as i64,
                    Entry::Value(v) => {
                        return Err(SemanticError::card("transformation", "m", v).into());
                    }
                    Entry::Jump => {
                        return Err(SemanticError::card("transformation", "m", "j").into());
                    }
                };
                (Rotation::Full(rest[..9].try_into().unwrap()), Some(m))
            }
            _ => {
                return Err(TransformError::NoVariantMatched {
                    count: entries.len(),
                });
            }
        };
        Self::new(displacement, rotation, system).map_err(Into::into)
    }

    pub fn displacement(&self) -> &Point {
        &self.displacement
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn system(&self) -> Option<i64> {
        self.system
    }

    /// The flat entry list in card order.
    pub fn entries(&self) -> Vec<Entry<f64>> {
        let mut entries = vec![self.displacement.x, self.displacement.y, self.displacement.z];
        entries.extend(self.rotation.entries());
        if let Some(m) = self.system {
            entries.push(Entry::Value(m as f64));
        }
        entries
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[f64]) -> Vec<Entry<f64>> {
        v.iter().copied().map(Entry::Value).collect()
    }

    #[test]
    fn test_displacement_only() {
        let t = Transformation::from_entries(&values(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(t.rotation(), &Rotation::None);
        assert_eq!(t.to_string(), "1 2 3");
    }

    #[test]
    fn test_variation_by_count() {
        assert!(Transformation::from_entries(&values(&[1.0; 6])).is_ok());
        assert!(Transformation::from_entries(&values(&[1.0; 9])).is_ok());
        assert!(Transformation::from_entries(&values(&[1.0; 12])).is_ok());
        assert!(matches!(
            Transformation::from_entries(&values(&[1.0; 4])),
            Err(TransformError::NoVariantMatched { count: 4 })
        ));
        assert!(matches!(
            Transformation::from_entries(&values(&[1.0; 14])),
            Err(TransformError::NoVariantMatched { count: 14 })
        ));
    }

    #[test]
    fn test_full_with_system_flag() {
        let mut entries = values(&[0.0; 12]);
        entries.push(Entry::Value(-1.0));
        let t = Transformation::from_entries(&entries).unwrap();
        assert_eq!(t.system(), Some(-1));
    }

    #[test]
    fn test_system_flag_restriction() {
        let mut entries = values(&[0.0; 12]);
        entries.push(Entry::Value(2.0));
        assert!(matches!(
            Transformation::from_entries(&entries),
            Err(TransformError::Semantic(_))
        ));
    }

    #[test]
    fn test_jumped_entries_allowed() {
        let entries = vec![Entry::Jump, Entry::Value(1.0), Entry::Jump];
        let t = Transformation::from_entries(&entries).unwrap();
        assert_eq!(t.to_string(), "j 1 j");
    }

    #[test]
    fn test_entries_round_trip() {
        let entries = values(&[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let t = Transformation::from_entries(&entries).unwrap();
        assert_eq!(Transformation::from_entries(&t.entries()).unwrap(), t);
    }
}
