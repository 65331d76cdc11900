//! Cell cards.
//!
//! A cell card is `n m [d] geometry options...`: cell number, material
//! number, density (present exactly when the material is non-void), a
//! geometry expression over surface numbers, and a trailing vocabulary of
//! per-cell options ([`option`] module).

pub mod option;

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Geometry};

pub use option::CellOption;

/// A complete cell card.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    number: i64,
    material: i64,
    density: Option<f64>,
    geometry: Geometry,
    options: Vec<CellOption>,
}

impl Cell {
    /// Create a cell card.
    ///
    /// The cell number must be in 1..=99_999_999 and the material number in
    /// 0..=99_999_999. A density entry is required exactly when the material
    /// is non-void (non-zero); its value is otherwise unrestricted, as the
    /// governing schema leaves the density restriction unspecified.
    pub fn new(
        number: i64,
        material: i64,
        density: Option<f64>,
        geometry: Geometry,
        options: Vec<CellOption>,
    ) -> Result<Self, SemanticError> {
        if !(1..=99_999_999).contains(&number) {
            return Err(SemanticError::card("cell", "number", number));
        }
        if !(0..=99_999_999).contains(&material) {
            return Err(SemanticError::card("cell", "material", material));
        }
        match (material, density) {
            (0, Some(d)) => return Err(SemanticError::card("cell", "density", d)),
            (m, None) if m != 0 => {
                return Err(SemanticError::card("cell", "density", "missing"));
            }
            _ => {}
        }
        Ok(Self {
            number,
            material,
            density,
            geometry,
            options,
        })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn material(&self) -> i64 {
        self.material
    }

    pub fn density(&self) -> Option<f64> {
        self.density
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn options(&self) -> &[CellOption] {
        &self.options
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.material)?;
        if let Some(density) = self.density {
            write!(f, " {}", format_real(density))?;
        }
        write!(f, " {}", self.geometry)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}
