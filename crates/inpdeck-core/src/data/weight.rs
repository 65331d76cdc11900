//! Variance-reduction cards (`imp`, `wwe`, `wwn`, `wwp`).

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Designator, Entry};

/// An `imp:<d>` data card: one importance per cell, in cell-block order,
/// each >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CellImportances {
    designator: Designator,
    importances: Vec<f64>,
}

impl CellImportances {
    pub fn new(designator: Designator, importances: Vec<f64>) -> Result<Self, SemanticError> {
        if importances.is_empty() {
            return Err(SemanticError::card("imp", "importances", "empty"));
        }
        for v in &importances {
            if *v < 0.0 {
                return Err(SemanticError::card("imp", "importance", *v));
            }
        }
        Ok(Self {
            designator,
            importances,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn importances(&self) -> &[f64] {
        &self.importances
    }
}

impl fmt::Display for CellImportances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "imp:{}", self.designator)?;
        for v in &self.importances {
            write!(f, " {}", format_real(*v))?;
        }
        Ok(())
    }
}

/// A `wwe:<d>` weight-window energy-bound card.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowEnergies {
    designator: Designator,
    bounds: Vec<f64>,
}

impl WindowEnergies {
    pub fn new(designator: Designator, bounds: Vec<f64>) -> Result<Self, SemanticError> {
        if bounds.is_empty() {
            return Err(SemanticError::card("wwe", "bounds", "empty"));
        }
        Ok(Self {
            designator,
            bounds,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
}

impl fmt::Display for WindowEnergies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wwe:{}", self.designator)?;
        for v in &self.bounds {
            write!(f, " {}", format_real(*v))?;
        }
        Ok(())
    }
}

/// A `wwn<i>:<d>` weight-window lower-bound card: one bound per cell for
/// energy interval `i`; each bound is -1 (no game) or >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBounds {
    suffix: i64,
    designator: Designator,
    bounds: Vec<Entry<f64>>,
}

impl WindowBounds {
    pub fn new(
        suffix: i64,
        designator: Designator,
        bounds: Vec<Entry<f64>>,
    ) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::card("wwn", "suffix", suffix));
        }
        if bounds.is_empty() {
            return Err(SemanticError::card("wwn", "bounds", "empty"));
        }
        for bound in &bounds {
            if !bound.satisfies(|v| *v == -1.0 || *v >= 0.0) {
                return Err(SemanticError::card("wwn", "bound", *bound));
            }
        }
        Ok(Self {
            suffix,
            designator,
            bounds,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn bounds(&self) -> &[Entry<f64>] {
        &self.bounds
    }
}

impl fmt::Display for WindowBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wwn{}:{}", self.suffix, self.designator)?;
        for bound in &self.bounds {
            write!(f, " {bound}")?;
        }
        Ok(())
    }
}

/// A `wwp:<d>` weight-window parameter card.
///
/// Positionally `wupn wsurvn mxspln`, all jumpable: the upper-bound
/// multiplier (>= 2), survival weight multiplier (> 1), and maximum split
/// count (> 1).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowParameters {
    designator: Designator,
    wupn: Entry<f64>,
    wsurvn: Entry<f64>,
    mxspln: Entry<f64>,
}

impl WindowParameters {
    pub fn new(
        designator: Designator,
        wupn: impl Into<Entry<f64>>,
        wsurvn: impl Into<Entry<f64>>,
        mxspln: impl Into<Entry<f64>>,
    ) -> Result<Self, SemanticError> {
        let wupn = wupn.into();
        let wsurvn = wsurvn.into();
        let mxspln = mxspln.into();
        if !wupn.satisfies(|v| *v >= 2.0) {
            return Err(SemanticError::card("wwp", "wupn", wupn));
        }
        if !wsurvn.satisfies(|v| *v > 1.0) {
            return Err(SemanticError::card("wwp", "wsurvn", wsurvn));
        }
        if !mxspln.satisfies(|v| *v > 1.0) {
            return Err(SemanticError::card("wwp", "mxspln", mxspln));
        }
        Ok(Self {
            designator,
            wupn,
            wsurvn,
            mxspln,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn wupn(&self) -> Entry<f64> {
        self.wupn
    }

    pub fn wsurvn(&self) -> Entry<f64> {
        self.wsurvn
    }

    pub fn mxspln(&self) -> Entry<f64> {
        self.mxspln
    }
}

impl fmt::Display for WindowParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wwp:{} {} {} {}",
            self.designator, self.wupn, self.wsurvn, self.mxspln
        )
    }
}
