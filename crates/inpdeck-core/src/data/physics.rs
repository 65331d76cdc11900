//! Problem-type and physics cards (`mode`, `phys`, `cut`, `tmp`).

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Designator, Entry, Particle};

/// A `mode` card: the particle types transported in the problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    particles: Vec<Particle>,
}

impl Mode {
    pub fn new(particles: Vec<Particle>) -> Result<Self, SemanticError> {
        if particles.is_empty() {
            return Err(SemanticError::card("mode", "particles", "empty"));
        }
        for (i, particle) in particles.iter().enumerate() {
            if particles[..i].contains(particle) {
                return Err(SemanticError::card("mode", "particle", *particle));
            }
        }
        Ok(Self { particles })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode")?;
        for particle in &self.particles {
            write!(f, " {particle}")?;
        }
        Ok(())
    }
}

/// A `phys:<d>` energy-physics card.
///
/// The designator picks the entry layout: `phys:n` takes up to 7 entries,
/// `phys:p` up to 4, `phys:e` up to 12. Entries beyond the leading energy
/// limit are model switches whose meanings differ per particle; all are
/// jumpable and carried positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Physics {
    particle: Particle,
    entries: Vec<Entry<f64>>,
}

impl Physics {
    pub fn new(particle: Particle, entries: Vec<Entry<f64>>) -> Result<Self, SemanticError> {
        let limit = match particle {
            Particle::NEUTRON => 7,
            Particle::PHOTON => 4,
            Particle::ELECTRON => 12,
            other => return Err(SemanticError::card("phys", "particle", other)),
        };
        if entries.is_empty() || entries.len() > limit {
            return Err(SemanticError::card("phys", "entries", entries.len()));
        }
        Ok(Self { particle, entries })
    }

    pub fn particle(&self) -> Particle {
        self.particle
    }

    pub fn entries(&self) -> &[Entry<f64>] {
        &self.entries
    }
}

impl fmt::Display for Physics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phys:{}", self.particle)?;
        for entry in &self.entries {
            write!(f, " {entry}")?;
        }
        Ok(())
    }
}

/// A `cut:<d>` cutoff card: time, energy, and weight cutoffs, all jumpable.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutoff {
    designator: Designator,
    entries: Vec<Entry<f64>>,
}

impl Cutoff {
    /// Create a cutoff card: 1 to 5 entries, positionally `t e wc1 wc2
    /// swtm`.
    pub fn new(designator: Designator, entries: Vec<Entry<f64>>) -> Result<Self, SemanticError> {
        if entries.is_empty() || entries.len() > 5 {
            return Err(SemanticError::card("cut", "entries", entries.len()));
        }
        Ok(Self {
            designator,
            entries,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn entries(&self) -> &[Entry<f64>] {
        &self.entries
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cut:{}", self.designator)?;
        for entry in &self.entries {
            write!(f, " {entry}")?;
        }
        Ok(())
    }
}

/// A `tmp<n>` cell-temperature data card: one temperature per cell at the
/// time index `n`, each strictly positive (MeV).
#[derive(Debug, Clone, PartialEq)]
pub struct CellTemperatures {
    suffix: Option<i64>,
    temperatures: Vec<f64>,
}

impl CellTemperatures {
    pub fn new(suffix: Option<i64>, temperatures: Vec<f64>) -> Result<Self, SemanticError> {
        if let Some(s) = suffix {
            if s < 1 {
                return Err(SemanticError::card("tmp", "suffix", s));
            }
        }
        if temperatures.is_empty() {
            return Err(SemanticError::card("tmp", "temperatures", "empty"));
        }
        for t in &temperatures {
            if *t <= 0.0 {
                return Err(SemanticError::card("tmp", "temperature", *t));
            }
        }
        Ok(Self {
            suffix,
            temperatures,
        })
    }

    pub fn suffix(&self) -> Option<i64> {
        self.suffix
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }
}

impl fmt::Display for CellTemperatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tmp")?;
        if let Some(s) = self.suffix {
            write!(f, "{s}")?;
        }
        for t in &self.temperatures {
            write!(f, " {}", format_real(*t))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        let mode = Mode::new(vec![Particle::NEUTRON, Particle::PHOTON]).unwrap();
        assert_eq!(mode.to_string(), "mode n p");
    }

    #[test]
    fn test_mode_rejects_duplicates() {
        assert!(Mode::new(vec![Particle::NEUTRON, Particle::NEUTRON]).is_err());
        assert!(Mode::new(Vec::new()).is_err());
    }

    #[test]
    fn test_physics_entry_limits() {
        let entries = |n: usize| vec![Entry::Value(1.0); n];
        assert!(Physics::new(Particle::NEUTRON, entries(7)).is_ok());
        assert!(Physics::new(Particle::NEUTRON, entries(8)).is_err());
        assert!(Physics::new(Particle::PHOTON, entries(4)).is_ok());
        assert!(Physics::new(Particle::PHOTON, entries(5)).is_err());
        assert!(Physics::new(Particle::ELECTRON, entries(12)).is_ok());
        assert!(Physics::new(Particle::PROTON, entries(1)).is_err());
    }

    #[test]
    fn test_cutoff_jumps() {
        let designator = Designator::single(Particle::NEUTRON);
        let cut = Cutoff::new(
            designator,
            vec![Entry::Jump, Entry::Value(1e-4), Entry::Jump],
        )
        .unwrap();
        assert_eq!(cut.to_string(), "cut:n j 0.0001 j");
    }

    #[test]
    fn test_temperatures_positive() {
        assert!(CellTemperatures::new(None, vec![2.53e-8]).is_ok());
        assert!(CellTemperatures::new(None, vec![0.0]).is_err());
        assert!(CellTemperatures::new(Some(0), vec![1.0]).is_err());
    }
}
