//! Particle designators (`:n`, `:n,p`, ...).

use std::fmt;

use crate::error::ValueError;

use super::Particle;

/// A particle designator: one or more particle codes joined by commas.
///
/// Designators follow a card or option mnemonic after a colon
/// (`imp:n,p`). At least one particle is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Designator(Vec<Particle>);

impl Designator {
    /// Create a designator from particles. Fails on an empty list.
    pub fn new(particles: Vec<Particle>) -> Result<Self, ValueError> {
        if particles.is_empty() {
            return Err(ValueError::new("designator", ""));
        }
        Ok(Designator(particles))
    }

    /// A single-particle designator.
    pub fn single(particle: Particle) -> Self {
        Designator(vec![particle])
    }

    /// Parse a designator from its textual form (`n`, `n,p`).
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let particles = text
            .split(',')
            .map(|part| {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Particle::from_code(c),
                    _ => Err(ValueError::new("particle code", part)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(particles)
    }

    /// The particles in this designator, in source order.
    pub fn particles(&self) -> &[Particle] {
        &self.0
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, particle) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{particle}")?;
        }
        Ok(())
    }
}

impl From<Particle> for Designator {
    fn from(particle: Particle) -> Self {
        Self::single(particle)
    }
}
