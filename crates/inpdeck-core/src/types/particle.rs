//! Single-character MCNP particle codes.

use std::fmt;

use crate::error::ValueError;

/// A single MCNP particle code.
///
/// Codes are the one-character symbols from the MCNP6 particle table
/// (`n` neutron, `p` photon, `e` electron, `h` proton, and so on). The code
/// is stored lowercase; input is matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Particle(char);

/// Every symbol MCNP6 accepts in a designator position.
const CODES: &[char] = &[
    'n', 'q', 'p', 'e', 'f', '|', '!', 'u', '<', 'v', '>', 'h', 'g', '/', 'z', 'k', '?', '%',
    '^', 'b', '_', '~', 'c', 'w', '@', 'd', 't', 's', 'a', '*', '#', '+', '-', 'x', 'y', 'o',
    'l',
];

impl Particle {
    /// Neutron.
    pub const NEUTRON: Particle = Particle('n');
    /// Photon.
    pub const PHOTON: Particle = Particle('p');
    /// Electron.
    pub const ELECTRON: Particle = Particle('e');
    /// Proton.
    pub const PROTON: Particle = Particle('h');

    /// Parse a particle code, case-insensitively.
    pub fn from_code(code: char) -> Result<Self, ValueError> {
        let lower = code.to_ascii_lowercase();
        if CODES.contains(&lower) {
            Ok(Particle(lower))
        } else {
            Err(ValueError::new("particle code", code.to_string()))
        }
    }

    /// The canonical (lowercase) code character.
    pub fn code(&self) -> char {
        self.0
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
