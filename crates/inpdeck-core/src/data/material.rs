//! Material cards (`m`, `mt`).

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Zaid};

/// One constituent of a material: a nuclide and its fraction.
///
/// Positive fractions are atom fractions, negative fractions are weight
/// fractions. A fraction of zero is meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct Substance {
    zaid: Zaid,
    fraction: f64,
}

impl Substance {
    pub fn new(zaid: Zaid, fraction: f64) -> Result<Self, SemanticError> {
        if fraction == 0.0 {
            return Err(SemanticError::card("m", "fraction", fraction));
        }
        Ok(Self { zaid, fraction })
    }

    pub fn zaid(&self) -> &Zaid {
        &self.zaid
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// A keyword option on an `m` card.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialOption {
    /// `gas v` - gaseous state flag, v in {0, 1}.
    Gas(i64),
    /// `estep v` - electron sub-step count, v >= 0.
    Estep(i64),
    /// `cond v` - conductor flag.
    Cond(f64),
    /// `nlib id` - default neutron table library.
    Nlib(String),
    /// `plib id` - default photoatomic table library.
    Plib(String),
    /// `pnlib id` - default photonuclear table library.
    Pnlib(String),
    /// `elib id` - default electron table library.
    Elib(String),
    /// `hlib id` - default proton table library.
    Hlib(String),
}

impl MaterialOption {
    fn check(&self) -> Result<(), SemanticError> {
        match self {
            MaterialOption::Gas(v) if !matches!(v, 0 | 1) => {
                Err(SemanticError::option("gas", "state", *v))
            }
            MaterialOption::Estep(v) if *v < 0 => {
                Err(SemanticError::option("estep", "steps", *v))
            }
            MaterialOption::Nlib(id)
            | MaterialOption::Plib(id)
            | MaterialOption::Pnlib(id)
            | MaterialOption::Elib(id)
            | MaterialOption::Hlib(id)
                if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Err(SemanticError::option(self.keyword(), "library", id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            MaterialOption::Gas(_) => "gas",
            MaterialOption::Estep(_) => "estep",
            MaterialOption::Cond(_) => "cond",
            MaterialOption::Nlib(_) => "nlib",
            MaterialOption::Plib(_) => "plib",
            MaterialOption::Pnlib(_) => "pnlib",
            MaterialOption::Elib(_) => "elib",
            MaterialOption::Hlib(_) => "hlib",
        }
    }
}

impl fmt::Display for MaterialOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialOption::Gas(v) => write!(f, "gas={v}"),
            MaterialOption::Estep(v) => write!(f, "estep={v}"),
            MaterialOption::Cond(v) => write!(f, "cond={}", format_real(*v)),
            MaterialOption::Nlib(id) => write!(f, "nlib={id}"),
            MaterialOption::Plib(id) => write!(f, "plib={id}"),
            MaterialOption::Pnlib(id) => write!(f, "pnlib={id}"),
            MaterialOption::Elib(id) => write!(f, "elib={id}"),
            MaterialOption::Hlib(id) => write!(f, "hlib={id}"),
        }
    }
}

/// An `m<n>` material composition card.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    number: i64,
    substances: Vec<Substance>,
    options: Vec<MaterialOption>,
}

impl Material {
    /// Create a material card.
    ///
    /// The material number must be in 1..=99_999_999, the substance list
    /// non-empty, and every fraction must carry the same sign (atom and
    /// weight fractions cannot be mixed on one card).
    pub fn new(
        number: i64,
        substances: Vec<Substance>,
        options: Vec<MaterialOption>,
    ) -> Result<Self, SemanticError> {
        if !(1..=99_999_999).contains(&number) {
            return Err(SemanticError::card("m", "number", number));
        }
        let first = match substances.first() {
            Some(s) => s.fraction,
            None => return Err(SemanticError::card("m", "substances", "empty")),
        };
        for substance in &substances {
            if substance.fraction.is_sign_positive() != first.is_sign_positive() {
                return Err(SemanticError::card("m", "fraction", substance.fraction));
            }
        }
        for option in &options {
            option.check()?;
        }
        Ok(Self {
            number,
            substances,
            options,
        })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn substances(&self) -> &[Substance] {
        &self.substances
    }

    pub fn options(&self) -> &[MaterialOption] {
        &self.options
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.number)?;
        for substance in &self.substances {
            write!(
                f,
                " {} {}",
                substance.zaid,
                format_real(substance.fraction)
            )?;
        }
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// An `mt<n>` thermal-scattering card: S(a,b) table identifiers for the
/// material with the same number.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialThermal {
    number: i64,
    identifiers: Vec<String>,
}

impl MaterialThermal {
    pub fn new(number: i64, identifiers: Vec<String>) -> Result<Self, SemanticError> {
        if !(1..=99_999_999).contains(&number) {
            return Err(SemanticError::card("mt", "number", number));
        }
        if identifiers.is_empty() {
            return Err(SemanticError::card("mt", "identifiers", "empty"));
        }
        for id in &identifiers {
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(SemanticError::card("mt", "identifier", id.clone()));
            }
        }
        Ok(Self {
            number,
            identifiers,
        })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl fmt::Display for MaterialThermal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mt{}", self.number)?;
        for id in &self.identifiers {
            write!(f, " {id}")?;
        }
        Ok(())
    }
}
