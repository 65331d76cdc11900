//! Tally cards (`f`, `e`, `t`, `c`, `sd`, `fq`).

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Designator};

/// A point-detector location: coordinates and exclusion-sphere radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
}

impl fmt::Display for DetectorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_real(self.x),
            format_real(self.y),
            format_real(self.z),
            format_real(self.radius)
        )
    }
}

/// The body of a tally card, selected by the tally type digit.
#[derive(Debug, Clone, PartialEq)]
pub enum TallyVariant {
    /// Cell or surface numbers to tally over (types 1, 2, 4, 6, 7, 8).
    List(Vec<i64>),
    /// Point-detector locations (type 5).
    Detector(Vec<DetectorPoint>),
}

/// An `f<n>:<d>` tally specification card.
///
/// The last digit of the suffix is the tally type; type 5 takes detector
/// point groups, every other type takes a list of cell or surface numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    suffix: i64,
    designator: Designator,
    variant: TallyVariant,
}

impl Tally {
    /// Create a tally card. The body variant must agree with the tally type
    /// digit, and the body must be non-empty.
    pub fn new(
        suffix: i64,
        designator: Designator,
        variant: TallyVariant,
    ) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::card("f", "suffix", suffix));
        }
        match &variant {
            TallyVariant::List(numbers) => {
                if suffix % 10 == 5 {
                    return Err(SemanticError::card("f", "type", suffix % 10));
                }
                if numbers.is_empty() {
                    return Err(SemanticError::card("f", "numbers", "empty"));
                }
            }
            TallyVariant::Detector(points) => {
                if suffix % 10 != 5 {
                    return Err(SemanticError::card("f", "type", suffix % 10));
                }
                if points.is_empty() {
                    return Err(SemanticError::card("f", "points", "empty"));
                }
            }
        }
        Ok(Self {
            suffix,
            designator,
            variant,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn variant(&self) -> &TallyVariant {
        &self.variant
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}:{}", self.suffix, self.designator)?;
        match &self.variant {
            TallyVariant::List(numbers) => {
                for n in numbers {
                    write!(f, " {n}")?;
                }
            }
            TallyVariant::Detector(points) => {
                for point in points {
                    write!(f, " {point}")?;
                }
            }
        }
        Ok(())
    }
}

/// A suffixed list-valued tally auxiliary card (`e`, `t`, `c`, `sd`). The
/// restriction on each value differs per mnemonic, so construction goes
/// through the specific wrapper below.
#[derive(Debug, Clone, PartialEq)]
struct TallyList {
    suffix: i64,
    values: Vec<f64>,
}

impl TallyList {
    fn new(
        card: &'static str,
        attribute: &'static str,
        suffix: i64,
        values: Vec<f64>,
        restriction: impl Fn(f64) -> bool,
    ) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::card(card, "suffix", suffix));
        }
        if values.is_empty() {
            return Err(SemanticError::card(card, attribute, "empty"));
        }
        for v in &values {
            if !restriction(*v) {
                return Err(SemanticError::card(card, attribute, *v));
            }
        }
        Ok(Self { suffix, values })
    }

    fn fmt_as(&self, f: &mut fmt::Formatter<'_>, mnemonic: &str) -> fmt::Result {
        write!(f, "{mnemonic}{}", self.suffix)?;
        for v in &self.values {
            write!(f, " {}", format_real(*v))?;
        }
        Ok(())
    }
}

/// An `e<n>` tally energy-bin boundary card.
#[derive(Debug, Clone, PartialEq)]
pub struct TallyEnergies(TallyList);

impl TallyEnergies {
    pub fn new(suffix: i64, bounds: Vec<f64>) -> Result<Self, SemanticError> {
        TallyList::new("e", "bound", suffix, bounds, |_| true).map(Self)
    }

    pub fn suffix(&self) -> i64 {
        self.0.suffix
    }

    pub fn bounds(&self) -> &[f64] {
        &self.0.values
    }
}

impl fmt::Display for TallyEnergies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "e")
    }
}

/// A `t<n>` tally time-bin boundary card.
#[derive(Debug, Clone, PartialEq)]
pub struct TallyTimes(TallyList);

impl TallyTimes {
    pub fn new(suffix: i64, bounds: Vec<f64>) -> Result<Self, SemanticError> {
        TallyList::new("t", "bound", suffix, bounds, |_| true).map(Self)
    }

    pub fn suffix(&self) -> i64 {
        self.0.suffix
    }

    pub fn bounds(&self) -> &[f64] {
        &self.0.values
    }
}

impl fmt::Display for TallyTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "t")
    }
}

/// A `c<n>` tally cosine-bin boundary card; each bound in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct TallyCosines(TallyList);

impl TallyCosines {
    pub fn new(suffix: i64, bounds: Vec<f64>) -> Result<Self, SemanticError> {
        TallyList::new("c", "bound", suffix, bounds, |v| (-1.0..=1.0).contains(&v)).map(Self)
    }

    pub fn suffix(&self) -> i64 {
        self.0.suffix
    }

    pub fn bounds(&self) -> &[f64] {
        &self.0.values
    }
}

impl fmt::Display for TallyCosines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "c")
    }
}

/// An `sd<n>` segment-divisor card; each divisor strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDivisors(TallyList);

impl SegmentDivisors {
    pub fn new(suffix: i64, divisors: Vec<f64>) -> Result<Self, SemanticError> {
        TallyList::new("sd", "divisor", suffix, divisors, |v| v > 0.0).map(Self)
    }

    pub fn suffix(&self) -> i64 {
        self.0.suffix
    }

    pub fn divisors(&self) -> &[f64] {
        &self.0.values
    }
}

impl fmt::Display for SegmentDivisors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "sd")
    }
}

/// An `fq<n>` print-hierarchy card: a reordering of the eight bin axes
/// `f d u s m c e t` (a prefix reorders, the rest keep their places).
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOrder {
    suffix: i64,
    axes: Vec<char>,
}

impl PrintOrder {
    pub fn new(suffix: i64, axes: Vec<char>) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::card("fq", "suffix", suffix));
        }
        if axes.is_empty() || axes.len() > 8 {
            return Err(SemanticError::card("fq", "axes", axes.len()));
        }
        for (i, axis) in axes.iter().enumerate() {
            if !"fdusmcet".contains(*axis) {
                return Err(SemanticError::card("fq", "axis", *axis));
            }
            if axes[..i].contains(axis) {
                return Err(SemanticError::card("fq", "axis", *axis));
            }
        }
        Ok(Self { suffix, axes })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn axes(&self) -> &[char] {
        &self.axes
    }
}

impl fmt::Display for PrintOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fq{}", self.suffix)?;
        for axis in &self.axes {
            write!(f, " {axis}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Particle;

    fn neutron() -> Designator {
        Designator::single(Particle::NEUTRON)
    }

    #[test]
    fn test_list_tally() {
        let tally = Tally::new(4, neutron(), TallyVariant::List(vec![1, 2, 3])).unwrap();
        assert_eq!(tally.to_string(), "f4:n 1 2 3");
    }

    #[test]
    fn test_detector_tally() {
        let point = DetectorPoint {
            x: 0.0,
            y: 0.0,
            z: 10.0,
            radius: 0.5,
        };
        let tally = Tally::new(15, neutron(), TallyVariant::Detector(vec![point])).unwrap();
        assert_eq!(tally.to_string(), "f15:n 0 0 10 0.5");
    }

    #[test]
    fn test_variant_must_match_type_digit() {
        assert!(Tally::new(5, neutron(), TallyVariant::List(vec![1])).is_err());
        let point = DetectorPoint {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            radius: 0.0,
        };
        assert!(Tally::new(4, neutron(), TallyVariant::Detector(vec![point])).is_err());
    }

    #[test]
    fn test_cosine_bounds() {
        assert!(TallyCosines::new(4, vec![-1.0, 0.0, 1.0]).is_ok());
        assert!(TallyCosines::new(4, vec![1.5]).is_err());
    }

    #[test]
    fn test_segment_divisors_positive() {
        assert!(SegmentDivisors::new(4, vec![1.0, 2.0]).is_ok());
        assert!(SegmentDivisors::new(4, vec![0.0]).is_err());
    }

    #[test]
    fn test_print_order() {
        let fq = PrintOrder::new(4, vec!['e', 'f']).unwrap();
        assert_eq!(fq.to_string(), "fq4 e f");
        assert!(PrintOrder::new(4, vec!['e', 'e']).is_err());
        assert!(PrintOrder::new(4, vec!['x']).is_err());
    }
}
