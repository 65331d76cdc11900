//! Cell option records.
//!
//! Each option is a small validated record; [`CellOption`] is the tagged
//! union over the vocabulary. Options that accept a particle designator
//! carry it explicitly (`imp:n,p`), and suffixed options carry their index
//! (`wwn1:n`). All restriction failures here are option-category semantic
//! errors.

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Designator, Entry, Transformation};

/// `imp:<d> v` - particle importance, v >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Importance {
    designator: Designator,
    value: Entry<f64>,
}

impl Importance {
    pub fn new(designator: Designator, value: impl Into<Entry<f64>>) -> Result<Self, SemanticError> {
        let value = value.into();
        if !value.satisfies(|v| *v >= 0.0) {
            return Err(SemanticError::option("imp", "importance", value));
        }
        Ok(Self { designator, value })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn value(&self) -> Entry<f64> {
        self.value
    }
}

/// `vol v` - cell volume, v >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    value: f64,
}

impl Volume {
    pub fn new(value: f64) -> Result<Self, SemanticError> {
        if value < 0.0 {
            return Err(SemanticError::option("vol", "volume", value));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// `pwt v` - photon-production weight.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonWeight {
    value: Entry<f64>,
}

impl PhotonWeight {
    pub fn new(value: impl Into<Entry<f64>>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> Entry<f64> {
        self.value
    }
}

/// `ext:<d> s` - exponential transform stretch specifier.
///
/// The stretch grammar (`0.7v`, `-.4x`, a bare number, ...) carries axis and
/// direction markers; its restriction is not specified by the governing
/// schema, so only a non-empty token is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialTransform {
    designator: Designator,
    stretch: String,
}

impl ExponentialTransform {
    pub fn new(designator: Designator, stretch: impl Into<String>) -> Result<Self, SemanticError> {
        let stretch = stretch.into();
        if stretch.is_empty() || stretch.contains(char::is_whitespace) {
            return Err(SemanticError::option("ext", "stretch", stretch));
        }
        Ok(Self {
            designator,
            stretch,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn stretch(&self) -> &str {
        &self.stretch
    }
}

/// `fcl:<d> v` - forced-collision control, -1 <= v <= 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcedCollision {
    designator: Designator,
    control: f64,
}

impl ForcedCollision {
    pub fn new(designator: Designator, control: f64) -> Result<Self, SemanticError> {
        if !(-1.0..=1.0).contains(&control) {
            return Err(SemanticError::option("fcl", "control", control));
        }
        Ok(Self {
            designator,
            control,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn control(&self) -> f64 {
        self.control
    }
}

/// `wwn<i>:<d> v` - weight-window lower bound; v == -1 or v >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightWindowBound {
    suffix: i64,
    designator: Designator,
    bound: Entry<f64>,
}

impl WeightWindowBound {
    pub fn new(
        suffix: i64,
        designator: Designator,
        bound: impl Into<Entry<f64>>,
    ) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::option("wwn", "suffix", suffix));
        }
        let bound = bound.into();
        if !bound.satisfies(|v| *v == -1.0 || *v >= 0.0) {
            return Err(SemanticError::option("wwn", "bound", bound));
        }
        Ok(Self {
            suffix,
            designator,
            bound,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn bound(&self) -> Entry<f64> {
        self.bound
    }
}

/// `dxc<i>:<d> v` - DXTRAN contribution probability, 0 <= v <= 1.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorContribution {
    suffix: i64,
    designator: Designator,
    probability: f64,
}

impl DetectorContribution {
    pub fn new(
        suffix: i64,
        designator: Designator,
        probability: f64,
    ) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::option("dxc", "suffix", suffix));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(SemanticError::option("dxc", "probability", probability));
        }
        Ok(Self {
            suffix,
            designator,
            probability,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// `nonu v` - fission turnoff, v in {0, 1, 2}.
#[derive(Debug, Clone, PartialEq)]
pub struct FissionTurnoff {
    setting: i64,
}

impl FissionTurnoff {
    pub fn new(setting: i64) -> Result<Self, SemanticError> {
        if !matches!(setting, 0 | 1 | 2) {
            return Err(SemanticError::option("nonu", "setting", setting));
        }
        Ok(Self { setting })
    }

    pub fn setting(&self) -> i64 {
        self.setting
    }
}

/// `pd<i> v` - point-detector contribution probability, 0 <= v <= 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PointDetectorContribution {
    suffix: i64,
    probability: f64,
}

impl PointDetectorContribution {
    pub fn new(suffix: i64, probability: f64) -> Result<Self, SemanticError> {
        if suffix < 1 {
            return Err(SemanticError::option("pd", "suffix", suffix));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(SemanticError::option("pd", "probability", probability));
        }
        Ok(Self {
            suffix,
            probability,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// `tmp[<i>] v` - cell temperature in MeV, v > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    suffix: Option<i64>,
    temperature: f64,
}

impl Temperature {
    pub fn new(suffix: Option<i64>, temperature: f64) -> Result<Self, SemanticError> {
        if let Some(s) = suffix {
            if s < 1 {
                return Err(SemanticError::option("tmp", "suffix", s));
            }
        }
        if temperature <= 0.0 {
            return Err(SemanticError::option("tmp", "temperature", temperature));
        }
        Ok(Self {
            suffix,
            temperature,
        })
    }

    pub fn suffix(&self) -> Option<i64> {
        self.suffix
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

/// `u v` - universe number, |v| <= 99_999_999.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    number: i64,
}

impl Universe {
    pub fn new(number: i64) -> Result<Self, SemanticError> {
        if number.abs() > 99_999_999 {
            return Err(SemanticError::option("u", "universe", number));
        }
        Ok(Self { number })
    }

    pub fn number(&self) -> i64 {
        self.number
    }
}

/// `lat v` - lattice kind, 1 (hexahedra) or 2 (hexagonal prisms).
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    kind: i64,
}

impl Lattice {
    pub fn new(kind: i64) -> Result<Self, SemanticError> {
        if !matches!(kind, 1 | 2) {
            return Err(SemanticError::option("lat", "type", kind));
        }
        Ok(Self { kind })
    }

    pub fn kind(&self) -> i64 {
        self.kind
    }
}

/// The mutually exclusive shapes of a `trcl` option.
#[derive(Debug, Clone, PartialEq)]
pub enum TrclVariant {
    /// A `tr` card number, 0..=999.
    Number(i64),
    /// An inline parenthesized transformation (3..13 entries).
    Transformation(Transformation),
}

/// `trcl` / `*trcl` - cell coordinate transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trcl {
    degrees: bool,
    variant: TrclVariant,
}

impl Trcl {
    /// Create a `trcl` option. The `*` (degrees) marker is only meaningful
    /// for an inline transformation.
    pub fn new(degrees: bool, variant: TrclVariant) -> Result<Self, SemanticError> {
        match &variant {
            TrclVariant::Number(n) => {
                if !(0..=999).contains(n) {
                    return Err(SemanticError::option("trcl", "transformation", *n));
                }
                if degrees {
                    return Err(SemanticError::option("trcl", "degrees", "*"));
                }
            }
            TrclVariant::Transformation(_) => {}
        }
        Ok(Self { degrees, variant })
    }

    pub fn degrees(&self) -> bool {
        self.degrees
    }

    pub fn variant(&self) -> &TrclVariant {
        &self.variant
    }
}

/// The mutually exclusive shapes of a `fill` option.
#[derive(Debug, Clone, PartialEq)]
pub enum FillVariant {
    /// `fill i1:i2 j1:j2 k1:k2 u...` - one universe per lattice element.
    Lattice {
        i: (i64, i64),
        j: (i64, i64),
        k: (i64, i64),
        universes: Vec<i64>,
    },
    /// `fill u (entries...)` - universe with an inline transformation.
    Transformed {
        universe: i64,
        transformation: Transformation,
    },
    /// `fill u [(n)]` - universe with an optional `tr` card number.
    Universe {
        universe: i64,
        transform: Option<i64>,
    },
}

/// `fill` / `*fill` - filling universe specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    degrees: bool,
    variant: FillVariant,
}

fn check_universe(option: &'static str, universe: i64) -> Result<(), SemanticError> {
    if !(0..=99_999_999).contains(&universe) {
        return Err(SemanticError::option(option, "universe", universe));
    }
    Ok(())
}

impl Fill {
    pub fn new(degrees: bool, variant: FillVariant) -> Result<Self, SemanticError> {
        match &variant {
            FillVariant::Lattice {
                i,
                j,
                k,
                universes,
            } => {
                let mut elements: i64 = 1;
                for (name, range) in [("i", i), ("j", j), ("k", k)] {
                    if range.0 > range.1 {
                        return Err(SemanticError::option(
                            "fill",
                            "range",
                            format!("{name}: {}:{}", range.0, range.1),
                        ));
                    }
                    elements = range
                        .1
                        .checked_sub(range.0)
                        .and_then(|extent| extent.checked_add(1))
                        .and_then(|extent| elements.checked_mul(extent))
                        .ok_or_else(|| {
                            SemanticError::option(
                                "fill",
                                "range",
                                format!("{name}: {}:{}", range.0, range.1),
                            )
                        })?;
                }
                if universes.len() as i64 != elements {
                    return Err(SemanticError::option("fill", "universes", universes.len()));
                }
                for u in universes {
                    check_universe("fill", *u)?;
                }
            }
            FillVariant::Transformed { universe, .. } => check_universe("fill", *universe)?,
            FillVariant::Universe {
                universe,
                transform,
            } => {
                check_universe("fill", *universe)?;
                if let Some(t) = transform {
                    if !(1..=999).contains(t) {
                        return Err(SemanticError::option("fill", "transformation", *t));
                    }
                }
            }
        }
        Ok(Self { degrees, variant })
    }

    pub fn degrees(&self) -> bool {
        self.degrees
    }

    pub fn variant(&self) -> &FillVariant {
        &self.variant
    }
}

/// `elpt:<d> v` - cell-level energy cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyCutoff {
    designator: Designator,
    cutoff: f64,
}

impl EnergyCutoff {
    pub fn new(designator: Designator, cutoff: f64) -> Self {
        Self { designator, cutoff }
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

/// `cosy v` - cosy map number, 1..=6.
#[derive(Debug, Clone, PartialEq)]
pub struct Cosy {
    number: i64,
}

impl Cosy {
    pub fn new(number: i64) -> Result<Self, SemanticError> {
        if !(1..=6).contains(&number) {
            return Err(SemanticError::option("cosy", "number", number));
        }
        Ok(Self { number })
    }

    pub fn number(&self) -> i64 {
        self.number
    }
}

/// `bflcl v` - magnetic field number, v >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticField {
    number: i64,
}

impl MagneticField {
    pub fn new(number: i64) -> Result<Self, SemanticError> {
        if number < 0 {
            return Err(SemanticError::option("bflcl", "number", number));
        }
        Ok(Self { number })
    }

    pub fn number(&self) -> i64 {
        self.number
    }
}

/// `unc:<d> v` - uncollided-secondaries control, v in {0, 1}.
#[derive(Debug, Clone, PartialEq)]
pub struct Uncollided {
    designator: Designator,
    setting: i64,
}

impl Uncollided {
    pub fn new(designator: Designator, setting: i64) -> Result<Self, SemanticError> {
        if !matches!(setting, 0 | 1) {
            return Err(SemanticError::option("unc", "setting", setting));
        }
        Ok(Self {
            designator,
            setting,
        })
    }

    pub fn designator(&self) -> &Designator {
        &self.designator
    }

    pub fn setting(&self) -> i64 {
        self.setting
    }
}

/// The tagged union over the cell option vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOption {
    Imp(Importance),
    Vol(Volume),
    Pwt(PhotonWeight),
    Ext(ExponentialTransform),
    Fcl(ForcedCollision),
    Wwn(WeightWindowBound),
    Dxc(DetectorContribution),
    Nonu(FissionTurnoff),
    Pd(PointDetectorContribution),
    Tmp(Temperature),
    U(Universe),
    Trcl(Trcl),
    Lat(Lattice),
    Fill(Fill),
    Elpt(EnergyCutoff),
    Cosy(Cosy),
    Bflcl(MagneticField),
    Unc(Uncollided),
}

impl fmt::Display for CellOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellOption::Imp(o) => write!(f, "imp:{} {}", o.designator, o.value),
            CellOption::Vol(o) => write!(f, "vol {}", format_real(o.value)),
            CellOption::Pwt(o) => write!(f, "pwt {}", o.value),
            CellOption::Ext(o) => write!(f, "ext:{} {}", o.designator, o.stretch),
            CellOption::Fcl(o) => write!(f, "fcl:{} {}", o.designator, format_real(o.control)),
            CellOption::Wwn(o) => {
                write!(f, "wwn{}:{} {}", o.suffix, o.designator, o.bound)
            }
            CellOption::Dxc(o) => write!(
                f,
                "dxc{}:{} {}",
                o.suffix,
                o.designator,
                format_real(o.probability)
            ),
            CellOption::Nonu(o) => write!(f, "nonu {}", o.setting),
            CellOption::Pd(o) => write!(f, "pd{} {}", o.suffix, format_real(o.probability)),
            CellOption::Tmp(o) => {
                write!(f, "tmp")?;
                if let Some(s) = o.suffix {
                    write!(f, "{s}")?;
                }
                write!(f, " {}", format_real(o.temperature))
            }
            CellOption::U(o) => write!(f, "u {}", o.number),
            CellOption::Trcl(o) => {
                if o.degrees {
                    write!(f, "*")?;
                }
                match &o.variant {
                    TrclVariant::Number(n) => write!(f, "trcl {n}"),
                    TrclVariant::Transformation(t) => write!(f, "trcl ({t})"),
                }
            }
            CellOption::Lat(o) => write!(f, "lat {}", o.kind),
            CellOption::Fill(o) => {
                if o.degrees {
                    write!(f, "*")?;
                }
                match &o.variant {
                    FillVariant::Lattice {
                        i,
                        j,
                        k,
                        universes,
                    } => {
                        write!(
                            f,
                            "fill {}:{} {}:{} {}:{}",
                            i.0, i.1, j.0, j.1, k.0, k.1
                        )?;
                        for u in universes {
                            write!(f, " {u}")?;
                        }
                        Ok(())
                    }
                    FillVariant::Transformed {
                        universe,
                        transformation,
                    } => write!(f, "fill {universe} ({transformation})"),
                    FillVariant::Universe {
                        universe,
                        transform,
                    } => {
                        write!(f, "fill {universe}")?;
                        if let Some(t) = transform {
                            write!(f, " ({t})")?;
                        }
                        Ok(())
                    }
                }
            }
            CellOption::Elpt(o) => {
                write!(f, "elpt:{} {}", o.designator, format_real(o.cutoff))
            }
            CellOption::Cosy(o) => write!(f, "cosy {}", o.number),
            CellOption::Bflcl(o) => write!(f, "bflcl {}", o.number),
            CellOption::Unc(o) => write!(f, "unc:{} {}", o.designator, o.setting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entry, Particle, Point, Rotation};

    fn neutron() -> Designator {
        Designator::single(Particle::NEUTRON)
    }

    #[test]
    fn test_importance_restriction() {
        assert!(Importance::new(neutron(), 1.0).is_ok());
        assert!(Importance::new(neutron(), 0.0).is_ok());
        assert!(Importance::new(neutron(), -1.0).is_err());
        // A jumped importance is structurally absent and always valid.
        assert!(Importance::new(neutron(), Entry::Jump).is_ok());
    }

    #[test]
    fn test_importance_display() {
        let option = CellOption::Imp(Importance::new(neutron(), 1.0).unwrap());
        assert_eq!(option.to_string(), "imp:n 1");
    }

    #[test]
    fn test_weight_window_bound() {
        assert!(WeightWindowBound::new(1, neutron(), -1.0).is_ok());
        assert!(WeightWindowBound::new(1, neutron(), 0.5).is_ok());
        let err = WeightWindowBound::new(1, neutron(), -2.0).unwrap_err();
        assert_eq!(err.attribute(), "bound");
        assert!(err.is_option());
    }

    #[test]
    fn test_trcl_number_range() {
        assert!(Trcl::new(false, TrclVariant::Number(5)).is_ok());
        assert!(Trcl::new(false, TrclVariant::Number(1000)).is_err());
        assert!(Trcl::new(true, TrclVariant::Number(5)).is_err());
    }

    #[test]
    fn test_trcl_display() {
        let transformation =
            Transformation::new(Point::new(1.0, 2.0, 3.0), Rotation::None, None).unwrap();
        let option = CellOption::Trcl(
            Trcl::new(true, TrclVariant::Transformation(transformation)).unwrap(),
        );
        assert_eq!(option.to_string(), "*trcl (1 2 3)");
    }

    #[test]
    fn test_fill_lattice_element_count() {
        let ok = Fill::new(
            false,
            FillVariant::Lattice {
                i: (0, 1),
                j: (0, 1),
                k: (0, 0),
                universes: vec![1, 2, 3, 4],
            },
        );
        assert!(ok.is_ok());

        let short = Fill::new(
            false,
            FillVariant::Lattice {
                i: (0, 1),
                j: (0, 1),
                k: (0, 0),
                universes: vec![1, 2, 3],
            },
        );
        assert!(short.is_err());
    }

    #[test]
    fn test_fill_lattice_huge_range_rejected() {
        let huge = Fill::new(
            false,
            FillVariant::Lattice {
                i: (0, i64::MAX),
                j: (0, 0),
                k: (0, 0),
                universes: vec![1],
            },
        );
        assert!(huge.is_err());
    }

    #[test]
    fn test_fill_display() {
        let fill = Fill::new(
            false,
            FillVariant::Universe {
                universe: 5,
                transform: Some(4),
            },
        )
        .unwrap();
        assert_eq!(CellOption::Fill(fill).to_string(), "fill 5 (4)");
    }

    #[test]
    fn test_enumerated_settings() {
        assert!(FissionTurnoff::new(2).is_ok());
        assert!(FissionTurnoff::new(3).is_err());
        assert!(Lattice::new(1).is_ok());
        assert!(Lattice::new(0).is_err());
        assert!(Uncollided::new(neutron(), 1).is_ok());
        assert!(Uncollided::new(neutron(), 2).is_err());
        assert!(Cosy::new(6).is_ok());
        assert!(Cosy::new(7).is_err());
    }
}
