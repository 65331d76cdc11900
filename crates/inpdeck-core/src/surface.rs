//! Surface cards.
//!
//! A surface card is `[*|+]n [tr] mnemonic coefficients...`. The mnemonic
//! catalog covers planes, spheres, cylinders, cones, general quadrics, tori,
//! point-defined surfaces, and the macrobodies. Several mnemonics admit more
//! than one coefficient count (`p` takes 4 or 9, `x` takes 2, 4, or 6);
//! [`SurfaceKind::from_coefficients`] selects the variation by arity, trying
//! shapes in declaration order.

use std::fmt;

use thiserror::Error;

use crate::error::SemanticError;
use crate::types::format_real;

/// Boundary-condition marker preceding a surface number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceModifier {
    /// `*n` - reflecting boundary.
    Reflecting,
    /// `+n` - white boundary.
    White,
}

impl fmt::Display for SurfaceModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceModifier::Reflecting => write!(f, "*"),
            SurfaceModifier::White => write!(f, "+"),
        }
    }
}

/// Failure to construct a surface kind from raw coefficients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// No variation of the mnemonic takes this many coefficients.
    #[error("surface `{mnemonic}`: no variation takes {count} coefficients")]
    NoVariantMatched { mnemonic: String, count: usize },

    /// The mnemonic is not in the surface catalog.
    #[error("unknown surface mnemonic `{mnemonic}`")]
    UnknownMnemonic { mnemonic: String },

    /// A coefficient failed its restriction.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// The equation family and coefficients of a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceKind {
    /// `p A B C D` - general plane.
    P([f64; 4]),
    /// `p x1 y1 z1 x2 y2 z2 x3 y3 z3` - plane through three points.
    PPoints([f64; 9]),
    /// `px D` - plane normal to the x-axis.
    Px(f64),
    /// `py D` - plane normal to the y-axis.
    Py(f64),
    /// `pz D` - plane normal to the z-axis.
    Pz(f64),
    /// `so R` - sphere at the origin.
    So(f64),
    /// `s x y z R` - general sphere.
    S([f64; 4]),
    /// `sx x R` - sphere centered on the x-axis.
    Sx([f64; 2]),
    /// `sy y R` - sphere centered on the y-axis.
    Sy([f64; 2]),
    /// `sz z R` - sphere centered on the z-axis.
    Sz([f64; 2]),
    /// `c/x y z R` - cylinder parallel to the x-axis.
    CParX([f64; 3]),
    /// `c/y x z R` - cylinder parallel to the y-axis.
    CParY([f64; 3]),
    /// `c/z x y R` - cylinder parallel to the z-axis.
    CParZ([f64; 3]),
    /// `cx R` - cylinder on the x-axis.
    Cx(f64),
    /// `cy R` - cylinder on the y-axis.
    Cy(f64),
    /// `cz R` - cylinder on the z-axis.
    Cz(f64),
    /// `k/x x y z t2 [±1]` - cone parallel to the x-axis.
    KParX {
        coefficients: [f64; 4],
        sheet: Option<f64>,
    },
    /// `k/y x y z t2 [±1]` - cone parallel to the y-axis.
    KParY {
        coefficients: [f64; 4],
        sheet: Option<f64>,
    },
    /// `k/z x y z t2 [±1]` - cone parallel to the z-axis.
    KParZ {
        coefficients: [f64; 4],
        sheet: Option<f64>,
    },
    /// `kx x t2 [±1]` - cone on the x-axis.
    Kx {
        coefficients: [f64; 2],
        sheet: Option<f64>,
    },
    /// `ky y t2 [±1]` - cone on the y-axis.
    Ky {
        coefficients: [f64; 2],
        sheet: Option<f64>,
    },
    /// `kz z t2 [±1]` - cone on the z-axis.
    Kz {
        coefficients: [f64; 2],
        sheet: Option<f64>,
    },
    /// `sq A B C D E F G x y z` - axis-aligned special quadric.
    Sq([f64; 10]),
    /// `gq A B C D E F G H J K` - general quadric.
    Gq([f64; 10]),
    /// `tx x y z A B C` - torus with axis parallel to the x-axis.
    Tx([f64; 6]),
    /// `ty x y z A B C` - torus with axis parallel to the y-axis.
    Ty([f64; 6]),
    /// `tz x y z A B C` - torus with axis parallel to the z-axis.
    Tz([f64; 6]),
    /// `x x1 r1 [x2 r2 [x3 r3]]` - surface of revolution by points.
    XPoints(Vec<[f64; 2]>),
    /// `y y1 r1 [y2 r2 [y3 r3]]` - surface of revolution by points.
    YPoints(Vec<[f64; 2]>),
    /// `z z1 r1 [z2 r2 [z3 r3]]` - surface of revolution by points.
    ZPoints(Vec<[f64; 2]>),
    /// `box vx vy vz a1x a1y a1z a2x a2y a2z a3x a3y a3z` macrobody.
    Box([f64; 12]),
    /// `rpp xmin xmax ymin ymax zmin zmax` macrobody.
    Rpp([f64; 6]),
    /// `sph vx vy vz R` macrobody.
    Sph([f64; 4]),
    /// `rcc vx vy vz hx hy hz R` macrobody.
    Rcc([f64; 7]),
    /// `rhp v h r [s t]` hexagonal-prism macrobody (9 or 15 entries).
    Rhp(Vec<f64>),
    /// `rec v h v1 [v2]` elliptical-cylinder macrobody (10 or 12 entries).
    Rec(Vec<f64>),
    /// `trc vx vy vz hx hy hz r1 r2` truncated-cone macrobody.
    Trc([f64; 8]),
    /// `ell v1 v2 rm` ellipsoid macrobody (rm > 0: v2 is the second focus,
    /// rm < 0: v2 is the major axis; rm == 0 is rejected as unspecified).
    Ell([f64; 7]),
    /// `wed v v1 v2 v3` wedge macrobody.
    Wed([f64; 12]),
    /// `arb a1..a8 n1..n6` arbitrary-polyhedron macrobody.
    Arb(Box<[f64; 30]>),
}

/// Select a cone sheet selector, validating it is -1 or +1.
fn sheet(mnemonic: &'static str, value: f64) -> Result<f64, SurfaceError> {
    if value == 1.0 || value == -1.0 {
        Ok(value)
    } else {
        Err(SemanticError::card(mnemonic, "sheet", value).into())
    }
}

/// Validate a sphere or cylinder radius, which must be strictly positive.
fn radius(mnemonic: &'static str, value: f64) -> Result<f64, SurfaceError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SemanticError::card(mnemonic, "radius", value).into())
    }
}

/// Validate the trailing radius coefficient of a fixed-arity surface.
fn with_radius<const N: usize>(
    mnemonic: &'static str,
    coefficients: [f64; N],
) -> Result<[f64; N], SurfaceError> {
    radius(mnemonic, coefficients[N - 1])?;
    Ok(coefficients)
}

fn fixed<const N: usize>(coefficients: &[f64]) -> Option<[f64; N]> {
    coefficients.try_into().ok()
}

impl SurfaceKind {
    /// Build a surface kind from a mnemonic and its coefficient list.
    ///
    /// For multi-variation mnemonics the shapes are tried in declaration
    /// order; the first whose arity matches the full list wins. A count
    /// matching no variation is a structural failure
    /// ([`SurfaceError::NoVariantMatched`]), while a bad coefficient value
    /// after an arity match is a semantic one.
    pub fn from_coefficients(mnemonic: &str, coefficients: &[f64]) -> Result<Self, SurfaceError> {
        let lower = mnemonic.to_ascii_lowercase();
        let n = coefficients.len();
        let no_variant = || SurfaceError::NoVariantMatched {
            mnemonic: lower.clone(),
            count: n,
        };
        let c = coefficients;

        let kind = match lower.as_str() {
            "p" => match n {
                4 => Self::P(fixed(c).ok_or_else(no_variant)?),
                9 => Self::PPoints(fixed(c).ok_or_else(no_variant)?),
                _ => return Err(no_variant()),
            },
            "px" => Self::Px(*c.first().filter(|_| n == 1).ok_or_else(no_variant)?),
            "py" => Self::Py(*c.first().filter(|_| n == 1).ok_or_else(no_variant)?),
            "pz" => Self::Pz(*c.first().filter(|_| n == 1).ok_or_else(no_variant)?),
            "so" => Self::So(radius("so", *c.first().filter(|_| n == 1).ok_or_else(no_variant)?)?),
            "s" => Self::S(with_radius("s", fixed(c).ok_or_else(no_variant)?)?),
            "sx" => Self::Sx(with_radius("sx", fixed(c).ok_or_else(no_variant)?)?),
            "sy" => Self::Sy(with_radius("sy", fixed(c).ok_or_else(no_variant)?)?),
            "sz" => Self::Sz(with_radius("sz", fixed(c).ok_or_else(no_variant)?)?),
            "c/x" => Self::CParX(with_radius("c/x", fixed(c).ok_or_else(no_variant)?)?),
            "c/y" => Self::CParY(with_radius("c/y", fixed(c).ok_or_else(no_variant)?)?),
            "c/z" => Self::CParZ(with_radius("c/z", fixed(c).ok_or_else(no_variant)?)?),
            "cx" => Self::Cx(radius("cx", *c.first().filter(|_| n == 1).ok_or_else(no_variant)?)?),
            "cy" => Self::Cy(radius("cy", *c.first().filter(|_| n == 1).ok_or_else(no_variant)?)?),
            "cz" => Self::Cz(radius("cz", *c.first().filter(|_| n == 1).ok_or_else(no_variant)?)?),
            "k/x" | "k/y" | "k/z" => {
                let (coefficients, s) = match n {
                    4 => (fixed::<4>(&c[..4]).ok_or_else(no_variant)?, None),
                    5 => (
                        fixed::<4>(&c[..4]).ok_or_else(no_variant)?,
                        Some(sheet("k", c[4])?),
                    ),
                    _ => return Err(no_variant()),
                };
                match lower.as_str() {
                    "k/x" => Self::KParX {
                        coefficients,
                        sheet: s,
                    },
                    "k/y" => Self::KParY {
                        coefficients,
                        sheet: s,
                    },
                    _ => Self::KParZ {
                        coefficients,
                        sheet: s,
                    },
                }
            }
            "kx" | "ky" | "kz" => {
                let (coefficients, s) = match n {
                    2 => (fixed::<2>(&c[..2]).ok_or_else(no_variant)?, None),
                    3 => (
                        fixed::<2>(&c[..2]).ok_or_else(no_variant)?,
                        Some(sheet("k", c[2])?),
                    ),
                    _ => return Err(no_variant()),
                };
                match lower.as_str() {
                    "kx" => Self::Kx {
                        coefficients,
                        sheet: s,
                    },
                    "ky" => Self::Ky {
                        coefficients,
                        sheet: s,
                    },
                    _ => Self::Kz {
                        coefficients,
                        sheet: s,
                    },
                }
            }
            "sq" => Self::Sq(fixed(c).ok_or_else(no_variant)?),
            "gq" => Self::Gq(fixed(c).ok_or_else(no_variant)?),
            "tx" => Self::Tx(fixed(c).ok_or_else(no_variant)?),
            "ty" => Self::Ty(fixed(c).ok_or_else(no_variant)?),
            "tz" => Self::Tz(fixed(c).ok_or_else(no_variant)?),
            "x" | "y" | "z" => {
                if !matches!(n, 2 | 4 | 6) {
                    return Err(no_variant());
                }
                let pairs = c.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
                match lower.as_str() {
                    "x" => Self::XPoints(pairs),
                    "y" => Self::YPoints(pairs),
                    _ => Self::ZPoints(pairs),
                }
            }
            "box" => Self::Box(fixed(c).ok_or_else(no_variant)?),
            "rpp" => Self::Rpp(fixed(c).ok_or_else(no_variant)?),
            "sph" => Self::Sph(with_radius("sph", fixed(c).ok_or_else(no_variant)?)?),
            "rcc" => Self::Rcc(with_radius("rcc", fixed(c).ok_or_else(no_variant)?)?),
            "rhp" | "hex" => {
                if !matches!(n, 9 | 15) {
                    return Err(no_variant());
                }
                Self::Rhp(c.to_vec())
            }
            "rec" => {
                if !matches!(n, 10 | 12) {
                    return Err(no_variant());
                }
                Self::Rec(c.to_vec())
            }
            "trc" => Self::Trc(fixed(c).ok_or_else(no_variant)?),
            "ell" => {
                let c: [f64; 7] = fixed(c).ok_or_else(no_variant)?;
                // rm == 0 is left unspecified by the format; refuse it
                // rather than guess a meaning.
                if c[6] == 0.0 {
                    return Err(SemanticError::card("ell", "rm", c[6]).into());
                }
                Self::Ell(c)
            }
            "wed" => Self::Wed(fixed(c).ok_or_else(no_variant)?),
            "arb" => Self::Arb(Box::new(fixed(c).ok_or_else(no_variant)?)),
            _ => {
                return Err(SurfaceError::UnknownMnemonic { mnemonic: lower });
            }
        };
        Ok(kind)
    }

    /// The catalog mnemonic for this kind.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::P(_) | Self::PPoints(_) => "p",
            Self::Px(_) => "px",
            Self::Py(_) => "py",
            Self::Pz(_) => "pz",
            Self::So(_) => "so",
            Self::S(_) => "s",
            Self::Sx(_) => "sx",
            Self::Sy(_) => "sy",
            Self::Sz(_) => "sz",
            Self::CParX(_) => "c/x",
            Self::CParY(_) => "c/y",
            Self::CParZ(_) => "c/z",
            Self::Cx(_) => "cx",
            Self::Cy(_) => "cy",
            Self::Cz(_) => "cz",
            Self::KParX { .. } => "k/x",
            Self::KParY { .. } => "k/y",
            Self::KParZ { .. } => "k/z",
            Self::Kx { .. } => "kx",
            Self::Ky { .. } => "ky",
            Self::Kz { .. } => "kz",
            Self::Sq(_) => "sq",
            Self::Gq(_) => "gq",
            Self::Tx(_) => "tx",
            Self::Ty(_) => "ty",
            Self::Tz(_) => "tz",
            Self::XPoints(_) => "x",
            Self::YPoints(_) => "y",
            Self::ZPoints(_) => "z",
            Self::Box(_) => "box",
            Self::Rpp(_) => "rpp",
            Self::Sph(_) => "sph",
            Self::Rcc(_) => "rcc",
            Self::Rhp(_) => "rhp",
            Self::Rec(_) => "rec",
            Self::Trc(_) => "trc",
            Self::Ell(_) => "ell",
            Self::Wed(_) => "wed",
            Self::Arb(_) => "arb",
        }
    }

    /// The coefficient list in card order.
    pub fn coefficients(&self) -> Vec<f64> {
        match self {
            Self::Px(d) | Self::Py(d) | Self::Pz(d) | Self::So(d) | Self::Cx(d) | Self::Cy(d)
            | Self::Cz(d) => vec![*d],
            Self::P(c) => c.to_vec(),
            Self::PPoints(c) => c.to_vec(),
            Self::S(c) | Self::Sph(c) => c.to_vec(),
            Self::Sx(c) | Self::Sy(c) | Self::Sz(c) => c.to_vec(),
            Self::CParX(c) | Self::CParY(c) | Self::CParZ(c) => c.to_vec(),
            Self::KParX {
                coefficients,
                sheet,
            }
            | Self::KParY {
                coefficients,
                sheet,
            }
            | Self::KParZ {
                coefficients,
                sheet,
            } => {
                let mut v = coefficients.to_vec();
                v.extend(sheet);
                v
            }
            Self::Kx {
                coefficients,
                sheet,
            }
            | Self::Ky {
                coefficients,
                sheet,
            }
            | Self::Kz {
                coefficients,
                sheet,
            } => {
                let mut v = coefficients.to_vec();
                v.extend(sheet);
                v
            }
            Self::Sq(c) | Self::Gq(c) => c.to_vec(),
            Self::Tx(c) | Self::Ty(c) | Self::Tz(c) | Self::Rpp(c) => c.to_vec(),
            Self::XPoints(pairs) | Self::YPoints(pairs) | Self::ZPoints(pairs) => {
                pairs.iter().flatten().copied().collect()
            }
            Self::Box(c) | Self::Wed(c) => c.to_vec(),
            Self::Rcc(c) => c.to_vec(),
            Self::Rhp(c) | Self::Rec(c) => c.clone(),
            Self::Trc(c) => c.to_vec(),
            Self::Ell(c) => c.to_vec(),
            Self::Arb(c) => c.to_vec(),
        }
    }
}

/// A complete surface card.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    modifier: Option<SurfaceModifier>,
    number: i64,
    transform: Option<i64>,
    kind: SurfaceKind,
}

impl Surface {
    /// Create a surface card.
    ///
    /// The number must be in 1..=99_999_999. A positive transform entry is a
    /// `tr` number (1..=999); a negative one names a periodic partner
    /// surface.
    pub fn new(
        modifier: Option<SurfaceModifier>,
        number: i64,
        transform: Option<i64>,
        kind: SurfaceKind,
    ) -> Result<Self, SemanticError> {
        if !(1..=99_999_999).contains(&number) {
            return Err(SemanticError::card("surface", "number", number));
        }
        if let Some(t) = transform {
            let valid = (1..=999).contains(&t) || (-99_999_999..0).contains(&t);
            if !valid {
                return Err(SemanticError::card("surface", "transform", t));
            }
        }
        Ok(Self {
            modifier,
            number,
            transform,
            kind,
        })
    }

    pub fn modifier(&self) -> Option<SurfaceModifier> {
        self.modifier
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn transform(&self) -> Option<i64> {
        self.transform
    }

    pub fn kind(&self) -> &SurfaceKind {
        &self.kind
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(modifier) = self.modifier {
            write!(f, "{modifier}")?;
        }
        write!(f, "{}", self.number)?;
        if let Some(t) = self.transform {
            write!(f, " {t}")?;
        }
        write!(f, " {}", self.kind.mnemonic())?;
        for c in self.kind.coefficients() {
            write!(f, " {}", format_real(c))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pz() {
        let kind = SurfaceKind::from_coefficients("pz", &[5.0]).unwrap();
        assert_eq!(kind, SurfaceKind::Pz(5.0));
        let surface = Surface::new(None, 1, None, kind).unwrap();
        assert_eq!(surface.to_string(), "1 pz 5");
    }

    #[test]
    fn test_plane_variations_by_arity() {
        assert!(matches!(
            SurfaceKind::from_coefficients("p", &[1.0; 4]).unwrap(),
            SurfaceKind::P(_)
        ));
        assert!(matches!(
            SurfaceKind::from_coefficients("p", &[1.0; 9]).unwrap(),
            SurfaceKind::PPoints(_)
        ));
        assert!(matches!(
            SurfaceKind::from_coefficients("p", &[1.0; 5]),
            Err(SurfaceError::NoVariantMatched { count: 5, .. })
        ));
    }

    #[test]
    fn test_revolution_pairs() {
        let kind = SurfaceKind::from_coefficients("x", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(kind, SurfaceKind::XPoints(vec![[1.0, 2.0], [3.0, 4.0]]));
        assert!(SurfaceKind::from_coefficients("x", &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_cone_sheet_restriction() {
        let kind = SurfaceKind::from_coefficients("kx", &[1.0, 0.25, -1.0]).unwrap();
        assert_eq!(
            kind,
            SurfaceKind::Kx {
                coefficients: [1.0, 0.25],
                sheet: Some(-1.0),
            }
        );
        // Structural arity match with a bad value is semantic, not fallback.
        assert!(matches!(
            SurfaceKind::from_coefficients("kx", &[1.0, 0.25, 2.0]),
            Err(SurfaceError::Semantic(_))
        ));
    }

    #[test]
    fn test_radius_restriction() {
        assert!(SurfaceKind::from_coefficients("so", &[5.0]).is_ok());
        assert!(matches!(
            SurfaceKind::from_coefficients("so", &[-5.0]),
            Err(SurfaceError::Semantic(_))
        ));
        assert!(matches!(
            SurfaceKind::from_coefficients("rcc", &[0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 0.0]),
            Err(SurfaceError::Semantic(_))
        ));
    }

    #[test]
    fn test_ellipsoid_rm_zero_rejected() {
        let coefficients = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        assert!(matches!(
            SurfaceKind::from_coefficients("ell", &coefficients),
            Err(SurfaceError::Semantic(_))
        ));
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert!(matches!(
            SurfaceKind::from_coefficients("zz", &[1.0]),
            Err(SurfaceError::UnknownMnemonic { .. })
        ));
    }

    #[test]
    fn test_surface_number_restriction() {
        let kind = SurfaceKind::Pz(0.0);
        assert!(Surface::new(None, 0, None, kind.clone()).is_err());
        assert!(Surface::new(None, 100_000_000, None, kind.clone()).is_err());
        assert!(Surface::new(None, 1, Some(1000), kind).is_err());
    }

    #[test]
    fn test_display_with_modifier_and_transform() {
        let kind = SurfaceKind::from_coefficients("c/z", &[1.0, -2.0, 3.5]).unwrap();
        let surface = Surface::new(Some(SurfaceModifier::Reflecting), 12, Some(4), kind).unwrap();
        assert_eq!(surface.to_string(), "*12 4 c/z 1 -2 3.5");
    }

    #[test]
    fn test_round_trip_via_coefficients() {
        let kind = SurfaceKind::from_coefficients("rcc", &[0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 2.0])
            .unwrap();
        let again =
            SurfaceKind::from_coefficients(kind.mnemonic(), &kind.coefficients()).unwrap();
        assert_eq!(kind, again);
    }
}
