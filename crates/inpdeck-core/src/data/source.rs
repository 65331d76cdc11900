//! Source specification cards (`sdef`, `si`, `sp`, `sb`, `ds`, `ksrc`).

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, DistributionNumber};

/// A value slot on a source card: an explicit real or a reference to a
/// distribution defined elsewhere in the deck.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Real(f64),
    Distribution(DistributionNumber),
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceValue::Real(v) => write!(f, "{}", format_real(*v)),
            SourceValue::Distribution(d) => write!(f, "{d}"),
        }
    }
}

/// A source variable keyword on an `sdef` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVariable {
    Cel,
    Sur,
    Erg,
    Tme,
    Dir,
    Pos,
    Rad,
    Ext,
    Axs,
    X,
    Y,
    Z,
    Vec,
    Nrm,
    Ccc,
    Ara,
    Wgt,
    Eff,
    Par,
    Tr,
}

impl SourceVariable {
    const KEYWORDS: &'static [(&'static str, SourceVariable)] = &[
        ("cel", SourceVariable::Cel),
        ("sur", SourceVariable::Sur),
        ("erg", SourceVariable::Erg),
        ("tme", SourceVariable::Tme),
        ("dir", SourceVariable::Dir),
        ("pos", SourceVariable::Pos),
        ("rad", SourceVariable::Rad),
        ("ext", SourceVariable::Ext),
        ("axs", SourceVariable::Axs),
        ("x", SourceVariable::X),
        ("y", SourceVariable::Y),
        ("z", SourceVariable::Z),
        ("vec", SourceVariable::Vec),
        ("nrm", SourceVariable::Nrm),
        ("ccc", SourceVariable::Ccc),
        ("ara", SourceVariable::Ara),
        ("wgt", SourceVariable::Wgt),
        ("eff", SourceVariable::Eff),
        ("par", SourceVariable::Par),
        ("tr", SourceVariable::Tr),
    ];

    /// Look up a keyword, case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let lower = keyword.to_ascii_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(k, _)| *k == lower)
            .map(|(_, v)| *v)
    }

    pub fn keyword(&self) -> &'static str {
        Self::KEYWORDS
            .iter()
            .find(|(_, v)| v == self)
            .map(|(k, _)| *k)
            .unwrap_or("")
    }
}

/// An `sdef` general-source card: keyword-value source variable settings.
///
/// Vector-valued variables (`pos`, `axs`, `vec`) take several values after
/// one keyword; the rest take one.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDefinition {
    options: Vec<(SourceVariable, Vec<SourceValue>)>,
}

impl SourceDefinition {
    pub fn new(
        options: Vec<(SourceVariable, Vec<SourceValue>)>,
    ) -> Result<Self, SemanticError> {
        for (variable, values) in &options {
            if values.is_empty() {
                return Err(SemanticError::option(variable.keyword(), "values", "empty"));
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[(SourceVariable, Vec<SourceValue>)] {
        &self.options
    }
}

impl fmt::Display for SourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sdef")?;
        for (variable, values) in &self.options {
            write!(f, " {}=", variable.keyword())?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

fn check_suffix(card: &'static str, suffix: i64) -> Result<(), SemanticError> {
    if !(0..=999).contains(&suffix) {
        return Err(SemanticError::card(card, "suffix", suffix));
    }
    Ok(())
}

/// The interpretation letter on an `si` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationOption {
    /// Histogram bin boundaries.
    Histogram,
    /// Discrete values.
    List,
    /// Points for a density function.
    Points,
    /// Distribution numbers (a distribution of distributions).
    Distributions,
}

impl InformationOption {
    pub fn letter(&self) -> char {
        match self {
            InformationOption::Histogram => 'h',
            InformationOption::List => 'l',
            InformationOption::Points => 'a',
            InformationOption::Distributions => 's',
        }
    }
}

/// An `si<n>` source-information card.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInformation {
    suffix: i64,
    option: Option<InformationOption>,
    values: Vec<f64>,
}

impl SourceInformation {
    pub fn new(
        suffix: i64,
        option: Option<InformationOption>,
        values: Vec<f64>,
    ) -> Result<Self, SemanticError> {
        check_suffix("si", suffix)?;
        if values.is_empty() {
            return Err(SemanticError::card("si", "values", "empty"));
        }
        Ok(Self {
            suffix,
            option,
            values,
        })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn option(&self) -> Option<InformationOption> {
        self.option
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl fmt::Display for SourceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "si{}", self.suffix)?;
        if let Some(option) = self.option {
            write!(f, " {}", option.letter())?;
        }
        for value in &self.values {
            write!(f, " {}", format_real(*value))?;
        }
        Ok(())
    }
}

/// The interpretation letter on an `sp` or `sb` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityOption {
    /// Bin probabilities (the default).
    Discrete,
    /// Cumulative bin probabilities.
    Cumulative,
    /// Cell-volume weighting.
    Volume,
    /// Intra-bin weighting (`sb` only in practice).
    Weight,
}

impl ProbabilityOption {
    pub fn letter(&self) -> char {
        match self {
            ProbabilityOption::Discrete => 'd',
            ProbabilityOption::Cumulative => 'c',
            ProbabilityOption::Volume => 'v',
            ProbabilityOption::Weight => 'w',
        }
    }
}

/// The two shapes an `sp`/`sb` card can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityVariant {
    /// Explicit probabilities, optionally prefixed by an interpretation
    /// letter.
    Values {
        option: Option<ProbabilityOption>,
        probabilities: Vec<f64>,
    },
    /// A built-in function `-f a [b]`, f in -41..=-2.
    Function {
        function: i64,
        a: f64,
        b: Option<f64>,
    },
}

/// An `sp<n>` (source probability) or `sb<n>` (source bias) card. The two
/// mnemonics share one shape; the document model keeps them apart.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProbability {
    suffix: i64,
    variant: ProbabilityVariant,
}

impl SourceProbability {
    pub fn new(suffix: i64, variant: ProbabilityVariant) -> Result<Self, SemanticError> {
        check_suffix("sp", suffix)?;
        match &variant {
            ProbabilityVariant::Values { probabilities, .. } => {
                if probabilities.is_empty() {
                    return Err(SemanticError::card("sp", "probabilities", "empty"));
                }
            }
            ProbabilityVariant::Function { function, .. } => {
                if !(-41..=-2).contains(function) {
                    return Err(SemanticError::card("sp", "function", *function));
                }
            }
        }
        Ok(Self { suffix, variant })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn variant(&self) -> &ProbabilityVariant {
        &self.variant
    }

    /// Serialize under the given mnemonic (`sp` or `sb`).
    pub(crate) fn fmt_as(&self, f: &mut fmt::Formatter<'_>, mnemonic: &str) -> fmt::Result {
        write!(f, "{mnemonic}{}", self.suffix)?;
        match &self.variant {
            ProbabilityVariant::Values {
                option,
                probabilities,
            } => {
                if let Some(option) = option {
                    write!(f, " {}", option.letter())?;
                }
                for p in probabilities {
                    write!(f, " {}", format_real(*p))?;
                }
            }
            ProbabilityVariant::Function { function, a, b } => {
                write!(f, " {function} {}", format_real(*a))?;
                if let Some(b) = b {
                    write!(f, " {}", format_real(*b))?;
                }
            }
        }
        Ok(())
    }
}

/// The interpretation of a `ds` dependent-distribution card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentOption {
    Histogram,
    List,
    Distributions,
}

impl DependentOption {
    pub fn letter(&self) -> char {
        match self {
            DependentOption::Histogram => 'h',
            DependentOption::List => 'l',
            DependentOption::Distributions => 's',
        }
    }
}

/// The three shapes a `ds` card can take.
#[derive(Debug, Clone, PartialEq)]
pub enum DependentVariant {
    /// A value list prefixed by an optional interpretation letter.
    Values {
        option: Option<DependentOption>,
        values: Vec<f64>,
    },
    /// `t` form: (independent value, dependent value) pairs.
    Pairs(Vec<(f64, f64)>),
    /// `q` form: (independent bound, dependent value) pairs.
    Bounds(Vec<(f64, f64)>),
}

/// A `ds<n>` dependent source distribution card.
#[derive(Debug, Clone, PartialEq)]
pub struct DependentSource {
    suffix: i64,
    variant: DependentVariant,
}

impl DependentSource {
    pub fn new(suffix: i64, variant: DependentVariant) -> Result<Self, SemanticError> {
        check_suffix("ds", suffix)?;
        let empty = match &variant {
            DependentVariant::Values { values, .. } => values.is_empty(),
            DependentVariant::Pairs(pairs) | DependentVariant::Bounds(pairs) => pairs.is_empty(),
        };
        if empty {
            return Err(SemanticError::card("ds", "values", "empty"));
        }
        Ok(Self { suffix, variant })
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    pub fn variant(&self) -> &DependentVariant {
        &self.variant
    }
}

impl fmt::Display for DependentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ds{}", self.suffix)?;
        match &self.variant {
            DependentVariant::Values { option, values } => {
                if let Some(option) = option {
                    write!(f, " {}", option.letter())?;
                }
                for value in values {
                    write!(f, " {}", format_real(*value))?;
                }
            }
            DependentVariant::Pairs(pairs) => {
                write!(f, " t")?;
                for (a, b) in pairs {
                    write!(f, " {} {}", format_real(*a), format_real(*b))?;
                }
            }
            DependentVariant::Bounds(pairs) => {
                write!(f, " q")?;
                for (a, b) in pairs {
                    write!(f, " {} {}", format_real(*a), format_real(*b))?;
                }
            }
        }
        Ok(())
    }
}

/// A `ksrc` criticality source card: initial fission site locations.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalitySource {
    locations: Vec<[f64; 3]>,
}

impl CriticalitySource {
    pub fn new(locations: Vec<[f64; 3]>) -> Result<Self, SemanticError> {
        if locations.is_empty() {
            return Err(SemanticError::card("ksrc", "locations", "empty"));
        }
        Ok(Self { locations })
    }

    pub fn locations(&self) -> &[[f64; 3]] {
        &self.locations
    }
}

impl fmt::Display for CriticalitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ksrc")?;
        for [x, y, z] in &self.locations {
            write!(
                f,
                " {} {} {}",
                format_real(*x),
                format_real(*y),
                format_real(*z)
            )?;
        }
        Ok(())
    }
}
