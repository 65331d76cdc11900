//! Run-control and geometry-parameter data cards.

use std::fmt;

use crate::error::SemanticError;
use crate::types::{format_real, Entry};

/// An `nps` card: history cutoff, with an optional multigroup history count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit {
    histories: i64,
    multigroup: Option<i64>,
}

impl HistoryLimit {
    pub fn new(histories: i64, multigroup: Option<i64>) -> Result<Self, SemanticError> {
        if histories <= 0 {
            return Err(SemanticError::card("nps", "histories", histories));
        }
        if let Some(m) = multigroup {
            if m <= 0 {
                return Err(SemanticError::card("nps", "npsmg", m));
            }
        }
        Ok(Self {
            histories,
            multigroup,
        })
    }

    pub fn histories(&self) -> i64 {
        self.histories
    }

    pub fn multigroup(&self) -> Option<i64> {
        self.multigroup
    }
}

impl fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nps {}", self.histories)?;
        if let Some(m) = self.multigroup {
            write!(f, " {m}")?;
        }
        Ok(())
    }
}

/// A `ctme` card: computer-time cutoff in minutes, >= 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeLimit {
    minutes: f64,
}

impl TimeLimit {
    pub fn new(minutes: f64) -> Result<Self, SemanticError> {
        if minutes < 0.0 {
            return Err(SemanticError::card("ctme", "minutes", minutes));
        }
        Ok(Self { minutes })
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctme {}", format_real(self.minutes))
    }
}

/// A keyword option on a `rand` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomOption {
    /// `gen n` - generator index, 1..=4.
    Generator(i64),
    /// `seed n` - starting seed, must be odd.
    Seed(i64),
    /// `stride n` - seeds between source particles.
    Stride(i64),
    /// `hist n` - starting history number.
    History(i64),
}

impl RandomOption {
    fn check(&self) -> Result<(), SemanticError> {
        match self {
            RandomOption::Generator(g) if !(1..=4).contains(g) => {
                Err(SemanticError::option("gen", "generator", *g))
            }
            RandomOption::Seed(s) if s % 2 == 0 => {
                Err(SemanticError::option("seed", "seed", *s))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for RandomOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomOption::Generator(g) => write!(f, "gen={g}"),
            RandomOption::Seed(s) => write!(f, "seed={s}"),
            RandomOption::Stride(s) => write!(f, "stride={s}"),
            RandomOption::History(h) => write!(f, "hist={h}"),
        }
    }
}

/// A `rand` card: random-number generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomSettings {
    options: Vec<RandomOption>,
}

impl RandomSettings {
    pub fn new(options: Vec<RandomOption>) -> Result<Self, SemanticError> {
        if options.is_empty() {
            return Err(SemanticError::card("rand", "options", "empty"));
        }
        for option in &options {
            option.check()?;
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[RandomOption] {
        &self.options
    }
}

impl fmt::Display for RandomSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rand")?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// A `prdmp` card: print-and-dump cycle control, up to five jumpable
/// entries (`ndp ndm mct ndmp dmmp`).
#[derive(Debug, Clone, PartialEq)]
pub struct DumpControl {
    entries: Vec<Entry<i64>>,
}

impl DumpControl {
    pub fn new(entries: Vec<Entry<i64>>) -> Result<Self, SemanticError> {
        if entries.is_empty() || entries.len() > 5 {
            return Err(SemanticError::card("prdmp", "entries", entries.len()));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry<i64>] {
        &self.entries
    }
}

impl fmt::Display for DumpControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prdmp")?;
        for entry in &self.entries {
            write!(f, " {entry}")?;
        }
        Ok(())
    }
}

/// A `print` card: output table selection. Positive numbers add tables,
/// negative numbers remove them; an empty list means all tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintControl {
    tables: Vec<i64>,
}

impl PrintControl {
    pub fn new(tables: Vec<i64>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[i64] {
        &self.tables
    }
}

impl fmt::Display for PrintControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "print")?;
        for t in &self.tables {
            write!(f, " {t}")?;
        }
        Ok(())
    }
}

/// A `lost` card: lost-particle tolerances (count before abort, count
/// printed), both >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LostControl {
    abort: i64,
    printed: i64,
}

impl LostControl {
    pub fn new(abort: i64, printed: i64) -> Result<Self, SemanticError> {
        if abort < 0 {
            return Err(SemanticError::card("lost", "lost1", abort));
        }
        if printed < 0 {
            return Err(SemanticError::card("lost", "lost2", printed));
        }
        Ok(Self { abort, printed })
    }

    pub fn abort(&self) -> i64 {
        self.abort
    }

    pub fn printed(&self) -> i64 {
        self.printed
    }
}

impl fmt::Display for LostControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lost {} {}", self.abort, self.printed)
    }
}

/// An `idum` card: a user-defined integer array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerArray {
    values: Vec<i64>,
}

impl IntegerArray {
    pub fn new(values: Vec<i64>) -> Result<Self, SemanticError> {
        if values.is_empty() {
            return Err(SemanticError::card("idum", "values", "empty"));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

impl fmt::Display for IntegerArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "idum")?;
        for v in &self.values {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

/// An `rdum` card: a user-defined real array.
#[derive(Debug, Clone, PartialEq)]
pub struct RealArray {
    values: Vec<f64>,
}

impl RealArray {
    pub fn new(values: Vec<f64>) -> Result<Self, SemanticError> {
        if values.is_empty() {
            return Err(SemanticError::card("rdum", "values", "empty"));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl fmt::Display for RealArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rdum")?;
        for v in &self.values {
            write!(f, " {}", format_real(*v))?;
        }
        Ok(())
    }
}

/// A `void` card: make the named cells void, or every cell if no cells are
/// named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidOverride {
    cells: Vec<i64>,
}

impl VoidOverride {
    pub fn new(cells: Vec<i64>) -> Result<Self, SemanticError> {
        for cell in &cells {
            if !(1..=99_999_999).contains(cell) {
                return Err(SemanticError::card("void", "cell", *cell));
            }
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}

impl fmt::Display for VoidOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "void")?;
        for cell in &self.cells {
            write!(f, " {cell}")?;
        }
        Ok(())
    }
}

/// A `vol` card: one volume per cell, each >= 0, jumpable. The leading
/// `no` keyword disables volume calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Volumes {
    no_calculation: bool,
    volumes: Vec<Entry<f64>>,
}

impl Volumes {
    pub fn new(no_calculation: bool, volumes: Vec<Entry<f64>>) -> Result<Self, SemanticError> {
        if volumes.is_empty() {
            return Err(SemanticError::card("vol", "volumes", "empty"));
        }
        for volume in &volumes {
            if !volume.satisfies(|v| *v >= 0.0) {
                return Err(SemanticError::card("vol", "volume", *volume));
            }
        }
        Ok(Self {
            no_calculation,
            volumes,
        })
    }

    pub fn no_calculation(&self) -> bool {
        self.no_calculation
    }

    pub fn volumes(&self) -> &[Entry<f64>] {
        &self.volumes
    }
}

impl fmt::Display for Volumes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vol")?;
        if self.no_calculation {
            write!(f, " no")?;
        }
        for volume in &self.volumes {
            write!(f, " {volume}")?;
        }
        Ok(())
    }
}

/// An `area` card: one surface area per surface, each >= 0, jumpable.
#[derive(Debug, Clone, PartialEq)]
pub struct Areas {
    areas: Vec<Entry<f64>>,
}

impl Areas {
    pub fn new(areas: Vec<Entry<f64>>) -> Result<Self, SemanticError> {
        if areas.is_empty() {
            return Err(SemanticError::card("area", "areas", "empty"));
        }
        for area in &areas {
            if !area.satisfies(|v| *v >= 0.0) {
                return Err(SemanticError::card("area", "area", *area));
            }
        }
        Ok(Self { areas })
    }

    pub fn areas(&self) -> &[Entry<f64>] {
        &self.areas
    }
}

impl fmt::Display for Areas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area")?;
        for area in &self.areas {
            write!(f, " {area}")?;
        }
        Ok(())
    }
}

/// The data-block form of a per-cell integer parameter (`u`, `lat`,
/// `fill`): one jumpable value per cell.
#[derive(Debug, Clone, PartialEq)]
struct CellIntegers {
    values: Vec<Entry<i64>>,
}

impl CellIntegers {
    fn new(
        card: &'static str,
        attribute: &'static str,
        values: Vec<Entry<i64>>,
        restriction: impl Fn(i64) -> bool,
    ) -> Result<Self, SemanticError> {
        if values.is_empty() {
            return Err(SemanticError::card(card, attribute, "empty"));
        }
        for value in &values {
            if !value.satisfies(|v| restriction(*v)) {
                return Err(SemanticError::card(card, attribute, *value));
            }
        }
        Ok(Self { values })
    }

    fn fmt_as(&self, f: &mut fmt::Formatter<'_>, mnemonic: &str) -> fmt::Result {
        write!(f, "{mnemonic}")?;
        for value in &self.values {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

/// A `u` data card: one universe number per cell, |v| <= 99_999_999.
#[derive(Debug, Clone, PartialEq)]
pub struct Universes(CellIntegers);

impl Universes {
    pub fn new(values: Vec<Entry<i64>>) -> Result<Self, SemanticError> {
        CellIntegers::new("u", "universe", values, |v| v.abs() <= 99_999_999).map(Self)
    }

    pub fn values(&self) -> &[Entry<i64>] {
        &self.0.values
    }
}

impl fmt::Display for Universes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "u")
    }
}

/// A `lat` data card: one lattice type per cell, each in {1, 2}.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattices(CellIntegers);

impl Lattices {
    pub fn new(values: Vec<Entry<i64>>) -> Result<Self, SemanticError> {
        CellIntegers::new("lat", "type", values, |v| matches!(v, 1 | 2)).map(Self)
    }

    pub fn values(&self) -> &[Entry<i64>] {
        &self.0.values
    }
}

impl fmt::Display for Lattices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "lat")
    }
}

/// A `fill` data card: one filling universe per cell, 0..=99_999_999.
#[derive(Debug, Clone, PartialEq)]
pub struct Fillings(CellIntegers);

impl Fillings {
    pub fn new(values: Vec<Entry<i64>>) -> Result<Self, SemanticError> {
        CellIntegers::new("fill", "universe", values, |v| (0..=99_999_999).contains(&v)).map(Self)
    }

    pub fn values(&self) -> &[Entry<i64>] {
        &self.0.values
    }
}

impl fmt::Display for Fillings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_as(f, "fill")
    }
}
