//! Card parsers over token slices.
//!
//! Each logical card is tokenized by the [`lexer`](crate::lexer) and parsed
//! here into the typed records of `inpdeck-core`. The public entry points
//! are [`parse_cell`], [`parse_surface`], and [`parse_data`], one per card
//! block.
//!
//! Two failure modes flow through winnow's error machinery:
//!
//! - a *structural* mismatch (wrong token shape) is an `ErrMode::Backtrack`,
//!   so `alt` chains move on to the next card variation in declaration
//!   order;
//! - a *restriction* failure (the shape matched but a value violates its
//!   attribute's restriction) is an `ErrMode::Cut` carrying the
//!   [`SemanticError`], which aborts dispatch immediately and is reported
//!   against the matched variation.
//!
//! Card variations that differ only in entry count (`tr`, surface
//! mnemonics) are not `alt` chains; the count dispatch lives in the core
//! constructors (`Transformation::from_entries`,
//! `SurfaceKind::from_coefficients`) and their count errors surface here as
//! "no card variation matched".

use winnow::{
    Parser as _,
    combinator::{alt, eof, opt, repeat, separated},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use inpdeck_core::{
    cell::{
        Cell, CellOption,
        option::{
            Cosy, DetectorContribution, EnergyCutoff, ExponentialTransform, Fill, FillVariant,
            FissionTurnoff, ForcedCollision, Importance, Lattice, MagneticField, PhotonWeight,
            PointDetectorContribution, Temperature, Trcl, TrclVariant, Uncollided, Universe,
            Volume, WeightWindowBound,
        },
    },
    data::{
        Areas, CellImportances, CellTemperatures, CoordinateTransform, CriticalitySource, Cutoff,
        DataCard, DependentOption, DependentSource, DependentVariant, DetectorPoint, DumpControl,
        Fillings, HistoryLimit, InformationOption, IntegerArray, Lattices, LostControl, Material,
        MaterialOption, MaterialThermal, Mode, Physics, PrintControl, PrintOrder,
        ProbabilityOption, ProbabilityVariant, RandomOption, RandomSettings, RealArray,
        SegmentDivisors, SourceDefinition, SourceInformation, SourceProbability, SourceValue,
        SourceVariable, Substance, Tally, TallyCosines, TallyEnergies, TallyTimes, TallyVariant,
        TimeLimit, Universes, VoidOverride, Volumes, WindowBounds, WindowEnergies,
        WindowParameters,
    },
    error::SemanticError,
    surface::{Surface, SurfaceError, SurfaceKind, SurfaceModifier},
    types::{Designator, DistributionNumber, Entry, Geometry, Particle, Transformation, Zaid},
};
use inpdeck_core::types::TransformError;

use crate::{
    error::{Diagnostic, ErrorCode},
    lexer,
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed.
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position.
    StartOffset(usize),
    /// Error code override for the resulting diagnostic.
    Code(ErrorCode),
    /// A restriction failure raised by a record constructor.
    Semantic(SemanticError),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = Result<O, ErrMode<ContextError<Context>>>;

/// A Cut error carrying an error code, labeled from `start_remaining`.
fn cut_code(code: ErrorCode, start_remaining: usize) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::StartOffset(start_remaining));
    e.push(Context::Code(code));
    ErrMode::Cut(e)
}

/// A Cut error carrying a restriction failure.
fn cut_semantic(err: SemanticError, start_remaining: usize) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::StartOffset(start_remaining));
    e.push(Context::Semantic(err));
    ErrMode::Cut(e)
}

/// Commit a record constructor result: restriction failures become Cut.
fn commit<T>(result: Result<T, SemanticError>, start_remaining: usize) -> IResult<T> {
    result.map_err(|err| cut_semantic(err, start_remaining))
}

/// Commit a transformation assembly result: count mismatches become "no
/// variation matched", restriction failures become semantic cuts.
fn commit_transform<T>(
    result: Result<T, TransformError>,
    start_remaining: usize,
) -> IResult<T> {
    result.map_err(|err| match err {
        TransformError::NoVariantMatched { .. } => cut_code(ErrorCode::E103, start_remaining),
        TransformError::Semantic(e) => cut_semantic(e, start_remaining),
    })
}

// ---------------------------------------------------------------------------
// Token-level parsers
// ---------------------------------------------------------------------------

fn colon(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Colon))
        .void()
        .parse_next(input)
}

fn comma(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Comma))
        .void()
        .parse_next(input)
}

fn lparen(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::LParen))
        .void()
        .parse_next(input)
}

fn rparen(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::RParen))
        .void()
        .parse_next(input)
}

fn star(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Star))
        .void()
        .parse_next(input)
}

fn plus(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Plus))
        .void()
        .parse_next(input)
}

/// Consume an optional `=` between a keyword and its value.
fn opt_equals(input: &mut Input<'_>) -> IResult<()> {
    opt(any
        .verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Equals))
        .void())
    .void()
    .parse_next(input)
}

/// Parse an integer literal.
fn integer(input: &mut Input<'_>) -> IResult<i64> {
    preceded_plus(|t| match t {
        Token::Int(i) => Some(*i),
        _ => None,
    })
    .context(Context::Label("integer"))
    .parse_next(input)
}

/// Parse a real literal (integers coerce).
fn real(input: &mut Input<'_>) -> IResult<f64> {
    preceded_plus(|t| match t {
        Token::Int(i) => Some(*i as f64),
        Token::Real(r) => Some(*r),
        _ => None,
    })
    .context(Context::Label("number"))
    .parse_next(input)
}

/// Build a parser accepting an optional explicit `+` marker before a token
/// matched by `map`.
fn preceded_plus<'src, O>(
    map: impl Fn(&Token<'src>) -> Option<O>,
) -> impl winnow::Parser<Input<'src>, O, ErrMode<ContextError<Context>>> {
    move |input: &mut Input<'src>| {
        let checkpoint = input.checkpoint();
        let _ = opt(plus).parse_next(input)?;
        match any
            .verify_map(|t: &PositionedToken<'src>| map(&t.token))
            .parse_next(input)
        {
            Ok(value) => Ok(value),
            Err(e) => {
                input.reset(&checkpoint);
                Err(e)
            }
        }
    }
}

/// Parse a jumpable real entry.
fn entry(input: &mut Input<'_>) -> IResult<Entry<f64>> {
    alt((
        any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Jump))
            .value(Entry::Jump),
        real.map(Entry::Value),
    ))
    .context(Context::Label("entry"))
    .parse_next(input)
}

/// Parse a jumpable integer entry.
fn int_entry(input: &mut Input<'_>) -> IResult<Entry<i64>> {
    alt((
        any.verify(|t: &PositionedToken<'_>| matches!(t.token, Token::Jump))
            .value(Entry::Jump),
        integer.map(Entry::Value),
    ))
    .context(Context::Label("entry"))
    .parse_next(input)
}

/// Parse a plain word.
fn word<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    any.verify_map(|t: &PositionedToken<'src>| match t.token {
        Token::Word(w) => Some(w),
        _ => None,
    })
    .context(Context::Label("word"))
    .parse_next(input)
}

/// Parse a single particle code. Codes that collide with punctuation
/// (`#`, `*`, `+`) arrive as their punctuation tokens.
fn particle(input: &mut Input<'_>) -> IResult<Particle> {
    any.verify_map(|t: &PositionedToken<'_>| {
        let code = match &t.token {
            Token::Word(w) => {
                let mut chars = w.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return None,
                }
            }
            Token::Hash => '#',
            Token::Star => '*',
            Token::Plus => '+',
            _ => return None,
        };
        Particle::from_code(code).ok()
    })
    .context(Context::Label("particle code"))
    .parse_next(input)
}

/// Parse a `:<d>` particle designator suffix.
fn designator_suffix(input: &mut Input<'_>) -> IResult<Designator> {
    colon.parse_next(input)?;
    let particles: Vec<Particle> = separated(1.., particle, comma)
        .context(Context::Label("particle designator"))
        .parse_next(input)?;
    Designator::new(particles).map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// Parse a nuclide identifier (`1001`, `92235.80c`).
fn zaid(input: &mut Input<'_>) -> IResult<Zaid> {
    any.verify_map(|t: &PositionedToken<'_>| match &t.token {
        Token::Word(w) => Zaid::parse(w).ok(),
        Token::Int(i) if *i >= 0 => Zaid::parse(&i.to_string()).ok(),
        _ => None,
    })
    .context(Context::Label("nuclide identifier"))
    .parse_next(input)
}

/// Parse end of card.
fn end(input: &mut Input<'_>) -> IResult<()> {
    eof.void()
        .context(Context::Label("end of card"))
        .parse_next(input)
}

/// Split a mnemonic word into its alphabetic base and numeric suffix
/// (`wwn1` -> `("wwn", Some(1))`, `sdef` -> `("sdef", None)`).
fn split_mnemonic(word: &str) -> (&str, Option<i64>) {
    match word.find(|c: char| c.is_ascii_digit()) {
        Some(pos) => {
            let (base, digits) = word.split_at(pos);
            match digits.parse::<i64>() {
                Ok(n) => (base, Some(n)),
                Err(_) => (word, None),
            }
        }
        None => (word, None),
    }
}

// ---------------------------------------------------------------------------
// Cell cards
// ---------------------------------------------------------------------------

/// Parse a full cell card: `n m [d] geometry options...`.
fn cell_card<'src>(src: &'src str, input: &mut Input<'src>) -> IResult<Cell> {
    let card_start = input.eof_offset();

    let number = integer.context(Context::Label("cell number")).parse_next(input)?;
    let material = integer
        .context(Context::Label("material number"))
        .parse_next(input)?;
    let density = if material != 0 {
        Some(real.context(Context::Label("density")).parse_next(input)?)
    } else {
        None
    };

    // Geometry: a run of surface numbers and operators. Trailing options
    // always start with a word, so the run is unambiguous. The original
    // source slice is kept so spacing survives the round trip.
    let mut geometry_span: Option<Span> = None;
    loop {
        let checkpoint = input.checkpoint();
        let result: IResult<_> = any
            .verify(|t: &PositionedToken<'_>| {
                matches!(
                    t.token,
                    Token::Int(_) | Token::Colon | Token::Hash | Token::LParen | Token::RParen
                )
            })
            .parse_next(input);
        match result {
            Ok(token) => {
                geometry_span =
                    Some(geometry_span.map_or(token.span, |s| s.union(token.span)));
            }
            Err(_) => {
                input.reset(&checkpoint);
                break;
            }
        }
    }
    let span = match geometry_span {
        Some(span) => span,
        None => {
            let mut e = ContextError::new();
            e.push(Context::StartOffset(input.eof_offset()));
            e.push(Context::Label("geometry"));
            return Err(ErrMode::Backtrack(e));
        }
    };
    let geometry = Geometry::new(&src[span.start()..span.end()])
        .map_err(|_| cut_code(ErrorCode::E100, input.eof_offset()))?;

    let options: Vec<CellOption> = repeat(0.., cell_option).parse_next(input)?;
    end.parse_next(input)?;

    commit(
        Cell::new(number, material, density, geometry, options),
        card_start,
    )
}

/// Parse one trailing cell option.
fn cell_option(input: &mut Input<'_>) -> IResult<CellOption> {
    let start = input.eof_offset();
    let degrees = opt(star).parse_next(input)?.is_some();
    let name = word.parse_next(input)?;
    let (base, suffix) = split_mnemonic(name);
    let base = base.to_ascii_lowercase();

    // The degrees marker only belongs to trcl and fill.
    if degrees && base != "trcl" && base != "fill" {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    let option = match (base.as_str(), suffix) {
        ("imp", None) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let value = entry.parse_next(input)?;
            CellOption::Imp(commit(Importance::new(designator, value), start)?)
        }
        ("vol", None) => {
            opt_equals.parse_next(input)?;
            let value = real.parse_next(input)?;
            CellOption::Vol(commit(Volume::new(value), start)?)
        }
        ("pwt", None) => {
            opt_equals.parse_next(input)?;
            let value = entry.parse_next(input)?;
            CellOption::Pwt(PhotonWeight::new(value))
        }
        ("ext", None) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let stretch = stretch_specifier.parse_next(input)?;
            CellOption::Ext(commit(
                ExponentialTransform::new(designator, stretch),
                start,
            )?)
        }
        ("fcl", None) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let control = real.parse_next(input)?;
            CellOption::Fcl(commit(ForcedCollision::new(designator, control), start)?)
        }
        ("wwn", Some(index)) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let bound = entry.parse_next(input)?;
            CellOption::Wwn(commit(
                WeightWindowBound::new(index, designator, bound),
                start,
            )?)
        }
        ("dxc", Some(index)) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let probability = real.parse_next(input)?;
            CellOption::Dxc(commit(
                DetectorContribution::new(index, designator, probability),
                start,
            )?)
        }
        ("nonu", None) => {
            opt_equals.parse_next(input)?;
            let setting = integer.parse_next(input)?;
            CellOption::Nonu(commit(FissionTurnoff::new(setting), start)?)
        }
        ("pd", Some(index)) => {
            opt_equals.parse_next(input)?;
            let probability = real.parse_next(input)?;
            CellOption::Pd(commit(
                PointDetectorContribution::new(index, probability),
                start,
            )?)
        }
        ("tmp", suffix) => {
            opt_equals.parse_next(input)?;
            let temperature = real.parse_next(input)?;
            CellOption::Tmp(commit(Temperature::new(suffix, temperature), start)?)
        }
        ("u", None) => {
            opt_equals.parse_next(input)?;
            let universe = integer.parse_next(input)?;
            CellOption::U(commit(Universe::new(universe), start)?)
        }
        ("trcl", None) => {
            opt_equals.parse_next(input)?;
            let variant = trcl_variant.parse_next(input)?;
            CellOption::Trcl(commit(Trcl::new(degrees, variant), start)?)
        }
        ("lat", None) => {
            opt_equals.parse_next(input)?;
            let kind = integer.parse_next(input)?;
            CellOption::Lat(commit(Lattice::new(kind), start)?)
        }
        ("fill", None) => {
            opt_equals.parse_next(input)?;
            let variant = fill_variant.parse_next(input)?;
            CellOption::Fill(commit(Fill::new(degrees, variant), start)?)
        }
        ("elpt", None) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let cutoff = real.parse_next(input)?;
            CellOption::Elpt(EnergyCutoff::new(designator, cutoff))
        }
        ("cosy", None) => {
            opt_equals.parse_next(input)?;
            let number = integer.parse_next(input)?;
            CellOption::Cosy(commit(Cosy::new(number), start)?)
        }
        ("bflcl", None) => {
            opt_equals.parse_next(input)?;
            let number = integer.parse_next(input)?;
            CellOption::Bflcl(commit(MagneticField::new(number), start)?)
        }
        ("unc", None) => {
            let designator = designator_suffix.parse_next(input)?;
            opt_equals.parse_next(input)?;
            let setting = integer.parse_next(input)?;
            CellOption::Unc(commit(Uncollided::new(designator, setting), start)?)
        }
        _ => return Err(ErrMode::Backtrack(ContextError::new())),
    };
    Ok(option)
}

/// An exponential-transform stretch specifier (`0.7v`, `-.4x`, `0.5`).
fn stretch_specifier<'src>(input: &mut Input<'src>) -> IResult<String> {
    any.verify_map(|t: &PositionedToken<'src>| match &t.token {
        Token::Word(w) => Some(w.to_string()),
        Token::Int(i) => Some(i.to_string()),
        Token::Real(r) => Some(r.to_string()),
        _ => None,
    })
    .context(Context::Label("stretch specifier"))
    .parse_next(input)
}

/// The variations of a `trcl` option, tried in declaration order: a bare
/// transformation number, then a parenthesized inline transformation.
fn trcl_variant(input: &mut Input<'_>) -> IResult<TrclVariant> {
    alt((
        integer.map(TrclVariant::Number),
        |input: &mut Input<'_>| {
            let start = input.eof_offset();
            let entries = paren_entries.parse_next(input)?;
            commit_transform(Transformation::from_entries(&entries), start)
                .map(TrclVariant::Transformation)
        },
    ))
    .context(Context::Label("trcl"))
    .parse_next(input)
}

/// The variations of a `fill` option, in declaration order: the lattice
/// form, a universe with parenthesized transformation (number or inline),
/// then a bare universe.
fn fill_variant(input: &mut Input<'_>) -> IResult<FillVariant> {
    alt((
        fill_lattice,
        |input: &mut Input<'_>| {
            let universe = integer.parse_next(input)?;
            let start = input.eof_offset();
            alt((
                (lparen, integer, rparen).map(|(_, transform, _)| FillVariant::Universe {
                    universe,
                    transform: Some(transform),
                }),
                move |input: &mut Input<'_>| {
                    let entries = paren_entries.parse_next(input)?;
                    let transformation =
                        commit_transform(Transformation::from_entries(&entries), start)?;
                    Ok(FillVariant::Transformed {
                        universe,
                        transformation,
                    })
                },
            ))
            .parse_next(input)
        },
        integer.map(|universe| FillVariant::Universe {
            universe,
            transform: None,
        }),
    ))
    .context(Context::Label("fill"))
    .parse_next(input)
}

/// The lattice form of `fill`: `i1:i2 j1:j2 k1:k2 u...`.
fn fill_lattice(input: &mut Input<'_>) -> IResult<FillVariant> {
    let range = |input: &mut Input<'_>| -> IResult<(i64, i64)> {
        let low = integer.parse_next(input)?;
        colon.parse_next(input)?;
        let high = integer.parse_next(input)?;
        Ok((low, high))
    };
    let i = range(input)?;
    let j = range(input)?;
    let k = range(input)?;
    let universes: Vec<i64> = repeat(1.., integer).parse_next(input)?;
    Ok(FillVariant::Lattice {
        i,
        j,
        k,
        universes,
    })
}

/// A parenthesized run of jumpable entries.
fn paren_entries(input: &mut Input<'_>) -> IResult<Vec<Entry<f64>>> {
    lparen.parse_next(input)?;
    let entries: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
    rparen.parse_next(input)?;
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Surface cards
// ---------------------------------------------------------------------------

/// Parse a full surface card: `[*|+]n [tr] mnemonic coefficients...`.
///
/// The arity dispatch across a mnemonic's variations lives in
/// [`SurfaceKind::from_coefficients`]; a count no variation accepts is
/// reported as "no card variation matched" against the whole card.
fn surface_card<'src>(input: &mut Input<'src>) -> IResult<Surface> {
    let card_start = input.eof_offset();

    let modifier = opt(alt((
        star.value(SurfaceModifier::Reflecting),
        plus.value(SurfaceModifier::White),
    )))
    .parse_next(input)?;

    let number = integer
        .context(Context::Label("surface number"))
        .parse_next(input)?;
    let transform = opt(integer).parse_next(input)?;

    let mnemonic_start = input.eof_offset();
    let mnemonic = word
        .context(Context::Label("surface mnemonic"))
        .parse_next(input)?
        .to_ascii_lowercase();

    let coefficients: Vec<f64> = repeat(1.., real)
        .context(Context::Label("coefficients"))
        .parse_next(input)?;
    end.parse_next(input)?;

    let kind = SurfaceKind::from_coefficients(&mnemonic, &coefficients).map_err(|err| match err
    {
        SurfaceError::UnknownMnemonic { .. } => cut_code(ErrorCode::E102, mnemonic_start),
        SurfaceError::NoVariantMatched { .. } => cut_code(ErrorCode::E103, card_start),
        SurfaceError::Semantic(e) => cut_semantic(e, card_start),
    })?;

    commit(Surface::new(modifier, number, transform, kind), card_start)
}

// ---------------------------------------------------------------------------
// Data cards
// ---------------------------------------------------------------------------

/// Parse a full data card, dispatching on the leading mnemonic.
fn data_card<'src>(input: &mut Input<'src>) -> IResult<DataCard> {
    let card_start = input.eof_offset();
    let degrees = opt(star).parse_next(input)?.is_some();

    let mnemonic_start = input.eof_offset();
    let name = word.context(Context::Label("card mnemonic")).parse_next(input)?;
    let (base, suffix) = split_mnemonic(name);
    let base = base.to_ascii_lowercase();

    // The degrees marker only belongs to tr.
    if degrees && base != "tr" {
        return Err(cut_code(ErrorCode::E100, card_start));
    }

    let card = match (base.as_str(), suffix) {
        ("mode", None) => {
            let particles: Vec<Particle> = repeat(1.., particle).parse_next(input)?;
            DataCard::Mode(commit(Mode::new(particles), card_start)?)
        }
        ("vol", None) => {
            let no = opt(any.verify(|t: &PositionedToken<'_>| {
                matches!(t.token, Token::Word(w) if w.eq_ignore_ascii_case("no"))
            }))
            .parse_next(input)?
            .is_some();
            let volumes: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::Volumes(commit(Volumes::new(no, volumes), card_start)?)
        }
        ("area", None) => {
            let areas: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::Areas(commit(Areas::new(areas), card_start)?)
        }
        ("tr", Some(number)) => {
            let entries: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::Transform(commit_transform(
                CoordinateTransform::from_entries(degrees, number, &entries),
                card_start,
            )?)
        }
        ("u", None) => {
            let values: Vec<Entry<i64>> = repeat(1.., int_entry).parse_next(input)?;
            DataCard::Universes(commit(Universes::new(values), card_start)?)
        }
        ("lat", None) => {
            let values: Vec<Entry<i64>> = repeat(1.., int_entry).parse_next(input)?;
            DataCard::Lattices(commit(Lattices::new(values), card_start)?)
        }
        ("fill", None) => {
            let values: Vec<Entry<i64>> = repeat(1.., int_entry).parse_next(input)?;
            DataCard::Fillings(commit(Fillings::new(values), card_start)?)
        }
        ("m", Some(number)) => material_card(input, number, card_start)?,
        ("mt", Some(number)) => {
            let identifiers: Vec<String> =
                repeat(1.., word.map(str::to_string)).parse_next(input)?;
            DataCard::Thermal(commit(
                MaterialThermal::new(number, identifiers),
                card_start,
            )?)
        }
        ("sdef", None) => {
            let options: Vec<(SourceVariable, Vec<SourceValue>)> =
                repeat(0.., sdef_option).parse_next(input)?;
            DataCard::Source(commit(SourceDefinition::new(options), card_start)?)
        }
        ("si", Some(number)) => {
            let option = opt(information_option).parse_next(input)?;
            let values: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::Information(commit(
                SourceInformation::new(number, option, values),
                card_start,
            )?)
        }
        ("sp", Some(number)) => {
            DataCard::Probability(probability_card(input, number, card_start)?)
        }
        ("sb", Some(number)) => DataCard::Bias(probability_card(input, number, card_start)?),
        ("ds", Some(number)) => {
            let variant = dependent_variant.parse_next(input)?;
            DataCard::Dependent(commit(
                DependentSource::new(number, variant),
                card_start,
            )?)
        }
        ("ksrc", None) => {
            let locations: Vec<[f64; 3]> =
                repeat(1.., (real, real, real).map(|(x, y, z)| [x, y, z]))
                    .parse_next(input)?;
            DataCard::Criticality(commit(CriticalitySource::new(locations), card_start)?)
        }
        ("f", Some(number)) => {
            let designator = designator_suffix.parse_next(input)?;
            let variant = if number % 10 == 5 {
                let points: Vec<DetectorPoint> = repeat(
                    1..,
                    (real, real, real, real).map(|(x, y, z, radius)| DetectorPoint {
                        x,
                        y,
                        z,
                        radius,
                    }),
                )
                .parse_next(input)?;
                TallyVariant::Detector(points)
            } else {
                TallyVariant::List(repeat(1.., integer).parse_next(input)?)
            };
            DataCard::Tally(commit(Tally::new(number, designator, variant), card_start)?)
        }
        ("e", Some(number)) => {
            let bounds: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::TallyEnergies(commit(TallyEnergies::new(number, bounds), card_start)?)
        }
        ("t", Some(number)) => {
            let bounds: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::TallyTimes(commit(TallyTimes::new(number, bounds), card_start)?)
        }
        ("c", Some(number)) => {
            let bounds: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::TallyCosines(commit(TallyCosines::new(number, bounds), card_start)?)
        }
        ("sd", Some(number)) => {
            let divisors: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::SegmentDivisors(commit(
                SegmentDivisors::new(number, divisors),
                card_start,
            )?)
        }
        ("fq", Some(number)) => {
            let axes: Vec<char> = repeat(
                1..,
                any.verify_map(|t: &PositionedToken<'_>| match t.token {
                    Token::Word(w) => {
                        let mut chars = w.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Some(c.to_ascii_lowercase()),
                            _ => None,
                        }
                    }
                    _ => None,
                }),
            )
            .parse_next(input)?;
            DataCard::PrintOrder(commit(PrintOrder::new(number, axes), card_start)?)
        }
        ("phys", None) => {
            let designator = designator_suffix.parse_next(input)?;
            let particle = match designator.particles() {
                [p] => *p,
                _ => return Err(cut_code(ErrorCode::E103, card_start)),
            };
            if !matches!(particle, Particle::NEUTRON | Particle::PHOTON | Particle::ELECTRON) {
                return Err(cut_code(ErrorCode::E103, card_start));
            }
            let entries: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::Physics(commit(Physics::new(particle, entries), card_start)?)
        }
        ("cut", None) => {
            let designator = designator_suffix.parse_next(input)?;
            let entries: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::Cutoff(commit(Cutoff::new(designator, entries), card_start)?)
        }
        ("tmp", suffix) => {
            let temperatures: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::Temperatures(commit(
                CellTemperatures::new(suffix, temperatures),
                card_start,
            )?)
        }
        ("imp", None) => {
            let designator = designator_suffix.parse_next(input)?;
            let importances: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::Importances(commit(
                CellImportances::new(designator, importances),
                card_start,
            )?)
        }
        ("wwe", None) => {
            let designator = designator_suffix.parse_next(input)?;
            let bounds: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::WindowEnergies(commit(
                WindowEnergies::new(designator, bounds),
                card_start,
            )?)
        }
        ("wwn", Some(index)) => {
            let designator = designator_suffix.parse_next(input)?;
            let bounds: Vec<Entry<f64>> = repeat(1.., entry).parse_next(input)?;
            DataCard::WindowBounds(commit(
                WindowBounds::new(index, designator, bounds),
                card_start,
            )?)
        }
        ("wwp", None) => {
            let designator = designator_suffix.parse_next(input)?;
            let wupn = entry.parse_next(input)?;
            let wsurvn = entry.parse_next(input)?;
            let mxspln = entry.parse_next(input)?;
            DataCard::WindowParameters(commit(
                WindowParameters::new(designator, wupn, wsurvn, mxspln),
                card_start,
            )?)
        }
        ("nps", None) => {
            let histories = integer.parse_next(input)?;
            let multigroup = opt(integer).parse_next(input)?;
            DataCard::Histories(commit(
                HistoryLimit::new(histories, multigroup),
                card_start,
            )?)
        }
        ("ctme", None) => {
            let minutes = real.parse_next(input)?;
            DataCard::Time(commit(TimeLimit::new(minutes), card_start)?)
        }
        ("rand", None) => {
            let options: Vec<RandomOption> = repeat(1.., random_option).parse_next(input)?;
            DataCard::Random(commit(RandomSettings::new(options), card_start)?)
        }
        ("prdmp", None) => {
            let entries: Vec<Entry<i64>> = repeat(1.., int_entry).parse_next(input)?;
            DataCard::Dump(commit(DumpControl::new(entries), card_start)?)
        }
        ("print", None) => {
            let tables: Vec<i64> = repeat(0.., integer).parse_next(input)?;
            DataCard::Print(PrintControl::new(tables))
        }
        ("lost", None) => {
            let abort = integer.parse_next(input)?;
            let printed = integer.parse_next(input)?;
            DataCard::Lost(commit(LostControl::new(abort, printed), card_start)?)
        }
        ("idum", None) => {
            let values: Vec<i64> = repeat(1.., integer).parse_next(input)?;
            DataCard::Integers(commit(IntegerArray::new(values), card_start)?)
        }
        ("rdum", None) => {
            let values: Vec<f64> = repeat(1.., real).parse_next(input)?;
            DataCard::Reals(commit(RealArray::new(values), card_start)?)
        }
        ("void", None) => {
            let cells: Vec<i64> = repeat(0.., integer).parse_next(input)?;
            DataCard::Void(commit(VoidOverride::new(cells), card_start)?)
        }
        _ => return Err(cut_code(ErrorCode::E102, mnemonic_start)),
    };

    end.parse_next(input)?;
    Ok(card)
}

/// The body of an `m` card: substances, then keyword options.
fn material_card<'src>(
    input: &mut Input<'src>,
    number: i64,
    card_start: usize,
) -> IResult<DataCard> {
    let substance = |input: &mut Input<'src>| -> IResult<Substance> {
        let start = input.eof_offset();
        let nuclide = zaid.parse_next(input)?;
        let fraction = real.parse_next(input)?;
        commit(Substance::new(nuclide, fraction), start)
    };
    let substances: Vec<Substance> = repeat(1.., substance).parse_next(input)?;
    let options: Vec<MaterialOption> = repeat(0.., material_option).parse_next(input)?;
    Ok(DataCard::Material(commit(
        Material::new(number, substances, options),
        card_start,
    )?))
}

/// One keyword option on an `m` card.
fn material_option<'src>(input: &mut Input<'src>) -> IResult<MaterialOption> {
    let keyword = any
        .verify_map(|t: &PositionedToken<'src>| match t.token {
            Token::Word(w) => {
                let lower = w.to_ascii_lowercase();
                matches!(
                    lower.as_str(),
                    "gas" | "estep" | "cond" | "nlib" | "plib" | "pnlib" | "elib" | "hlib"
                )
                .then_some(lower)
            }
            _ => None,
        })
        .parse_next(input)?;
    opt_equals.parse_next(input)?;
    let option = match keyword.as_str() {
        "gas" => MaterialOption::Gas(integer.parse_next(input)?),
        "estep" => MaterialOption::Estep(integer.parse_next(input)?),
        "cond" => MaterialOption::Cond(real.parse_next(input)?),
        library => {
            let id = word
                .context(Context::Label("library identifier"))
                .parse_next(input)?
                .to_ascii_lowercase();
            match library {
                "nlib" => MaterialOption::Nlib(id),
                "plib" => MaterialOption::Plib(id),
                "pnlib" => MaterialOption::Pnlib(id),
                "elib" => MaterialOption::Elib(id),
                _ => MaterialOption::Hlib(id),
            }
        }
    };
    Ok(option)
}

/// One `keyword=values` setting on an `sdef` card.
fn sdef_option<'src>(
    input: &mut Input<'src>,
) -> IResult<(SourceVariable, Vec<SourceValue>)> {
    let variable = any
        .verify_map(|t: &PositionedToken<'src>| match t.token {
            Token::Word(w) => SourceVariable::from_keyword(w),
            _ => None,
        })
        .context(Context::Label("source variable"))
        .parse_next(input)?;
    opt_equals.parse_next(input)?;
    let values: Vec<SourceValue> = repeat(1.., source_value).parse_next(input)?;
    Ok((variable, values))
}

/// A source value: a real or a distribution reference.
fn source_value(input: &mut Input<'_>) -> IResult<SourceValue> {
    any.verify_map(|t: &PositionedToken<'_>| match &t.token {
        Token::Int(i) => Some(SourceValue::Real(*i as f64)),
        Token::Real(r) => Some(SourceValue::Real(*r)),
        Token::Word(w) => DistributionNumber::parse(w)
            .ok()
            .map(SourceValue::Distribution),
        _ => None,
    })
    .context(Context::Label("source value"))
    .parse_next(input)
}

/// The interpretation letter on an `si` card.
fn information_option(input: &mut Input<'_>) -> IResult<InformationOption> {
    any.verify_map(|t: &PositionedToken<'_>| match t.token {
        Token::Word(w) => match w.to_ascii_lowercase().as_str() {
            "h" => Some(InformationOption::Histogram),
            "l" => Some(InformationOption::List),
            "a" => Some(InformationOption::Points),
            "s" => Some(InformationOption::Distributions),
            _ => None,
        },
        _ => None,
    })
    .parse_next(input)
}

/// The body of an `sp`/`sb` card: the built-in function form first, then
/// the explicit value list.
fn probability_card<'src>(
    input: &mut Input<'src>,
    number: i64,
    card_start: usize,
) -> IResult<SourceProbability> {
    let function = |input: &mut Input<'src>| -> IResult<ProbabilityVariant> {
        let function = integer
            .verify(|f| (-41..=-2).contains(f))
            .parse_next(input)?;
        let a = real.parse_next(input)?;
        let b = opt(real).parse_next(input)?;
        Ok(ProbabilityVariant::Function { function, a, b })
    };
    let values = |input: &mut Input<'src>| -> IResult<ProbabilityVariant> {
        let option = opt(any.verify_map(|t: &PositionedToken<'src>| match t.token {
            Token::Word(w) => match w.to_ascii_lowercase().as_str() {
                "d" => Some(ProbabilityOption::Discrete),
                "c" => Some(ProbabilityOption::Cumulative),
                "v" => Some(ProbabilityOption::Volume),
                "w" => Some(ProbabilityOption::Weight),
                _ => None,
            },
            _ => None,
        }))
        .parse_next(input)?;
        let probabilities: Vec<f64> = repeat(1.., real).parse_next(input)?;
        Ok(ProbabilityVariant::Values {
            option,
            probabilities,
        })
    };
    let variant = alt((function, values))
        .context(Context::Label("source probability"))
        .parse_next(input)?;
    commit(SourceProbability::new(number, variant), card_start)
}

/// The variations of a `ds` card, in declaration order: `t` pairs, `q`
/// pairs, then the plain value list.
fn dependent_variant<'src>(input: &mut Input<'src>) -> IResult<DependentVariant> {
    let letter = |expected: char| {
        any.verify(move |t: &PositionedToken<'src>| {
            matches!(t.token, Token::Word(w) if w.eq_ignore_ascii_case(&expected.to_string()))
        })
        .void()
    };
    let pair = (real, real);
    alt((
        (letter('t'), repeat(1.., pair)).map(|(_, pairs): (_, Vec<(f64, f64)>)| {
            DependentVariant::Pairs(pairs)
        }),
        (letter('q'), repeat(1.., pair)).map(|(_, pairs): (_, Vec<(f64, f64)>)| {
            DependentVariant::Bounds(pairs)
        }),
        |input: &mut Input<'src>| {
            let option = opt(any.verify_map(|t: &PositionedToken<'src>| match t.token {
                Token::Word(w) => match w.to_ascii_lowercase().as_str() {
                    "h" => Some(DependentOption::Histogram),
                    "l" => Some(DependentOption::List),
                    "s" => Some(DependentOption::Distributions),
                    _ => None,
                },
                _ => None,
            }))
            .parse_next(input)?;
            let values: Vec<f64> = repeat(1.., real).parse_next(input)?;
            Ok(DependentVariant::Values { option, values })
        },
    ))
    .context(Context::Label("dependent distribution"))
    .parse_next(input)
}

/// One keyword option on a `rand` card.
fn random_option<'src>(input: &mut Input<'src>) -> IResult<RandomOption> {
    let keyword = any
        .verify_map(|t: &PositionedToken<'src>| match t.token {
            Token::Word(w) => {
                let lower = w.to_ascii_lowercase();
                matches!(lower.as_str(), "gen" | "seed" | "stride" | "hist").then_some(lower)
            }
            _ => None,
        })
        .parse_next(input)?;
    opt_equals.parse_next(input)?;
    let value = integer.parse_next(input)?;
    Ok(match keyword.as_str() {
        "gen" => RandomOption::Generator(value),
        "seed" => RandomOption::Seed(value),
        "stride" => RandomOption::Stride(value),
        _ => RandomOption::History(value),
    })
}

// ---------------------------------------------------------------------------
// Error conversion and entry points
// ---------------------------------------------------------------------------

/// Convert a winnow error into a [`Diagnostic`] against the card's tokens.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    current_remaining: usize,
) -> Diagnostic {
    let end_offset = tokens.len() - current_remaining.min(tokens.len());

    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let start_offset = e
                .context()
                .find_map(|ctx| match ctx {
                    Context::StartOffset(n) => Some(tokens.len().saturating_sub(*n)),
                    _ => None,
                })
                .unwrap_or(0);

            // The span to blame: the consumed range, the offending token,
            // or the whole card at EOF.
            let error_span = if tokens.is_empty() {
                Span::default()
            } else {
                let range = if start_offset < end_offset {
                    start_offset..end_offset
                } else if end_offset < tokens.len() {
                    end_offset..end_offset + 1
                } else {
                    0..tokens.len()
                };
                tokens[range.start].span.union(tokens[range.end - 1].span)
            };

            if let Some(semantic) = e.context().find_map(|ctx| match ctx {
                Context::Semantic(err) => Some(err.clone()),
                _ => None,
            }) {
                let code = if semantic.is_option() {
                    ErrorCode::E201
                } else {
                    ErrorCode::E200
                };
                return Diagnostic::error(semantic.to_string())
                    .with_code(code)
                    .with_label(error_span, "restriction failed");
            }

            let code = e
                .context()
                .find_map(|ctx| match ctx {
                    Context::Code(code) => Some(*code),
                    _ => None,
                })
                .unwrap_or(ErrorCode::E100);

            let labels: Vec<String> = e
                .context()
                .filter_map(|ctx| match ctx {
                    Context::Label(label) => Some(format!("expected {label}")),
                    _ => None,
                })
                .collect();
            let message = if labels.is_empty() {
                code.description().to_string()
            } else {
                format!("{}: {}", code.description(), labels.join(", "))
            };

            Diagnostic::error(message)
                .with_code(code)
                .with_label(error_span, code.description())
        }
        ErrMode::Incomplete(_) => {
            // Streaming input is not used; kept for completeness.
            let span = tokens
                .last()
                .map(|t| t.span)
                .unwrap_or_default();
            Diagnostic::error("incomplete card, more entries expected")
                .with_code(ErrorCode::E101)
                .with_label(span, "incomplete")
        }
    }
}

fn empty_card(src: &str) -> Diagnostic {
    Diagnostic::error("empty card")
        .with_code(ErrorCode::E101)
        .with_source(src)
}

/// Parse one logical cell card.
pub fn parse_cell(src: &str) -> Result<Cell, Diagnostic> {
    let tokens = lexer::tokenize(src);
    if tokens.is_empty() {
        return Err(empty_card(src));
    }
    let mut slice = TokenSlice::new(&tokens);
    match cell_card(src, &mut slice) {
        Ok(cell) => Ok(cell),
        Err(error) => {
            let current_remaining = slice.eof_offset();
            Err(convert_error(error, &tokens, current_remaining).with_source(src))
        }
    }
}

/// Parse one logical surface card.
pub fn parse_surface(src: &str) -> Result<Surface, Diagnostic> {
    let tokens = lexer::tokenize(src);
    if tokens.is_empty() {
        return Err(empty_card(src));
    }
    let mut slice = TokenSlice::new(&tokens);
    match surface_card(&mut slice) {
        Ok(surface) => Ok(surface),
        Err(error) => {
            let current_remaining = slice.eof_offset();
            Err(convert_error(error, &tokens, current_remaining).with_source(src))
        }
    }
}

/// Parse one logical data card.
pub fn parse_data(src: &str) -> Result<DataCard, Diagnostic> {
    let tokens = lexer::tokenize(src);
    if tokens.is_empty() {
        return Err(empty_card(src));
    }
    let mut slice = TokenSlice::new(&tokens);
    match data_card(&mut slice) {
        Ok(card) => Ok(card),
        Err(error) => {
            let current_remaining = slice.eof_offset();
            Err(convert_error(error, &tokens, current_remaining).with_source(src))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mnemonic() {
        assert_eq!(split_mnemonic("sdef"), ("sdef", None));
        assert_eq!(split_mnemonic("wwn1"), ("wwn", Some(1)));
        assert_eq!(split_mnemonic("f15"), ("f", Some(15)));
        assert_eq!(split_mnemonic("c/x"), ("c/x", None));
    }

    #[test]
    fn test_designator_suffix() {
        let tokens = lexer::tokenize(":n,p");
        let mut input = TokenSlice::new(&tokens);
        let designator = designator_suffix(&mut input).unwrap();
        assert_eq!(designator.to_string(), "n,p");
    }

    #[test]
    fn test_entry_accepts_jump_and_plus() {
        let tokens = lexer::tokenize("j +5 1.5");
        let mut input = TokenSlice::new(&tokens);
        assert_eq!(entry(&mut input).unwrap(), Entry::Jump);
        assert_eq!(entry(&mut input).unwrap(), Entry::Value(5.0));
        assert_eq!(entry(&mut input).unwrap(), Entry::Value(1.5));
    }

    #[test]
    fn test_paren_entries() {
        let tokens = lexer::tokenize("(1 2 j)");
        let mut input = TokenSlice::new(&tokens);
        let entries = paren_entries(&mut input).unwrap();
        assert_eq!(
            entries,
            vec![Entry::Value(1.0), Entry::Value(2.0), Entry::Jump]
        );
    }
}
