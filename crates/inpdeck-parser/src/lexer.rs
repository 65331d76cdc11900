//! Lexical analyzer for logical card text.
//!
//! The lexer converts one logical card (already stripped of comments and
//! folded across continuations by [`preprocess`](crate::preprocess)) into a
//! stream of [`Token`]s. Numeric words are classified here; mnemonics and
//! keywords stay words for the card parsers to interpret.

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::LocatingSlice,
    token::{one_of, take_while},
};

use inpdeck_core::types::parse_real;

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Characters that terminate a word anywhere inside it.
const SPECIALS: &[char] = &['(', ')', ':', ',', '=', '#'];

/// Parse one punctuation token.
///
/// `*` and `+` are split off only at token start; inside a word they stay
/// part of the word so exponent forms like `1.5e+3` survive as one token.
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '('.value(Token::LParen),
        ')'.value(Token::RParen),
        ':'.value(Token::Colon),
        ','.value(Token::Comma),
        '='.value(Token::Equals),
        '#'.value(Token::Hash),
        '*'.value(Token::Star),
        '+'.value(Token::Plus),
    ))
    .parse_next(input)
}

/// Classify a word as jump, integer, real, or plain word.
fn classify(text: &str) -> Token<'_> {
    if text.eq_ignore_ascii_case("j") {
        return Token::Jump;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Token::Int(i);
    }
    if let Ok(r) = parse_real(text) {
        return Token::Real(r);
    }
    Token::Word(text)
}

/// Parse a maximal word and classify it.
fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| {
            !c.is_whitespace() && !SPECIALS.contains(&c) && c != '*' && c != '+'
        }),
        take_while(0.., |c: char| !c.is_whitespace() && !SPECIALS.contains(&c)),
    )
        .take()
        .map(classify)
        .parse_next(input)
}

/// Parse a single token with its span.
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    alt((punctuation, word))
        .with_span()
        .map(|(token, range)| PositionedToken::new(token, Span::new(range)))
        .parse_next(input)
}

/// Tokenize one logical card.
///
/// The token grammar is total over non-whitespace text, so lexing cannot
/// fail; malformed numbers stay words and are rejected by the card parsers
/// with a proper diagnostic.
pub(crate) fn tokenize(card: &str) -> Vec<PositionedToken<'_>> {
    let mut input = LocatingSlice::new(card);
    let tokens: Result<Vec<_>, ErrMode<ContextError>> = preceded(
        multispace0,
        repeat(0.., terminated(positioned_token, multispace0)),
    )
    .parse_next(&mut input);
    tokens.unwrap_or_default()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating arbitrary printable card text.
    fn card_text_strategy() -> impl Strategy<Value = String> {
        "[ -~]{0,60}"
    }

    /// Strategy for generating FORTRAN-exponent real literals.
    fn fortran_real_strategy() -> impl Strategy<Value = String> {
        (1u32..1000, 0u32..100, -30i32..30)
            .prop_map(|(int, frac, exp)| format!("{int}.{frac}{exp:+}"))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Lexing is total: any text produces tokens with in-bounds,
    /// non-overlapping spans.
    fn check_spans_well_formed(card: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(card);
        let mut previous_end = 0;
        for t in &tokens {
            prop_assert!(t.span.start() >= previous_end, "spans overlap in {card:?}");
            prop_assert!(t.span.end() <= card.len(), "span out of bounds in {card:?}");
            prop_assert!(!t.span.is_empty(), "empty span in {card:?}");
            previous_end = t.span.end();
        }
        Ok(())
    }

    /// A FORTRAN-exponent literal lexes as one real token.
    fn check_fortran_real_is_one_token(literal: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(literal);
        prop_assert_eq!(tokens.len(), 1, "split literal {:?}", literal);
        prop_assert!(
            matches!(tokens[0].token, Token::Real(_)),
            "misclassified literal {:?} as {:?}",
            literal,
            tokens[0].token
        );
        Ok(())
    }

    /// Integer literals round-trip through the lexer.
    fn check_integer_round_trips(value: i64) -> Result<(), TestCaseError> {
        let text = value.to_string();
        let tokens = tokenize(&text);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token, Token::Int(value));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn spans_well_formed(card in card_text_strategy()) {
            check_spans_well_formed(&card)?;
        }

        #[test]
        fn fortran_real_is_one_token(literal in fortran_real_strategy()) {
            check_fortran_real_is_one_token(&literal)?;
        }

        #[test]
        fn integer_round_trips(value in any::<i64>()) {
            check_integer_round_trips(value)?;
        }
    }
}
