//! Token types for logical INP cards.

use std::fmt;

use crate::span::Span;

/// A token of a logical card.
///
/// Card text is whitespace-separated words plus a handful of one-character
/// punctuators. Numeric words are classified during lexing; everything else
/// stays a [`Token::Word`] and is interpreted by the card parsers
/// (mnemonics, keywords, nuclide identifiers, stretch specifiers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    /// An unclassified word: mnemonic, keyword, zaid, table identifier.
    Word(&'src str),
    /// An integer literal.
    Int(i64),
    /// A real literal, including FORTRAN-style exponents (`1.5-3`).
    Real(f64),
    /// The jump token `j`.
    Jump,

    // Punctuation
    Colon,  // : (designators, geometry union, fill ranges)
    Comma,  // , (designator separator)
    Equals, // = (keyword options)
    LParen, // (
    RParen, // )
    Hash,   // # (geometry complement; also a particle code)
    Star,   // * (degrees / reflecting marker)
    Plus,   // + (white-boundary marker, explicit plus sign)
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{w}"),
            Token::Int(i) => write!(f, "{i}"),
            Token::Real(r) => write!(f, "{r}"),
            Token::Jump => write!(f, "j"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Hash => write!(f, "#"),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
        }
    }
}

/// A token with its span in the card text, for winnow `TokenSlice` input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> AsRef<Token<'src>> for PositionedToken<'src> {
    fn as_ref(&self) -> &Token<'src> {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}
