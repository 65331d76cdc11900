//! Serialization of a deck back to INP text.
//!
//! Each record's `Display` impl produces its canonical single-line card
//! text; this module arranges those cards into the block structure of a
//! deck and folds long cards onto continuation lines.

use std::fmt::Write as _;

use crate::config::WriteConfig;
use crate::deck::Deck;

/// Continuation lines start with five blanks, which also keeps them out of
/// the 1-5 column window where a card number would be read.
const CONTINUATION_INDENT: &str = "     ";

/// Render a deck as INP text.
///
/// Output order is message block (if any), title, then the cell, surface,
/// and data blocks separated by single blank lines. Cards longer than the
/// configured width are folded at whitespace onto indented continuation
/// lines.
pub fn write_deck(deck: &Deck, config: &WriteConfig) -> String {
    let mut out = String::new();

    if let Some(message) = deck.message() {
        push_folded(&mut out, &format!("message: {message}"), config.line_width());
        out.push('\n');
    }

    out.push_str(deck.title());
    out.push('\n');

    for cell in deck.cells().values() {
        push_folded(&mut out, &cell.to_string(), config.line_width());
    }
    out.push('\n');

    for surface in deck.surfaces().values() {
        push_folded(&mut out, &surface.to_string(), config.line_width());
    }
    out.push('\n');

    for card in deck.data() {
        push_folded(&mut out, &card.to_string(), config.line_width());
    }

    out
}

/// Append one card, folding at whitespace so no emitted line exceeds
/// `width` columns. A single token longer than the width is emitted whole;
/// folding never splits inside a token.
fn push_folded(out: &mut String, card: &str, width: usize) {
    let mut column = 0;
    let mut first = true;
    for word in card.split_whitespace() {
        if first {
            out.push_str(word);
            column = word.len();
            first = false;
        } else if column + 1 + word.len() <= width {
            out.push(' ');
            out.push_str(word);
            column += 1 + word.len();
        } else {
            // Writeln cannot fail on a String.
            let _ = writeln!(out);
            out.push_str(CONTINUATION_INDENT);
            out.push_str(word);
            column = CONTINUATION_INDENT.len() + word.len();
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_card_unfolded() {
        let mut out = String::new();
        push_folded(&mut out, "1 pz 5", 80);
        assert_eq!(out, "1 pz 5\n");
    }

    #[test]
    fn test_long_card_folds_at_whitespace() {
        let mut out = String::new();
        push_folded(&mut out, "m1 1001.70c 2 8016.70c 1", 16);
        assert_eq!(out, "m1 1001.70c 2\n     8016.70c 1\n");
    }

    #[test]
    fn test_continuation_lines_indented() {
        let mut out = String::new();
        push_folded(&mut out, "ksrc 0 0 0 1 1 1 2 2 2", 12);
        for line in out.lines().skip(1) {
            assert!(line.starts_with(CONTINUATION_INDENT));
        }
    }

    #[test]
    fn test_oversized_token_emitted_whole() {
        let mut out = String::new();
        push_folded(&mut out, "f4:n 123456789012345678901234", 16);
        assert_eq!(out, "f4:n\n     123456789012345678901234\n");
    }

    #[test]
    fn test_lines_stay_within_width() {
        let mut out = String::new();
        push_folded(&mut out, "imp:n 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 0", 20);
        for line in out.lines() {
            assert!(line.len() <= 20, "line too long: {line:?}");
        }
    }
}
