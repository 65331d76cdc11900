//! Raw file text to logical cards.
//!
//! An INP file is line-oriented: `$` starts an inline comment, a line whose
//! first word is `c` is a comment line, a trailing `&` or a five-space
//! indent continues the previous card, and blank lines separate the cell,
//! surface, and data blocks. An optional `message:` block may precede
//! everything, terminated by its own blank line; the first card after it is
//! the deck title.
//!
//! This module folds all of that away and hands the card parsers clean
//! single-line logical cards, each tagged with the 1-based source line it
//! started on.

use log::{debug, trace};

use crate::error::{Diagnostic, ErrorCode};

/// Columns of leading blank space that mark a continuation line.
const CONTINUATION_INDENT: usize = 5;

/// One folded card and the source line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalCard {
    text: String,
    line: usize,
}

impl LogicalCard {
    pub(crate) fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }

    /// The folded card text, continuations joined by single spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The 1-based line in the source file where the card started.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// A deck split into its structural parts, cards still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDeck {
    message: Option<String>,
    title: String,
    cells: Vec<LogicalCard>,
    surfaces: Vec<LogicalCard>,
    data: Vec<LogicalCard>,
}

impl SourceDeck {
    /// The `message:` block, without the keyword, if present.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The title card, verbatim.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cells(&self) -> &[LogicalCard] {
        &self.cells
    }

    pub fn surfaces(&self) -> &[LogicalCard] {
        &self.surfaces
    }

    pub fn data(&self) -> &[LogicalCard] {
        &self.data
    }
}

/// Strip an inline `$` comment.
fn strip_inline_comment(line: &str) -> &str {
    match line.split_once('$') {
        Some((code, _)) => code,
        None => line,
    }
}

/// A comment line: first word is `c` (case-insensitive).
fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('c') | Some('C'), None | Some(' ') | Some('\t'))
    )
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Fold one block of lines into logical cards.
///
/// `lines` yields `(1-based line number, text)` pairs with inline comments
/// already stripped; the block ends at the iterator's end.
fn fold_cards<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> Result<Vec<LogicalCard>, Diagnostic> {
    let mut cards: Vec<LogicalCard> = Vec::new();
    // Set when the previous segment ended with `&`.
    let mut ampersand_pending = false;

    for (number, line) in lines {
        if is_comment_line(line) {
            continue;
        }
        // Char-wise so a multibyte character near the margin cannot panic.
        let indented = line
            .chars()
            .take(CONTINUATION_INDENT)
            .filter(|c| *c == ' ')
            .count()
            == CONTINUATION_INDENT
            && !is_blank(line);
        let continuation = ampersand_pending || indented;

        let mut segment = line.trim();
        if let Some(stripped) = segment.strip_suffix('&') {
            segment = stripped.trim_end();
            ampersand_pending = true;
        } else {
            ampersand_pending = false;
        }

        if continuation {
            match cards.last_mut() {
                Some(card) => {
                    if !segment.is_empty() {
                        card.text.push(' ');
                        card.text.push_str(segment);
                    }
                }
                None => {
                    return Err(Diagnostic::error(
                        "continuation line with no card to continue",
                    )
                    .with_code(ErrorCode::E300)
                    .with_line(number)
                    .with_source(line));
                }
            }
        } else {
            cards.push(LogicalCard::new(segment, number));
        }
    }
    Ok(cards)
}

/// Split raw file text into message block, title, and the three card
/// blocks.
pub fn split_deck(source: &str) -> Result<SourceDeck, Diagnostic> {
    // (1-based number, text without inline comment or trailing \r)
    let mut lines = source
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .peekable();

    // Optional message block, terminated by its blank line.
    let mut message = None;
    if let Some((_, first)) = lines.peek() {
        let starts_message = first
            .trim_start()
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("message:"));
        if starts_message {
            let mut block = Vec::new();
            let mut terminated = false;
            for (_, line) in lines.by_ref() {
                if is_blank(line) {
                    terminated = true;
                    break;
                }
                block.push(line.trim().to_string());
            }
            if !terminated {
                return Err(Diagnostic::error(
                    "message block is not terminated by a blank line",
                )
                .with_code(ErrorCode::E300)
                .with_line(1));
            }
            let joined = block.join(" ");
            message = Some(joined["message:".len()..].trim().to_string());
            trace!("folded message block");
        }
    }

    // Title card, verbatim.
    let title = match lines.next() {
        Some((_, line)) if !is_blank(line) => line.to_string(),
        _ => {
            return Err(Diagnostic::error("deck has no title card")
                .with_code(ErrorCode::E300)
                .with_line(1));
        }
    };

    // Three blocks separated by blank lines. Runs of blank lines count as
    // one separator; anything after a blank line past the data block is
    // ignored, as MCNP does.
    let mut blocks: Vec<Vec<(usize, &str)>> = vec![Vec::new()];
    for (number, line) in lines {
        let line = strip_inline_comment(line);
        if is_blank(line) {
            if !blocks.last().is_some_and(|b| b.is_empty()) {
                if blocks.len() == 3 {
                    break;
                }
                blocks.push(Vec::new());
            }
            continue;
        }
        if let Some(block) = blocks.last_mut() {
            block.push((number, line));
        }
    }

    if blocks.len() < 3 {
        return Err(Diagnostic::error(format!(
            "deck has {} card block(s), expected cell, surface, and data blocks",
            blocks.len()
        ))
        .with_code(ErrorCode::E300)
        .with_line(1));
    }

    let mut blocks = blocks.into_iter();
    let cells = fold_cards(blocks.next().unwrap_or_default().into_iter())?;
    let surfaces = fold_cards(blocks.next().unwrap_or_default().into_iter())?;
    let data = fold_cards(blocks.next().unwrap_or_default().into_iter())?;

    if cells.is_empty() || surfaces.is_empty() {
        return Err(Diagnostic::error("cell and surface blocks must not be empty")
            .with_code(ErrorCode::E300)
            .with_line(1));
    }

    debug!(
        cells = cells.len(),
        surfaces = surfaces.len(),
        data = data.len();
        "Split deck into blocks"
    );

    Ok(SourceDeck {
        message,
        title,
        cells,
        surfaces,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
simple shielding problem
1 1 -7.8 -1 imp:n=1
2 0 1 imp:n=0

1 so 10.0

mode n
nps 1000
";

    #[test]
    fn test_split_minimal_deck() {
        let deck = split_deck(DECK).unwrap();
        assert_eq!(deck.title(), "simple shielding problem");
        assert_eq!(deck.cells().len(), 2);
        assert_eq!(deck.surfaces().len(), 1);
        assert_eq!(deck.data().len(), 2);
        assert_eq!(deck.cells()[0].line(), 2);
        assert_eq!(deck.data()[1].text(), "nps 1000");
    }

    #[test]
    fn test_comment_lines_dropped() {
        let source = "title\nc a comment\n1 0 -1\nc another\n2 0 1\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.cells().len(), 2);
        assert_eq!(deck.cells()[1].line(), 5);
    }

    #[test]
    fn test_inline_comment_stripped() {
        let source = "title\n1 0 -1 $ the world\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.cells()[0].text(), "1 0 -1");
    }

    #[test]
    fn test_ampersand_continuation() {
        let source = "title\n1 0 -1 &\n  imp:n=1\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.cells()[0].text(), "1 0 -1 imp:n=1");
        assert_eq!(deck.cells()[0].line(), 2);
    }

    #[test]
    fn test_indent_continuation() {
        let source = "title\n1 0 -1\n     imp:n=1\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.cells().len(), 1);
        assert_eq!(deck.cells()[0].text(), "1 0 -1 imp:n=1");
    }

    #[test]
    fn test_message_block() {
        let source = "message: datapath=/xs\n\ntitle\n1 0 -1\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.message(), Some("datapath=/xs"));
        assert_eq!(deck.title(), "title");
    }

    #[test]
    fn test_multibyte_card_line_splits_without_panic() {
        let source = "title\n\u{3b1}\u{3b1}\u{3b1} 0 -1\n\n1 so 5\n\nnps 10\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.cells()[0].text(), "\u{3b1}\u{3b1}\u{3b1} 0 -1");
    }

    #[test]
    fn test_missing_blocks_rejected() {
        let err = split_deck("title\n1 0 -1\n").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(split_deck("").is_err());
        assert!(split_deck("\n\n").is_err());
    }

    #[test]
    fn test_content_after_data_block_ignored() {
        let source = "title\n1 0 -1\n\n1 so 5\n\nnps 10\n\nleftover junk\n";
        let deck = split_deck(source).unwrap();
        assert_eq!(deck.data().len(), 1);
    }

    #[test]
    fn test_comment_detection() {
        assert!(is_comment_line("c plain comment"));
        assert!(is_comment_line("  C indented"));
        assert!(is_comment_line("c"));
        assert!(!is_comment_line("cut:n 1"));
        assert!(!is_comment_line("1 0 -1"));
    }
}
