//! The deck document model.

use indexmap::IndexMap;
use log::debug;

use inpdeck_core::{cell::Cell, data::DataCard, surface::Surface};
use inpdeck_parser::{
    parse_cell, parse_data, parse_surface, Diagnostic, DiagnosticCollector, ErrorCode,
    ParseError, SourceDeck,
};

use crate::error::InpError;

/// A complete INP deck.
///
/// Cells and surfaces are keyed by their card number and kept in source
/// order; data cards are an ordered list. Numbers are unique within their
/// block; [`Deck::add_cell`] and [`Deck::add_surface`] enforce this for
/// programmatic construction, and [`assemble`] reports collisions as
/// diagnostics during parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    message: Option<String>,
    title: String,
    cells: IndexMap<i64, Cell>,
    surfaces: IndexMap<i64, Surface>,
    data: Vec<DataCard>,
}

impl Deck {
    /// Create an empty deck with the given title card.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The `message:` block content, if present.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Replace the `message:` block.
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    /// The title card.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All cells, in source order.
    pub fn cells(&self) -> &IndexMap<i64, Cell> {
        &self.cells
    }

    /// All surfaces, in source order.
    pub fn surfaces(&self) -> &IndexMap<i64, Surface> {
        &self.surfaces
    }

    /// All data cards, in source order.
    pub fn data(&self) -> &[DataCard] {
        &self.data
    }

    /// Look up a cell by number.
    pub fn cell(&self, number: i64) -> Option<&Cell> {
        self.cells.get(&number)
    }

    /// Look up a surface by number.
    pub fn surface(&self, number: i64) -> Option<&Surface> {
        self.surfaces.get(&number)
    }

    /// Add a cell, rejecting a duplicate number.
    pub fn add_cell(&mut self, cell: Cell) -> Result<(), InpError> {
        if self.cells.contains_key(&cell.number()) {
            return Err(InpError::Duplicate {
                kind: "cell",
                number: cell.number(),
            });
        }
        self.cells.insert(cell.number(), cell);
        Ok(())
    }

    /// Add a surface, rejecting a duplicate number.
    pub fn add_surface(&mut self, surface: Surface) -> Result<(), InpError> {
        if self.surfaces.contains_key(&surface.number()) {
            return Err(InpError::Duplicate {
                kind: "surface",
                number: surface.number(),
            });
        }
        self.surfaces.insert(surface.number(), surface);
        Ok(())
    }

    /// Append a data card.
    pub fn push_data(&mut self, card: DataCard) {
        self.data.push(card);
    }
}

/// Parse every logical card of a split deck and assemble the document.
///
/// All failed cards are reported together: each bad card contributes one
/// diagnostic tagged with its source line, and duplicate cell or surface
/// numbers are deck-level diagnostics against the later occurrence.
pub(crate) fn assemble(source: &SourceDeck) -> Result<Deck, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let mut cells: IndexMap<i64, Cell> = IndexMap::new();
    let mut cell_lines: IndexMap<i64, usize> = IndexMap::new();
    for card in source.cells() {
        match parse_cell(card.text()) {
            Ok(cell) => {
                if let Some(first) = cell_lines.get(&cell.number()) {
                    collector.emit(
                        Diagnostic::error(format!("duplicate cell number `{}`", cell.number()))
                            .with_code(ErrorCode::E301)
                            .with_line(card.line())
                            .with_source(card.text())
                            .with_help(format!("first defined at line {first}")),
                    );
                } else {
                    cell_lines.insert(cell.number(), card.line());
                    cells.insert(cell.number(), cell);
                }
            }
            Err(diag) => collector.emit(diag.with_line(card.line())),
        }
    }

    let mut surfaces: IndexMap<i64, Surface> = IndexMap::new();
    let mut surface_lines: IndexMap<i64, usize> = IndexMap::new();
    for card in source.surfaces() {
        match parse_surface(card.text()) {
            Ok(surface) => {
                if let Some(first) = surface_lines.get(&surface.number()) {
                    collector.emit(
                        Diagnostic::error(format!(
                            "duplicate surface number `{}`",
                            surface.number()
                        ))
                        .with_code(ErrorCode::E302)
                        .with_line(card.line())
                        .with_source(card.text())
                        .with_help(format!("first defined at line {first}")),
                    );
                } else {
                    surface_lines.insert(surface.number(), card.line());
                    surfaces.insert(surface.number(), surface);
                }
            }
            Err(diag) => collector.emit(diag.with_line(card.line())),
        }
    }

    let mut data = Vec::with_capacity(source.data().len());
    for card in source.data() {
        match parse_data(card.text()) {
            Ok(record) => data.push(record),
            Err(diag) => collector.emit(diag.with_line(card.line())),
        }
    }

    collector.finish()?;

    debug!(
        cells = cells.len(),
        surfaces = surfaces.len(),
        data = data.len();
        "Assembled deck"
    );

    Ok(Deck {
        message: source.message().map(str::to_string),
        title: source.title().to_string(),
        cells,
        surfaces,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use inpdeck_core::surface::SurfaceKind;
    use inpdeck_core::types::Geometry;

    fn cell(number: i64) -> Cell {
        Cell::new(number, 0, None, Geometry::new("-1").unwrap(), Vec::new()).unwrap()
    }

    fn surface(number: i64) -> Surface {
        let kind = SurfaceKind::from_coefficients("so", &[5.0]).unwrap();
        Surface::new(None, number, None, kind).unwrap()
    }

    #[test]
    fn test_add_cell_rejects_duplicate() {
        let mut deck = Deck::new("test");
        deck.add_cell(cell(1)).unwrap();
        assert!(matches!(
            deck.add_cell(cell(1)),
            Err(InpError::Duplicate { kind: "cell", .. })
        ));
    }

    #[test]
    fn test_add_surface_rejects_duplicate() {
        let mut deck = Deck::new("test");
        deck.add_surface(surface(4)).unwrap();
        assert!(matches!(
            deck.add_surface(surface(4)),
            Err(InpError::Duplicate {
                kind: "surface",
                ..
            })
        ));
    }

    #[test]
    fn test_lookup_by_number() {
        let mut deck = Deck::new("test");
        deck.add_cell(cell(7)).unwrap();
        assert_eq!(deck.cell(7).map(Cell::number), Some(7));
        assert!(deck.cell(8).is_none());
    }
}
