//! inpdeck - A structured reader and writer for MCNP INP input decks.
//!
//! Reading, modeling, and writing MCNP INP input decks. A deck is parsed
//! into a typed document model of cells, surfaces, and data cards, which
//! can be inspected, modified, and serialized back to INP text.

pub mod config;

mod deck;
mod error;
mod export;

pub use inpdeck_core::{cell, data, surface, types};

pub use inpdeck_parser::{Diagnostic, ErrorCode, Label, ParseError, Severity, Span};

pub use deck::Deck;
pub use error::InpError;

use std::fs;
use std::path::Path;

use log::{debug, info, trace};

use config::WriteConfig;

/// Builder for reading and writing INP decks.
///
/// This provides an API for processing decks through the split, parse, and
/// serialization stages.
///
/// # Examples
///
/// ```rust,no_run
/// use inpdeck::{DeckBuilder, config::WriteConfig};
///
/// let source = "test deck\n1 0 -2\n\n2 so 5\n\nnps 1000\n";
///
/// // With custom config
/// let config = WriteConfig::new(72);
/// let builder = DeckBuilder::new(config);
///
/// // Parse source to a deck model
/// let deck = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Serialize the model back to INP text
/// let text = builder.write(&deck);
///
/// // Or use default config
/// let builder = DeckBuilder::default();
/// ```
#[derive(Default)]
pub struct DeckBuilder {
    config: WriteConfig,
}

impl DeckBuilder {
    /// Create a new deck builder with the given write configuration.
    pub fn new(config: WriteConfig) -> Self {
        Self { config }
    }

    /// Parse INP source text into a deck.
    ///
    /// This splits the source into logical cards, parses every card, and
    /// assembles the document model. All failed cards are reported
    /// together in one error.
    ///
    /// # Errors
    ///
    /// Returns `InpError::Parse` carrying one diagnostic per failed card,
    /// plus deck-level diagnostics for duplicate cell or surface numbers.
    pub fn parse(&self, source: &str) -> Result<Deck, InpError> {
        info!("Parsing deck");

        let split = inpdeck_parser::split_deck(source)
            .map_err(|diag| InpError::new_parse_error(ParseError::new(vec![diag]), source))?;

        let deck = deck::assemble(&split)
            .map_err(|err| InpError::new_parse_error(err, source))?;

        debug!("Deck parsed successfully");
        trace!(deck:?; "Parsed deck");

        Ok(deck)
    }

    /// Read and parse a deck from a file.
    ///
    /// # Errors
    ///
    /// Returns `InpError::Io` if the file cannot be read, or
    /// `InpError::Parse` if the content fails to parse.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Deck, InpError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading deck");
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Serialize a deck to INP text.
    ///
    /// Cards longer than the configured line width are folded onto
    /// continuation lines.
    pub fn write(&self, deck: &Deck) -> String {
        export::write_deck(deck, &self.config)
    }

    /// Serialize a deck and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns `InpError::Io` if the file cannot be written.
    pub fn save(&self, deck: &Deck, path: impl AsRef<Path>) -> Result<(), InpError> {
        let path = path.as_ref();
        info!(path:? = path; "Saving deck");
        fs::write(path, self.write(deck))?;
        Ok(())
    }
}
