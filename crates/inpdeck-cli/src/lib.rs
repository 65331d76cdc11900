//! CLI logic for the inpdeck tool.
//!
//! This module contains the core CLI logic for the inpdeck tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;
use thiserror::Error;

use inpdeck::{DeckBuilder, InpError};

/// Errors reported by the CLI.
///
/// Library errors pass through unchanged; configuration-file syntax errors
/// are a CLI concern and get their own variant.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Inp(#[from] InpError),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Run the inpdeck CLI application
///
/// This function reads and validates the input deck and, when an output
/// path was given, writes the reformatted deck there.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Reading deck");

    // Load configuration
    let write_config = config::load_config(args.config.as_ref())?;

    // Read and parse the deck using the DeckBuilder API
    let builder = DeckBuilder::new(write_config);
    let deck = builder.load(&args.input)?;

    info!(
        cells = deck.cells().len(),
        surfaces = deck.surfaces().len(),
        data = deck.data().len();
        "Deck is valid"
    );

    // Write output file
    if let Some(output) = &args.output {
        builder.save(&deck, output)?;
        info!(output_file = output; "Reformatted deck written");
    }

    Ok(())
}
