//! Configuration for deck serialization.
//!
//! [`WriteConfig`] implements [`serde::Deserialize`] so it can be loaded
//! from external sources (the CLI reads it from a TOML file); every field
//! defaults sensibly when absent.

use serde::Deserialize;

fn default_line_width() -> usize {
    80
}

/// Narrowest usable fold width: the continuation indent plus a useful
/// amount of card text.
const MIN_LINE_WIDTH: usize = 16;

/// Controls how a deck is serialized back to INP text.
///
/// # Example
///
/// ```
/// # use inpdeck::config::WriteConfig;
/// let config = WriteConfig::default();
/// assert_eq!(config.line_width(), 80);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct WriteConfig {
    /// Column width at which card text is folded onto continuation lines.
    #[serde(default = "default_line_width")]
    line_width: usize,
}

impl WriteConfig {
    /// Creates a write configuration with the given fold width.
    pub fn new(line_width: usize) -> Self {
        Self { line_width }
    }

    /// The column width at which card text is folded.
    ///
    /// Widths below [`MIN_LINE_WIDTH`] are raised to it regardless of how
    /// the configuration was built, so a deserialized value gets the same
    /// floor as a constructed one.
    pub fn line_width(&self) -> usize {
        self.line_width.max(MIN_LINE_WIDTH)
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
        }
    }
}
