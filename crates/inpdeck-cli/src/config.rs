//! Configuration loading for the CLI.
//!
//! The optional TOML configuration file holds a `[write]` table matching
//! [`WriteConfig`]; a missing table or field falls back to its default.

use std::fs;

use log::debug;
use serde::Deserialize;

use inpdeck::{InpError, config::WriteConfig};

use crate::CliError;

/// Shape of the TOML configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    write: WriteConfig,
}

/// Load the write configuration, from a TOML file if one was given.
pub(crate) fn load_config(path: Option<&String>) -> Result<WriteConfig, CliError> {
    let Some(path) = path else {
        return Ok(WriteConfig::default());
    };

    debug!(config_path = path; "Loading configuration");
    let text = fs::read_to_string(path).map_err(InpError::from)?;
    let file: ConfigFile = toml::from_str(&text)?;
    Ok(file.write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table_parsed() {
        let file: ConfigFile = toml::from_str("[write]\nline_width = 60\n").unwrap();
        assert_eq!(file.write.line_width(), 60);
    }

    #[test]
    fn test_empty_file_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(file.write.line_width(), 80);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = String::from("/nonexistent/inpdeck.toml");
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(CliError::Inp(InpError::Io(_)))));
    }
}
