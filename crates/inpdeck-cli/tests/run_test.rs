//! End-to-end tests for the CLI run path.

use std::fs;

use inpdeck_cli::{Args, CliError, run};

const DECK: &str = "\
simple shielding problem
1 1 -7.8 -1 imp:n=1
2 0 1 imp:n=0

1 so 10.0

mode n
nps 1000
";

fn args(input: &std::path::Path) -> Args {
    Args {
        input: input.to_string_lossy().into_owned(),
        output: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn test_validate_only() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("deck.inp");
    fs::write(&input, DECK).expect("Failed to write deck");

    let result = run(&args(&input));
    assert!(result.is_ok(), "Valid deck should pass: {:?}", result.err());
}

#[test]
fn test_reformatted_output_written() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("deck.inp");
    let output = dir.path().join("out.inp");
    fs::write(&input, DECK).expect("Failed to write deck");

    let mut args = args(&input);
    args.output = Some(output.to_string_lossy().into_owned());
    run(&args).expect("Run should succeed");

    let written = fs::read_to_string(&output).expect("Output should exist");
    assert!(written.starts_with("simple shielding problem\n"));
}

#[test]
fn test_config_controls_fold_width() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("deck.inp");
    let output = dir.path().join("out.inp");
    let config = dir.path().join("inpdeck.toml");
    fs::write(&input, DECK).expect("Failed to write deck");
    fs::write(&config, "[write]\nline_width = 16\n").expect("Failed to write config");

    let mut args = args(&input);
    args.output = Some(output.to_string_lossy().into_owned());
    args.config = Some(config.to_string_lossy().into_owned());
    run(&args).expect("Run should succeed");

    // The title is verbatim and never folded; every card line is.
    let written = fs::read_to_string(&output).expect("Output should exist");
    for line in written.lines().skip(1) {
        assert!(line.len() <= 16, "line exceeds fold width: {line:?}");
    }
}

#[test]
fn test_invalid_deck_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("deck.inp");
    fs::write(&input, "title\n1 0 -1\n\n1 nosuch 5\n\nnps 10\n").expect("Failed to write deck");

    let result = run(&args(&input));
    assert!(matches!(result, Err(CliError::Inp(_))));
}

#[test]
fn test_bad_config_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("deck.inp");
    let config = dir.path().join("inpdeck.toml");
    fs::write(&input, DECK).expect("Failed to write deck");
    fs::write(&config, "[write\nline_width = 16\n").expect("Failed to write config");

    let mut args = args(&input);
    args.config = Some(config.to_string_lossy().into_owned());
    let result = run(&args);
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_missing_input_is_io_error() {
    let result = run(&args(std::path::Path::new("/nonexistent/deck.inp")));
    assert!(matches!(result, Err(CliError::Inp(_))));
}
