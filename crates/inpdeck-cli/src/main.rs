//! Binary entry point: validate an INP deck, optionally rewrite it.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use inpdeck_cli::{Args, error_adapter::to_reportables};

fn init_logging(requested: &str) {
    let level = LevelFilter::from_str(requested).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {requested}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

/// Renders every diagnostic carried by `err` through miette and exits
/// nonzero.
fn report_and_exit(err: &inpdeck_cli::CliError) -> ! {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        reporter
            .render_report(&mut rendered, &reportable)
            .expect("Writing to String buffer is infallible");
        error!("{rendered}");
    }
    process::exit(1);
}

fn main() {
    // Panic hook first so even argument parsing failures report nicely.
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");
    info!(input:? = args.input; "Reading deck");

    if let Err(err) = inpdeck_cli::run(&args) {
        report_and_exit(&err);
    }

    info!("Completed successfully");
}
