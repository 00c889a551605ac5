// src/bin/shrun.rs

use clap::Parser;
use colored::*;
use shrun::cli::{Cli, dispatcher, handlers::commons};

/// The main entry point of the `shrun` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();
    let code = run_cli(Cli::parse());
    std::process::exit(code);
}

/// Runs one invocation and returns its exit code. The terminal is drained
/// before returning, so everything that was sent to it gets executed.
fn run_cli(cli: Cli) -> i32 {
    log::debug!("CLI args parsed: {:?}", cli);

    let app = match commons::build_app(cli.assume_yes) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            return 1;
        }
    };

    let mut app = scopeguard::guard(app, |mut app| {
        if let Err(e) = app.controller.shutdown() {
            log::warn!("Terminal did not shut down cleanly: {}", e);
        }
    });

    match dispatcher::dispatch(cli.args, &mut app) {
        Ok(()) => 0,
        Err(e) => {
            app.controller.report_error(&e.to_string());
            1
        }
    }
}
