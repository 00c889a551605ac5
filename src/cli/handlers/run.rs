// src/cli/handlers/run.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::cli::App;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct RunArgs {
    /// The script to run. Defaults to the active file.
    file: Option<PathBuf>,

    /// Replace the remembered arguments for this script before running.
    #[arg(long, allow_hyphen_values = true)]
    args: Option<String>,
}

/// Entry point for the 'run' action.
pub fn handle(args: Vec<String>, app: &mut App) -> Result<()> {
    // 1. Parse args.
    let run_args = RunArgs::try_parse_from(&args)?;

    // 2. Focus the requested script, if any.
    if let Some(file) = &run_args.file {
        app.controller.open(file);
    }

    // 3. Run it. Inline arguments are only remembered once the script is known to exist.
    match &run_args.args {
        Some(text) => app.controller.run_with_args(text)?,
        None => app.controller.run()?,
    }
    Ok(())
}
