// src/cli/handlers/chmod.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::cli::App;
use crate::core::controller::ChmodOutcome;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct ChmodArgs {
    /// The script to make executable. Defaults to the active file.
    file: Option<PathBuf>,

    /// Do not ask for confirmation.
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Entry point for the 'chmod' action.
pub fn handle(args: Vec<String>, app: &mut App) -> Result<()> {
    // 1. Parse args.
    let chmod_args = ChmodArgs::try_parse_from(&args)?;

    // 2. Focus the requested script, if any.
    if let Some(file) = &chmod_args.file {
        app.controller.open(file);
    }

    // 3. `--yes` skips the confirmation.
    let outcome: ChmodOutcome = if chmod_args.yes {
        app.controller.make_executable_confirmed()?
    } else {
        app.controller.make_executable()?
    };
    log::debug!("chmod outcome: {:?}", outcome);
    Ok(())
}
