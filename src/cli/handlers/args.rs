// src/cli/handlers/args.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::cli::App;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct ArgsArgs {
    /// The script whose arguments to set. Defaults to the active file.
    file: Option<PathBuf>,

    /// Store this text without prompting. An empty string clears the arguments.
    #[arg(long, allow_hyphen_values = true)]
    set: Option<String>,
}

/// Entry point for the 'args' action.
pub fn handle(args: Vec<String>, app: &mut App) -> Result<()> {
    // 1. Parse args.
    let args_args = ArgsArgs::try_parse_from(&args)?;

    // 2. Focus the requested script, if any.
    if let Some(file) = &args_args.file {
        app.controller.open(file);
    }

    // 3. Store the given text, or ask for it.
    let outcome = match &args_args.set {
        Some(text) => app.controller.set_args_to(text)?,
        None => app.controller.set_args()?,
    };
    log::debug!("args outcome: {:?}", outcome);
    Ok(())
}
