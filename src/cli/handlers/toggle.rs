// src/cli/handlers/toggle.rs

use anyhow::{Result, anyhow};

use crate::cli::App;

fn reject_arguments(action: &str, args: &[String]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            t!("toggle.error.unexpected_args"),
            action = action,
            args = args.join(" ")
        ))
    }
}

/// Entry point for the 'sudo' action.
pub fn handle_sudo(args: Vec<String>, app: &mut App) -> Result<()> {
    reject_arguments("sudo", &args)?;
    app.controller.toggle_sudo();
    Ok(())
}

/// Entry point for the 'clear' action.
pub fn handle_clear(args: Vec<String>, app: &mut App) -> Result<()> {
    reject_arguments("clear", &args)?;
    app.controller.toggle_clear();
    Ok(())
}
