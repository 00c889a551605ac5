// src/cli/mod.rs

use clap::Parser;

use crate::core::controller::SessionController;
use crate::system::prompt::ContextIndicators;

pub mod dispatcher;
pub mod handlers;

/// Builds the color-aware full help string at runtime.
fn build_help_string() -> &'static str {
    // Replaces semantic placeholders like `<title>` with styles, or with nothing when colors are off.
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    // 1. Take the translated template for the active language.
    let template = t!("cli.help.template");

    // 2. Pick the escape codes for each placeholder.

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    // 3. Substitute every opening and closing tag.
    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    // clap needs a 'static str; this runs once per process.
    Box::leak(formatted_string.into_boxed_str())
}

/// shrun: run the script you are working on, the way you ran it last time.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Answer "Yes" to confirmations (e.g. `chmod`). Goes before the action.
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// The action and its arguments, or a script path as a shortcut for `run`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Everything a command handler works with: the controller and the UI
/// context indicators it publishes to.
#[derive(Debug)]
pub struct App {
    pub controller: SessionController,
    pub indicators: ContextIndicators,
}
