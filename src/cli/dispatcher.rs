// src/cli/dispatcher.rs

use anyhow::Result;

use crate::cli::{App, handlers};

/// A user-facing action, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut App) -> Result<()>,
}

/// The single source of truth for all actions.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "run",
        aliases: &["r"],
        handler: handlers::run::handle,
    },
    CommandDefinition {
        name: "args",
        aliases: &["set-args", "setArguments"],
        handler: handlers::args::handle,
    },
    CommandDefinition {
        name: "sudo",
        aliases: &["toggle-sudo", "toggleSudoMode"],
        handler: handlers::toggle::handle_sudo,
    },
    CommandDefinition {
        name: "clear",
        aliases: &["toggle-clear", "toggleClearTerminal"],
        handler: handlers::toggle::handle_clear,
    },
    CommandDefinition {
        name: "chmod",
        aliases: &["make-executable", "makeExecutable"],
        handler: handlers::chmod::handle,
    },
    CommandDefinition {
        name: "recent",
        aliases: &["ls"],
        handler: handlers::recent::handle,
    },
    CommandDefinition {
        name: "session",
        aliases: &["s"],
        handler: handlers::session::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Whether `name` is a known action or alias.
pub fn is_command(name: &str) -> bool {
    find_command(name).is_some()
}

/// Routes `args` to a handler.
///
/// - `shrun <action> [args...]` runs that action.
/// - `shrun <path> [args...]` is a shortcut for `shrun run <path> [args...]`.
pub fn dispatch(all_args: Vec<String>, app: &mut App) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(first) = args.next() else {
        println!("{}", t!("cli.info.no_command"));
        return Ok(());
    };

    match find_command(&first) {
        Some(command) => (command.handler)(args.collect(), app),
        None => {
            let mut run_args = vec![first];
            run_args.extend(args);
            handlers::run::handle(run_args, app)
        }
    }
}
