// src/cli/handlers/commons.rs

// Shared wiring used by the binary and the handlers.

use anyhow::{Context, Result};

use crate::{
    cli::App,
    core::{config_loader, controller::{Host, SessionController}, paths},
    system::{
        editor::FileEditor,
        fs::OsFilesystem,
        prompt::{ContextIndicators, DialoguerPrompter},
        store::BincodeFileStore,
        terminal::ShellSpawner,
    },
};

/// Loads the configuration and connects the controller to the real host:
/// a shell terminal, dialoguer prompts, the OS filesystem and the state file.
pub fn build_app(assume_yes: bool) -> Result<App> {
    let config = config_loader::load_config().context(t!("commons.error.config_failed"))?;
    let config_dir = paths::get_config_dir()?;
    let state_path = paths::resolve_state_path(&config_dir, &config.state_file)?;
    let shell = config_loader::shell_program(&config)?;
    log::debug!(
        "Using shell '{}', state file '{}'",
        shell.display(),
        state_path.display()
    );

    let indicators = ContextIndicators::new();
    let host = Host {
        editor: Box::new(FileEditor::new(None)),
        terminals: Box::new(ShellSpawner::new(shell)),
        prompts: Box::new(DialoguerPrompter::new().assume_yes(assume_yes)),
        fs: Box::new(OsFilesystem),
        ui: Box::new(indicators.clone()),
        store: Box::new(BincodeFileStore::open(state_path)),
    };

    Ok(App {
        controller: SessionController::start(host, config.terminal_name),
        indicators,
    })
}
