// src/core/controller.rs

use crate::{
    constants::{
        CONTEXT_KEY_CLEAR_MODE, CONTEXT_KEY_SUDO_MODE, OWNER_EXECUTE_BIT, STATE_KEY_CLEAR_MODE,
        STATE_KEY_SUDO_MODE,
    },
    core::{
        arg_cache::ArgumentCache,
        command::{self, compose_command},
    },
    models::{ActiveDocument, SessionFlags},
    state::{self, TerminalState},
    system::{
        editor::Editor,
        fs::Filesystem,
        prompt::{PromptError, Prompter, UiContext},
        store::{StateStore, StoreError},
        terminal::{TerminalError, TerminalId, TerminalSpawner},
    },
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of a user-triggered action, reported at the action's boundary.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// No document is focused.
    #[error("No active file found.")]
    NoActiveFile,
    /// The active document is not on disk.
    #[error("File does not exist: '{}'", .0.display())]
    FileNotFound(PathBuf),
    /// Pending edits could not be saved before running.
    #[error("Could not save '{}': {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading or changing permission bits failed.
    #[error("Failed to make file executable: {source}")]
    PermissionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The durable store rejected a write. Shown as a warning only.
    #[error("Could not persist state: {0}")]
    PersistenceWrite(#[from] StoreError),
    /// The terminal could not be created or written to.
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    /// An interactive prompt failed (not a dismissal).
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// The collaborators a controller talks to.
pub struct Host {
    /// Source of the active document.
    pub editor: Box<dyn Editor>,
    /// Creates the reusable terminal.
    pub terminals: Box<dyn TerminalSpawner>,
    /// Input boxes, confirmations and notifications.
    pub prompts: Box<dyn Prompter>,
    /// Permission bits and existence checks.
    pub fs: Box<dyn Filesystem>,
    /// Receives the toggle states.
    pub ui: Box<dyn UiContext>,
    /// Durable flags and remembered arguments.
    pub store: Box<dyn StateStore>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

/// Result of a "set arguments" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsOutcome {
    /// The prompt was dismissed; nothing changed.
    Dismissed,
    /// Non-blank arguments were stored.
    Set(String),
    /// Blank arguments were stored, so runs get none.
    Cleared,
}

/// Result of a "make executable" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChmodOutcome {
    /// The owner-execute bit was already set; no chmod was made.
    AlreadyExecutable,
    /// The user cancelled or dismissed the confirmation.
    Declined,
    /// The bit was added; `mode` is the new permission mode.
    MadeExecutable { mode: u32 },
}

/// Session state for one runner instance: the persisted toggles, the argument
/// cache and the reusable terminal. Constructed once, then driven by one
/// discrete user action at a time.
#[derive(Debug)]
pub struct SessionController {
    host: Host,
    flags: SessionFlags,
    cache: ArgumentCache,
    terminal: TerminalState,
    terminal_name: String,
}

impl SessionController {
    /// Loads flags and remembered arguments from the host store and publishes
    /// the toggle states to the UI context.
    pub fn start(host: Host, terminal_name: impl Into<String>) -> Self {
        let flags = state::load_flags(host.store.as_ref());
        let cache = ArgumentCache::load(host.store.as_ref());
        log::debug!(
            "Runner started: sudo={}, clear={}, {} remembered argument set(s)",
            flags.sudo_mode,
            flags.clear_before_run,
            cache.len()
        );

        let mut controller = Self {
            host,
            flags,
            cache,
            terminal: TerminalState::default(),
            terminal_name: terminal_name.into(),
        };
        controller.publish_context();
        controller
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn cache(&self) -> &ArgumentCache {
        &self.cache
    }

    /// The active document's path, if any.
    pub fn active_file(&self) -> Option<PathBuf> {
        self.host.editor.active_document().map(|doc| doc.path)
    }

    /// Focuses another file.
    pub fn open(&mut self, path: &Path) {
        self.host.editor.open(path);
    }

    fn publish_context(&mut self) {
        self.host
            .ui
            .set_context(CONTEXT_KEY_SUDO_MODE, self.flags.sudo_mode);
        self.host
            .ui
            .set_context(CONTEXT_KEY_CLEAR_MODE, self.flags.clear_before_run);
    }

    // --- Toggles ---

    pub fn toggle_sudo(&mut self) -> bool {
        self.flags.sudo_mode = !self.flags.sudo_mode;
        let enabled = self.flags.sudo_mode;
        self.persist_flag(STATE_KEY_SUDO_MODE, enabled);
        self.host.ui.set_context(CONTEXT_KEY_SUDO_MODE, enabled);
        self.host
            .prompts
            .info(&format!(t!("toggle.info.sudo"), status = status_word(enabled)));
        enabled
    }

    pub fn toggle_clear(&mut self) -> bool {
        self.flags.clear_before_run = !self.flags.clear_before_run;
        let enabled = self.flags.clear_before_run;
        self.persist_flag(STATE_KEY_CLEAR_MODE, enabled);
        self.host.ui.set_context(CONTEXT_KEY_CLEAR_MODE, enabled);
        self.host
            .prompts
            .info(&format!(t!("toggle.info.clear"), status = status_word(enabled)));
        enabled
    }

    fn persist_flag(&mut self, key: &str, value: bool) {
        if let Err(e) = state::save_flag(self.host.store.as_mut(), key, value) {
            self.warn_unpersisted(e);
        }
    }

    /// Persistence failures never undo the in-memory change.
    fn warn_unpersisted(&mut self, error: StoreError) {
        log::warn!("State not persisted: {}", error);
        let message = RunnerError::PersistenceWrite(error).to_string();
        self.host.prompts.warn(&message);
    }

    // --- Run ---

    /// Runs the active file in the reusable terminal.
    pub fn run(&mut self) -> Result<(), RunnerError> {
        let doc = self.runnable_document()?;
        self.launch(&doc.path)
    }

    /// Remembers `text` as the active file's arguments, then runs it.
    /// Nothing is remembered when the file cannot be run.
    pub fn run_with_args(&mut self, text: &str) -> Result<(), RunnerError> {
        let doc = self.runnable_document()?;
        self.remember(&file_key(&doc.path), text);
        self.launch(&doc.path)
    }

    /// The active document, saved and confirmed to exist on disk.
    fn runnable_document(&mut self) -> Result<ActiveDocument, RunnerError> {
        // 1. There must be something to run.
        let doc = self.require_active()?;

        // 2. Pending edits go to disk first, so the shell runs what the user sees.
        if doc.is_dirty {
            self.host
                .editor
                .save_active()
                .map_err(|e| RunnerError::SaveFailed {
                    path: doc.path.clone(),
                    source: e,
                })?;
        }

        // 3. The file may still vanish before the shell reads the line; the shell reports that.
        if !self.host.fs.exists(&doc.path) {
            return Err(RunnerError::FileNotFound(doc.path));
        }
        Ok(doc)
    }

    fn launch(&mut self, path: &Path) -> Result<(), RunnerError> {
        let key = file_key(path);
        let lines = compose_command(self.flags, path, self.cache.get(&key));
        log::debug!("Running '{}': {:?}", key, lines);

        // Reuse the live terminal, or replace one that has exited.
        let terminal = self
            .terminal
            .acquire(self.host.terminals.as_mut(), &self.terminal_name)?;
        terminal.show();
        for line in &lines {
            terminal.send_text(line)?;
        }
        Ok(())
    }

    // --- Arguments ---

    /// Prompts for the active file's arguments, pre-filled with the remembered value.
    pub fn set_args(&mut self) -> Result<ArgsOutcome, RunnerError> {
        let doc = self.require_active()?;
        let key = file_key(&doc.path);
        let current = self.cache.get(&key).unwrap_or_default().to_string();

        let entered = self.host.prompts.input(
            t!("args.prompt.enter"),
            &current,
            t!("args.prompt.placeholder"),
        )?;
        match entered {
            Some(text) => Ok(self.remember(&key, &text)),
            None => {
                log::debug!("Argument prompt dismissed for '{}'", key);
                Ok(ArgsOutcome::Dismissed)
            }
        }
    }

    /// Stores `text` as the active file's arguments without prompting.
    pub fn set_args_to(&mut self, text: &str) -> Result<ArgsOutcome, RunnerError> {
        let doc = self.require_active()?;
        Ok(self.remember(&file_key(&doc.path), text))
    }

    fn remember(&mut self, key: &str, text: &str) -> ArgsOutcome {
        if !command::args_are_well_formed(text) {
            self.host.prompts.warn(t!("args.warn.unbalanced_quotes"));
        }

        self.cache.set(key, text);
        if let Err(e) = self.cache.save(self.host.store.as_mut()) {
            self.warn_unpersisted(e);
        }

        if text.trim().is_empty() {
            self.host.prompts.info(t!("args.info.cleared"));
            ArgsOutcome::Cleared
        } else {
            self.host
                .prompts
                .info(&format!(t!("args.info.set"), args = text));
            ArgsOutcome::Set(text.to_string())
        }
    }

    // --- Permissions ---

    /// Sets the owner-execute bit on the active file after confirmation.
    pub fn make_executable(&mut self) -> Result<ChmodOutcome, RunnerError> {
        self.chmod_active(false)
    }

    /// Same as [`Self::make_executable`], without asking first.
    pub fn make_executable_confirmed(&mut self) -> Result<ChmodOutcome, RunnerError> {
        self.chmod_active(true)
    }

    fn chmod_active(&mut self, confirmed: bool) -> Result<ChmodOutcome, RunnerError> {
        let doc = self.require_active()?;
        let path = doc.path;
        let name = display_name(&path);

        let mode = self
            .host
            .fs
            .mode(&path)
            .map_err(|e| RunnerError::PermissionIo {
                path: path.clone(),
                source: e,
            })?;

        if mode & OWNER_EXECUTE_BIT != 0 {
            self.host
                .prompts
                .info(&format!(t!("chmod.info.already_executable"), name = name));
            return Ok(ChmodOutcome::AlreadyExecutable);
        }

        if !confirmed {
            let choice = self.host.prompts.choose(
                t!("chmod.prompt.confirm"),
                &[t!("chmod.choice.yes"), t!("chmod.choice.cancel")],
            )?;
            if choice.as_deref() != Some(t!("chmod.choice.yes")) {
                log::debug!("chmod of '{}' declined", path.display());
                return Ok(ChmodOutcome::Declined);
            }
        }

        let new_mode = mode | OWNER_EXECUTE_BIT;
        self.host
            .fs
            .set_mode(&path, new_mode)
            .map_err(|e| RunnerError::PermissionIo {
                path: path.clone(),
                source: e,
            })?;
        log::debug!("'{}' mode {:o} -> {:o}", path.display(), mode, new_mode);

        self.host
            .prompts
            .info(&format!(t!("chmod.info.made_executable"), name = name));
        Ok(ChmodOutcome::MadeExecutable { mode: new_mode })
    }

    // --- Terminal lifecycle ---

    /// Host notification that a terminal was closed.
    pub fn on_terminal_closed(&mut self, id: TerminalId) {
        self.terminal.on_closed(id);
    }

    /// Checks whether the held terminal has exited and, if so, delivers the
    /// closure notification. Returns whether a terminal was released.
    pub fn poll_terminal(&mut self) -> bool {
        match self.terminal.exited_id() {
            Some(id) => self.terminal.on_closed(id),
            None => false,
        }
    }

    /// Whether a terminal is currently held.
    pub fn has_terminal(&self) -> bool {
        self.terminal.active_id().is_some()
    }

    /// Ends the held terminal's input and waits for it to drain.
    pub fn shutdown(&mut self) -> Result<(), RunnerError> {
        self.terminal.shutdown().map_err(RunnerError::from)
    }

    /// Shows an action's failure to the user.
    pub fn report_error(&mut self, message: &str) {
        self.host.prompts.error(message);
    }

    fn require_active(&self) -> Result<ActiveDocument, RunnerError> {
        self.host
            .editor
            .active_document()
            .ok_or(RunnerError::NoActiveFile)
    }
}

/// Cache key for a file: its path as a string.
///
/// Paths that are not valid UTF-8 are converted lossily, so two such paths
/// differing only in their invalid bytes share one remembered-arguments entry.
pub fn file_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn status_word(enabled: bool) -> &'static str {
    if enabled {
        t!("toggle.status.enabled")
    } else {
        t!("toggle.status.disabled")
    }
}
