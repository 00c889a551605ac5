// src/system/terminal.rs

use crate::constants::TERMINAL_ENV;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use thiserror::Error;
use uuid::Uuid;

/// Identifies one terminal instance across closure notifications.
pub type TerminalId = Uuid;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Could not start terminal shell '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not send text to terminal '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Terminal '{0}' has already exited.")]
    Exited(String),
}

/// A live terminal that accepts whole command lines.
pub trait Terminal {
    /// Unique id, matched against closure notifications.
    fn id(&self) -> TerminalId;

    /// Display name the terminal was created with.
    fn name(&self) -> &str;

    /// Brings the terminal to the user's attention.
    fn show(&mut self);

    /// Sends one line of text, followed by a newline, verbatim.
    fn send_text(&mut self, line: &str) -> Result<(), TerminalError>;

    /// Whether the terminal's process has already ended.
    fn has_exited(&mut self) -> bool;

    /// Ends input and waits for the terminal to finish what it was sent.
    fn close(&mut self) -> Result<(), TerminalError>;
}

/// Creates terminals on demand.
pub trait TerminalSpawner {
    /// Starts a new terminal called `name`.
    fn create_terminal(&mut self, name: &str) -> Result<Box<dyn Terminal>, TerminalError>;
}

/// Spawns a shell child process per terminal, fed through a stdin pipe.
#[derive(Debug, Clone)]
pub struct ShellSpawner {
    shell: PathBuf,
}

impl ShellSpawner {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl TerminalSpawner for ShellSpawner {
    fn create_terminal(&mut self, name: &str) -> Result<Box<dyn Terminal>, TerminalError> {
        let child = Command::new(&self.shell)
            .env(TERMINAL_ENV, name)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| TerminalError::Spawn {
                shell: self.shell.display().to_string(),
                source: e,
            })?;

        let id = Uuid::new_v4();
        log::debug!(
            "Spawned terminal '{}' ({}) with shell '{}', PID {}",
            name,
            id,
            self.shell.display(),
            child.id()
        );
        Ok(Box::new(ShellTerminal::new(id, name.to_string(), child)))
    }
}

/// A shell process whose stdin is the terminal input.
#[derive(Debug)]
pub struct ShellTerminal {
    id: TerminalId,
    name: String,
    child: Child,
    stdin: Option<ChildStdin>,
    shown: bool,
}

impl ShellTerminal {
    fn new(id: TerminalId, name: String, mut child: Child) -> Self {
        let stdin = child.stdin.take();
        Self {
            id,
            name,
            child,
            stdin,
            shown: false,
        }
    }
}

impl Terminal for ShellTerminal {
    fn id(&self) -> TerminalId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn show(&mut self) {
        if !self.shown {
            println!("{}", format!("--- {} ---", self.name).dimmed());
            self.shown = true;
        }
    }

    fn send_text(&mut self, line: &str) -> Result<(), TerminalError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| TerminalError::Exited(self.name.clone()))?;
        log::debug!("Terminal '{}' <- {}", self.name, line);
        writeln!(stdin, "{}", line)
            .and_then(|_| stdin.flush())
            .map_err(|e| TerminalError::Write {
                name: self.name.clone(),
                source: e,
            })
    }

    fn has_exited(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("Terminal '{}' exited with {}", self.name, status);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Could not query terminal '{}': {}", self.name, e);
                true
            }
        }
    }

    fn close(&mut self) -> Result<(), TerminalError> {
        // Dropping stdin delivers EOF, so the shell exits after the queued lines.
        self.stdin.take();
        let status = self.child.wait().map_err(|e| TerminalError::Write {
            name: self.name.clone(),
            source: e,
        })?;
        if !status.success() {
            log::warn!("Terminal '{}' exited with code: {:?}", self.name, status.code());
        }
        Ok(())
    }
}

impl Drop for ShellTerminal {
    fn drop(&mut self) {
        self.stdin.take();
    }
}
