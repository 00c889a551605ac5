// src/models.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_STATE_FILENAME, DEFAULT_TERMINAL_NAME};

// --- ARGUMENT CACHE MODELS ---

/// Remembered invocation arguments for one script file.
///
/// `args` may be empty: that means the arguments were explicitly cleared,
/// which is a different state from having no entry at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArgumentEntry {
    pub args: String,
    /// Milliseconds since the Unix epoch of the last write (never touched by reads).
    #[serde(rename = "lastUsed")]
    pub last_used: u64,
}

// --- SESSION MODELS ---

/// Process-wide toggles, persisted independently of the argument cache.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlags {
    pub sudo_mode: bool,
    pub clear_before_run: bool,
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self {
            sudo_mode: false,
            clear_before_run: true,
        }
    }
}

/// The document currently focused in the editor surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub path: PathBuf,
    pub is_dirty: bool,
}

// --- CONFIG MODELS (FOR TOML) ---

/// User configuration loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Shell used to host the reusable terminal. `~` and env vars are expanded.
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default = "default_terminal_name")]
    pub terminal_name: String,
    /// State file name or path, relative to the config directory.
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            terminal_name: default_terminal_name(),
            state_file: default_state_file(),
        }
    }
}

fn default_shell() -> String {
    if cfg!(target_os = "windows") {
        "cmd".to_string()
    } else {
        "bash".to_string()
    }
}

fn default_terminal_name() -> String {
    DEFAULT_TERMINAL_NAME.to_string()
}

fn default_state_file() -> String {
    DEFAULT_STATE_FILENAME.to_string()
}
