// src/constants.rs

/// The name of the shrun configuration directory (under the system config dir).
pub const CONFIG_DIR_NAME: &str = "shrun";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SHRUN_CONFIG_DIR";

/// The name of the user configuration file (inside the config dir).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Default name of the durable state file (inside the config dir).
pub const DEFAULT_STATE_FILENAME: &str = "state.bin";

/// Default display name of the reusable terminal.
pub const DEFAULT_TERMINAL_NAME: &str = "Shell Runner";

/// Maximum number of files whose arguments are remembered.
pub const MAX_SAVED_ARGS: usize = 6;

/// Owner-execute permission bit.
pub const OWNER_EXECUTE_BIT: u32 = 0o100;

// --- Keys of the durable state store ---

/// The whole remembered-arguments map, persisted as one record.
pub const STATE_KEY_SAVED_ARGS: &str = "savedArgs";
/// Whether runs are prefixed with `sudo`.
pub const STATE_KEY_SUDO_MODE: &str = "sudoMode";
/// Whether the terminal is cleared before each run.
pub const STATE_KEY_CLEAR_MODE: &str = "clearMode";

// --- UI context keys, signalled on every toggle ---

/// Set while sudo mode is on.
pub const CONTEXT_KEY_SUDO_MODE: &str = "shrun.sudoMode";
/// Set while clear-before-run is on.
pub const CONTEXT_KEY_CLEAR_MODE: &str = "shrun.clearMode";

/// Set inside every terminal shrun spawns, holding the terminal's name.
pub const TERMINAL_ENV: &str = "SHRUN_TERMINAL";
